//! HID report field reader

use crate::{ReportError, ReportResult};

/// Sequential reader over the bytes of one report.
pub struct ReportParser<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> ReportParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            buffer: data,
            position: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn read_u8(&mut self) -> ReportResult<u8> {
        let value = self.peek_u8()?;
        self.position += 1;
        Ok(value)
    }

    /// Read one byte as a two's-complement signed value.
    pub fn read_i8(&mut self) -> ReportResult<i8> {
        Ok(i8::from_ne_bytes([self.read_u8()?]))
    }

    pub fn peek_u8(&self) -> ReportResult<u8> {
        self.buffer
            .get(self.position)
            .copied()
            .ok_or(ReportError::UnexpectedEnd)
    }

    pub fn skip(&mut self, count: usize) {
        self.position = self.position.saturating_add(count).min(self.buffer.len());
    }
}
