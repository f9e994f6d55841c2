//! Boot keyboard report parsing

use crate::{KEYBOARD_REPORT_SIZE, KEYCODE_OFFSET};
use bitflags::bitflags;
use hidreplay_report::{ReportError, ReportParser, ReportResult};

bitflags! {
    /// Modifier byte of a boot keyboard report.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const LEFT_CTRL   = 0x01;
        const LEFT_SHIFT  = 0x02;
        const LEFT_ALT    = 0x04;
        const LEFT_GUI    = 0x08;
        const RIGHT_CTRL  = 0x10;
        const RIGHT_SHIFT = 0x20;
        const RIGHT_ALT   = 0x40;
        const RIGHT_GUI   = 0x80;
    }
}

impl Modifiers {
    /// Either physical shift key is held.
    pub fn shift(self) -> bool {
        self.intersects(Modifiers::LEFT_SHIFT | Modifiers::RIGHT_SHIFT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardReport {
    pub modifiers: Modifiers,
    pub keycode: u8,
}

impl KeyboardReport {
    /// Parse an 8-byte boot keyboard report. Byte 1 is reserved and bytes
    /// 3..8 (extra rollover slots) are not read.
    pub fn parse(data: &[u8]) -> ReportResult<Self> {
        if data.len() != KEYBOARD_REPORT_SIZE {
            return Err(ReportError::WrongLength {
                expected: KEYBOARD_REPORT_SIZE,
                actual: data.len(),
            });
        }

        let mut parser = ReportParser::new(data);
        let modifiers = Modifiers::from_bits_retain(parser.read_u8()?);
        parser.skip(KEYCODE_OFFSET - 1);
        let keycode = parser.read_u8()?;

        Ok(Self { modifiers, keycode })
    }
}
