//! Boot mouse report parsing

use crate::{BUTTON_PRIMARY, MOUSE_REPORT_MIN_LEN};
use hidreplay_report::{ReportError, ReportParser, ReportResult};

/// Relative mouse report. Bytes past the Y displacement (wheel, vendor
/// data) are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseReport {
    pub buttons: u8,
    pub dx: i8,
    pub dy: i8,
}

impl MouseReport {
    pub fn parse(data: &[u8]) -> ReportResult<Self> {
        if data.len() < MOUSE_REPORT_MIN_LEN {
            return Err(ReportError::TooShort {
                minimum: MOUSE_REPORT_MIN_LEN,
                actual: data.len(),
            });
        }

        let mut parser = ReportParser::new(data);
        Ok(Self {
            buttons: parser.read_u8()?,
            dx: parser.read_i8()?,
            dy: parser.read_i8()?,
        })
    }

    pub fn primary_pressed(&self) -> bool {
        self.buttons & BUTTON_PRIMARY != 0
    }
}
