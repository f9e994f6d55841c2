//! Keyboard report stream decoder
//!
//! Reconstructs typed text from a capture of 8-byte USB HID boot keyboard
//! reports. Only the primary keycode slot is interpreted; the remaining
//! rollover slots are present in the format but not read.
//!
//! ## Features
//! - Repeat-frame debounce on the primary keycode
//! - Shift handling for both physical shift keys
//! - US-ASCII printable usage table with shift substitutions
//! - Backspace applied to the session buffer
//! - Malformed records counted and skipped

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod decoder;
pub mod report;
pub mod usage;

pub use decoder::*;
pub use report::*;
pub use usage::*;

pub use hidreplay_report::{ReportError, ReportResult};

pub const KEYBOARD_REPORT_SIZE: usize = 8;
pub const KEYCODE_OFFSET: usize = 2;

/// Keycode reported when no key is held.
pub const KEYCODE_NONE: u8 = 0x00;

