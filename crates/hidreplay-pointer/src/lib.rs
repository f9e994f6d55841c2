//! Pointer report stream decoder
//!
//! Reconstructs drawn strokes from a capture of relative USB HID boot mouse
//! reports. Displacements are accumulated from the session origin (0, 0) and
//! every sample taken while the primary button is held becomes a point of the
//! current stroke.
//!
//! The decoder produces plain data for an external renderer and never drops
//! strokes itself; [`render_filter`] is the presentation-side filter.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod decoder;
pub mod report;
pub mod stroke;

pub use decoder::*;
pub use report::*;
pub use stroke::*;

pub use hidreplay_report::{ReportError, ReportResult};

/// Button byte, X and Y displacement.
pub const MOUSE_REPORT_MIN_LEN: usize = 3;

pub const BUTTON_PRIMARY: u8 = 0x01;

/// Strokes with fewer points than this are not drawn by default.
pub const DEFAULT_MIN_RENDER_POINTS: usize = 2;

