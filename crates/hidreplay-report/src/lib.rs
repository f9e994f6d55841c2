//! Report sources and record parsing for captured USB HID traffic
//!
//! A capture is consumed as an ordered stream of text records, one per
//! observed HID transfer. Each record is either a hex string holding the raw
//! report bytes or a sentinel meaning "no capture data for this sample".
//! This crate turns those text records into bytes that the keyboard and
//! pointer decoders can interpret.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod record;
pub mod report_parser;
pub mod source;

pub use record::*;
pub use report_parser::*;
pub use source::*;

use thiserror::Error;

/// Default "no data" sentinel written by capture field exports.
pub const DEFAULT_SENTINEL: &str = "0";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Hex record has odd length ({len} digits)")]
    OddHexLength { len: usize },

    #[error("Invalid hex digit pair at byte {index}")]
    InvalidHex { index: usize },

    #[error("Record carries no capture data")]
    NoData,

    #[error("Invalid report size: expected {expected}, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("Report too short: need at least {minimum} bytes, got {actual}")]
    TooShort { minimum: usize, actual: usize },

    #[error("Unexpected end of report data")]
    UnexpectedEnd,

    #[error("Invalid capture entry on line {line}: {message}")]
    Capture { line: usize, message: String },

    #[error("Invalid stride: {0} (must be at least 1)")]
    InvalidStride(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// Whether this error describes a single bad record rather than a
    /// failure of the source itself.
    pub fn is_malformed_record(&self) -> bool {
        !matches!(self, ReportError::Io(_) | ReportError::InvalidStride(_))
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
