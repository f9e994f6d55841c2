//! Report sources
//!
//! A report source is a blocking, ordered pull of text records. Sources never
//! reorder or look ahead; a caller cancels a decode session simply by not
//! pulling any further records.

use crate::{ReportError, ReportResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use tracing::debug;

/// Ordered stream of text records, one per observed HID transfer.
pub trait ReportSource {
    /// Pull the next record. `None` ends the stream; `Some(Err(_))` reports a
    /// failure for this pull only, unless it is an I/O error.
    fn next_record(&mut self) -> Option<ReportResult<String>>;
}

impl<S: ReportSource + ?Sized> ReportSource for Box<S> {
    fn next_record(&mut self) -> Option<ReportResult<String>> {
        (**self).next_record()
    }
}

/// Adapts any iterator of strings into a [`ReportSource`].
pub struct IterSource<I> {
    inner: I,
}

impl<I> IterSource<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<I, T> ReportSource for IterSource<I>
where
    I: Iterator<Item = T>,
    T: Into<String>,
{
    fn next_record(&mut self) -> Option<ReportResult<String>> {
        self.inner.next().map(|record| Ok(record.into()))
    }
}

/// One record per text line, as written by a capture field export.
///
/// `stride` keeps line 1, 1 + stride, 1 + 2 * stride, ... by position in the
/// input, for exports that print an extra line after every data line. Blank
/// lines are never records.
pub struct LineSource<R> {
    lines: Lines<R>,
    stride: usize,
    line_no: usize,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            stride: 1,
            line_no: 0,
        }
    }

    pub fn with_stride(reader: R, stride: usize) -> ReportResult<Self> {
        if stride == 0 {
            return Err(ReportError::InvalidStride(stride));
        }
        Ok(Self {
            stride,
            ..Self::new(reader)
        })
    }
}

impl<R: BufRead> ReportSource for LineSource<R> {
    fn next_record(&mut self) -> Option<ReportResult<String>> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(ReportError::Io(e))),
            };
            let position = self.line_no;
            self.line_no += 1;

            if !position.is_multiple_of(self.stride) || line.trim().is_empty() {
                continue;
            }
            return Some(Ok(line));
        }
    }
}

/// A single captured HID input report as stored in a JSON Lines capture file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedReport {
    /// Timestamp in nanoseconds (Unix epoch).
    pub ts_ns: u64,
    /// Vendor ID as hex string (e.g. `"0x046D"`).
    pub vid: String,
    /// Product ID as hex string (e.g. `"0xC077"`).
    pub pid: String,
    /// Report bytes as hex string (e.g. `"0102030405"`).
    pub report: String,
}

/// Parse a single JSON Line into a [`CapturedReport`].
pub fn parse_capture_line(line: &str, line_no: usize) -> ReportResult<CapturedReport> {
    serde_json::from_str(line).map_err(|e| ReportError::Capture {
        line: line_no,
        message: e.to_string(),
    })
}

/// Reads the `report` field out of a JSON Lines capture.
pub struct JsonLinesSource<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> ReportSource for JsonLinesSource<R> {
    fn next_record(&mut self) -> Option<ReportResult<String>> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(ReportError::Io(e))),
            };
            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }
            return Some(match parse_capture_line(&line, self.line_no) {
                Ok(entry) => Ok(entry.report),
                Err(e) => {
                    debug!(line = self.line_no, error = %e, "unparseable capture entry");
                    Err(e)
                }
            });
        }
    }
}

/// On-disk layout of a report source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// One hex record (or sentinel) per line.
    #[default]
    Lines,
    /// JSON Lines capture entries with a `report` field.
    JsonLines,
}

/// Open a buffered report source over a file.
pub fn open_source(
    path: &Path,
    format: SourceFormat,
    stride: usize,
) -> ReportResult<Box<dyn ReportSource>> {
    let reader = BufReader::new(File::open(path)?);
    debug!(path = %path.display(), ?format, stride, "opened report source");
    let source: Box<dyn ReportSource> = match format {
        SourceFormat::Lines => Box::new(LineSource::with_stride(reader, stride)?),
        SourceFormat::JsonLines => Box::new(JsonLinesSource::new(reader)),
    };
    Ok(source)
}
