//! Pointer decode session

use crate::report::MouseReport;
use crate::stroke::{Point, Stroke};
use hidreplay_report::{DEFAULT_SENTINEL, RawRecord, ReportResult, ReportSource};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Aggregate diagnostics for one pointer session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerStats {
    /// Samples applied to the position.
    pub samples: u64,
    /// Sentinel, short or undecodable records.
    pub skipped: u64,
    /// Samples taken with the primary button held.
    pub pressed_samples: u64,
}

/// Result of draining a whole report source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerSession {
    pub strokes: Vec<Stroke>,
    pub stats: PointerStats,
}

/// Stateful decoder for one stream of relative mouse reports.
#[derive(Debug, Clone)]
pub struct PointerDecoder {
    sentinel: String,
    position: Point,
    current: Stroke,
    strokes: Vec<Stroke>,
    stats: PointerStats,
}

impl Default for PointerDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerDecoder {
    pub fn new() -> Self {
        Self::with_sentinel(DEFAULT_SENTINEL)
    }

    pub fn with_sentinel(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
            position: Point::ORIGIN,
            current: Stroke::new(),
            strokes: Vec::new(),
            stats: PointerStats::default(),
        }
    }

    /// Decode one text record (hex or sentinel).
    ///
    /// Sentinel and short records are skipped entirely: the position does
    /// not move and an open stroke stays open.
    pub fn feed(&mut self, record: &str) -> ReportResult<()> {
        let parsed = RawRecord::parse(record, &self.sentinel)
            .and_then(RawRecord::into_bytes)
            .and_then(|bytes| MouseReport::parse(&bytes));
        self.process(parsed)
    }

    pub fn feed_bytes(&mut self, data: &[u8]) -> ReportResult<()> {
        self.process(MouseReport::parse(data))
    }

    fn process(&mut self, parsed: ReportResult<MouseReport>) -> ReportResult<()> {
        match parsed {
            Ok(report) => {
                self.apply(report);
                Ok(())
            }
            Err(e) => {
                self.stats.skipped += 1;
                debug!(position = ?self.position, error = %e, "skipping pointer record");
                Err(e)
            }
        }
    }

    /// Apply one decoded sample.
    pub fn apply(&mut self, report: MouseReport) {
        self.stats.samples += 1;
        self.position = self.position.offset(report.dx, report.dy);

        if report.primary_pressed() {
            self.stats.pressed_samples += 1;
            self.current.push(self.position);
        } else {
            self.close_stroke();
        }
    }

    fn close_stroke(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let stroke = std::mem::take(&mut self.current);
        trace!(points = stroke.len(), index = self.strokes.len(), "stroke closed");
        self.strokes.push(stroke);
    }

    /// Drain `source` to its end and close any open stroke.
    ///
    /// Bad records are counted and skipped. Only an I/O failure of the
    /// source ends the session early.
    pub fn decode_source<S: ReportSource>(mut self, mut source: S) -> ReportResult<PointerSession> {
        while let Some(record) = source.next_record() {
            match record {
                Ok(line) => {
                    let _outcome = self.feed(&line);
                }
                Err(e) if e.is_malformed_record() => {
                    self.stats.skipped += 1;
                    debug!(error = %e, "skipping unreadable record");
                }
                Err(e) => return Err(e),
            }
        }

        let (strokes, stats) = self.finalize_with_stats();
        info!(
            strokes = strokes.len(),
            samples = stats.samples,
            pressed = stats.pressed_samples,
            skipped = stats.skipped,
            "pointer session complete"
        );
        Ok(PointerSession { strokes, stats })
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Stroke still open because the button is held.
    pub fn current_stroke(&self) -> &Stroke {
        &self.current
    }

    /// Strokes completed so far, in the order they closed.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn stats(&self) -> PointerStats {
        self.stats
    }

    /// End the session, closing a stroke held through the last sample.
    pub fn finalize(self) -> Vec<Stroke> {
        self.finalize_with_stats().0
    }

    pub fn finalize_with_stats(mut self) -> (Vec<Stroke>, PointerStats) {
        self.close_stroke();
        (self.strokes, self.stats)
    }
}
