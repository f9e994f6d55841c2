//! Keyboard decode session

use crate::report::KeyboardReport;
use crate::usage::{Usage, apply_shift, usage_for};
use crate::KEYCODE_NONE;
use hidreplay_report::{DEFAULT_SENTINEL, RawRecord, ReportResult, ReportSource};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Effect of one keyboard report on the reconstructed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// Nothing typed: key release, repeat frame or unmapped key.
    None,
    Append(char),
    /// Remove the last character, if any.
    Backspace,
}

impl Emission {
    /// Apply this emission to an external text buffer.
    pub fn apply(self, buffer: &mut String) {
        match self {
            Emission::None => {}
            Emission::Append(ch) => buffer.push(ch),
            Emission::Backspace => {
                buffer.pop();
            }
        }
    }
}

/// Aggregate diagnostics for one keyboard session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardStats {
    /// Records fed, malformed ones included.
    pub reports: u64,
    pub malformed: u64,
    /// Nonzero keycodes suppressed as repeat frames.
    pub debounced: u64,
    pub unmapped: u64,
    pub appended: u64,
    pub backspaces: u64,
}

/// Result of draining a whole report source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardSession {
    pub text: String,
    pub stats: KeyboardStats,
}

/// Stateful decoder for one stream of boot keyboard reports.
///
/// Each session owns its text buffer; nothing is shared between sessions.
#[derive(Debug, Clone)]
pub struct KeyboardDecoder {
    sentinel: String,
    last_keycode: u8,
    buffer: String,
    stats: KeyboardStats,
}

impl Default for KeyboardDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardDecoder {
    pub fn new() -> Self {
        Self::with_sentinel(DEFAULT_SENTINEL)
    }

    pub fn with_sentinel(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
            last_keycode: KEYCODE_NONE,
            buffer: String::new(),
            stats: KeyboardStats::default(),
        }
    }

    /// Decode one text record (hex or sentinel).
    ///
    /// A malformed record returns its error and leaves the decoder state
    /// untouched apart from the malformed counter.
    pub fn feed(&mut self, record: &str) -> ReportResult<Emission> {
        self.stats.reports += 1;
        let parsed = RawRecord::parse(record, &self.sentinel)
            .and_then(RawRecord::into_bytes)
            .and_then(|bytes| KeyboardReport::parse(&bytes));
        self.process(parsed)
    }

    /// Decode one report already in binary form.
    pub fn feed_bytes(&mut self, data: &[u8]) -> ReportResult<Emission> {
        self.stats.reports += 1;
        self.process(KeyboardReport::parse(data))
    }

    fn process(&mut self, parsed: ReportResult<KeyboardReport>) -> ReportResult<Emission> {
        let report = match parsed {
            Ok(report) => report,
            Err(e) => {
                self.stats.malformed += 1;
                debug!(record = self.stats.reports, error = %e, "skipping malformed keyboard record");
                return Err(e);
            }
        };

        let emission = self.step(report);
        emission.apply(&mut self.buffer);
        Ok(emission)
    }

    fn step(&mut self, report: KeyboardReport) -> Emission {
        let keycode = report.keycode;

        if keycode == KEYCODE_NONE || keycode == self.last_keycode {
            if keycode != KEYCODE_NONE {
                self.stats.debounced += 1;
            }
            self.last_keycode = keycode;
            return Emission::None;
        }

        // Unmapped keys still arm the debounce.
        self.last_keycode = keycode;

        match usage_for(keycode) {
            None => {
                self.stats.unmapped += 1;
                trace!(keycode, "unmapped keycode");
                Emission::None
            }
            Some(Usage::Backspace) => {
                self.stats.backspaces += 1;
                trace!("backspace");
                Emission::Backspace
            }
            Some(Usage::Char(base)) => {
                self.stats.appended += 1;
                let ch = apply_shift(base, report.modifiers.shift());
                trace!(keycode, ?ch, "append");
                Emission::Append(ch)
            }
        }
    }

    /// Drain `source` to its end.
    ///
    /// Bad records are counted and skipped. Only an I/O failure of the
    /// source ends the session early.
    pub fn decode_source<S: ReportSource>(mut self, mut source: S) -> ReportResult<KeyboardSession> {
        while let Some(record) = source.next_record() {
            match record {
                Ok(line) => {
                    let _outcome = self.feed(&line);
                }
                Err(e) if e.is_malformed_record() => {
                    self.stats.reports += 1;
                    self.stats.malformed += 1;
                    debug!(record = self.stats.reports, error = %e, "skipping unreadable record");
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            reports = self.stats.reports,
            malformed = self.stats.malformed,
            chars = self.buffer.chars().count(),
            "keyboard session complete"
        );
        Ok(KeyboardSession {
            stats: self.stats,
            text: self.finalize(),
        })
    }

    /// Text reconstructed so far.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn last_keycode(&self) -> u8 {
        self.last_keycode
    }

    pub fn stats(&self) -> KeyboardStats {
        self.stats
    }

    /// End the session and return the reconstructed text.
    pub fn finalize(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hidreplay_report::{IterSource, ReportError};

    fn key(modifiers: u8, keycode: u8) -> [u8; 8] {
        [modifiers, 0x00, keycode, 0x00, 0x00, 0x00, 0x00, 0x00]
    }

    #[test]
    fn test_shifted_letter() -> ReportResult<()> {
        let mut decoder = KeyboardDecoder::new();
        assert_eq!(decoder.feed_bytes(&key(0x02, 0x04))?, Emission::Append('A'));
        Ok(())
    }

    #[test]
    fn test_digit_and_shifted_digit() -> ReportResult<()> {
        let mut decoder = KeyboardDecoder::new();
        assert_eq!(decoder.feed_bytes(&key(0x00, 0x1E))?, Emission::Append('1'));
        assert_eq!(decoder.feed_bytes(&key(0x00, 0x00))?, Emission::None);
        assert_eq!(decoder.feed_bytes(&key(0x02, 0x1E))?, Emission::Append('!'));
        assert_eq!(decoder.feed_bytes(&key(0x00, 0x00))?, Emission::None);
        assert_eq!(decoder.feed_bytes(&key(0x20, 0x1E))?, Emission::Append('!'));
        assert_eq!(decoder.text(), "1!!");
        Ok(())
    }

    #[test]
    fn test_repeat_frames_emit_once() -> ReportResult<()> {
        let mut decoder = KeyboardDecoder::new();
        assert_eq!(decoder.feed_bytes(&key(0, 0x0B))?, Emission::Append('h'));
        for _ in 0..4 {
            assert_eq!(decoder.feed_bytes(&key(0, 0x0B))?, Emission::None);
        }
        assert_eq!(decoder.text(), "h");
        assert_eq!(decoder.stats().debounced, 4);
        Ok(())
    }

    #[test]
    fn test_release_rearms_same_key() -> ReportResult<()> {
        let mut decoder = KeyboardDecoder::new();
        decoder.feed_bytes(&key(0, 0x0F))?;
        decoder.feed_bytes(&key(0, 0x00))?;
        decoder.feed_bytes(&key(0, 0x0F))?;
        assert_eq!(decoder.finalize(), "ll");
        Ok(())
    }

    #[test]
    fn test_backspace() -> ReportResult<()> {
        let mut decoder = KeyboardDecoder::new();
        for code in [0x04, 0x05, 0x06] {
            decoder.feed_bytes(&key(0, code))?;
        }
        assert_eq!(decoder.feed_bytes(&key(0, 0x2A))?, Emission::Backspace);
        assert_eq!(decoder.text(), "ab");
        Ok(())
    }

    #[test]
    fn test_backspace_on_empty_buffer() -> ReportResult<()> {
        let mut decoder = KeyboardDecoder::new();
        assert_eq!(decoder.feed_bytes(&key(0, 0x2A))?, Emission::Backspace);
        assert_eq!(decoder.text(), "");
        Ok(())
    }

    #[test]
    fn test_held_backspace_removes_one_char() -> ReportResult<()> {
        let mut decoder = KeyboardDecoder::new();
        decoder.feed_bytes(&key(0, 0x04))?;
        decoder.feed_bytes(&key(0, 0x05))?;
        decoder.feed_bytes(&key(0, 0x2A))?;
        decoder.feed_bytes(&key(0, 0x2A))?;
        assert_eq!(decoder.text(), "a");
        Ok(())
    }

    #[test]
    fn test_malformed_record_leaves_state() -> ReportResult<()> {
        let mut decoder = KeyboardDecoder::new();
        decoder.feed("0000040000000000")?;

        assert!(matches!(decoder.feed("00000400"), Err(ReportError::WrongLength { .. })));
        assert!(matches!(decoder.feed("zz00040000000000"), Err(ReportError::InvalidHex { .. })));
        assert!(matches!(decoder.feed("0"), Err(ReportError::NoData)));

        assert_eq!(decoder.last_keycode(), 0x04);
        // Still a repeat frame of the 'a' seen before the bad records.
        assert_eq!(decoder.feed("0000040000000000")?, Emission::None);
        assert_eq!(decoder.text(), "a");
        assert_eq!(decoder.stats().malformed, 3);
        assert_eq!(decoder.stats().reports, 5);
        Ok(())
    }

    #[test]
    fn test_unmapped_key_then_different_key() -> ReportResult<()> {
        let mut decoder = KeyboardDecoder::new();
        assert_eq!(decoder.feed_bytes(&key(0, 0x39))?, Emission::None);
        assert_eq!(decoder.feed_bytes(&key(0, 0x04))?, Emission::Append('a'));
        assert_eq!(decoder.stats().unmapped, 1);
        Ok(())
    }

    #[test]
    fn test_unmapped_key_arms_debounce() -> ReportResult<()> {
        let mut decoder = KeyboardDecoder::new();
        assert_eq!(decoder.feed_bytes(&key(0, 0x29))?, Emission::None);
        assert_eq!(decoder.last_keycode(), 0x29);
        assert_eq!(decoder.feed_bytes(&key(0, 0x29))?, Emission::None);
        assert_eq!(decoder.stats().unmapped, 1);
        assert_eq!(decoder.stats().debounced, 1);
        Ok(())
    }

    #[test]
    fn test_emission_apply_external_buffer() {
        let mut buffer = String::from("abc");
        Emission::Backspace.apply(&mut buffer);
        assert_eq!(buffer, "ab");
        Emission::Append('!').apply(&mut buffer);
        Emission::None.apply(&mut buffer);
        assert_eq!(buffer, "ab!");

        let mut empty = String::new();
        Emission::Backspace.apply(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_decode_source() -> ReportResult<()> {
        let records = [
            "0000170000000000", // t
            "0000000000000000",
            "0200080000000000", // E
            "0",
            "0000160000000000", // s
            "00001700",
            "0000170000000000", // t
            "0000280000000000", // enter
        ];
        let session = KeyboardDecoder::new().decode_source(IterSource::new(records.into_iter()))?;
        assert_eq!(session.text, "tEst\n");
        assert_eq!(session.stats.reports, 8);
        assert_eq!(session.stats.malformed, 2);
        assert_eq!(session.stats.appended, 5);
        Ok(())
    }

    #[test]
    fn test_custom_sentinel() {
        let mut decoder = KeyboardDecoder::with_sentinel("-");
        assert!(matches!(decoder.feed("-"), Err(ReportError::NoData)));
        // "0" is not the sentinel here, just an odd-length hex record.
        assert!(matches!(decoder.feed("0"), Err(ReportError::OddHexLength { len: 1 })));
    }

    /// Replays a fixed list of pulls, errors included.
    struct ScriptedSource(std::collections::VecDeque<ReportResult<String>>);

    impl ReportSource for ScriptedSource {
        fn next_record(&mut self) -> Option<ReportResult<String>> {
            self.0.pop_front()
        }
    }

    fn capture_error() -> ReportError {
        ReportError::Capture {
            line: 2,
            message: "expected value".to_string(),
        }
    }

    #[test]
    fn test_decode_source_counts_bad_capture_entry() -> ReportResult<()> {
        let source = ScriptedSource(
            [
                Ok("0000170000000000".to_string()), // t
                Err(capture_error()),
                Ok("0000000000000000".to_string()),
                Ok("00000c0000000000".to_string()), // i
            ]
            .into(),
        );
        let session = KeyboardDecoder::new().decode_source(source)?;
        assert_eq!(session.text, "ti");
        assert_eq!(session.stats.reports, 4);
        assert_eq!(session.stats.malformed, 1);
        Ok(())
    }

    #[test]
    fn test_decode_source_io_error_ends_session() {
        let source = ScriptedSource(
            [
                Ok("0000170000000000".to_string()),
                Err(capture_error()),
                Err(ReportError::Io(std::io::Error::other("device unplugged"))),
                Ok("00000c0000000000".to_string()),
            ]
            .into(),
        );
        let result = KeyboardDecoder::new().decode_source(source);
        assert!(matches!(result, Err(ReportError::Io(_))));
    }
}
