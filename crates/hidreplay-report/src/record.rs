//! Text record decoding

use crate::{ReportError, ReportResult};

/// One record pulled from a report source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRecord {
    /// Raw report bytes.
    Data(Vec<u8>),
    /// The capture had no data for this sample.
    Absent,
}

impl RawRecord {
    /// Parse a text record. Surrounding whitespace is ignored; a record equal
    /// to `sentinel` is [`RawRecord::Absent`], anything else must be hex.
    pub fn parse(text: &str, sentinel: &str) -> ReportResult<Self> {
        let text = text.trim();
        if text == sentinel {
            return Ok(RawRecord::Absent);
        }
        decode_hex(text).map(RawRecord::Data)
    }

    /// Report bytes, or [`ReportError::NoData`] for the sentinel.
    pub fn into_bytes(self) -> ReportResult<Vec<u8>> {
        match self {
            RawRecord::Data(bytes) => Ok(bytes),
            RawRecord::Absent => Err(ReportError::NoData),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, RawRecord::Absent)
    }
}

/// Decode a hex string into raw bytes.
///
/// Both digit cases are accepted. `:` separators and ASCII whitespace between
/// bytes (as printed by some capture tools) are ignored.
pub fn decode_hex(text: &str) -> ReportResult<Vec<u8>> {
    let digits: Vec<u8> = text
        .bytes()
        .filter(|b| *b != b':' && !b.is_ascii_whitespace())
        .collect();
    if !digits.len().is_multiple_of(2) {
        return Err(ReportError::OddHexLength { len: digits.len() });
    }

    digits
        .chunks_exact(2)
        .enumerate()
        .map(|(index, pair)| match pair {
            [hi, lo] => match (nibble(*hi), nibble(*lo)) {
                (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
                _ => Err(ReportError::InvalidHex { index }),
            },
            _ => Err(ReportError::InvalidHex { index }),
        })
        .collect()
}

/// Encode bytes as lowercase hex, the inverse of [`decode_hex`].
pub fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn nibble(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_hex() -> ReportResult<()> {
        assert_eq!(
            decode_hex("0000040000000000")?,
            vec![0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
        assert_eq!(decode_hex("FFfe")?, vec![0xFF, 0xFE]);
        Ok(())
    }

    #[test]
    fn test_decode_colon_separated() -> ReportResult<()> {
        assert_eq!(decode_hex("01:ff:80")?, vec![0x01, 0xFF, 0x80]);
        Ok(())
    }

    #[test]
    fn test_decode_space_separated() -> ReportResult<()> {
        assert_eq!(
            decode_hex("00 00 04 00 00 00 00 00")?,
            vec![0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
        assert_eq!(decode_hex("01\tff  80")?, vec![0x01, 0xFF, 0x80]);
        Ok(())
    }

    #[test]
    fn test_parse_space_separated_record() -> ReportResult<()> {
        assert_eq!(
            RawRecord::parse(" 02 00 04 ", "0")?,
            RawRecord::Data(vec![0x02, 0x00, 0x04])
        );
        Ok(())
    }

    #[test]
    fn test_decode_empty_is_zero_bytes() -> ReportResult<()> {
        assert!(decode_hex("")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_decode_odd_length() {
        assert!(matches!(
            decode_hex("abc"),
            Err(ReportError::OddHexLength { len: 3 })
        ));
    }

    #[test]
    fn test_decode_invalid_digit_reports_byte_index() {
        assert!(matches!(
            decode_hex("00zz"),
            Err(ReportError::InvalidHex { index: 1 })
        ));
    }

    #[test]
    fn test_parse_sentinel() -> ReportResult<()> {
        assert_eq!(RawRecord::parse("0", "0")?, RawRecord::Absent);
        assert_eq!(RawRecord::parse("  0\n", "0")?, RawRecord::Absent);
        assert_eq!(
            RawRecord::parse("010203", "0")?,
            RawRecord::Data(vec![1, 2, 3])
        );
        Ok(())
    }

    #[test]
    fn test_absent_has_no_bytes() {
        assert!(matches!(
            RawRecord::Absent.into_bytes(),
            Err(ReportError::NoData)
        ));
    }

    #[test]
    fn test_encode_hex() {
        assert_eq!(encode_hex(&[0x00, 0xAB, 0x7F]), "00ab7f");
    }
}
