//! HID keyboard usage table (US layout, printable range)

/// What a mapped keycode produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    Char(char),
    Backspace,
}

pub const USAGE_ENTER: u8 = 0x28;
pub const USAGE_BACKSPACE: u8 = 0x2A;
pub const USAGE_SPACE: u8 = 0x2C;

/// Look up a keycode in the usage table.
///
/// Letters 0x04..=0x1D, digits 0x1E..=0x27, then enter, backspace, space and
/// the punctuation keys. Escape, tab, backslash and grave (0x29, 0x2B, 0x31,
/// 0x32, 0x35) are not mapped.
pub fn usage_for(keycode: u8) -> Option<Usage> {
    let ch = match keycode {
        0x04..=0x1D => char::from(b'a' + (keycode - 0x04)),
        0x1E..=0x26 => char::from(b'1' + (keycode - 0x1E)),
        0x27 => '0',
        USAGE_ENTER => '\n',
        USAGE_BACKSPACE => return Some(Usage::Backspace),
        USAGE_SPACE => ' ',
        0x2D => '-',
        0x2E => '=',
        0x2F => '[',
        0x30 => ']',
        0x33 => ';',
        0x34 => '\'',
        0x36 => ',',
        0x37 => '.',
        0x38 => '/',
        _ => return None,
    };
    Some(Usage::Char(ch))
}

/// Shifted symbol for a non-letter base character.
pub fn shifted(ch: char) -> Option<char> {
    let symbol = match ch {
        '1' => '!',
        '2' => '@',
        '3' => '#',
        '4' => '$',
        '5' => '%',
        '6' => '^',
        '7' => '&',
        '8' => '*',
        '9' => '(',
        '0' => ')',
        '-' => '_',
        '=' => '+',
        '[' => '{',
        ']' => '}',
        ';' => ':',
        '\'' => '"',
        ',' => '<',
        '.' => '>',
        '/' => '?',
        _ => return None,
    };
    Some(symbol)
}

/// Character produced by `base` with the given shift state.
pub fn apply_shift(base: char, shift: bool) -> char {
    if !shift {
        return base;
    }
    if base.is_ascii_alphabetic() {
        base.to_ascii_uppercase()
    } else {
        shifted(base).unwrap_or(base)
    }
}
