//! Minimal HID keyboard subset
//!
//! Enough of the HID usage table to report what the handheld keyboard can
//! produce. Usages are positional, so a key maps to the same usage whether
//! or not shift is held; shift travels in the modifier byte.

use super::symbols::Key;

/// Left control modifier code
pub const KEY_LEFT_CTRL: u8 = 0x80;
/// Left shift modifier code
pub const KEY_LEFT_SHIFT: u8 = 0x81;
/// Left alt modifier code
pub const KEY_LEFT_ALT: u8 = 0x82;
/// Left GUI modifier code (Opt key)
pub const KEY_LEFT_GUI: u8 = 0x83;

/// HID modifier byte bits
pub mod modifier {
    pub const LEFT_CTRL: u8 = 1 << 0;
    pub const LEFT_SHIFT: u8 = 1 << 1;
    pub const LEFT_ALT: u8 = 1 << 2;
    pub const LEFT_GUI: u8 = 1 << 3;
}

/// HID usage ID for a non-modifier key
pub fn usage(key: Key) -> Option<u8> {
    let ch = match key {
        Key::Enter => return Some(0x28),
        Key::Backspace => return Some(0x2A),
        Key::Tab => return Some(0x2B),
        Key::Char(ch) => ch,
        _ => return None,
    };

    let usage = match ch {
        'a'..='z' => 0x04 + (ch as u8 - b'a'),
        'A'..='Z' => 0x04 + (ch as u8 - b'A'),
        '1'..='9' => 0x1E + (ch as u8 - b'1'),
        '0' => 0x27,
        ' ' => 0x2C,
        '-' | '_' => 0x2D,
        '=' | '+' => 0x2E,
        '[' | '{' => 0x2F,
        ']' | '}' => 0x30,
        '\\' | '|' => 0x31,
        ';' | ':' => 0x33,
        '\'' | '"' => 0x34,
        '`' | '~' => 0x35,
        ',' | '<' => 0x36,
        '.' | '>' => 0x37,
        '/' | '?' => 0x38,
        _ => return None,
    };
    Some(usage)
}

/// Modifier code reported in a key event's modifier list
pub fn modifier_code(key: Key) -> Option<u8> {
    match key {
        Key::Ctrl => Some(KEY_LEFT_CTRL),
        Key::Shift => Some(KEY_LEFT_SHIFT),
        Key::Alt => Some(KEY_LEFT_ALT),
        Key::Opt => Some(KEY_LEFT_GUI),
        _ => None,
    }
}

/// Bit in the HID modifier byte
pub fn modifier_bit(key: Key) -> u8 {
    match key {
        Key::Ctrl => modifier::LEFT_CTRL,
        Key::Shift => modifier::LEFT_SHIFT,
        Key::Alt => modifier::LEFT_ALT,
        Key::Opt => modifier::LEFT_GUI,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_and_digits() {
        assert_eq!(usage(Key::Char('a')), Some(0x04));
        assert_eq!(usage(Key::Char('Z')), Some(0x1D));
        assert_eq!(usage(Key::Char('1')), Some(0x1E));
        assert_eq!(usage(Key::Char('0')), Some(0x27));
    }

    #[test]
    fn test_shifted_symbols_share_usage() {
        assert_eq!(usage(Key::Char(',')), usage(Key::Char('<')));
        assert_eq!(usage(Key::Char('`')), usage(Key::Char('~')));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(usage(Key::Enter), Some(0x28));
        assert_eq!(usage(Key::Fn), None);
        assert_eq!(usage(Key::Char('é')), None);
    }

    #[test]
    fn test_modifiers() {
        assert_eq!(modifier_code(Key::Alt), Some(KEY_LEFT_ALT));
        assert_eq!(modifier_code(Key::Fn), None);
        assert_eq!(
            modifier_bit(Key::Ctrl) | modifier_bit(Key::Shift),
            modifier::LEFT_CTRL | modifier::LEFT_SHIFT
        );
        assert_eq!(modifier_bit(Key::Tab), 0);
    }
}
