//! Canonical key event
//!
//! One instance is owned by the dispatcher and overwritten every dispatch
//! cycle. Consumers read it; only the dispatcher mutates it.

use heapless::Vec;

/// Maximum literal characters / raw codes collected in one cycle
pub const MAX_KEYS: usize = 16;

/// Maximum distinct modifier codes (ctrl, shift, alt, gui)
pub const MAX_MODIFIERS: usize = 4;

/// Structured key event produced by either backend
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    /// A key is down (or a delete is being forced)
    pub pressed: bool,
    /// The backtick "exit" key was part of this press
    pub exit_requested: bool,
    /// Fn key held
    pub fn_key: bool,
    /// Backspace held
    pub delete_requested: bool,
    /// Enter pressed
    pub enter: bool,
    /// HID modifier byte
    pub modifier_mask: u8,
    /// Literal characters, in press order
    pub characters: Vec<char, MAX_KEYS>,
    /// Backend-native / HID key codes
    pub raw_codes: Vec<u8, MAX_KEYS>,
    /// Distinct modifier codes currently asserted
    pub modifier_codes: Vec<u8, MAX_MODIFIERS>,
}

impl KeyEvent {
    /// All-clear event
    pub const fn new() -> Self {
        Self {
            pressed: false,
            exit_requested: false,
            fn_key: false,
            delete_requested: false,
            enter: false,
            modifier_mask: 0,
            characters: Vec::new(),
            raw_codes: Vec::new(),
            modifier_codes: Vec::new(),
        }
    }

    /// Reset to the all-clear state without reallocating
    pub fn clear(&mut self) {
        self.pressed = false;
        self.exit_requested = false;
        self.fn_key = false;
        self.delete_requested = false;
        self.enter = false;
        self.modifier_mask = 0;
        self.characters.clear();
        self.raw_codes.clear();
        self.modifier_codes.clear();
    }

    /// Whether the event is in its all-clear state
    pub fn is_clear(&self) -> bool {
        *self == Self::new()
    }

    /// Append a literal character (dropped when full)
    pub fn push_char(&mut self, ch: char) {
        let _ = self.characters.push(ch);
    }

    /// Append a raw key code (dropped when full)
    pub fn push_raw(&mut self, code: u8) {
        let _ = self.raw_codes.push(code);
    }

    /// Append a modifier code unless it is already present
    pub fn push_modifier(&mut self, code: u8) {
        if !self.modifier_codes.contains(&code) {
            let _ = self.modifier_codes.push(code);
        }
    }

    /// Collected characters, in press order
    pub fn text(&self) -> &[char] {
        &self.characters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_resets_everything() {
        let mut event = KeyEvent::new();
        event.pressed = true;
        event.enter = true;
        event.modifier_mask = 0x02;
        event.push_char('a');
        event.push_raw(0x04);
        event.push_modifier(0x81);
        assert!(!event.is_clear());

        event.clear();
        assert!(event.is_clear());
        assert_eq!(event, KeyEvent::default());
    }

    #[test]
    fn test_modifiers_are_distinct() {
        let mut event = KeyEvent::new();
        event.push_modifier(0x80);
        event.push_modifier(0x80);
        event.push_modifier(0x82);
        assert_eq!(event.modifier_codes.as_slice(), &[0x80, 0x82]);
    }

    #[test]
    fn test_characters_bounded() {
        let mut event = KeyEvent::new();
        for _ in 0..MAX_KEYS + 4 {
            event.push_char('x');
        }
        assert_eq!(event.text().len(), MAX_KEYS);
    }
}
