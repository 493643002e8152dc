//! Polled matrix source
//!
//! Scans the key matrix on demand and reports an aggregated snapshot of
//! everything currently held, rather than discrete press/release events.

use heapless::Vec;

use crate::keymap::{decode, hid, Key, KeyPos, SymbolTable};
use crate::state::event::{MAX_KEYS, MAX_MODIFIERS};
use crate::traits::{MatrixScanner, MAX_HELD};

/// Aggregated state of all held keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeysState {
    /// Shift-resolved characters of held printable keys
    pub word: Vec<char, MAX_KEYS>,
    /// HID usages of held non-modifier keys
    pub hid_keys: Vec<u8, MAX_KEYS>,
    /// Modifier codes (ctrl, shift, alt, gui order)
    pub modifier_keys: Vec<u8, MAX_MODIFIERS>,
    /// HID modifier byte
    pub modifiers: u8,
    pub fn_key: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub opt: bool,
    pub tab: bool,
    pub del: bool,
    pub enter: bool,
    pub space: bool,
}

impl KeysState {
    /// Aggregate a set of held positions
    pub fn from_held(held: &[KeyPos], table: &SymbolTable) -> Self {
        let mut state = Self::default();
        let mut rest: Vec<KeyPos, MAX_HELD> = Vec::new();

        for &pos in held {
            match table.primary(pos) {
                Key::Fn => state.fn_key = true,
                Key::Opt => state.opt = true,
                Key::Ctrl => state.ctrl = true,
                Key::Shift => state.shift = true,
                Key::Alt => state.alt = true,
                _ => {
                    let _ = rest.push(pos);
                }
            }
        }

        for (active, key) in [
            (state.ctrl, Key::Ctrl),
            (state.shift, Key::Shift),
            (state.alt, Key::Alt),
            (state.opt, Key::Opt),
        ] {
            if !active {
                continue;
            }
            state.modifiers |= hid::modifier_bit(key);
            if let Some(code) = hid::modifier_code(key) {
                let _ = state.modifier_keys.push(code);
            }
        }

        for &pos in &rest {
            let primary = table.primary(pos);
            if let Some(usage) = hid::usage(primary) {
                let _ = state.hid_keys.push(usage);
            }

            match primary {
                Key::Tab => state.tab = true,
                Key::Backspace => state.del = true,
                Key::Enter => state.enter = true,
                _ => {
                    if primary == Key::Char(' ') {
                        state.space = true;
                    }
                    if let Some(ch) = table.resolve(pos, state.shift).to_char() {
                        let _ = state.word.push(ch);
                    }
                }
            }
        }

        state
    }
}

/// Directly scanned key matrix with its latest snapshot
pub struct PolledSource<S> {
    scanner: S,
    codes: Vec<u8, MAX_HELD>,
    held: Vec<KeyPos, MAX_HELD>,
}

impl<S: MatrixScanner> PolledSource<S> {
    /// Wrap a matrix scanner
    pub fn new(scanner: S) -> Self {
        Self {
            scanner,
            codes: Vec::new(),
            held: Vec::new(),
        }
    }

    /// Rescan the matrix
    ///
    /// On a scan error the snapshot is left empty.
    pub fn update(&mut self) -> Result<(), S::Error> {
        self.codes.clear();
        self.held.clear();
        self.scanner.scan(&mut self.codes)?;

        for &code in &self.codes {
            match decode(code) {
                Some(pos) if !self.held.contains(&pos) => {
                    let _ = self.held.push(pos);
                }
                Some(_) => {}
                None => debug!("matrix: invalid scancode {}", code),
            }
        }
        Ok(())
    }

    /// Any key held in the latest snapshot
    pub fn is_pressed(&self) -> bool {
        !self.held.is_empty()
    }

    /// Held positions in scan order
    pub fn held(&self) -> &[KeyPos] {
        &self.held
    }

    /// Whether a key with the given primary symbol is held
    pub fn is_key_pressed(&self, table: &SymbolTable, key: Key) -> bool {
        self.held.iter().any(|&pos| table.primary(pos) == key)
    }

    /// Aggregate the latest snapshot
    pub fn keys_state(&self, table: &SymbolTable) -> KeysState {
        KeysState::from_held(&self.held, table)
    }

    /// Access the scanner
    pub fn scanner(&mut self) -> &mut S {
        &mut self.scanner
    }
}
