//! Key symbol table
//!
//! Every cell of the logical grid carries a primary and a secondary symbol.
//! The secondary one is selected when the effective shift
//! (`shift_held XOR caps_lock`) is active.

use super::geometry::{KeyPos, GRID_COLS, GRID_ROWS};

/// Logical key symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    /// Printable character
    Char(char),
    /// Function key (layer modifier, never printed)
    Fn,
    /// Left shift
    Shift,
    /// Left control
    Ctrl,
    /// Left alt
    Alt,
    /// Option / GUI key
    Opt,
    /// Backspace
    Backspace,
    /// Tab
    Tab,
    /// Enter / return
    Enter,
}

impl Key {
    /// Character this key contributes to typed text, if any
    pub const fn to_char(self) -> Option<char> {
        match self {
            Key::Char(c) => Some(c),
            Key::Tab => Some('\t'),
            Key::Enter => Some('\n'),
            Key::Backspace => Some('\u{8}'),
            Key::Fn | Key::Shift | Key::Ctrl | Key::Alt | Key::Opt => None,
        }
    }

    /// Whether this is a modifier (including Fn)
    pub const fn is_modifier(self) -> bool {
        matches!(self, Key::Fn | Key::Shift | Key::Ctrl | Key::Alt | Key::Opt)
    }
}

/// One cell of the symbol table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyCell {
    /// Symbol without shift
    pub primary: Key,
    /// Symbol with effective shift
    pub secondary: Key,
}

impl KeyCell {
    /// Cell with distinct shifted and unshifted characters
    pub const fn chars(primary: char, secondary: char) -> Self {
        Self {
            primary: Key::Char(primary),
            secondary: Key::Char(secondary),
        }
    }

    /// Cell that produces the same symbol regardless of shift
    pub const fn same(key: Key) -> Self {
        Self {
            primary: key,
            secondary: key,
        }
    }
}

/// Immutable per-device layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    cells: [[KeyCell; GRID_COLS]; GRID_ROWS],
}

impl SymbolTable {
    /// Build a table from its cells
    pub const fn new(cells: [[KeyCell; GRID_COLS]; GRID_ROWS]) -> Self {
        Self { cells }
    }

    /// Cell at a decoded position
    pub fn cell(&self, pos: KeyPos) -> &KeyCell {
        &self.cells[pos.row as usize][pos.col as usize]
    }

    /// Unshifted symbol, used to classify special keys
    pub fn primary(&self, pos: KeyPos) -> Key {
        self.cell(pos).primary
    }

    /// Resolve the symbol at `pos` for the given effective shift
    pub fn resolve(&self, pos: KeyPos, effective_shift: bool) -> Key {
        let cell = self.cell(pos);
        if effective_shift {
            cell.secondary
        } else {
            cell.primary
        }
    }

    /// Find the first position whose primary symbol is `key`
    pub fn position_of(&self, key: Key) -> Option<KeyPos> {
        self.cells.iter().enumerate().find_map(|(row, cells)| {
            cells
                .iter()
                .position(|cell| cell.primary == key)
                .map(|col| KeyPos {
                    row: row as u8,
                    col: col as u8,
                })
        })
    }
}

const fn c(primary: char, secondary: char) -> KeyCell {
    KeyCell::chars(primary, secondary)
}

const fn k(key: Key) -> KeyCell {
    KeyCell::same(key)
}

/// 56-key handheld layout (M5Stack Cardputer)
pub static CARDPUTER: SymbolTable = SymbolTable::new([
    [
        c('`', '~'),
        c('1', '!'),
        c('2', '@'),
        c('3', '#'),
        c('4', '$'),
        c('5', '%'),
        c('6', '^'),
        c('7', '&'),
        c('8', '*'),
        c('9', '('),
        c('0', ')'),
        c('-', '_'),
        c('=', '+'),
        k(Key::Backspace),
    ],
    [
        k(Key::Tab),
        c('q', 'Q'),
        c('w', 'W'),
        c('e', 'E'),
        c('r', 'R'),
        c('t', 'T'),
        c('y', 'Y'),
        c('u', 'U'),
        c('i', 'I'),
        c('o', 'O'),
        c('p', 'P'),
        c('[', '{'),
        c(']', '}'),
        c('\\', '|'),
    ],
    [
        k(Key::Fn),
        k(Key::Shift),
        c('a', 'A'),
        c('s', 'S'),
        c('d', 'D'),
        c('f', 'F'),
        c('g', 'G'),
        c('h', 'H'),
        c('j', 'J'),
        c('k', 'K'),
        c('l', 'L'),
        c(';', ':'),
        c('\'', '"'),
        k(Key::Enter),
    ],
    [
        k(Key::Ctrl),
        k(Key::Opt),
        k(Key::Alt),
        c('z', 'Z'),
        c('x', 'X'),
        c('c', 'C'),
        c('v', 'V'),
        c('b', 'B'),
        c('n', 'N'),
        c('m', 'M'),
        c(',', '<'),
        c('.', '>'),
        c('/', '?'),
        c(' ', ' '),
    ],
]);
