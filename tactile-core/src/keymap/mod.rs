//! Keyboard layout
//!
//! Raw scancode → logical grid position → symbol.

pub mod geometry;
pub mod hid;
pub mod symbols;

pub use geometry::{decode, scancode, KeyPos, GRID_COLS, GRID_ROWS, LAST_COL};
pub use symbols::{Key, KeyCell, SymbolTable, CARDPUTER};
