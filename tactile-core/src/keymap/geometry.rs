//! Matrix geometry decoding
//!
//! Key-scan controllers number keys as `row * 10 + column + 1` on their own
//! 7 × 8 (row × column) scan matrix. The keyboard itself is laid out as a
//! 4 × 14 grid, so each scan line carries two half-rows. Decoding folds the
//! scan position onto that logical grid:
//!
//! ```text
//! u  = code % 10          (1..=8, scan column + 1)
//! t  = code / 10          (0..=6, scan row)
//! u0 = u - 1
//! row = u0 & 0b11
//! col = (t << 1) | (u0 >> 2)
//! ```
//!
//! Malformed codes are expected under bus noise and decode to `None`.

/// Logical rows on the keyboard grid
pub const GRID_ROWS: usize = 4;

/// Logical columns on the keyboard grid
pub const GRID_COLS: usize = 14;

/// Last logical column (Backspace / Enter live here)
pub const LAST_COL: u8 = (GRID_COLS - 1) as u8;

/// Highest valid scan row (`t`)
const MAX_SCAN_ROW: u8 = 6;

/// A decoded position on the logical grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyPos {
    /// Logical row (0..4)
    pub row: u8,
    /// Logical column (0..14)
    pub col: u8,
}

impl KeyPos {
    /// Create a position, rejecting anything outside the logical grid
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < GRID_ROWS && (col as usize) < GRID_COLS {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Whether the key sits in the rightmost column
    pub const fn is_last_col(&self) -> bool {
        self.col == LAST_COL
    }
}

/// Decode a raw scancode into a logical grid position
pub const fn decode(code: u8) -> Option<KeyPos> {
    let u = code % 10;
    let t = code / 10;

    if u < 1 || u > 8 || t > MAX_SCAN_ROW {
        return None;
    }

    let u0 = u - 1;
    Some(KeyPos {
        row: u0 & 0b11,
        col: (t << 1) | (u0 >> 2),
    })
}

/// Build the scancode for a scan line / sense input pair
///
/// `line` is the scan column (0..8) and `input` the scan row (0..7). This is
/// the inverse of [`decode`] for scanners that sample the matrix directly.
pub const fn scancode(line: u8, input: u8) -> u8 {
    input * 10 + line + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(decode(11), Some(KeyPos { row: 0, col: 2 }));
        assert_eq!(decode(18), Some(KeyPos { row: 3, col: 3 }));
        assert_eq!(decode(1), Some(KeyPos { row: 0, col: 0 }));
        assert_eq!(decode(68), Some(KeyPos { row: 3, col: 13 }));
    }

    #[test]
    fn test_invalid_codes() {
        assert_eq!(decode(0), None);
        assert_eq!(decode(9), None); // u = 9
        assert_eq!(decode(10), None); // u = 0
        assert_eq!(decode(71), None); // t = 7
        assert_eq!(decode(0x7F), None);
        assert_eq!(decode(255), None);
    }

    #[test]
    fn test_every_grid_cell_reachable_once() {
        let mut seen = [[0u8; GRID_COLS]; GRID_ROWS];
        for code in 0..=u8::MAX {
            if let Some(pos) = decode(code) {
                seen[pos.row as usize][pos.col as usize] += 1;
            }
        }
        assert!(seen.iter().flatten().all(|&n| n == 1));
    }

    #[test]
    fn test_last_col() {
        assert!(decode(68).unwrap().is_last_col());
        assert!(!decode(11).unwrap().is_last_col());
        assert_eq!(KeyPos::new(4, 0), None);
        assert_eq!(KeyPos::new(0, 14), None);
    }

    proptest! {
        #[test]
        fn prop_valid_codes_land_on_grid(t in 0u8..=6, u in 1u8..=8) {
            let pos = decode(t * 10 + u).unwrap();
            prop_assert!((pos.row as usize) < GRID_ROWS);
            prop_assert!((pos.col as usize) < GRID_COLS);
            prop_assert_eq!(pos.row, (u - 1) & 0b11);
            prop_assert_eq!(pos.col, t * 2 + (u - 1) / 4);
        }

        #[test]
        fn prop_invalid_codes_rejected(code in any::<u8>()) {
            let u = code % 10;
            let t = code / 10;
            let valid = (1..=8).contains(&u) && t <= 6;
            prop_assert_eq!(decode(code).is_some(), valid);
        }

        #[test]
        fn prop_scancode_inverts_decode(line in 0u8..8, input in 0u8..7) {
            let code = scancode(line, input);
            let pos = decode(code).unwrap();
            prop_assert_eq!(pos.row, line & 0b11);
            prop_assert_eq!(pos.col, (input << 1) | (line >> 2));
        }
    }
}
