//! Demultiplexed key matrix
//!
//! Three address outputs drive a 3-to-8 line decoder (74HC138 style) that
//! pulls one scan line low at a time; seven pulled-up sense inputs read
//! which keys on that line are closed.
//!
//! Closed contacts are reported with the same numbering a key-scan
//! controller uses (`input * 10 + line + 1`), so both backends share one
//! geometry decoder.

use core::convert::Infallible;

use heapless::Vec;
use tactile_core::keymap::scancode;
use tactile_core::traits::{MatrixScanner, MAX_HELD};
use tactile_hal::{InputPin, OutputPin};

/// Decoder address outputs
pub const ADDRESS_LINES: usize = 3;

/// Scan lines selected through the decoder
pub const SCAN_LINES: u8 = 1 << ADDRESS_LINES;

/// Sense inputs read per scan line
pub const SENSE_INPUTS: usize = 7;

/// Key matrix scanned through an address decoder
pub struct DemuxMatrix<O, I> {
    address: [O; ADDRESS_LINES],
    inputs: [I; SENSE_INPUTS],
}

impl<O: OutputPin, I: InputPin> DemuxMatrix<O, I> {
    /// Create a matrix from decoder address pins (LSB first) and sense pins
    pub fn new(address: [O; ADDRESS_LINES], inputs: [I; SENSE_INPUTS]) -> Self {
        Self { address, inputs }
    }

    fn select(&mut self, line: u8) {
        for (bit, pin) in self.address.iter_mut().enumerate() {
            pin.set_state(line & (1 << bit) != 0);
        }
    }
}

impl<O: OutputPin, I: InputPin> MatrixScanner for DemuxMatrix<O, I> {
    type Error = Infallible;

    fn scan(&mut self, held: &mut Vec<u8, MAX_HELD>) -> Result<(), Infallible> {
        for line in 0..SCAN_LINES {
            self.select(line);
            for (input, pin) in self.inputs.iter_mut().enumerate() {
                if pin.is_low() {
                    // Extra keys beyond MAX_HELD are dropped
                    let _ = held.push(scancode(line, input as u8));
                }
            }
        }
        Ok(())
    }
}
