//! Keyboard backend traits

use heapless::Vec;

/// Maximum simultaneously held keys a matrix scan reports
pub const MAX_HELD: usize = 16;

/// One queued key transition from a key-scan controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawKeyEvent {
    /// Controller key number
    pub code: u8,
    /// `true` on press, `false` on release
    pub pressed: bool,
}

impl RawKeyEvent {
    /// Split a controller FIFO byte (bit 7 = pressed, bits 0-6 = key)
    pub const fn from_fifo(byte: u8) -> Self {
        Self {
            code: byte & 0x7F,
            pressed: byte & 0x80 != 0,
        }
    }
}

/// Key-scan controller that queues press/release events
///
/// Implemented by controllers like the TCA8418 that scan the matrix on
/// their own and raise an interrupt line when their FIFO has data.
pub trait KeyEventSource {
    /// Bus error type
    type Error;

    /// Acknowledge the key interrupt and report whether it is still asserted
    ///
    /// The controller keeps the status bit set while events remain queued.
    fn acknowledge_interrupt(&mut self) -> Result<bool, Self::Error>;

    /// Number of events waiting in the FIFO
    fn queued(&mut self) -> Result<u8, Self::Error>;

    /// Dequeue one event, `None` when the FIFO is empty
    fn dequeue(&mut self) -> Result<Option<RawKeyEvent>, Self::Error>;
}

/// Directly scanned key matrix
pub trait MatrixScanner {
    /// Pin error type
    type Error;

    /// Scan the whole matrix and push the scancode of every closed contact
    ///
    /// Scancodes use the controller numbering decoded by
    /// [`crate::keymap::decode`].
    fn scan(&mut self, held: &mut Vec<u8, MAX_HELD>) -> Result<(), Self::Error>;
}
