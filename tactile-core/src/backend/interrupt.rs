//! Interrupt-driven key source
//!
//! The controller's interrupt line only sets [`KeyInterrupt`]. All bus
//! traffic happens later, from the dispatcher, one event per cycle.

use portable_atomic::{AtomicBool, Ordering};

use crate::traits::{KeyEventSource, RawKeyEvent};

/// "Event may be pending" flag shared with the interrupt handler
///
/// Set only from interrupt context, cleared only by the dispatcher.
pub struct KeyInterrupt {
    pending: AtomicBool,
}

impl Default for KeyInterrupt {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyInterrupt {
    /// Clear flag; usable in a `static`
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Called from the interrupt handler. Performs no other work.
    pub fn notify(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Whether the controller signalled since the last drain
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    pub(crate) fn clear(&self) {
        self.pending.store(false, Ordering::Release);
    }
}

/// Key-scan controller plus its interrupt flag
pub struct InterruptSource<'a, D> {
    device: D,
    irq: &'a KeyInterrupt,
}

impl<'a, D: KeyEventSource> InterruptSource<'a, D> {
    /// Pair an initialized controller with its interrupt flag
    pub fn new(device: D, irq: &'a KeyInterrupt) -> Self {
        Self { device, irq }
    }

    /// Whether a hardware event may be waiting (no bus access)
    pub fn is_pending(&self) -> bool {
        self.irq.is_pending()
    }

    /// Acknowledge the interrupt and dequeue at most one event
    ///
    /// The pending flag stays set while the controller still asserts its
    /// interrupt, so queued events drain over successive calls.
    pub fn next_event(&mut self) -> Result<Option<RawKeyEvent>, D::Error> {
        // Clear first so an edge arriving during the acknowledge is not lost
        self.irq.clear();
        match self.device.acknowledge_interrupt() {
            Ok(true) => self.irq.notify(),
            Ok(false) => {}
            Err(e) => {
                self.irq.notify();
                return Err(e);
            }
        }

        if self.device.queued()? == 0 {
            return Ok(None);
        }
        self.device.dequeue()
    }

    /// Access the controller
    pub fn device(&mut self) -> &mut D {
        &mut self.device
    }
}
