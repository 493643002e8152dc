//! Keyboard backends
//!
//! Exactly one backend is active. It is chosen once at startup by probing
//! for the key-scan controller; boards without one fall back to scanning
//! the matrix directly.

pub mod interrupt;
pub mod polled;

pub use interrupt::{InterruptSource, KeyInterrupt};
pub use polled::{KeysState, PolledSource};

use crate::traits::{KeyEventSource, MatrixScanner};

/// Which backend was selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BackendKind {
    /// Key-scan controller with interrupt line
    Interrupt,
    /// Directly scanned matrix
    Polled,
}

/// The active keyboard backend
pub enum Backend<'a, D, S> {
    /// Key-scan controller, one queued event per dispatch cycle
    Interrupt(InterruptSource<'a, D>),
    /// Scanned matrix, aggregated snapshot per dispatch cycle
    Polled(PolledSource<S>),
}

impl<'a, D: KeyEventSource, S: MatrixScanner> Backend<'a, D, S> {
    /// Pick the backend from the controller probe result
    ///
    /// `fallback` is only invoked when the probe failed, so it may claim
    /// pins shared with the controller bus.
    pub fn select<E>(
        probe: Result<D, E>,
        irq: &'a KeyInterrupt,
        fallback: impl FnOnce() -> S,
    ) -> Self {
        match probe {
            Ok(device) => {
                info!("keyboard: key-scan controller found, using interrupt backend");
                Backend::Interrupt(InterruptSource::new(device, irq))
            }
            Err(_) => {
                warn!("keyboard: key-scan controller not found, falling back to matrix scan");
                Backend::Polled(PolledSource::new(fallback()))
            }
        }
    }

    /// Which variant is active
    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Interrupt(_) => BackendKind::Interrupt,
            Backend::Polled(_) => BackendKind::Polled,
        }
    }
}
