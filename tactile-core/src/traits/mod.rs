//! Hardware abstraction traits
//!
//! These traits define the interface between the input logic and the
//! key-scan hardware and display it depends on.

pub mod keyboard;
pub mod power;

pub use keyboard::{KeyEventSource, MatrixScanner, RawKeyEvent, MAX_HELD};
pub use power::{AlwaysAwake, ScreenWake};
