//! Board-agnostic keyboard input logic
//!
//! This crate contains all input handling that does not depend on specific
//! hardware implementations:
//!
//! - Matrix geometry decoding and the symbol table
//! - Modifier / caps-lock state machine
//! - Interrupt-driven and polled backends behind hardware traits
//! - The rate-limited dispatcher producing key events and edge flags
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod backend;
pub mod config;
pub mod dispatcher;
pub mod keymap;
pub mod state;
pub mod traits;

pub use backend::{Backend, BackendKind, KeyInterrupt};
pub use config::InputConfig;
pub use dispatcher::{Cycle, Dispatcher};
pub use keymap::{Key, KeyPos, SymbolTable, CARDPUTER};
pub use state::{Edge, EdgeFlags, KeyEvent, LongPress};
