//! Configuration types
//!
//! Board-agnostic settings, optionally serde-serializable for boards that
//! load them from storage.

pub mod input;

pub use input::*;
