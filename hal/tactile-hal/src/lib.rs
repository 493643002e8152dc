//! Tactile Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the keyboard input
//! layer needs: digital pins for the shoulder button and scanned key
//! matrices, and a register-style I2C bus for key-scan controllers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (tactile-firmware, etc.)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tactile-core / tactile-drivers         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tactile-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded-hal 1.0 chip HALs (via `eh`)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`i2c::I2cBus`] - I2C bus operations
//!
//! With the `embedded-hal` feature, the [`eh`] module wraps any
//! `embedded-hal` 1.0 pin or I2C bus so it can be handed to the drivers.

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "embedded-hal")]
pub mod eh;
pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use i2c::{I2cBus, I2cConfig};
