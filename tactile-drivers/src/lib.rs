//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the keyboard traits
//! defined in tactile-core:
//!
//! - Key-scan controllers (TCA8418 over I2C)
//! - Directly scanned matrices (demultiplexed scan lines)

#![no_std]
#![deny(unsafe_code)]

pub mod keypad;
pub mod matrix;
