//! Key-scan controller drivers

pub mod tca8418;

pub use tca8418::{Tca8418, Tca8418Config, Tca8418Error};
