//! Directly scanned key matrices

pub mod demux;

pub use demux::{DemuxMatrix, ADDRESS_LINES, SCAN_LINES, SENSE_INPUTS};
