//! Command handlers for the `kreditmikro` binary.
pub mod predict;
pub mod stats;
pub mod train;
