//! Dataset readers.
pub mod dataset;

pub use dataset::{read_dataset, Dataset, LABEL_COLUMN};
