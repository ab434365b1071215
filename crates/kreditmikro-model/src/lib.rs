//! kreditmikro-model: categorical Naive Bayes pipeline for microcredit
//! approval decisions.
//!
//! Five fixed categorical attributes about a loan applicant are ordinally
//! encoded against a fixed schema, scored by a smoothed categorical Naive
//! Bayes model, and reported as a decision label ("Terima"/"Tolak") with a
//! full class probability distribution. Training reads a CSV dataset,
//! reports a stratified cross-validated accuracy diagnostic, and writes an
//! atomically replaced JSON artifact that serving loads read-only.
//!
//! The design favors small, testable modules: the encoder and model are
//! pure functions over immutable state, so serving requests can share one
//! loaded `Pipeline` without locking.
pub mod artifact;
pub mod config;
pub mod error;
pub mod io;
pub mod model_selection;
pub mod naive_bayes;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod stats;
