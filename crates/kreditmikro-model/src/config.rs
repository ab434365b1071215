use serde::{Deserialize, Serialize};

use crate::naive_bayes::DEFAULT_ALPHA;

/// Training configuration: smoothing constant plus cross-validation layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Additive (Laplace) smoothing constant for the conditional tables.
    pub alpha: f64,
    /// Number of stratified cross-validation folds.
    pub n_folds: usize,
    /// Seed for the fold shuffle; fixed seed means reproducible folds.
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            alpha: DEFAULT_ALPHA,
            n_folds: 5,
            seed: 42,
        }
    }
}

impl TrainConfig {
    pub fn new(alpha: f64, n_folds: usize, seed: u64) -> Self {
        TrainConfig {
            alpha,
            n_folds,
            seed,
        }
    }
}
