//! Stratified cross-validation for the fitted classifier.
//!
//! The accuracy estimate is a training-time diagnostic: it is reported and
//! logged but never gates fitting the final model.
use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::config::TrainConfig;
use crate::naive_bayes::CategoricalNb;
use crate::schema::{CategorySchema, EncodedRecord};

/// Per-fold accuracies from a cross-validation run.
#[derive(Debug, Clone)]
pub struct CrossValidationResult {
    pub fold_accuracies: Vec<f64>,
}

impl CrossValidationResult {
    pub fn mean(&self) -> f64 {
        if self.fold_accuracies.is_empty() {
            return 0.0;
        }
        self.fold_accuracies.iter().sum::<f64>() / self.fold_accuracies.len() as f64
    }

    /// Population standard deviation of the per-fold accuracies.
    pub fn std(&self) -> f64 {
        if self.fold_accuracies.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let var = self
            .fold_accuracies
            .iter()
            .map(|a| (a - mean) * (a - mean))
            .sum::<f64>()
            / self.fold_accuracies.len() as f64;
        var.sqrt()
    }
}

/// Stratified K-Fold splitter: each fold preserves the class proportions of
/// the full label set. Shuffling is seeded, so splits are reproducible.
#[derive(Debug, Clone)]
pub struct StratifiedKFold {
    n_splits: usize,
    shuffle: bool,
    random_state: Option<u64>,
}

impl StratifiedKFold {
    pub fn new(n_splits: usize) -> Self {
        StratifiedKFold {
            n_splits,
            shuffle: false,
            random_state: None,
        }
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self.shuffle = true;
        self
    }

    /// Produce `(train_indices, test_indices)` pairs, one per fold.
    ///
    /// Indices are bucketed per class (classes in first-encounter order, so
    /// output is deterministic for a fixed seed) and each class is dealt
    /// across the folds, remainder to the earliest folds.
    pub fn split(&self, labels: &[String]) -> Vec<(Vec<usize>, Vec<usize>)> {
        let mut class_indices: Vec<(&str, Vec<usize>)> = Vec::new();
        for (i, label) in labels.iter().enumerate() {
            match class_indices
                .iter_mut()
                .find(|(name, _)| *name == label.as_str())
            {
                Some((_, indices)) => indices.push(i),
                None => class_indices.push((label.as_str(), vec![i])),
            }
        }

        if self.shuffle {
            let mut rng = match self.random_state {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            for (_, indices) in class_indices.iter_mut() {
                indices.shuffle(&mut rng);
            }
        }

        let mut fold_indices: Vec<Vec<usize>> = vec![Vec::new(); self.n_splits];
        for (_, indices) in &class_indices {
            let fold_size = indices.len() / self.n_splits;
            let remainder = indices.len() % self.n_splits;
            let mut start = 0;
            for (i, fold) in fold_indices.iter_mut().enumerate() {
                let size = fold_size + usize::from(i < remainder);
                fold.extend_from_slice(&indices[start..start + size]);
                start += size;
            }
        }

        (0..self.n_splits)
            .map(|i| {
                let test = fold_indices[i].clone();
                let train = fold_indices
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .flat_map(|(_, fold)| fold.iter().copied())
                    .collect();
                (train, test)
            })
            .collect()
    }
}

/// Cross-validated accuracy estimate for the categorical NB model.
///
/// Folds are independent, so they are evaluated in parallel; the per-fold
/// scores are collected in fold order before computing mean/std.
pub fn cross_validate(
    schema: &CategorySchema,
    rows: &[EncodedRecord],
    labels: &[String],
    config: &TrainConfig,
) -> Result<CrossValidationResult> {
    if rows.len() != labels.len() {
        bail!(
            "Encoded rows ({}) and labels ({}) must have equal length",
            rows.len(),
            labels.len()
        );
    }
    if config.n_folds < 2 {
        bail!("Cross-validation needs at least 2 folds, got {}", config.n_folds);
    }
    if rows.len() < config.n_folds {
        bail!(
            "Cannot split {} rows into {} folds",
            rows.len(),
            config.n_folds
        );
    }

    let splits = StratifiedKFold::new(config.n_folds)
        .with_random_state(config.seed)
        .split(labels);

    if splits.iter().any(|(_, test)| test.is_empty()) {
        bail!(
            "{} folds leave at least one test fold empty; reduce the fold count",
            config.n_folds
        );
    }

    let fold_accuracies = splits
        .par_iter()
        .map(|(train_idx, test_idx)| {
            let train_rows: Vec<EncodedRecord> =
                train_idx.iter().map(|&i| rows[i].clone()).collect();
            let train_labels: Vec<String> = train_idx.iter().map(|&i| labels[i].clone()).collect();
            let model = CategoricalNb::fit(schema, &train_rows, &train_labels, config.alpha)?;

            let mut correct = 0usize;
            for &i in test_idx {
                let prediction = model.predict(&rows[i])?;
                if prediction.label == labels[i] {
                    correct += 1;
                }
            }
            Ok(correct as f64 / test_idx.len() as f64)
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok(CrossValidationResult { fold_accuracies })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(counts: &[(&str, usize)]) -> Vec<String> {
        counts.iter()
            .flat_map(|(name, n)| std::iter::repeat(name.to_string()).take(*n))
            .collect()
    }

    #[test]
    fn folds_preserve_class_proportions() {
        let y = labels(&[("Terima", 9), ("Tolak", 6)]);
        let splits = StratifiedKFold::new(3).split(&y);
        assert_eq!(splits.len(), 3);
        for (train, test) in &splits {
            assert_eq!(train.len() + test.len(), y.len());
            let terima = test.iter().filter(|&&i| y[i] == "Terima").count();
            let tolak = test.iter().filter(|&&i| y[i] == "Tolak").count();
            assert_eq!(terima, 3);
            assert_eq!(tolak, 2);
        }
    }

    #[test]
    fn every_index_appears_in_exactly_one_test_fold() {
        let y = labels(&[("Terima", 7), ("Tolak", 8)]);
        let splits = StratifiedKFold::new(5).with_random_state(42).split(&y);
        let mut seen = vec![0usize; y.len()];
        for (_, test) in &splits {
            for &i in test {
                seen[i] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n == 1));
    }

    #[test]
    fn seeded_splits_are_reproducible() {
        let y = labels(&[("Terima", 10), ("Tolak", 10)]);
        let a = StratifiedKFold::new(4).with_random_state(7).split(&y);
        let b = StratifiedKFold::new(4).with_random_state(7).split(&y);
        assert_eq!(a, b);
    }

    #[test]
    fn mean_and_std_of_fold_scores() {
        let result = CrossValidationResult {
            fold_accuracies: vec![0.8, 1.0, 0.6],
        };
        assert!((result.mean() - 0.8).abs() < 1e-12);
        let expected_std = (2.0f64 / 75.0).sqrt();
        assert!((result.std() - expected_std).abs() < 1e-12);
    }

    #[test]
    fn cross_validate_is_deterministic_for_a_fixed_seed() {
        let schema = CategorySchema::kredit_mikro();
        let rows: Vec<EncodedRecord> = (0..20)
            .map(|i| {
                if i % 2 == 0 {
                    vec![2, 1, 2, 1, 0]
                } else {
                    vec![0, 0, 0, 0, 2]
                }
            })
            .collect();
        let y = (0..20)
            .map(|i| if i % 2 == 0 { "Terima" } else { "Tolak" }.to_string())
            .collect::<Vec<_>>();
        let config = TrainConfig::default();
        let a = cross_validate(&schema, &rows, &y, &config).unwrap();
        let b = cross_validate(&schema, &rows, &y, &config).unwrap();
        assert_eq!(a.fold_accuracies, b.fold_accuracies);
        // Perfectly separable data should score perfectly.
        assert!((a.mean() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cross_validate_rejects_too_few_rows() {
        let schema = CategorySchema::kredit_mikro();
        let rows = vec![vec![0, 0, 0, 0, 0], vec![1, 1, 1, 1, 1]];
        let y = vec!["Terima".to_string(), "Tolak".to_string()];
        let config = TrainConfig::default();
        assert!(cross_validate(&schema, &rows, &y, &config).is_err());
    }
}
