//! Categorical Naive Bayes with additive smoothing.
//!
//! The model holds, per target class and per attribute, a smoothed
//! conditional probability table `P(category | class)` plus class priors.
//! Inference sums log-probabilities (avoiding underflow) and converts the
//! per-class log scores to a normalized distribution with the stabilized
//! exponential trick.
use serde::{Deserialize, Serialize};

use crate::error::{PredictError, TrainError};
use crate::schema::{CategorySchema, EncodedRecord};

/// Default additive smoothing constant (Laplace smoothing).
pub const DEFAULT_ALPHA: f64 = 1.0;

/// A fitted categorical Naive Bayes model. Read-only after `fit`; safe to
/// share across threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalNb {
    /// Class labels in first-encounter order of the training data. Callers
    /// locate classes by name, not by position.
    classes: Vec<String>,
    class_priors: Vec<f64>,
    attribute_names: Vec<String>,
    /// `conditional[attribute][class][category]`, every cell strictly
    /// positive thanks to smoothing.
    conditional: Vec<Vec<Vec<f64>>>,
    alpha: f64,
}

/// The outcome of scoring one encoded record: the arg-max class plus the
/// full probability distribution so callers can show a complete confidence
/// breakdown. Probabilities are raw floats in [0, 1]; formatting is the
/// presentation layer's job.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    probabilities: Vec<(String, f64)>,
}

impl Prediction {
    /// Probability for a class located by name.
    pub fn probability(&self, class: &str) -> Option<f64> {
        self.probabilities
            .iter()
            .find(|(name, _)| name == class)
            .map(|(_, p)| *p)
    }

    /// All class probabilities, in model class order.
    pub fn probabilities(&self) -> &[(String, f64)] {
        &self.probabilities
    }
}

impl CategoricalNb {
    /// Fit priors and smoothed conditional tables from encoded rows.
    ///
    /// Classes are discovered from `labels` in first-encounter order.
    /// Category counts per attribute come from the schema, so categories
    /// unseen in training still get a smoothed (strictly positive) cell.
    /// Deterministic: identical inputs produce identical tables.
    pub fn fit(
        schema: &CategorySchema,
        rows: &[EncodedRecord],
        labels: &[String],
        alpha: f64,
    ) -> Result<Self, TrainError> {
        if rows.len() != labels.len() {
            return Err(TrainError::LengthMismatch {
                rows: rows.len(),
                labels: labels.len(),
            });
        }
        if rows.is_empty() {
            return Err(TrainError::EmptyDataset);
        }

        let n_attributes = schema.num_attributes();
        for row in rows {
            if row.len() != n_attributes {
                return Err(TrainError::AttributeCountMismatch {
                    expected: n_attributes,
                    got: row.len(),
                });
            }
            for (a, &k) in row.iter().enumerate() {
                let num_categories = schema.num_categories(a).unwrap_or(0);
                if k >= num_categories {
                    return Err(TrainError::CategoryIndexOutOfRange {
                        attribute: schema.attribute_name(a).unwrap_or_default().to_string(),
                        index: k,
                        num_categories,
                    });
                }
            }
        }

        let mut classes: Vec<String> = Vec::new();
        let mut class_of: Vec<usize> = Vec::with_capacity(labels.len());
        for label in labels {
            let idx = match classes.iter().position(|c| c == label) {
                Some(idx) => idx,
                None => {
                    classes.push(label.clone());
                    classes.len() - 1
                }
            };
            class_of.push(idx);
        }

        let n_classes = classes.len();
        let mut class_counts = vec![0usize; n_classes];
        for &c in &class_of {
            class_counts[c] += 1;
        }

        let mut counts: Vec<Vec<Vec<usize>>> = (0..n_attributes)
            .map(|a| {
                let k = schema.num_categories(a).unwrap_or(0);
                vec![vec![0usize; k]; n_classes]
            })
            .collect();

        for (row, &c) in rows.iter().zip(&class_of) {
            for (a, &k) in row.iter().enumerate() {
                counts[a][c][k] += 1;
            }
        }

        let total = rows.len() as f64;
        let class_priors = class_counts.iter().map(|&n| n as f64 / total).collect();

        let conditional = counts
            .iter()
            .map(|per_class| {
                per_class
                    .iter()
                    .enumerate()
                    .map(|(c, cat_counts)| {
                        let k = cat_counts.len() as f64;
                        let denom = class_counts[c] as f64 + alpha * k;
                        cat_counts
                            .iter()
                            .map(|&n| (n as f64 + alpha) / denom)
                            .collect()
                    })
                    .collect()
            })
            .collect();

        Ok(CategoricalNb {
            classes,
            class_priors,
            attribute_names: schema.attribute_names().map(str::to_string).collect(),
            conditional,
            alpha,
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Prior probability for a class located by name.
    pub fn prior(&self, class: &str) -> Option<f64> {
        self.classes
            .iter()
            .position(|c| c == class)
            .map(|i| self.class_priors[i])
    }

    /// Smoothed `P(category | class)` cell, for diagnostics and tests.
    pub fn conditional_probability(
        &self,
        attribute: usize,
        class: &str,
        category: usize,
    ) -> Option<f64> {
        let c = self.classes.iter().position(|name| name == class)?;
        self.conditional
            .get(attribute)?
            .get(c)?
            .get(category)
            .copied()
    }

    /// Joint log-probability per class for an encoded record, in class order.
    pub fn log_scores(&self, record: &[usize]) -> Result<Vec<f64>, PredictError> {
        if record.len() != self.conditional.len() {
            return Err(PredictError::AttributeCountMismatch {
                expected: self.conditional.len(),
                got: record.len(),
            });
        }
        for (a, &k) in record.iter().enumerate() {
            let num_categories = self.conditional[a][0].len();
            if k >= num_categories {
                return Err(PredictError::CategoryIndexOutOfRange {
                    attribute: self.attribute_names[a].clone(),
                    index: k,
                    num_categories,
                });
            }
        }

        let scores = (0..self.classes.len())
            .map(|c| {
                let mut score = self.class_priors[c].ln();
                for (a, &k) in record.iter().enumerate() {
                    score += self.conditional[a][c][k].ln();
                }
                score
            })
            .collect();
        Ok(scores)
    }

    /// Score an encoded record and return the arg-max class plus the full
    /// normalized probability distribution.
    ///
    /// Ties are broken in favor of the first-encountered class in `classes`
    /// order. Pure computation over the fitted tables.
    pub fn predict(&self, record: &[usize]) -> Result<Prediction, PredictError> {
        let log_scores = self.log_scores(record)?;

        // Stabilized exp-normalization: shift by the max log-score so the
        // largest exponent is exactly zero.
        let max_score = log_scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exp_scores: Vec<f64> = log_scores.iter().map(|&s| (s - max_score).exp()).collect();
        let sum: f64 = exp_scores.iter().sum();

        let mut best = 0;
        for (i, &s) in log_scores.iter().enumerate() {
            if s > log_scores[best] {
                best = i;
            }
        }

        let probabilities = self
            .classes
            .iter()
            .zip(&exp_scores)
            .map(|(name, &e)| (name.clone(), e / sum))
            .collect();

        Ok(Prediction {
            label: self.classes[best].clone(),
            probabilities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> CategorySchema {
        CategorySchema::kredit_mikro()
    }

    fn fit_small() -> CategoricalNb {
        // Terima rows lean Baik/Ada, Tolak rows lean Buruk/Tidak Ada.
        let rows = vec![
            vec![2, 1, 1, 1, 0],
            vec![2, 2, 2, 1, 1],
            vec![1, 1, 1, 1, 0],
            vec![2, 1, 2, 1, 2],
            vec![0, 0, 0, 0, 1],
            vec![0, 1, 0, 0, 2],
            vec![1, 0, 0, 0, 1],
            vec![0, 0, 1, 0, 2],
        ];
        let labels: Vec<String> = ["Terima", "Terima", "Terima", "Terima", "Tolak", "Tolak", "Tolak", "Tolak"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        CategoricalNb::fit(&schema(), &rows, &labels, DEFAULT_ALPHA).unwrap()
    }

    #[test]
    fn priors_match_label_frequencies() {
        let model = fit_small();
        assert_eq!(model.classes(), ["Terima", "Tolak"]);
        assert!((model.prior("Terima").unwrap() - 0.5).abs() < 1e-12);
        assert!((model.prior("Tolak").unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn probabilities_sum_to_one_and_stay_in_range() {
        let model = fit_small();
        for record in [vec![2, 1, 1, 1, 0], vec![0, 0, 0, 0, 2], vec![1, 2, 2, 0, 1]] {
            let prediction = model.predict(&record).unwrap();
            let sum: f64 = prediction.probabilities().iter().map(|(_, p)| p).sum();
            assert!((sum - 1.0).abs() < 1e-9);
            for (_, p) in prediction.probabilities() {
                assert!((0.0..=1.0).contains(p));
            }
        }
    }

    #[test]
    fn predicted_label_is_argmax_of_distribution() {
        let model = fit_small();
        let prediction = model.predict(&[2, 1, 1, 1, 0]).unwrap();
        let (argmax, _) = prediction
            .probabilities()
            .iter()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
            .unwrap();
        assert_eq!(&prediction.label, argmax);
    }

    #[test]
    fn smoothing_keeps_unseen_cells_positive() {
        // No training row has Jumlah_Pinjaman=Kecil (index 0) under Tolak.
        let model = fit_small();
        let cell = model.conditional_probability(4, "Tolak", 0).unwrap();
        assert!(cell > 0.0);
        // Expected: (0 + 1) / (4 + 1 * 3)
        assert!((cell - 1.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn fit_is_deterministic() {
        let a = fit_small();
        let b = fit_small();
        assert_eq!(a, b);
    }

    #[test]
    fn ties_break_toward_first_encountered_class() {
        // Perfectly symmetric data: both classes score identically.
        let rows = vec![vec![0, 0, 0, 0, 0], vec![0, 0, 0, 0, 0]];
        let labels = vec!["Terima".to_string(), "Tolak".to_string()];
        let model = CategoricalNb::fit(&schema(), &rows, &labels, DEFAULT_ALPHA).unwrap();
        let prediction = model.predict(&[0, 0, 0, 0, 0]).unwrap();
        assert_eq!(prediction.label, "Terima");
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let model = fit_small();
        match model.predict(&[2, 1, 1, 5, 0]) {
            Err(PredictError::CategoryIndexOutOfRange {
                attribute,
                index,
                num_categories,
            }) => {
                assert_eq!(attribute, "Jaminan");
                assert_eq!(index, 5);
                assert_eq!(num_categories, 2);
            }
            other => panic!("expected CategoryIndexOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn wrong_arity_is_rejected() {
        let model = fit_small();
        assert!(matches!(
            model.predict(&[1, 1, 1]),
            Err(PredictError::AttributeCountMismatch { expected: 5, got: 3 })
        ));
    }

    #[test]
    fn fit_rejects_mismatched_lengths_and_empty_data() {
        let s = schema();
        let rows = vec![vec![0, 0, 0, 0, 0]];
        assert!(matches!(
            CategoricalNb::fit(&s, &rows, &[], DEFAULT_ALPHA),
            Err(TrainError::LengthMismatch { rows: 1, labels: 0 })
        ));
        assert!(matches!(
            CategoricalNb::fit(&s, &[], &[], DEFAULT_ALPHA),
            Err(TrainError::EmptyDataset)
        ));
    }

    #[test]
    fn fit_rejects_malformed_rows() {
        let s = schema();
        let labels = vec!["Terima".to_string(), "Tolak".to_string()];

        let short = vec![vec![0, 0, 0], vec![0, 0, 0, 0, 0]];
        assert!(matches!(
            CategoricalNb::fit(&s, &short, &labels, DEFAULT_ALPHA),
            Err(TrainError::AttributeCountMismatch { expected: 5, got: 3 })
        ));

        let out_of_range = vec![vec![0, 0, 0, 0, 0], vec![0, 0, 0, 9, 0]];
        match CategoricalNb::fit(&s, &out_of_range, &labels, DEFAULT_ALPHA) {
            Err(TrainError::CategoryIndexOutOfRange {
                attribute,
                index,
                num_categories,
            }) => {
                assert_eq!(attribute, "Jaminan");
                assert_eq!(index, 9);
                assert_eq!(num_categories, 2);
            }
            other => panic!("expected CategoryIndexOutOfRange, got {:?}", other),
        }
    }
}
