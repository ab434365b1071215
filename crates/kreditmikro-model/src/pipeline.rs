//! The single encode-then-predict serving path.
//!
//! A `Pipeline` bundles the category schema with a fitted model so there is
//! exactly one code path from raw form values to a decision, at training and
//! at serving time alike. The pipeline is immutable after construction and
//! safe to share across request handlers.
use std::collections::HashMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::TrainConfig;
use crate::error::PipelineError;
use crate::model_selection::{cross_validate, CrossValidationResult};
use crate::naive_bayes::{CategoricalNb, Prediction};
use crate::schema::{CategorySchema, EncodedRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    schema: CategorySchema,
    model: CategoricalNb,
}

impl Pipeline {
    pub fn new(schema: CategorySchema, model: CategoricalNb) -> Self {
        Pipeline { schema, model }
    }

    /// Fit a pipeline from encoded rows, reporting the cross-validated
    /// accuracy diagnostic alongside. The diagnostic never gates training:
    /// the final model is always fitted on the full dataset.
    pub fn fit(
        schema: CategorySchema,
        rows: &[EncodedRecord],
        labels: &[String],
        config: &TrainConfig,
    ) -> Result<(Self, CrossValidationResult)> {
        let cv = cross_validate(&schema, rows, labels, config)?;
        log::info!(
            "Cross-validated accuracy over {} folds: {:.4} (std {:.4})",
            cv.fold_accuracies.len(),
            cv.mean(),
            cv.std()
        );
        let model = CategoricalNb::fit(&schema, rows, labels, config.alpha)?;
        Ok((Pipeline::new(schema, model), cv))
    }

    /// The schema, e.g. for enumerating valid form choices.
    pub fn schema(&self) -> &CategorySchema {
        &self.schema
    }

    pub fn model(&self) -> &CategoricalNb {
        &self.model
    }

    /// Encode a raw attribute-name to value mapping and score it.
    pub fn predict(&self, raw: &HashMap<String, String>) -> Result<Prediction, PipelineError> {
        let encoded = self.schema.encode(raw)?;
        Ok(self.model.predict(&encoded)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EncodeError;

    fn raw(values: [(&str, &str); 5]) -> HashMap<String, String> {
        values
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn trained() -> Pipeline {
        let schema = CategorySchema::kredit_mikro();
        let rows = vec![
            vec![2, 2, 2, 1, 0],
            vec![2, 1, 1, 1, 1],
            vec![1, 2, 1, 1, 0],
            vec![2, 1, 2, 1, 2],
            vec![2, 2, 1, 1, 1],
            vec![0, 0, 0, 0, 2],
            vec![0, 1, 0, 0, 1],
            vec![0, 0, 1, 0, 2],
            vec![1, 0, 0, 0, 2],
            vec![0, 0, 0, 0, 1],
        ];
        let labels: Vec<String> = ["Terima"; 5]
            .iter()
            .chain(["Tolak"; 5].iter())
            .map(|s| s.to_string())
            .collect();
        let config = TrainConfig::default();
        Pipeline::fit(schema, &rows, &labels, &config).unwrap().0
    }

    #[test]
    fn predicts_from_raw_values() {
        let pipeline = trained();
        let prediction = pipeline
            .predict(&raw([
                ("Riwayat_Kredit", "Baik"),
                ("Lama_Usaha", "1-3 Tahun"),
                ("Pendapatan_Bulan", "Sedang"),
                ("Jaminan", "Ada"),
                ("Jumlah_Pinjaman", "Sedang"),
            ]))
            .unwrap();
        assert_eq!(prediction.label, "Terima");
        assert!(prediction.probability("Terima").unwrap() > 0.5);
        assert!(prediction.probability("Tolak").is_some());
    }

    #[test]
    fn surfaces_unknown_category_from_the_encoder() {
        let pipeline = trained();
        let result = pipeline.predict(&raw([
            ("Riwayat_Kredit", "Baik"),
            ("Lama_Usaha", "1-3 Tahun"),
            ("Pendapatan_Bulan", "High"),
            ("Jaminan", "Ada"),
            ("Jumlah_Pinjaman", "Sedang"),
        ]));
        match result {
            Err(PipelineError::Encode(EncodeError::UnknownCategory { attribute, value })) => {
                assert_eq!(attribute, "Pendapatan_Bulan");
                assert_eq!(value, "High");
            }
            other => panic!("expected UnknownCategory, got {:?}", other),
        }
    }
}
