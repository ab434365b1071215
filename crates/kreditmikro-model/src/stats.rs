//! Descriptive dataset statistics for the presentation report.
//!
//! These counts are computed from the raw dataset, bypassing the trained
//! model entirely.
use crate::io::Dataset;
use crate::schema::CategorySchema;

/// Per-attribute cross-tabulation: `counts[category][class]`.
#[derive(Debug, Clone)]
pub struct AttributeBreakdown {
    pub attribute: String,
    pub categories: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl AttributeBreakdown {
    pub fn category_total(&self, category: usize) -> usize {
        self.counts[category].iter().sum()
    }
}

/// Summary counts over the raw training dataset.
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    pub total_rows: usize,
    /// Classes in first-encounter order, aligned with the count vectors.
    pub classes: Vec<String>,
    pub class_counts: Vec<usize>,
    pub attributes: Vec<AttributeBreakdown>,
}

impl DatasetSummary {
    /// Fraction of rows carrying the class at `index`, in [0, 1].
    pub fn class_share(&self, index: usize) -> f64 {
        if self.total_rows == 0 {
            return 0.0;
        }
        self.class_counts[index] as f64 / self.total_rows as f64
    }
}

/// Cross-tabulate the dataset per attribute, category, and class.
pub fn summarize(schema: &CategorySchema, dataset: &Dataset) -> DatasetSummary {
    let mut classes: Vec<String> = Vec::new();
    let mut class_of: Vec<usize> = Vec::with_capacity(dataset.labels.len());
    for label in &dataset.labels {
        let idx = match classes.iter().position(|c| c == label) {
            Some(idx) => idx,
            None => {
                classes.push(label.clone());
                classes.len() - 1
            }
        };
        class_of.push(idx);
    }

    let mut class_counts = vec![0usize; classes.len()];
    for &c in &class_of {
        class_counts[c] += 1;
    }

    let attributes = schema
        .attribute_names()
        .enumerate()
        .map(|(a, name)| {
            let categories: Vec<String> = schema
                .categories(name)
                .map(<[String]>::to_vec)
                .unwrap_or_default();
            let mut counts = vec![vec![0usize; classes.len()]; categories.len()];
            for (row, &c) in dataset.rows.iter().zip(&class_of) {
                if let Some(k) = categories.iter().position(|cat| cat == &row[a]) {
                    counts[k][c] += 1;
                }
            }
            AttributeBreakdown {
                attribute: name.to_string(),
                categories,
                counts,
            }
        })
        .collect();

    DatasetSummary {
        total_rows: dataset.rows.len(),
        classes,
        class_counts,
        attributes,
    }
}
