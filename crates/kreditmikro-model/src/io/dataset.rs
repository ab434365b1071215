//! Training dataset CSV reader.
//!
//! The training CSV carries the five attribute columns plus the `Keputusan`
//! target, resolved by header name in any column order. Validation is
//! strict and fatal: a cell outside its attribute's vocabulary or an empty
//! label aborts the read with a message naming the row, attribute, and
//! value. Training never proceeds on dirty data.
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;

use crate::error::EncodeError;
use crate::schema::{CategorySchema, EncodedRecord};

/// Header name of the target column.
pub const LABEL_COLUMN: &str = "Keputusan";

/// A validated raw dataset: attribute values in schema order, plus labels.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// `rows[i]` holds the raw category strings for row `i`, one per
    /// attribute, in schema attribute order.
    pub rows: Vec<Vec<String>>,
    pub labels: Vec<String>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ordinal-encode every row. Values were validated at read time, so
    /// this only fails if the schema differs from the one used to read.
    pub fn encoded(&self, schema: &CategorySchema) -> Result<Vec<EncodedRecord>, EncodeError> {
        self.rows.iter().map(|row| schema.encode_row(row)).collect()
    }
}

/// Read and validate a training CSV against the schema.
pub fn read_dataset<P: AsRef<Path>>(path: P, schema: &CategorySchema) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(&path)
        .with_context(|| format!("Failed to open dataset: {}", path.as_ref().display()))?;

    let headers = reader
        .headers()
        .context("Failed to read dataset header row")?
        .clone();

    let attribute_indices: Vec<usize> = schema
        .attribute_names()
        .map(|name| {
            find_column(&headers, name)
                .ok_or_else(|| anyhow!("Dataset is missing attribute column '{}'", name))
        })
        .collect::<Result<_>>()?;

    let label_idx = find_column(&headers, LABEL_COLUMN)
        .ok_or_else(|| anyhow!("Dataset is missing target column '{}'", LABEL_COLUMN))?;

    let mut rows = Vec::new();
    let mut labels = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        let mut row = Vec::with_capacity(attribute_indices.len());
        for (&col, name) in attribute_indices.iter().zip(schema.attribute_names()) {
            let value = record
                .get(col)
                .ok_or_else(|| anyhow!("Row {} is missing a value for '{}'", row_idx + 1, name))?;
            let known = schema
                .categories(name)
                .map(|categories| categories.iter().any(|c| c == value))
                .unwrap_or(false);
            if !known {
                return Err(anyhow!(
                    "Row {}: unknown category '{}' for attribute '{}'",
                    row_idx + 1,
                    value,
                    name
                ));
            }
            row.push(value.to_string());
        }

        let label = record
            .get(label_idx)
            .ok_or_else(|| anyhow!("Row {} is missing the '{}' value", row_idx + 1, LABEL_COLUMN))?;
        if label.is_empty() {
            return Err(anyhow!(
                "Row {}: empty '{}' value",
                row_idx + 1,
                LABEL_COLUMN
            ));
        }

        rows.push(row);
        labels.push(label.to_string());
    }

    log::debug!(
        "Read {} rows from {}",
        rows.len(),
        path.as_ref().display()
    );

    Ok(Dataset { rows, labels })
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}
