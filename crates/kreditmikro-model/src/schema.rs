//! Fixed category vocabularies and ordinal encoding.
//!
//! Each attribute carries an ordered list of allowed category strings; the
//! position of a value in that list is its encoded index. The order is a
//! deliberate ordinal ranking (e.g. `Rendah < Sedang < Tinggi` for monthly
//! income), not an accident of construction, and `categories` always returns
//! the stored order so callers can rely on it.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

/// A fixed-length sequence of category indices, one per schema attribute.
pub type EncodedRecord = Vec<usize>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    categories: Vec<String>,
}

/// Ordered set of named attributes with their category vocabularies.
///
/// Immutable once built: both training and serving encode against the same
/// schema instance, and the schema travels inside the serialized artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySchema {
    attributes: Vec<Attribute>,
}

impl CategorySchema {
    pub fn new<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: Into<String>,
    {
        CategorySchema {
            attributes: attributes
                .into_iter()
                .map(|(name, categories)| Attribute {
                    name: name.into(),
                    categories: categories.into_iter().map(Into::into).collect(),
                })
                .collect(),
        }
    }

    /// The fixed five-attribute schema of the kredit mikro dataset.
    pub fn kredit_mikro() -> Self {
        CategorySchema::new([
            ("Riwayat_Kredit", vec!["Buruk", "Cukup", "Baik"]),
            (
                "Lama_Usaha",
                vec!["Kurang dari 1 Tahun", "1-3 Tahun", "Lebih dari 3 Tahun"],
            ),
            ("Pendapatan_Bulan", vec!["Rendah", "Sedang", "Tinggi"]),
            ("Jaminan", vec!["Tidak Ada", "Ada"]),
            ("Jumlah_Pinjaman", vec!["Kecil", "Sedang", "Besar"]),
        ])
    }

    pub fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    /// Attribute names in encoding order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    pub fn attribute_name(&self, index: usize) -> Option<&str> {
        self.attributes.get(index).map(|a| a.name.as_str())
    }

    /// The allowed categories for an attribute, in the exact stored order.
    pub fn categories(&self, name: &str) -> Option<&[String]> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.categories.as_slice())
    }

    pub fn num_categories(&self, index: usize) -> Option<usize> {
        self.attributes.get(index).map(|a| a.categories.len())
    }

    /// Encode a raw record given as an attribute-name to value mapping.
    ///
    /// Every schema attribute must be present and every value must appear in
    /// its attribute's vocabulary; an unknown value is an error, never a
    /// silent default.
    pub fn encode(&self, record: &HashMap<String, String>) -> Result<EncodedRecord, EncodeError> {
        self.attributes
            .iter()
            .map(|attr| {
                let value = record
                    .get(&attr.name)
                    .ok_or_else(|| EncodeError::MissingAttribute(attr.name.clone()))?;
                lookup(attr, value)
            })
            .collect()
    }

    /// Encode a raw record given as values in attribute order (the CSV path).
    /// The row must have exactly one value per attribute.
    pub fn encode_row(&self, values: &[String]) -> Result<EncodedRecord, EncodeError> {
        if values.len() < self.attributes.len() {
            let missing = &self.attributes[values.len()].name;
            return Err(EncodeError::MissingAttribute(missing.clone()));
        }
        if values.len() > self.attributes.len() {
            return Err(EncodeError::TooManyValues {
                expected: self.attributes.len(),
                got: values.len(),
            });
        }
        self.attributes
            .iter()
            .zip(values)
            .map(|(attr, value)| lookup(attr, value))
            .collect()
    }

    /// Map an encoded record back to its category strings.
    ///
    /// Returns `None` when the record length or any index does not fit this
    /// schema.
    pub fn decode(&self, record: &[usize]) -> Option<Vec<&str>> {
        if record.len() != self.attributes.len() {
            return None;
        }
        self.attributes
            .iter()
            .zip(record)
            .map(|(attr, &idx)| attr.categories.get(idx).map(String::as_str))
            .collect()
    }
}

fn lookup(attr: &Attribute, value: &str) -> Result<usize, EncodeError> {
    attr.categories
        .iter()
        .position(|c| c == value)
        .ok_or_else(|| EncodeError::UnknownCategory {
            attribute: attr.name.clone(),
            value: value.to_string(),
        })
}
