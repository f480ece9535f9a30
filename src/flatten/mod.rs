//! Category specific mappings from landed raw documents to flat bronze rows.
//!
//! Each category module deserializes its payload into a typed tree whose
//! fields are all optional, then walks that tree into [`FlatRow`]s. Absent
//! optional fields become null cells; absent required fields and values that
//! contradict the expected shape fail the document with a [`MappingError`].
//! A failed document never aborts the batch it belongs to.

pub(crate) mod coerce;
pub mod error;
mod forecast;
mod grid_data;
mod observations;
mod points;
mod stations;
mod zones;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::flatten::error::MappingError;
use crate::types::category::Category;
use crate::types::document::RawDocument;
use crate::types::row::FlatRow;
use chrono::NaiveDateTime;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A document that was excluded from a flattening pass.
#[derive(Debug)]
pub struct DocumentFailure {
    pub category: Category,
    pub identifier: String,
    pub logical_time: NaiveDateTime,
    pub error: MappingError,
}

/// Result of flattening one batch: the rows of every document that mapped
/// cleanly, and one failure record per document that did not.
#[derive(Debug, Default)]
pub struct FlattenOutcome {
    pub rows: Vec<FlatRow>,
    pub failures: Vec<DocumentFailure>,
    documents: usize,
}

impl FlattenOutcome {
    /// Number of documents in the batch.
    pub fn documents(&self) -> usize {
        self.documents
    }

    pub fn succeeded_documents(&self) -> usize {
        self.documents - self.failures.len()
    }

    /// True when the batch was non-empty and not a single document mapped.
    pub fn is_total_failure(&self) -> bool {
        self.documents > 0 && self.succeeded_documents() == 0
    }
}

/// Flattens a single raw document with the fixed mapping of `category`.
///
/// The document's own lineage is copied onto every produced row, whatever
/// category string its envelope carries.
pub fn flatten_document(
    category: Category,
    document: &RawDocument,
) -> Result<Vec<FlatRow>, MappingError> {
    match category {
        Category::Points => points::flatten(document),
        Category::Forecasts | Category::Hourly => forecast::flatten(category, document),
        Category::Observations => observations::flatten(document),
        Category::Stations => stations::flatten(document),
        Category::Zones => zones::flatten(document),
        Category::GridData => grid_data::flatten(document),
    }
}

/// Flattens a batch of raw documents of one category.
///
/// Documents that fail to map are recorded in [`FlattenOutcome::failures`]
/// and skipped; the remaining documents still produce their rows.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use serde_json::json;
/// use weather_lake::{flatten, Category, RawDocument};
///
/// let t = NaiveDate::from_ymd_opt(2025, 12, 30).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let document = RawDocument {
///     category: "points".to_string(),
///     identifier: "Sugarloaf".to_string(),
///     captured_at: t,
///     logical_time: t,
///     payload: json!({"gridId": "GYX", "gridX": 43, "gridY": 60}),
/// };
///
/// let outcome = flatten(Category::Points, &[document]);
/// assert_eq!(outcome.rows.len(), 1);
/// assert!(outcome.failures.is_empty());
/// assert_eq!(outcome.rows[0].get("gridX").and_then(|v| v.as_i64()), Some(43));
/// ```
pub fn flatten(category: Category, documents: &[RawDocument]) -> FlattenOutcome {
    let mut outcome = FlattenOutcome {
        documents: documents.len(),
        ..Default::default()
    };

    for document in documents {
        match flatten_document(category, document) {
            Ok(rows) => {
                debug!(
                    "Flattened {} {} at {} into {} rows",
                    category,
                    document.identifier,
                    document.logical_time,
                    rows.len()
                );
                outcome.rows.extend(rows);
            }
            Err(error) => {
                warn!(
                    "Skipping {} document {} at {}: {}",
                    category, document.identifier, document.logical_time, error
                );
                outcome.failures.push(DocumentFailure {
                    category,
                    identifier: document.identifier.clone(),
                    logical_time: document.logical_time,
                    error,
                });
            }
        }
    }

    if outcome.is_total_failure() {
        warn!(
            "No {} document of {} could be flattened",
            category, outcome.documents
        );
    }
    outcome
}

// --- Helpers shared by the category mappings ---

fn object_of(category: Category, payload: &Value) -> Result<&Map<String, Value>, MappingError> {
    payload
        .as_object()
        .ok_or(MappingError::NotAnObject { category })
}

/// Deserializes a payload section into its typed tree.
fn section<T: DeserializeOwned>(
    category: Category,
    path: &'static str,
    value: &Value,
) -> Result<T, MappingError> {
    <T as serde::Deserialize>::deserialize(value).map_err(|source| MappingError::Malformed {
        category,
        path,
        source,
    })
}

fn require<T>(category: Category, path: &'static str, value: Option<T>) -> Result<T, MappingError> {
    value.ok_or(MappingError::MissingField { category, path })
}

/// The elements of a feature collection. A payload that is itself a single
/// feature counts as a collection of one.
fn features_of(category: Category, payload: &Value) -> Result<Vec<&Value>, MappingError> {
    let object = object_of(category, payload)?;
    match object.get("features") {
        Some(Value::Array(features)) => Ok(features.iter().collect()),
        Some(Value::Null) | None if object.contains_key("properties") => Ok(vec![payload]),
        Some(Value::Null) | None => Err(MappingError::MissingField {
            category,
            path: "features",
        }),
        Some(other) => Err(MappingError::Malformed {
            category,
            path: "features",
            source: serde::de::Error::custom(format!("expected an array, found {other}")),
        }),
    }
}
