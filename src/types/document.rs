//! The raw document as it lives in the landing zone, and the lineage
//! quadruple every derived row carries back to it.

use chrono::NaiveDateTime;
use serde_json::Value;

/// A landed API payload together with the envelope it was written with.
///
/// Identified by `(category, identifier, logical_time)`. The payload is kept
/// exactly as the API returned it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub category: String,
    pub identifier: String,
    /// When the document was written to the landing zone (UTC).
    pub captured_at: NaiveDateTime,
    /// The time the document describes, encoded in its file name (UTC, whole seconds).
    pub logical_time: NaiveDateTime,
    pub payload: Value,
}

impl RawDocument {
    /// The lineage quadruple copied onto every row flattened from this document.
    pub fn lineage(&self) -> Lineage {
        Lineage {
            captured_at: self.captured_at,
            category: self.category.clone(),
            identifier: self.identifier.clone(),
            logical_time: self.logical_time,
        }
    }
}

/// `(captured_at, category, identifier, logical_time)`, the join key from a
/// bronze row back to the raw document it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Lineage {
    pub captured_at: NaiveDateTime,
    pub category: String,
    pub identifier: String,
    pub logical_time: NaiveDateTime,
}
