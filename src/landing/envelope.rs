//! The on-disk wire format of a landed document:
//!
//! ```json
//! {
//!   "metadata": {"saved_at": "...", "category": "...", "identifier": "...", "timestamp": "..."},
//!   "data": { ...raw payload... }
//! }
//! ```

use crate::landing::error::LandingError;
use crate::types::document::RawDocument;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeMetadata {
    /// Capture time.
    #[serde(with = "envelope_time")]
    pub saved_at: NaiveDateTime,
    pub category: String,
    pub identifier: String,
    /// Logical time of the document.
    #[serde(with = "envelope_time")]
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    pub metadata: EnvelopeMetadata,
    pub data: Value,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    metadata: &'a EnvelopeMetadata,
    data: &'a Value,
}

impl Envelope {
    pub fn into_document(self) -> RawDocument {
        RawDocument {
            category: self.metadata.category,
            identifier: self.metadata.identifier,
            captured_at: self.metadata.saved_at,
            logical_time: self.metadata.timestamp,
            payload: self.data,
        }
    }
}

/// Serializes an envelope around a borrowed payload.
pub(crate) fn encode(metadata: &EnvelopeMetadata, data: &Value) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec_pretty(&EnvelopeRef { metadata, data })
}

/// Reads and decodes the envelope stored at `path`.
pub(crate) fn read_envelope(path: &Path) -> Result<Envelope, LandingError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LandingError::NotFound(path.to_path_buf()),
        _ => LandingError::Read(path.to_path_buf(), e),
    })?;
    serde_json::from_slice(&bytes).map_err(|e| LandingError::Corruption(path.to_path_buf(), e))
}

mod envelope_time {
    use crate::flatten::coerce::parse_timestamp;
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_timestamp(&text)
            .ok_or_else(|| de::Error::custom(format!("unparseable envelope timestamp {text:?}")))
    }
}
