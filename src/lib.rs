//! Lands raw weather.gov API documents in an immutable, time-partitioned
//! store and flattens them into typed bronze tables.
//!
//! * [`LandingStore`] writes each payload once, wrapped in an envelope, to
//!   `<root>/<category>/{identifier}_{logicalTime}.json` and lists it back
//!   newest first.
//! * [`flatten`] maps a batch of [`RawDocument`]s of one [`Category`] to
//!   [`FlatRow`]s, expanding forecast periods and feature collections.
//! * [`ColumnarSink`] appends rows to one parquet-backed table per category.
//! * [`WeatherLake`] ties the three together.

mod config;
mod error;
mod flatten;
mod hash;
mod lake;
mod landing;
mod sink;
mod types;
mod utils;

pub use config::LakeConfig;
pub use error::LakeError;
pub use hash::hash_key;
pub use lake::{LoadReport, LoadSummary, UnreadableDocument, WeatherLake};

pub use flatten::coerce::parse_timestamp;
pub use flatten::error::MappingError;
pub use flatten::{flatten, flatten_document, DocumentFailure, FlattenOutcome};

pub use landing::envelope::{Envelope, EnvelopeMetadata};
pub use landing::error::LandingError;
pub use landing::index::{DocumentIndex, IndexEntry, LandingFileName};
pub use landing::store::LandingStore;

pub use sink::columnar::ColumnarSink;
pub use sink::error::SinkError;

pub use types::category::Category;
pub use types::document::{Lineage, RawDocument};
pub use types::payload::{Geometry, Position, QuantitativeValue};
pub use types::row::{FieldValue, FlatRow};
pub use types::schema::{ColumnDef, ColumnType, TableSchema, LINEAGE_COLUMNS};
