use crate::landing::envelope::{self, read_envelope, EnvelopeMetadata};
use crate::landing::error::LandingError;
use crate::landing::index::{DocumentIndex, LandingFileName};
use crate::types::category::Category;
use crate::types::document::RawDocument;
use bon::bon;
use chrono::{NaiveDateTime, SubsecRound, Utc};
use log::info;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only store of raw API documents, one directory per category:
/// `<root>/<category>/{identifier}_{logicalTime}.json`.
///
/// Files are written once, atomically, and never modified afterwards.
#[derive(Debug, Clone)]
pub struct LandingStore {
    root: PathBuf,
}

#[bon]
impl LandingStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.root.join(category.as_str())
    }

    /// Lands a raw payload and returns its location.
    ///
    /// The capture time is now; the logical time defaults to the capture time
    /// and is truncated to whole seconds, the resolution of the file name.
    /// Writing the same `(category, identifier, logical_time)` twice replaces
    /// the earlier file whole.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use serde_json::json;
    /// use weather_lake::{Category, LandingStore};
    ///
    /// # fn main() -> Result<(), weather_lake::LandingError> {
    /// let root = tempfile::tempdir().unwrap();
    /// let store = LandingStore::new(root.path());
    /// let noon = NaiveDate::from_ymd_opt(2025, 12, 30).unwrap().and_hms_opt(12, 0, 0).unwrap();
    ///
    /// let location = store
    ///     .write()
    ///     .category(Category::Points)
    ///     .identifier("Sugarloaf")
    ///     .payload(&json!({"gridId": "GYX", "gridX": 43, "gridY": 60}))
    ///     .logical_time(noon)
    ///     .call()?;
    ///
    /// assert!(location.ends_with("points/Sugarloaf_2025-12-30T12-00-00.json"));
    /// assert_eq!(store.read(&location)?["gridId"], "GYX");
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn write(
        &self,
        category: Category,
        identifier: &str,
        payload: &Value,
        logical_time: Option<NaiveDateTime>,
    ) -> Result<PathBuf, LandingError> {
        validate_identifier(identifier)?;

        // Microseconds, the resolution the bronze timestamp columns keep.
        let captured_at = Utc::now().naive_utc().trunc_subsecs(6);
        let logical_time = logical_time.unwrap_or(captured_at).trunc_subsecs(0);

        let dir = self.category_dir(category);
        std::fs::create_dir_all(&dir).map_err(|e| LandingError::Storage(dir.clone(), e))?;
        let path = dir.join(LandingFileName::new(identifier, logical_time).file_name());

        let metadata = EnvelopeMetadata {
            saved_at: captured_at,
            category: category.as_str().to_string(),
            identifier: identifier.to_string(),
            timestamp: logical_time,
        };
        let bytes =
            envelope::encode(&metadata, payload).map_err(|e| LandingError::Encode(path.clone(), e))?;

        // Stage next to the destination so the final rename stays on one file system.
        let mut staged = tempfile::Builder::new()
            .prefix(".landing-")
            .suffix(".tmp")
            .tempfile_in(&dir)
            .map_err(|e| LandingError::Storage(dir.clone(), e))?;
        staged
            .write_all(&bytes)
            .and_then(|_| staged.flush())
            .map_err(|e| LandingError::Storage(staged.path().to_path_buf(), e))?;
        staged
            .persist(&path)
            .map_err(|e| LandingError::Storage(path.clone(), e.error))?;

        info!(
            "Landed {} document {} at {} ({} bytes)",
            category,
            identifier,
            logical_time,
            bytes.len()
        );
        Ok(path)
    }

    /// The payload stored at `location`, without its envelope.
    pub fn read(&self, location: &Path) -> Result<Value, LandingError> {
        Ok(read_envelope(location)?.data)
    }

    /// Envelope and payload stored at `location`.
    pub fn read_document(&self, location: &Path) -> Result<RawDocument, LandingError> {
        Ok(read_envelope(location)?.into_document())
    }

    /// Name-derived index of one category.
    pub fn index(&self, category: Category) -> Result<DocumentIndex, LandingError> {
        DocumentIndex::scan(&self.category_dir(category))
    }

    /// Landed locations of a category, newest logical time first.
    ///
    /// * `.identifier(&str)`: only this identifier (exact match).
    /// * `.after(NaiveDateTime)` / `.before(NaiveDateTime)`: inclusive bounds
    ///   on the logical time.
    ///
    /// Files whose names do not parse are left out.
    #[builder]
    pub fn list(
        &self,
        category: Category,
        identifier: Option<&str>,
        after: Option<NaiveDateTime>,
        before: Option<NaiveDateTime>,
    ) -> Result<Vec<PathBuf>, LandingError> {
        let index = self.index(category)?;
        Ok(index
            .select(identifier, after, before)
            .into_iter()
            .map(|entry| entry.path.clone())
            .collect())
    }

    /// The newest location of `identifier`, if any.
    pub fn latest(
        &self,
        category: Category,
        identifier: &str,
    ) -> Result<Option<PathBuf>, LandingError> {
        let index = self.index(category)?;
        Ok(index.latest(identifier).map(|entry| entry.path.clone()))
    }
}

fn validate_identifier(identifier: &str) -> Result<(), LandingError> {
    let invalid = identifier.is_empty()
        || identifier.starts_with('.')
        || identifier.contains(['/', '\\', '\0']);
    if invalid {
        return Err(LandingError::InvalidKey(identifier.to_string()));
    }
    Ok(())
}
