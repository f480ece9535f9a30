//! The main entry point: lands raw documents and loads them into the bronze
//! tables.

use crate::config::LakeConfig;
use crate::error::LakeError;
use crate::flatten::{flatten, DocumentFailure};
use crate::landing::error::LandingError;
use crate::landing::store::LandingStore;
use crate::sink::columnar::ColumnarSink;
use crate::types::category::Category;
use crate::utils::ensure_dir_exists;
use bon::bon;
use chrono::NaiveDateTime;
use log::{info, warn};
use polars::prelude::LazyFrame;
use serde_json::Value;
use std::path::PathBuf;

/// A landed file that could not be read back while loading.
#[derive(Debug)]
pub struct UnreadableDocument {
    pub location: PathBuf,
    pub error: LandingError,
}

/// What one category load did.
#[derive(Debug)]
pub struct LoadReport {
    pub category: Category,
    /// Documents read from the landing zone.
    pub documents: usize,
    pub rows_appended: usize,
    /// Documents that were read but could not be flattened.
    pub failures: Vec<DocumentFailure>,
    pub unreadable: Vec<UnreadableDocument>,
}

impl LoadReport {
    pub fn succeeded_documents(&self) -> usize {
        self.documents - self.failures.len()
    }

    /// True when documents were landed but none of them made it into the table.
    pub fn is_total_failure(&self) -> bool {
        self.documents + self.unreadable.len() > 0 && self.succeeded_documents() == 0
    }
}

/// Outcome of loading every category.
#[derive(Debug, Default)]
pub struct LoadSummary {
    pub reports: Vec<LoadReport>,
    /// Categories whose load failed as a whole.
    pub failed: Vec<(Category, LakeError)>,
}

impl LoadSummary {
    pub fn total_rows(&self) -> usize {
        self.reports.iter().map(|r| r.rows_appended).sum()
    }

    pub fn report(&self, category: Category) -> Option<&LoadReport> {
        self.reports.iter().find(|r| r.category == category)
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A landing zone paired with its bronze tables.
///
/// # Examples
///
/// ```rust
/// # use weather_lake::{Category, LakeConfig, LakeError, WeatherLake};
/// # use serde_json::json;
/// # #[tokio::main]
/// # async fn main() -> Result<(), LakeError> {
/// let base = tempfile::tempdir().unwrap();
/// let lake = WeatherLake::new(LakeConfig::under(base.path()))?;
///
/// lake.land()
///     .category(Category::Points)
///     .identifier("Sugarloaf")
///     .payload(&json!({"gridId": "GYX", "gridX": 43, "gridY": 60}))
///     .call()?;
///
/// let summary = lake.load_all().await;
/// assert_eq!(summary.total_rows(), 1);
/// assert_eq!(lake.sink().row_count("bronze_points")?, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WeatherLake {
    config: LakeConfig,
    landing: LandingStore,
    sink: ColumnarSink,
}

#[bon]
impl WeatherLake {
    /// Opens the lake described by `config`, creating both directories if needed.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError::DirCreation`] if either directory cannot be created.
    pub fn new(config: LakeConfig) -> Result<Self, LakeError> {
        for dir in [&config.landing_root, &config.store_path] {
            ensure_dir_exists(dir).map_err(|e| LakeError::DirCreation(dir.clone(), e))?;
        }
        Ok(Self {
            landing: LandingStore::new(&config.landing_root),
            sink: ColumnarSink::new(&config.store_path),
            config,
        })
    }

    /// Opens the lake configured through the environment, see [`LakeConfig::from_env`].
    pub fn from_env() -> Result<Self, LakeError> {
        Self::new(LakeConfig::from_env())
    }

    pub fn config(&self) -> &LakeConfig {
        &self.config
    }

    pub fn landing(&self) -> &LandingStore {
        &self.landing
    }

    pub fn sink(&self) -> &ColumnarSink {
        &self.sink
    }

    /// Lands a raw payload. See [`LandingStore::write`].
    #[builder]
    pub fn land(
        &self,
        category: Category,
        identifier: &str,
        payload: &Value,
        logical_time: Option<NaiveDateTime>,
    ) -> Result<PathBuf, LakeError> {
        Ok(self
            .landing
            .write()
            .category(category)
            .identifier(identifier)
            .payload(payload)
            .maybe_logical_time(logical_time)
            .call()?)
    }

    /// Reads every landed document of `category`, flattens them and appends
    /// the rows to the category's bronze table.
    ///
    /// Unreadable files and documents that fail to flatten are reported and
    /// skipped. Running this twice without clearing the table first appends
    /// the same rows again.
    pub fn load_category(&self, category: Category) -> Result<LoadReport, LakeError> {
        let locations = self.landing.list().category(category).call()?;

        let mut documents = Vec::with_capacity(locations.len());
        let mut unreadable = Vec::new();
        for location in locations {
            match self.landing.read_document(&location) {
                Ok(document) => documents.push(document),
                Err(error) => {
                    warn!("Skipping unreadable {} document: {}", category, error);
                    unreadable.push(UnreadableDocument { location, error });
                }
            }
        }

        let outcome = flatten(category, &documents);
        let rows_appended = self
            .sink
            .append_rows(category.table_name(), &outcome.rows)?;

        let report = LoadReport {
            category,
            documents: documents.len(),
            rows_appended,
            failures: outcome.failures,
            unreadable,
        };
        info!(
            "Loaded {}: {} of {} documents, {} rows into {}",
            category,
            report.succeeded_documents(),
            report.documents,
            report.rows_appended,
            category.table_name()
        );
        Ok(report)
    }

    /// Loads all categories in parallel, one blocking task per category.
    ///
    /// A category that fails as a whole is recorded in
    /// [`LoadSummary::failed`]; the other categories still load.
    pub async fn load_all(&self) -> LoadSummary {
        let handles: Vec<_> = Category::ALL
            .into_iter()
            .map(|category| {
                let lake = self.clone();
                let handle = tokio::task::spawn_blocking(move || lake.load_category(category));
                (category, handle)
            })
            .collect();

        let mut summary = LoadSummary::default();
        for (category, handle) in handles {
            match handle.await {
                Ok(Ok(report)) => summary.reports.push(report),
                Ok(Err(e)) => {
                    warn!("Loading {} failed: {}", category, e);
                    summary.failed.push((category, e));
                }
                Err(e) => {
                    warn!("Loading {} did not complete: {}", category, e);
                    summary.failed.push((category, LakeError::from(e)));
                }
            }
        }
        info!(
            "Bronze load finished: {} rows, {} categories failed",
            summary.total_rows(),
            summary.failed.len()
        );
        summary
    }

    /// Truncates every bronze table, then runs [`WeatherLake::load_all`].
    pub async fn reload_all(&self) -> Result<LoadSummary, LakeError> {
        self.sink.clear_all()?;
        Ok(self.load_all().await)
    }

    /// Lazy scan over the bronze table of `category`.
    pub fn scan(&self, category: Category) -> Result<LazyFrame, LakeError> {
        Ok(self.sink.scan(category.table_name())?)
    }
}
