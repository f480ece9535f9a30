//! Lightweight index over the files of one landing category directory.
//!
//! The usual index is derived from file names alone. The envelope inside each
//! file stays the source of truth, and [`DocumentIndex::from_envelopes`]
//! rebuilds the index from it when names cannot be trusted.

use crate::landing::envelope::read_envelope;
use crate::landing::error::LandingError;
use chrono::NaiveDateTime;
use log::{debug, warn};
use std::io;
use std::path::{Path, PathBuf};

const FILE_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";
const FILE_EXTENSION: &str = ".json";

/// The `{identifier}_{logicalTime}.json` key of a landed document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LandingFileName {
    pub identifier: String,
    pub logical_time: NaiveDateTime,
}

impl LandingFileName {
    pub fn new(identifier: impl Into<String>, logical_time: NaiveDateTime) -> Self {
        Self {
            identifier: identifier.into(),
            logical_time,
        }
    }

    /// Parses a file name back into its key.
    ///
    /// The split happens on the last underscore, so identifiers may contain
    /// underscores themselves. The timestamp must re-format to exactly the
    /// text it was parsed from; anything else is not a landing file name.
    ///
    /// ```
    /// use weather_lake::LandingFileName;
    ///
    /// let name = LandingFileName::parse("Mount_Washington_2025-12-30T12-00-00.json").unwrap();
    /// assert_eq!(name.identifier, "Mount_Washington");
    /// assert_eq!(name.file_name(), "Mount_Washington_2025-12-30T12-00-00.json");
    ///
    /// assert!(LandingFileName::parse("garbage.json").is_none());
    /// ```
    pub fn parse(file_name: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(FILE_EXTENSION)?;
        let (identifier, time) = stem.rsplit_once('_')?;
        if identifier.is_empty() {
            return None;
        }
        let logical_time = NaiveDateTime::parse_from_str(time, FILE_TIME_FORMAT).ok()?;
        if logical_time.format(FILE_TIME_FORMAT).to_string() != time {
            return None;
        }
        Some(Self::new(identifier, logical_time))
    }

    pub fn file_name(&self) -> String {
        format!(
            "{}_{}{}",
            self.identifier,
            self.logical_time.format(FILE_TIME_FORMAT),
            FILE_EXTENSION
        )
    }
}

/// One indexed landing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub path: PathBuf,
    pub identifier: String,
    pub logical_time: NaiveDateTime,
}

impl IndexEntry {
    fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

/// Index entries ordered newest first; equal logical times fall back to
/// descending file name order.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    entries: Vec<IndexEntry>,
}

impl DocumentIndex {
    fn from_entries(mut entries: Vec<IndexEntry>) -> Self {
        entries.sort_by(|a, b| {
            (b.logical_time, b.file_name()).cmp(&(a.logical_time, a.file_name()))
        });
        Self { entries }
    }

    /// Builds the index from the file names in `dir`. Names that do not parse
    /// are skipped. A missing directory is an empty index.
    pub fn scan(dir: &Path) -> Result<Self, LandingError> {
        let entries = json_files(dir)?
            .into_iter()
            .filter_map(|(path, name)| match LandingFileName::parse(&name) {
                Some(key) => Some(IndexEntry {
                    path,
                    identifier: key.identifier,
                    logical_time: key.logical_time,
                }),
                None => {
                    debug!("Skipping foreign file {:?} in landing zone", path);
                    None
                }
            })
            .collect();
        Ok(Self::from_entries(entries))
    }

    /// Builds the index from the envelopes of the files in `dir`, ignoring
    /// file names. Unreadable or corrupt files are skipped.
    pub fn from_envelopes(dir: &Path) -> Result<Self, LandingError> {
        let entries = json_files(dir)?
            .into_iter()
            .filter_map(|(path, _)| match read_envelope(&path) {
                Ok(envelope) => Some(IndexEntry {
                    path,
                    identifier: envelope.metadata.identifier,
                    logical_time: envelope.metadata.timestamp,
                }),
                Err(e) => {
                    warn!("Skipping unreadable landing file: {}", e);
                    None
                }
            })
            .collect();
        Ok(Self::from_entries(entries))
    }

    /// Entries matching the identifier (exact) and the inclusive time range.
    pub fn select(
        &self,
        identifier: Option<&str>,
        after: Option<NaiveDateTime>,
        before: Option<NaiveDateTime>,
    ) -> Vec<&IndexEntry> {
        self.entries
            .iter()
            .filter(|e| identifier.map_or(true, |id| e.identifier == id))
            .filter(|e| after.map_or(true, |t| e.logical_time >= t))
            .filter(|e| before.map_or(true, |t| e.logical_time <= t))
            .collect()
    }

    pub fn latest(&self, identifier: &str) -> Option<&IndexEntry> {
        self.entries.iter().find(|e| e.identifier == identifier)
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Regular, non-hidden `*.json` files directly inside `dir`.
fn json_files(dir: &Path) -> Result<Vec<(PathBuf, String)>, LandingError> {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(LandingError::Read(dir.to_path_buf(), e)),
    };

    let mut files = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| LandingError::Read(dir.to_path_buf(), e))?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if name.starts_with('.') || !name.ends_with(FILE_EXTENSION) {
            continue;
        }
        let is_file = entry
            .file_type()
            .map_err(|e| LandingError::Read(entry.path(), e))?
            .is_file();
        if is_file {
            files.push((entry.path(), name));
        }
    }
    Ok(files)
}
