//! Fetch-by-key access to question data, and the typed errors at that boundary.
//!
//! Two resources exist: the catalog index (key [`INDEX_KEY`]) and one detail
//! record per question id. Everything above this module sees either a decoded
//! record or a [`LoadError`]; nothing escapes as a panic.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::catalog::Catalog;
use crate::catalog::model::{IdKey, QuestionDetail};

pub const INDEX_KEY: &str = "index";

/// Why a fetch did not produce a usable record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The source answered, but not with success.
    #[error("HTTP {status}")]
    Status { status: u16 },
    /// The source could not be reached or read.
    #[error("{reason}")]
    Transport { reason: String },
    /// The payload was not the expected shape.
    #[error("malformed data: {reason}")]
    Malformed { reason: String },
}

impl LoadError {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Status { status: 404 })
    }
}

/// Reasons a detail view has nothing to show.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFound {
    #[error("No question ID specified.")]
    MissingId,
    #[error("Question {id} not found.")]
    NoRecord { id: String },
}

/// Terminal error for a view. Replaces the affected region with its message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("Failed to load {what}: {source}")]
    Load {
        what: String,
        #[source]
        source: LoadError,
    },
    #[error(transparent)]
    NotFound(#[from] NotFound),
}

impl ViewError {
    pub fn load(what: impl Into<String>, source: LoadError) -> Self {
        Self::Load {
            what: what.into(),
            source,
        }
    }
}

/// Opaque fetch-by-key. Implementations return the raw payload bytes.
pub trait DataSource: Send + Sync + fmt::Debug {
    fn fetch(&self, key: &str) -> Result<Vec<u8>, LoadError>;
}

/// Serves `<root>/<key>.json` from a directory, the layout `qdeck split` writes.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, LoadError> {
        if !is_record_key(key) {
            return Err(LoadError::Status { status: 400 });
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl DataSource for DirSource {
    fn fetch(&self, key: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.path_for(key)?;
        fs::read(&path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => LoadError::Status { status: 404 },
            io::ErrorKind::PermissionDenied => LoadError::Status { status: 403 },
            _ => LoadError::Transport {
                reason: format!("{}: {err}", path.display()),
            },
        })
    }
}

/// A key that names a file directly inside the data directory.
pub fn is_record_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(['/', '\\']) && !key.starts_with('.')
}

/// Fetch and decode the catalog index.
pub fn fetch_catalog(source: &dyn DataSource) -> Result<Catalog, LoadError> {
    let bytes = source.fetch(INDEX_KEY)?;
    Catalog::from_json(&bytes)
}

/// Fetch and decode one detail record.
pub fn fetch_detail(source: &dyn DataSource, id: &IdKey) -> Result<QuestionDetail, LoadError> {
    let bytes = source.fetch(id.as_str())?;
    serde_json::from_slice(&bytes).map_err(|err| LoadError::Malformed {
        reason: err.to_string(),
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// In-memory source that counts fetches per key.
    #[derive(Debug, Default)]
    pub struct MemorySource {
        pub entries: HashMap<String, Result<Vec<u8>, LoadError>>,
        pub fetches: Mutex<Vec<String>>,
    }

    impl MemorySource {
        pub fn with(mut self, key: &str, body: &str) -> Self {
            self.entries
                .insert(key.to_string(), Ok(body.as_bytes().to_vec()));
            self
        }

        pub fn failing(mut self, key: &str, err: LoadError) -> Self {
            self.entries.insert(key.to_string(), Err(err));
            self
        }

        pub fn fetch_count(&self, key: &str) -> usize {
            self.fetches
                .lock()
                .map(|f| f.iter().filter(|k| k.as_str() == key).count())
                .unwrap_or(0)
        }
    }

    impl DataSource for MemorySource {
        fn fetch(&self, key: &str) -> Result<Vec<u8>, LoadError> {
            if let Ok(mut f) = self.fetches.lock() {
                f.push(key.to_string());
            }
            self.entries
                .get(key)
                .cloned()
                .unwrap_or(Err(LoadError::Status { status: 404 }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn dir_source_maps_missing_file_to_404() {
        let dir = TempDir::new().unwrap();
        let source = DirSource::new(dir.path());
        let err = source.fetch("17").unwrap_err();
        assert_eq!(err, LoadError::Status { status: 404 });
        assert!(err.is_missing());
    }

    #[test]
    fn dir_source_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let source = DirSource::new(dir.path());
        assert_eq!(
            source.fetch("../secret").unwrap_err(),
            LoadError::Status { status: 400 }
        );
    }

    #[test]
    fn fetch_catalog_reports_malformed_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.json"), "{not json").unwrap();
        let err = fetch_catalog(&DirSource::new(dir.path())).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }

    #[test]
    fn fetch_detail_reads_record_by_id() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("1.json"),
            r#"{"id":1,"title":"Two Sum","difficulty":"Easy","tags":["Array"],"content":"<p>x</p>"}"#,
        )
        .unwrap();
        let detail = fetch_detail(&DirSource::new(dir.path()), &IdKey::from(1u64)).unwrap();
        assert_eq!(detail.summary.title, "Two Sum");
    }

    #[test]
    fn view_error_messages_read_naturally() {
        let err = ViewError::load("questions index", LoadError::Status { status: 500 });
        assert_eq!(err.to_string(), "Failed to load questions index: HTTP 500");
        let err = ViewError::from(NotFound::MissingId);
        assert_eq!(err.to_string(), "No question ID specified.");
    }
}
