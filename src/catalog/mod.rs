//! The catalog index and the pure queries over it.

pub mod filter;
pub mod model;
pub mod navigation;
pub mod selection;

use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, warn};

use crate::catalog::model::QuestionSummary;
use crate::source::{self, DataSource, LoadError};

/// Ordered, read-only sequence of question summaries.
///
/// Order is the order the source delivered. Cloning shares the underlying
/// storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Arc<[QuestionSummary]>,
}

impl Catalog {
    pub fn new(items: Vec<QuestionSummary>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// Decode an index array. Entries that do not fit the summary shape are
    /// skipped with a warning; only a broken array fails the load.
    pub fn from_json(bytes: &[u8]) -> Result<Self, LoadError> {
        let raw: Vec<serde_json::Value> =
            serde_json::from_slice(bytes).map_err(|err| LoadError::Malformed {
                reason: err.to_string(),
            })?;
        let mut items = Vec::with_capacity(raw.len());
        for (position, entry) in raw.into_iter().enumerate() {
            match serde_json::from_value::<QuestionSummary>(entry) {
                Ok(item) => items.push(item),
                Err(err) => warn!(position, error = %err, "skipping unreadable index entry"),
            }
        }
        Ok(Self::new(items))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[QuestionSummary] {
        &self.items
    }

    pub fn get(&self, position: usize) -> Option<&QuestionSummary> {
        self.items.get(position)
    }
}

/// Distinct tags across a catalog, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCatalog {
    tags: Vec<String>,
}

impl TagCatalog {
    pub fn contains(&self, tag: &str) -> bool {
        self.tags
            .binary_search_by(|t| t.as_str().cmp(tag))
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.tags.get(idx).map(String::as_str)
    }

    pub fn position(&self, tag: &str) -> Option<usize> {
        self.tags.binary_search_by(|t| t.as_str().cmp(tag)).ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

pub fn derive_tags(catalog: &Catalog) -> TagCatalog {
    let set: BTreeSet<&str> = catalog
        .items()
        .iter()
        .flat_map(|q| q.tags.iter().map(String::as_str))
        .collect();
    TagCatalog {
        tags: set.into_iter().map(str::to_string).collect(),
    }
}

/// Loads the catalog index at most once and hands out the cached outcome.
///
/// A failure is cached too: the dependent view shows it and does not retry.
#[derive(Debug, Default)]
pub struct CatalogCache {
    slot: OnceCell<Result<Catalog, LoadError>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self, source: &dyn DataSource) -> Result<Catalog, LoadError> {
        self.slot
            .get_or_init(|| {
                let outcome = source::fetch_catalog(source);
                match &outcome {
                    Ok(catalog) => info!(questions = catalog.len(), "catalog index loaded"),
                    Err(err) => warn!(error = %err, "catalog index failed to load"),
                }
                outcome
            })
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }
}
