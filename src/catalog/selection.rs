//! Filter state for the list view.

use crate::catalog::TagCatalog;
use crate::catalog::model::Difficulty;

/// Current filter values. Fields are independent of one another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    active_tag: Option<String>,
    difficulty: Option<Difficulty>,
    /// Lowercased needle; empty means "no search".
    search_text: String,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tag(&self) -> Option<&str> {
        self.active_tag.as_deref()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn is_empty(&self) -> bool {
        self.active_tag.is_none() && self.difficulty.is_none() && self.search_text.is_empty()
    }

    /// Single-select: the active tag is deselected, any other tag replaces it.
    pub fn toggle_tag(&mut self, tag: &str) {
        if self.active_tag.as_deref() == Some(tag) {
            self.active_tag = None;
        } else {
            self.active_tag = Some(tag.to_string());
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Option<Difficulty>) {
        self.difficulty = difficulty;
    }

    /// Stored lowercased, untrimmed.
    pub fn set_search_text(&mut self, text: &str) {
        self.search_text = text.to_lowercase();
    }

    /// Preselect `tag` if the catalog knows it. Returns whether it was applied.
    pub fn seed_from_tag(&mut self, tag: &str, tags: &TagCatalog) -> bool {
        if !tags.contains(tag) {
            return false;
        }
        *self = Self::default();
        self.toggle_tag(tag);
        true
    }
}
