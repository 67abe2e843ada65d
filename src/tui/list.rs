//! List view state: selection → filter → visible rows.

use tracing::debug;

use crate::catalog::model::{Difficulty, QuestionSummary};
use crate::catalog::selection::SelectionState;
use crate::catalog::{Catalog, TagCatalog, derive_tags, filter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFocus {
    Questions,
    Tags,
}

impl ListFocus {
    pub fn next(self) -> Self {
        match self {
            Self::Questions => Self::Tags,
            Self::Tags => Self::Questions,
        }
    }
}

/// Owns the list view's filter state and the rows derived from it.
///
/// Every filter mutation runs exactly one [`recompute`](Self::recompute).
#[derive(Debug)]
pub struct ListController {
    catalog: Catalog,
    tags: TagCatalog,
    selection: SelectionState,
    /// Catalog positions currently shown, in catalog order.
    visible: Vec<usize>,
    recomputes: u64,
    /// Raw search input as typed; the selection keeps the lowercased needle.
    search_input: String,
    searching: bool,
    focus: ListFocus,
    row_cursor: usize,
    tag_cursor: usize,
}

impl ListController {
    /// Derive tags, apply a valid seed tag, then run the initial pass.
    pub fn new(catalog: Catalog, seed_tag: Option<&str>) -> Self {
        let tags = derive_tags(&catalog);
        let mut selection = SelectionState::new();
        let mut tag_cursor = 0;
        if let Some(tag) = seed_tag {
            if selection.seed_from_tag(tag, &tags) {
                tag_cursor = tags.position(tag).unwrap_or(0);
            } else {
                debug!(tag, "ignoring unknown seed tag");
            }
        }
        let mut controller = Self {
            catalog,
            tags,
            selection,
            visible: Vec::new(),
            recomputes: 0,
            search_input: String::new(),
            searching: false,
            focus: ListFocus::Questions,
            row_cursor: 0,
            tag_cursor,
        };
        controller.recompute();
        controller
    }

    fn recompute(&mut self) {
        self.visible = filter::apply_positions(&self.catalog, &self.selection);
        self.recomputes += 1;
        self.row_cursor = self.row_cursor.min(self.visible.len().saturating_sub(1));
        debug!(
            shown = self.visible.len(),
            tag = self.selection.active_tag(),
            difficulty = ?self.selection.difficulty(),
            search = self.selection.search_text(),
            "list recomputed"
        );
    }

    /// Toggle `tag`. Tags outside the catalog's tag set are ignored.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if !self.tags.contains(tag) {
            return false;
        }
        self.selection.toggle_tag(tag);
        self.recompute();
        true
    }

    pub fn set_difficulty(&mut self, difficulty: Option<Difficulty>) {
        self.selection.set_difficulty(difficulty);
        self.recompute();
    }

    pub fn cycle_difficulty(&mut self) {
        self.set_difficulty(Difficulty::cycle(self.selection.difficulty()));
    }

    pub fn set_search_text(&mut self, text: &str) {
        self.search_input = text.to_string();
        self.selection.set_search_text(text);
        self.recompute();
    }

    // -- search input ---------------------------------------------------

    pub fn start_search(&mut self) {
        self.searching = true;
    }

    pub fn finish_search(&mut self) {
        self.searching = false;
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut text = self.search_input.clone();
        text.push(c);
        self.set_search_text(&text);
    }

    pub fn pop_search_char(&mut self) {
        let mut text = self.search_input.clone();
        if text.pop().is_some() {
            self.set_search_text(&text);
        }
    }

    pub fn clear_search(&mut self) {
        if !self.search_input.is_empty() {
            self.set_search_text("");
        }
        self.searching = false;
    }

    // -- cursors --------------------------------------------------------

    pub fn focus(&self) -> ListFocus {
        self.focus
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
        if self.focus == ListFocus::Tags && self.tags.is_empty() {
            self.focus = ListFocus::Questions;
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        match self.focus {
            ListFocus::Questions => {
                self.row_cursor = step_index(self.row_cursor, delta, self.visible.len());
            }
            ListFocus::Tags => {
                self.tag_cursor = step_index(self.tag_cursor, delta, self.tags.len());
            }
        }
    }

    pub fn toggle_tag_at_cursor(&mut self) -> bool {
        match self.tags.get(self.tag_cursor).map(str::to_string) {
            Some(tag) => self.toggle_tag(&tag),
            None => false,
        }
    }

    // -- derived view ---------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tags(&self) -> &TagCatalog {
        &self.tags
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    #[cfg(test)]
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    pub fn visible(&self) -> impl Iterator<Item = &QuestionSummary> {
        self.visible.iter().filter_map(|&pos| self.catalog.get(pos))
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn row_cursor(&self) -> usize {
        self.row_cursor
    }

    pub fn tag_cursor(&self) -> usize {
        self.tag_cursor
    }

    pub fn selected(&self) -> Option<&QuestionSummary> {
        self.visible
            .get(self.row_cursor)
            .and_then(|&pos| self.catalog.get(pos))
    }

    pub fn summary(&self) -> String {
        format!("Showing {} questions", self.visible.len())
    }
}

fn step_index(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}
