//! Detail view state: the open question, its neighbours and the pane split.

use std::time::Duration;

use tracing::info;

use crate::catalog::Catalog;
use crate::catalog::model::{IdKey, QuestionDetail, QuestionId};
use crate::catalog::navigation::{self, NavigationContext, Step};
use crate::route::Location;
use crate::source::{NotFound, ViewError};
use crate::tui::fetch::{Completion, DetailLoader};
use crate::tui::resize::ResizeState;

#[derive(Debug)]
pub struct DetailController {
    catalog: Catalog,
    /// Most recently requested id; navigation steps from here.
    current: IdKey,
    nav: NavigationContext,
    loader: DetailLoader,
    shown: Option<QuestionDetail>,
    error: Option<ViewError>,
    pub resize: ResizeState,
    pub left_scroll: u16,
    pub right_scroll: u16,
}

impl DetailController {
    /// Open `id` and start loading it. The split starts at its default.
    pub fn open(catalog: Catalog, loader: DetailLoader, id: impl Into<IdKey>) -> Self {
        let current = id.into();
        let nav = navigation::locate(&catalog, current.clone());
        let mut controller = Self {
            catalog,
            current: current.clone(),
            nav,
            loader,
            shown: None,
            error: None,
            resize: ResizeState::default(),
            left_scroll: 0,
            right_scroll: 0,
        };
        controller.request(current);
        controller
    }

    fn request(&mut self, id: IdKey) {
        self.nav = navigation::locate(&self.catalog, id.clone());
        self.current = id.clone();
        self.loader.request(id);
    }

    /// Move to the neighbour in `direction`. At either end nothing happens.
    pub fn step(&mut self, direction: Step) -> Option<QuestionId> {
        if self.error.is_some() {
            return None;
        }
        let target = navigation::step(&self.catalog, self.current.clone(), direction)?;
        info!(from = %self.current, to = %target, "navigating");
        self.request(IdKey::from(target));
        Some(target)
    }

    /// Apply any finished fetch. Returns true when the view changed.
    pub fn tick(&mut self) -> bool {
        match self.loader.poll() {
            Some(done) => {
                self.apply(done);
                true
            }
            None => false,
        }
    }

    pub fn wait(&mut self, timeout: Duration) -> bool {
        match self.loader.wait(timeout) {
            Some(done) => {
                self.apply(done);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, done: Completion) {
        match done.result {
            Ok(detail) => {
                self.nav = navigation::locate(&self.catalog, detail.summary.id);
                self.shown = Some(detail);
                self.left_scroll = 0;
                self.right_scroll = 0;
            }
            Err(err) if err.is_missing() => {
                self.error = Some(ViewError::from(NotFound::NoRecord {
                    id: done.id.to_string(),
                }));
            }
            Err(err) => {
                self.error = Some(ViewError::load(format!("question {}", done.id), err));
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    pub fn shown(&self) -> Option<&QuestionDetail> {
        self.shown.as_ref()
    }

    pub fn error(&self) -> Option<&ViewError> {
        self.error.as_ref()
    }

    pub fn navigation(&self) -> &NavigationContext {
        &self.nav
    }

    /// Shareable location of the requested question.
    pub fn location(&self) -> Location {
        Location::detail(&self.current)
    }

    pub fn scroll_left(&mut self, delta: i16) {
        self.left_scroll = self.left_scroll.saturating_add_signed(delta);
    }

    pub fn scroll_right(&mut self, delta: i16) {
        self.right_scroll = self.right_scroll.saturating_add_signed(delta);
    }

    /// Tag of the shown question at `index`, for following a tag link.
    /// Nothing is linkable while the error page is up.
    pub fn tag_at(&self, index: usize) -> Option<&str> {
        if self.error.is_some() {
            return None;
        }
        self.shown
            .as_ref()
            .and_then(|d| d.summary.tags.get(index))
            .map(String::as_str)
    }
}
