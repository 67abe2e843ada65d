use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};
use tracing::{debug, info};

use crate::catalog::CatalogCache;
use crate::catalog::navigation::Step;
use crate::route::Location;
use crate::source::{DataSource, NotFound, ViewError};
use crate::tui::detail::DetailController;
use crate::tui::fetch::DetailLoader;
use crate::tui::input::{self, Action, Direction};
use crate::tui::list::{ListController, ListFocus};
use crate::tui::render::{self, Chrome, DetailLayout, DetailRenderData, ListRenderData};

const LIST_HINTS: &str = "[/] search  [d] difficulty  [Tab] tags  [Enter] open";
const DETAIL_HINTS: &str = "[ [ ] ] prev/next  [1-9] tag  [J/K] solution  [b] back";
const FAILED_HINTS: &str = "[b] back to list  [r] retry";
const SCROLL_STEP: i16 = 3;

#[derive(Debug)]
pub enum Screen {
    List(ListController),
    Detail(DetailController),
    Failed(ViewError),
}

#[derive(Debug)]
pub struct App {
    source: Arc<dyn DataSource>,
    cache: CatalogCache,
    location: Location,
    screen: Screen,
    tag_preview: usize,
    show_help: bool,
    message: Option<String>,
    detail_layout: DetailLayout,
}

impl App {
    pub fn new(source: Arc<dyn DataSource>, location: Location, tag_preview: usize) -> Self {
        let cache = CatalogCache::new();
        let screen = build_screen(&source, &cache, &location);
        Self {
            source,
            cache,
            location,
            screen,
            tag_preview,
            show_help: false,
            message: None,
            detail_layout: DetailLayout::default(),
        }
    }

    /// Switch views. The catalog stays cached; selection state does not survive.
    pub fn navigate(&mut self, location: Location) {
        info!(to = %location, "opening location");
        self.screen = build_screen(&self.source, &self.cache, &location);
        self.location = location;
        self.message = None;
        self.detail_layout = DetailLayout::default();
    }

    /// Re-open the current location against a fresh catalog cache.
    pub fn reload(&mut self) {
        debug!(cached = self.cache.is_loaded(), "dropping catalog cache");
        self.cache = CatalogCache::new();
        let location = self.location.clone();
        self.navigate(location);
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Apply finished background loads.
    pub fn tick(&mut self) -> bool {
        match &mut self.screen {
            Screen::Detail(detail) => detail.tick(),
            _ => false,
        }
    }

    fn text_mode(&self) -> bool {
        matches!(&self.screen, Screen::List(list) if list.is_searching())
    }

    /// Returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let action = input::action_for_key(key, self.text_mode());
        if self.show_help && !matches!(action, Action::Quit) {
            if matches!(action, Action::ToggleHelp | Action::Back) {
                self.show_help = false;
            }
            return false;
        }
        match action {
            Action::Quit => return true,
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Reload => self.reload(),
            _ => {
                self.message = None;
                if matches!(self.screen, Screen::List(_)) {
                    self.list_action(action);
                } else if matches!(self.screen, Screen::Detail(_)) {
                    self.detail_action(action);
                } else if matches!(action, Action::Back) {
                    self.navigate(Location::list());
                }
            }
        }
        false
    }

    fn list_action(&mut self, action: Action) {
        let Screen::List(list) = &mut self.screen else {
            return;
        };
        if list.is_searching() {
            match action {
                Action::InputChar(c) => list.push_search_char(c),
                Action::Backspace => list.pop_search_char(),
                Action::SubmitText => list.finish_search(),
                Action::Cancel => list.clear_search(),
                _ => {}
            }
            return;
        }
        match action {
            Action::Move(Direction::Up) => list.move_cursor(-1),
            Action::Move(Direction::Down) => list.move_cursor(1),
            Action::Move(Direction::Left | Direction::Right) | Action::FocusNext => {
                list.cycle_focus()
            }
            Action::StartSearch => list.start_search(),
            Action::CycleDifficulty => list.cycle_difficulty(),
            Action::Activate => match list.focus() {
                ListFocus::Tags => {
                    list.toggle_tag_at_cursor();
                }
                ListFocus::Questions => {
                    if let Some(id) = list.selected().map(|q| q.id) {
                        self.navigate(Location::detail(id));
                    }
                }
            },
            Action::Back => {
                if !list.selection().is_empty() || !list.search_input().is_empty() {
                    self.navigate(Location::list());
                }
            }
            _ => {}
        }
    }

    fn detail_action(&mut self, action: Action) {
        let Screen::Detail(detail) = &mut self.screen else {
            return;
        };
        match action {
            Action::Prev | Action::Move(Direction::Left) => {
                if detail.step(Step::Prev).is_some() {
                    self.location = detail.location();
                }
            }
            Action::Next | Action::Move(Direction::Right) => {
                if detail.step(Step::Next).is_some() {
                    self.location = detail.location();
                }
            }
            Action::Move(Direction::Up) => detail.scroll_left(-1),
            Action::Move(Direction::Down) => detail.scroll_left(1),
            Action::ScrollOther(Direction::Up) => detail.scroll_right(-SCROLL_STEP),
            Action::ScrollOther(Direction::Down) => detail.scroll_right(SCROLL_STEP),
            Action::FollowTag(idx) => match detail.tag_at(idx).map(str::to_string) {
                Some(tag) => self.navigate(Location::list_with_tag(tag)),
                None => self.message = Some(format!("no tag {} on this question", idx + 1)),
            },
            Action::Back => self.navigate(Location::list()),
            _ => {}
        }
    }

    /// Pointer handling for the pane split. Release anywhere ends a drag.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Screen::Detail(detail) = &mut self.screen else {
            return;
        };
        let layout = self.detail_layout;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.is_on_handle(mouse.column, mouse.row) {
                    debug!(column = mouse.column, "pane drag started");
                    detail.resize.begin(f32::from(mouse.column));
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => detail
                .resize
                .drag_to(f32::from(mouse.column), f32::from(layout.panes.width)),
            MouseEventKind::Up(_) => {
                if detail.resize.is_dragging() {
                    detail.resize.end();
                    debug!(left = detail.resize.left_percent(), "pane drag ended");
                }
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
                let delta = if mouse.kind == MouseEventKind::ScrollDown {
                    SCROLL_STEP
                } else {
                    -SCROLL_STEP
                };
                if mouse.column < layout.left.right() {
                    detail.scroll_left(delta);
                } else {
                    detail.scroll_right(delta);
                }
            }
            _ => {}
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let location = self.location.to_string();
        let mut chrome = Chrome {
            location: &location,
            hints: LIST_HINTS,
            message: self.message.as_deref(),
            show_help: self.show_help,
        };
        match &self.screen {
            Screen::List(list) => {
                let data = ListRenderData {
                    list,
                    tag_preview: self.tag_preview,
                };
                render::draw_list(frame, &data, &chrome);
            }
            Screen::Detail(detail) => {
                if let Some(err) = detail.error() {
                    chrome.hints = FAILED_HINTS;
                    render::draw_error(frame, &err.to_string(), &chrome);
                    return;
                }
                chrome.hints = DETAIL_HINTS;
                let data = DetailRenderData {
                    detail: detail.shown(),
                    nav: detail.navigation(),
                    resize: &detail.resize,
                    loading: detail.is_loading(),
                    left_scroll: detail.left_scroll,
                    right_scroll: detail.right_scroll,
                };
                self.detail_layout = render::draw_detail(frame, &data, &chrome);
            }
            Screen::Failed(err) => {
                chrome.hints = FAILED_HINTS;
                render::draw_error(frame, &err.to_string(), &chrome);
            }
        }
    }
}

fn build_screen(source: &Arc<dyn DataSource>, cache: &CatalogCache, location: &Location) -> Screen {
    match location {
        Location::List { tag } => match cache.load(source.as_ref()) {
            Ok(catalog) => Screen::List(ListController::new(catalog, tag.as_deref())),
            Err(err) => Screen::Failed(ViewError::load("questions index", err)),
        },
        Location::Detail { id: None } => Screen::Failed(NotFound::MissingId.into()),
        Location::Detail { id: Some(id) } => match cache.load(source.as_ref()) {
            Ok(catalog) => Screen::Detail(DetailController::open(
                catalog,
                DetailLoader::new(Arc::clone(source)),
                id.as_str(),
            )),
            Err(err) => Screen::Failed(ViewError::load("index", err)),
        },
    }
}

pub fn run(source: Arc<dyn DataSource>, location: Location, tag_preview: usize) -> Result<()> {
    let mut app = App::new(source, location, tag_preview);

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.tick();
        terminal.draw(|f| app.draw(f))?;
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if matches!(key.kind, KeyEventKind::Release | KeyEventKind::Repeat) {
                    continue;
                }
                if app.handle_key(key) {
                    break;
                }
            }
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
    }

    info!(location = %app.location(), "leaving browser");
    Ok(())
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
    }
}
