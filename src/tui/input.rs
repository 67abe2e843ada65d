use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    /// Scroll the secondary pane (the solution pane in the detail view).
    ScrollOther(Direction),
    Activate,
    FocusNext,
    StartSearch,
    CycleDifficulty,
    Prev,
    Next,
    /// Follow the n-th tag link of the open question (0-based).
    FollowTag(usize),
    Back,
    Reload,
    Quit,
    ToggleHelp,
    SubmitText,
    Cancel,
    Backspace,
    InputChar(char),
    Noop,
}

pub fn action_for_key(key: KeyEvent, text_mode: bool) -> Action {
    if text_mode {
        return match key.code {
            KeyCode::Enter => Action::SubmitText,
            KeyCode::Esc => Action::Cancel,
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Cancel,
            KeyCode::Char(c) => Action::InputChar(c),
            _ => Action::Noop,
        };
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Up => Action::Move(Direction::Up),
        KeyCode::Down => Action::Move(Direction::Down),
        KeyCode::Left => Action::Move(Direction::Left),
        KeyCode::Right => Action::Move(Direction::Right),
        KeyCode::PageUp => Action::ScrollOther(Direction::Up),
        KeyCode::PageDown => Action::ScrollOther(Direction::Down),
        KeyCode::Enter | KeyCode::Char(' ') => Action::Activate,
        KeyCode::Tab => Action::FocusNext,
        KeyCode::Esc | KeyCode::Backspace => Action::Back,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('/') => Action::StartSearch,
        KeyCode::Char('d') => Action::CycleDifficulty,
        KeyCode::Char('h') => Action::Move(Direction::Left),
        KeyCode::Char('j') => Action::Move(Direction::Down),
        KeyCode::Char('k') => Action::Move(Direction::Up),
        KeyCode::Char('l') => Action::Move(Direction::Right),
        KeyCode::Char('J') => Action::ScrollOther(Direction::Down),
        KeyCode::Char('K') => Action::ScrollOther(Direction::Up),
        KeyCode::Char('[') | KeyCode::Char('p') => Action::Prev,
        KeyCode::Char(']') | KeyCode::Char('n') => Action::Next,
        KeyCode::Char('b') => Action::Back,
        KeyCode::Char('r') => Action::Reload,
        KeyCode::Char(c @ '1'..='9') => Action::FollowTag(c as usize - '1' as usize),
        _ => Action::Noop,
    }
}
