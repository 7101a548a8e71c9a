use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::Mode;

/// Semantic input, decoupled from terminal key names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    NextGroup,
    PrevGroup,
    /// Zero-based group index.
    JumpGroup(usize),
    OpenSearch,
    CloseSearch,
    QueryInput(char),
    QueryBackspace,
    ClearQuery,
    OpenHelp,
    CloseHelp,
    Activate,
    Refresh,
    Export,
    CycleTheme,
    Click { column: u16, row: u16 },
    ScrollUp,
    ScrollDown,
    Resize { width: u16, height: u16 },
}

/// Translate a terminal event for the current mode. Events with no meaning
/// in that mode yield `None`.
pub fn translate(event: &Event, mode: Mode) -> Option<InputEvent> {
    match event {
        Event::Key(key) => translate_key(key, mode),
        Event::Mouse(mouse) => translate_mouse(mouse),
        Event::Resize(width, height) => Some(InputEvent::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent, mode: Mode) -> Option<InputEvent> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(InputEvent::Quit);
    }

    match mode {
        Mode::Normal => normal_key(key, ctrl),
        Mode::Searching => search_key(key, ctrl),
        Mode::HelpOverlay => Some(InputEvent::CloseHelp),
    }
}

fn normal_key(key: &KeyEvent, ctrl: bool) -> Option<InputEvent> {
    if ctrl {
        return match key.code {
            KeyCode::Char('f') => Some(InputEvent::OpenSearch),
            _ => None,
        };
    }

    let event = match key.code {
        KeyCode::Char('q') => InputEvent::Quit,
        KeyCode::Up | KeyCode::Char('k') => InputEvent::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => InputEvent::MoveDown,
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => InputEvent::PrevGroup,
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => InputEvent::NextGroup,
        KeyCode::Char('/') => InputEvent::OpenSearch,
        KeyCode::Char('?') | KeyCode::F(1) => InputEvent::OpenHelp,
        KeyCode::Enter | KeyCode::Char(' ') => InputEvent::Activate,
        KeyCode::Home | KeyCode::Char('g') => InputEvent::Top,
        KeyCode::End | KeyCode::Char('G') => InputEvent::Bottom,
        KeyCode::PageUp => InputEvent::PageUp,
        KeyCode::PageDown => InputEvent::PageDown,
        KeyCode::Esc => InputEvent::ClearQuery,
        KeyCode::Char('r') => InputEvent::Refresh,
        KeyCode::Char('e') => InputEvent::Export,
        KeyCode::Char('t') => InputEvent::CycleTheme,
        KeyCode::Char(c @ '1'..='9') => InputEvent::JumpGroup(c as usize - '1' as usize),
        _ => return None,
    };
    Some(event)
}

fn search_key(key: &KeyEvent, ctrl: bool) -> Option<InputEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => Some(InputEvent::CloseSearch),
        KeyCode::Up => Some(InputEvent::MoveUp),
        KeyCode::Down => Some(InputEvent::MoveDown),
        KeyCode::Backspace => Some(InputEvent::QueryBackspace),
        KeyCode::Char(c)
            if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) && !c.is_control() =>
        {
            Some(InputEvent::QueryInput(c))
        }
        _ => None,
    }
}

fn translate_mouse(mouse: &MouseEvent) -> Option<InputEvent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::Click {
            column: mouse.column,
            row: mouse.row,
        }),
        MouseEventKind::ScrollUp => Some(InputEvent::ScrollUp),
        MouseEventKind::ScrollDown => Some(InputEvent::ScrollDown),
        _ => None,
    }
}
