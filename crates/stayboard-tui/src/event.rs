//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `Tab` / `Shift+Tab`     | `FocusNext` / `FocusPrev`  |
//! | `p`                     | `NextPage`                 |
//! | `1`, `2`                | `GotoPage(n)`              |
//! | `x`                     | `ClearFilters`             |
//! | `Space`                 | `Toggle`                   |
//! | `↑` / `k`               | `Nav(Up)`                  |
//! | `↓` / `j`               | `Nav(Down)`                |
//! | `←` / `h`               | `Nav(Left)`                |
//! | `→` / `l`               | `Nav(Right)`               |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! ## Insert mode
//!
//! While the command line is open the event loop calls
//! [`to_app_event_insert`] instead, where every printable key (including the
//! shortcuts above) is a `Char` and only `Ctrl+c`, `Escape`, `Enter`, `Tab`,
//! `Backspace` and the arrow keys keep their special meaning.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Cardinal direction for list and slider navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application.
    Quit,
    /// Move keyboard focus to the next sidebar widget.
    FocusNext,
    /// Move keyboard focus to the previous sidebar widget.
    FocusPrev,
    /// Flip between the overview and deep-dive pages.
    NextPage,
    /// Jump to page `n` (1-based).
    GotoPage(u8),
    /// Drop every active filter.
    ClearFilters,
    /// Toggle the item under the cursor in a multi-select list.
    Toggle,
    /// Move within the focused widget.
    Nav(Direction),
    /// A printable character forwarded to the active text input.
    Char(char),
    /// Delete the character before the cursor in the active text input.
    Backspace,
    /// Confirm the command line, or reset the focused widget.
    Enter,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
    /// Dismiss the active modal (command line, help popup).
    Escape,
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (normal / navigation mode).
///
/// Returns `None` for events that carry no meaning for the application
/// (mouse events, unbound keys).
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for the command line.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),
        BackTab => Some(AppEvent::FocusPrev),

        Char('p') if key.modifiers == Mod::NONE => Some(AppEvent::NextPage),
        Char(c @ ('1' | '2')) if key.modifiers == Mod::NONE => {
            Some(AppEvent::GotoPage(c as u8 - b'0'))
        }
        Char('x') if key.modifiers == Mod::NONE => Some(AppEvent::ClearFilters),
        Char(' ') if key.modifiers == Mod::NONE => Some(AppEvent::Toggle),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if key.modifiers == Mod::NONE => {
            Some(AppEvent::Nav(Direction::Right))
        }

        // Remaining printable characters (`?`, `:` and shifted letters)
        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn press(code: KeyCode) -> Event {
        key(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> Event {
        key(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn quit_keys() {
        assert_eq!(to_app_event(press(KeyCode::Char('q'))), Some(AppEvent::Quit));
        assert_eq!(to_app_event(ctrl(KeyCode::Char('c'))), Some(AppEvent::Quit));
    }

    #[test]
    fn focus_cycle() {
        assert_eq!(to_app_event(press(KeyCode::Tab)), Some(AppEvent::FocusNext));
        assert_eq!(
            to_app_event(key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(AppEvent::FocusPrev)
        );
    }

    #[test]
    fn page_keys() {
        assert_eq!(to_app_event(press(KeyCode::Char('p'))), Some(AppEvent::NextPage));
        assert_eq!(to_app_event(press(KeyCode::Char('1'))), Some(AppEvent::GotoPage(1)));
        assert_eq!(to_app_event(press(KeyCode::Char('2'))), Some(AppEvent::GotoPage(2)));
        assert_eq!(to_app_event(press(KeyCode::Char('3'))), Some(AppEvent::Char('3')));
    }

    #[test]
    fn filter_keys() {
        assert_eq!(to_app_event(press(KeyCode::Char(' '))), Some(AppEvent::Toggle));
        assert_eq!(to_app_event(press(KeyCode::Char('x'))), Some(AppEvent::ClearFilters));
    }

    #[test]
    fn nav_arrows_and_hjkl() {
        assert_eq!(to_app_event(press(KeyCode::Up)), Some(AppEvent::Nav(Direction::Up)));
        assert_eq!(to_app_event(press(KeyCode::Char('j'))), Some(AppEvent::Nav(Direction::Down)));
        assert_eq!(to_app_event(press(KeyCode::Char('h'))), Some(AppEvent::Nav(Direction::Left)));
        assert_eq!(to_app_event(press(KeyCode::Right)), Some(AppEvent::Nav(Direction::Right)));
    }

    #[test]
    fn help_and_command_are_chars() {
        assert_eq!(to_app_event(press(KeyCode::Char('?'))), Some(AppEvent::Char('?')));
        assert_eq!(
            to_app_event(key(KeyCode::Char(':'), KeyModifiers::SHIFT)),
            Some(AppEvent::Char(':'))
        );
    }

    #[test]
    fn resize_event() {
        assert_eq!(to_app_event(Event::Resize(120, 40)), Some(AppEvent::Resize(120, 40)));
    }

    #[test]
    fn unbound_key_returns_none() {
        assert_eq!(to_app_event(press(KeyCode::F(5))), None);
    }

    // ── Insert mode ────────────────────────────────────────────────────────

    #[test]
    fn insert_mode_shortcuts_are_chars() {
        for ch in ['h', 'j', 'k', 'l', 'q', 'p', 'x', '1', ' '] {
            assert_eq!(
                to_app_event_insert(press(KeyCode::Char(ch))),
                Some(AppEvent::Char(ch)),
                "insert mode: '{ch}' should produce Char"
            );
        }
    }

    #[test]
    fn insert_mode_ctrl_c_still_quits() {
        assert_eq!(to_app_event_insert(ctrl(KeyCode::Char('c'))), Some(AppEvent::Quit));
    }
}
