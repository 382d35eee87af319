//! Key bindings — maps key events to application actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::screen::Screen;

/// Application-level actions triggered by key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Leave the current screen (exits the session when on one).
    Back,
    /// Numeric selection (0-based) on the menu or a picker.
    Select(usize),
    /// Advance to the next chord.
    Next,
    /// Go back to the previous chord.
    Previous,
    /// Strum the current chord.
    PlaySound,
    /// Toggle the metronome.
    ToggleMetronome,
    /// Move the list cursor up (pickers, settings fields).
    ListUp,
    /// Move the list cursor down.
    ListDown,
    /// Confirm the current list selection.
    Confirm,
    /// Decrease the selected settings value.
    AdjustDown,
    /// Increase the selected settings value.
    AdjustUp,
    /// Open the jump-to-chord input.
    ActivateJump,
    /// Type a character into the jump input.
    JumpInsert(char),
    /// Delete the character before the jump cursor.
    JumpBackspace,
    /// Submit the jump input.
    JumpSubmit,
    /// Cancel the jump input.
    JumpCancel,
}

/// Map a key event to an action for the given screen.
///
/// The jump input intercepts almost everything while active.
pub fn map_key(key: KeyEvent, screen: Screen, jump_active: bool) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Ctrl+Q always quits
    if ctrl && key.code == KeyCode::Char('q') {
        return Some(Action::Quit);
    }

    if jump_active {
        return match key.code {
            KeyCode::Enter => Some(Action::JumpSubmit),
            KeyCode::Esc => Some(Action::JumpCancel),
            KeyCode::Backspace => Some(Action::JumpBackspace),
            KeyCode::Char(c) => Some(Action::JumpInsert(c)),
            _ => None,
        };
    }

    match screen {
        Screen::Menu => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char(c @ '1'..='5') => {
                Some(Action::Select(c as usize - '1' as usize))
            }
            _ => None,
        },
        Screen::Session => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Back),
            KeyCode::Char('n') | KeyCode::Right => Some(Action::Next),
            KeyCode::Char('p') | KeyCode::Left => Some(Action::Previous),
            KeyCode::Char('s') | KeyCode::Char(' ') => Some(Action::PlaySound),
            KeyCode::Char('m') => Some(Action::ToggleMetronome),
            KeyCode::Char('/') => Some(Action::ActivateJump),
            _ => None,
        },
        Screen::ProgressionPicker | Screen::SongPicker => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Back),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
            KeyCode::Enter => Some(Action::Confirm),
            KeyCode::Char(c @ '1'..='9') => {
                Some(Action::Select(c as usize - '1' as usize))
            }
            _ => None,
        },
        Screen::Settings => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Back),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
            KeyCode::Left => Some(Action::AdjustDown),
            KeyCode::Right => Some(Action::AdjustUp),
            KeyCode::Enter => Some(Action::Confirm),
            _ => None,
        },
    }
}
