//! Input handling and operations
//!
//! Maps terminal key events onto a single [`InputAction`] enum and applies
//! the text-editing subset of those actions to the query buffer.

use crate::pagination::PageControl;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Everything a key press can ask the widget to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    InsertChar(char),
    DeleteCharBackward,
    ClearQuery,
    Submit,
    SelectPrevious,
    SelectNext,
    Page(PageControl),
    FirstPage,
    LastPage,
    Quit,
}

impl InputAction {
    /// Whether this action edits the query text
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            InputAction::InsertChar(_) | InputAction::DeleteCharBackward | InputAction::ClearQuery
        )
    }
}

/// Input handler translating keys into actions
pub struct InputHandler;

impl InputHandler {
    /// Action bound to `key`, if any. Key releases are ignored.
    pub fn action_for_key(key: KeyEvent) -> Option<InputAction> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            KeyCode::Esc => InputAction::Quit,
            KeyCode::Char('c') if ctrl => InputAction::Quit,
            KeyCode::Char('u') if ctrl => InputAction::ClearQuery,
            KeyCode::Char('p') if ctrl => InputAction::SelectPrevious,
            KeyCode::Char('n') if ctrl => InputAction::SelectNext,
            KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => return None,
            KeyCode::Char(c) => InputAction::InsertChar(c),
            KeyCode::Backspace => InputAction::DeleteCharBackward,
            KeyCode::Enter => InputAction::Submit,
            KeyCode::Up => InputAction::SelectPrevious,
            KeyCode::Down => InputAction::SelectNext,
            KeyCode::PageUp | KeyCode::Left => InputAction::Page(PageControl::Prev),
            KeyCode::PageDown | KeyCode::Right => InputAction::Page(PageControl::Next),
            KeyCode::Home => InputAction::FirstPage,
            KeyCode::End => InputAction::LastPage,
            _ => return None,
        };
        Some(action)
    }

    /// Apply an editing action to `text`. Returns whether the text changed.
    pub fn apply_edit(action: InputAction, text: &mut String) -> bool {
        match action {
            InputAction::InsertChar(c) => {
                text.push(c);
                true
            }
            InputAction::DeleteCharBackward => text.pop().is_some(),
            InputAction::ClearQuery => {
                let changed = !text.is_empty();
                text.clear();
                changed
            }
            _ => false,
        }
    }
}
