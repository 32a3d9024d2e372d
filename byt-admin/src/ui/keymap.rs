//! Key bindings
//!
//! Maps a key press to a domain message for the current state. Overlays
//! take precedence over the page: an alert, then the navigation menu, then
//! the user dropdown, then the page mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{AppState, DomainMessage};
use crate::domains::nav;
use crate::domains::users::{self, FormField, PageMode};

#[derive(Debug)]
pub enum KeyAction {
    Quit,
    Dispatch(DomainMessage),
    Ignore,
}

impl From<users::Message> for KeyAction {
    fn from(message: users::Message) -> Self {
        KeyAction::Dispatch(message.into())
    }
}

impl From<nav::Message> for KeyAction {
    fn from(message: nav::Message) -> Self {
        KeyAction::Dispatch(message.into())
    }
}

pub fn map_key(key: KeyEvent, state: &AppState) -> KeyAction {
    if is_ctrl(key, 'q') {
        return KeyAction::Quit;
    }

    if state.users.alert.is_some() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc => users::Message::DismissAlert.into(),
            _ => KeyAction::Ignore,
        };
    }

    if state.header.menu.is_some() {
        return match key.code {
            KeyCode::Down | KeyCode::Tab => nav::Message::MenuNext.into(),
            KeyCode::Up | KeyCode::BackTab => nav::Message::MenuPrevious.into(),
            KeyCode::Enter => nav::Message::MenuSelect.into(),
            KeyCode::Esc => nav::Message::CloseMenu.into(),
            _ => KeyAction::Ignore,
        };
    }

    if state.header.user_dropdown_visible {
        return match key.code {
            KeyCode::Enter => nav::Message::Logout.into(),
            KeyCode::Esc => nav::Message::CloseUserDropdown.into(),
            _ if is_ctrl(key, 'u') => nav::Message::UserButton.into(),
            _ => KeyAction::Ignore,
        };
    }

    match state.users.mode {
        PageMode::Modal { .. } => match key.code {
            KeyCode::Enter | KeyCode::Char('s' | 'S') => {
                users::Message::ModalConfirm.into()
            }
            KeyCode::Esc | KeyCode::Char('n' | 'N') => users::Message::Cancel.into(),
            _ => KeyAction::Ignore,
        },
        PageMode::Editing { field, .. } => editing_key(key, state, field),
        PageMode::Confirming { .. } => match key.code {
            KeyCode::Enter => users::Message::Confirm.into(),
            KeyCode::Esc => users::Message::Cancel.into(),
            _ => KeyAction::Ignore,
        },
        PageMode::Idle | PageMode::Searched { .. } => page_key(key, state),
    }
}

fn page_key(key: KeyEvent, state: &AppState) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('n') => users::Message::Create.into(),
            KeyCode::Char('e') => users::Message::Edit.into(),
            KeyCode::Char('d') => users::Message::Delete.into(),
            KeyCode::Char('g') => nav::Message::OpenMenu.into(),
            KeyCode::Char('u') => nav::Message::UserButton.into(),
            _ => KeyAction::Ignore,
        };
    }

    let id_input = &state.users.id_input;
    match key.code {
        KeyCode::Enter => users::Message::Search.into(),
        KeyCode::Esc => users::Message::Cancel.into(),
        KeyCode::Backspace if !id_input.is_empty() => {
            let mut value = id_input.clone();
            value.pop();
            users::Message::IdInputChanged(value).into()
        }
        KeyCode::Char(ch) if is_plain(key) => {
            users::Message::IdInputChanged(format!("{id_input}{ch}")).into()
        }
        _ => KeyAction::Ignore,
    }
}

fn editing_key(key: KeyEvent, state: &AppState, field: FormField) -> KeyAction {
    if is_ctrl(key, 'r') {
        return users::Message::TogglePasswordVisibility.into();
    }

    let current = state.users.form.raw_value(field);
    match key.code {
        KeyCode::Tab | KeyCode::Down => users::Message::NextField.into(),
        KeyCode::BackTab | KeyCode::Up => users::Message::PreviousField.into(),
        KeyCode::Enter => users::Message::Confirm.into(),
        KeyCode::Esc => users::Message::Cancel.into(),
        KeyCode::Backspace if !current.is_empty() => {
            let mut value = current.to_string();
            value.pop();
            users::Message::FieldChanged(field, value).into()
        }
        KeyCode::Char(ch) if is_plain(key) => {
            users::Message::FieldChanged(field, format!("{current}{ch}")).into()
        }
        _ => KeyAction::Ignore,
    }
}

fn is_ctrl(key: KeyEvent, ch: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(ch)
}

fn is_plain(key: KeyEvent) -> bool {
    key.modifiers.difference(KeyModifiers::SHIFT).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::SessionState;
    use crate::domains::users::{Alert, PendingAction};
    use byt_model::prelude::UserId;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn state() -> AppState {
        AppState::new(SessionState::default())
    }

    fn users_message(action: KeyAction) -> users::Message {
        match action {
            KeyAction::Dispatch(DomainMessage::Users(message)) => message,
            other => panic!("expected a users message, got {other:?}"),
        }
    }

    fn nav_message(action: KeyAction) -> nav::Message {
        match action {
            KeyAction::Dispatch(DomainMessage::Nav(message)) => message,
            other => panic!("expected a nav message, got {other:?}"),
        }
    }

    #[test]
    fn typing_on_the_page_extends_the_id() {
        let mut state = state();
        state.users.id_input = "1".into();
        let message = users_message(map_key(key(KeyCode::Char('2')), &state));
        assert!(matches!(message, users::Message::IdInputChanged(v) if v == "12"));

        let message = users_message(map_key(key(KeyCode::Backspace), &state));
        assert!(matches!(message, users::Message::IdInputChanged(v) if v.is_empty()));
    }

    #[test]
    fn control_chords_trigger_actions() {
        let state = state();
        assert!(matches!(
            users_message(map_key(ctrl('n'), &state)),
            users::Message::Create
        ));
        assert_eq!(nav_message(map_key(ctrl('g'), &state)), nav::Message::OpenMenu);
        assert!(matches!(map_key(ctrl('q'), &state), KeyAction::Quit));
    }

    #[test]
    fn typing_while_editing_targets_the_focused_field() {
        let mut state = state();
        state.users.mode = PageMode::Editing {
            action: PendingAction::Create,
            field: FormField::Email,
        };
        state.users.form.email = "a@".into();

        let message = users_message(map_key(
            KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT),
            &state,
        ));
        assert!(matches!(
            message,
            users::Message::FieldChanged(FormField::Email, v) if v == "a@X"
        ));
        assert!(matches!(
            users_message(map_key(ctrl('r'), &state)),
            users::Message::TogglePasswordVisibility
        ));
    }

    #[test]
    fn alert_swallows_everything_but_dismiss() {
        let mut state = state();
        state.users.alert = Some(Alert::error("x"));
        assert!(matches!(map_key(ctrl('n'), &state), KeyAction::Ignore));
        assert!(matches!(
            map_key(key(KeyCode::Char('5')), &state),
            KeyAction::Ignore
        ));
        assert!(matches!(
            users_message(map_key(key(KeyCode::Esc), &state)),
            users::Message::DismissAlert
        ));
    }

    #[test]
    fn modal_accepts_s_and_n() {
        let mut state = state();
        state.users.mode = PageMode::Modal {
            action: PendingAction::Delete(UserId(5)),
        };
        assert!(matches!(
            users_message(map_key(key(KeyCode::Char('s')), &state)),
            users::Message::ModalConfirm
        ));
        assert!(matches!(
            users_message(map_key(key(KeyCode::Char('n')), &state)),
            users::Message::Cancel
        ));
    }

    #[test]
    fn open_menu_captures_arrows() {
        let mut state = state();
        state.header.menu = Some(0);
        assert_eq!(
            nav_message(map_key(key(KeyCode::Down), &state)),
            nav::Message::MenuNext
        );
        assert_eq!(
            nav_message(map_key(key(KeyCode::Enter), &state)),
            nav::Message::MenuSelect
        );
    }
}
