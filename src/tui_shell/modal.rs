use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, Input, Modal, ModalKind, TextInputAction};

mod draw;
mod text_input_validate;

pub(super) use self::draw::draw_modal;
use self::text_input_validate::{allow_empty_text_input, validate_text_input};

/// What a key press inside a modal resolved to.
enum ModalAction {
    None,
    Close,
    SubmitTextInput {
        action: TextInputAction,
        value: String,
    },
    GuardSave,
    GuardDiscard,
    GuardCancel,
}

pub(super) fn handle_modal_key(app: &mut App, key: KeyEvent) {
    let Some(modal) = app.modal_mut() else {
        return;
    };
    match map_modal_key(modal, key) {
        ModalAction::None => {}
        ModalAction::Close => {
            app.close_modal();
            app.cancel_wizards();
        }
        ModalAction::SubmitTextInput { action, value } => {
            app.close_modal();
            app.submit_text_input(action, value);
        }
        ModalAction::GuardSave => {
            app.close_modal();
            app.guard_save();
        }
        ModalAction::GuardDiscard => {
            app.close_modal();
            app.guard_discard();
        }
        ModalAction::GuardCancel => {
            app.close_modal();
            app.guard_cancel();
        }
    }
}

fn map_modal_key(modal: &mut Modal, key: KeyEvent) -> ModalAction {
    if let ModalKind::TextInput { action, .. } = &modal.kind {
        let action = action.clone();
        return text_input_key(modal, action, key);
    }

    if matches!(modal.kind, ModalKind::ConfirmNavigation) {
        return match key.code {
            KeyCode::Char('s') => ModalAction::GuardSave,
            KeyCode::Char('d') => ModalAction::GuardDiscard,
            KeyCode::Esc => ModalAction::GuardCancel,
            _ => {
                scroll_key(modal, key);
                ModalAction::None
            }
        };
    }

    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => ModalAction::Close,
        _ => {
            scroll_key(modal, key);
            ModalAction::None
        }
    }
}

fn text_input_key(modal: &mut Modal, action: TextInputAction, key: KeyEvent) -> ModalAction {
    match key.code {
        KeyCode::Esc => ModalAction::Close,
        KeyCode::Enter => {
            let value = modal.input.buf.trim().to_string();
            if value.is_empty() && !allow_empty_text_input(&action) {
                append_modal_error(modal, "a value is required");
                return ModalAction::None;
            }
            if let Err(message) = validate_text_input(&action, &value) {
                append_modal_error(modal, &message);
                return ModalAction::None;
            }
            ModalAction::SubmitTextInput { action, value }
        }
        _ => {
            apply_input_edit_key(&mut modal.input, key);
            ModalAction::None
        }
    }
}

fn scroll_key(modal: &mut Modal, key: KeyEvent) {
    match key.code {
        KeyCode::Up => modal.scroll = modal.scroll.saturating_sub(1),
        KeyCode::Down => modal.scroll = modal.scroll.saturating_add(1),
        KeyCode::PageUp => modal.scroll = modal.scroll.saturating_sub(10),
        KeyCode::PageDown => modal.scroll = modal.scroll.saturating_add(10),
        _ => {}
    }
}

/// Replace any previous inline error, keeping the original modal text.
fn append_modal_error(modal: &mut Modal, message: &str) {
    modal.lines.retain(|l| !l.starts_with("error: "));
    modal.lines.push(format!("error: {}", message));
}

fn apply_input_edit_key(input: &mut Input, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('u') = key.code {
            input.clear();
        }
        return;
    }
    match key.code {
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        _ => {}
    }
}
