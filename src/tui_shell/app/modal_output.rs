use super::*;

const LOG_CAP: usize = 500;

impl App {
    fn push_entry(&mut self, kind: EntryKind, lines: Vec<String>) {
        self.log.push(ScrollEntry {
            ts: now_ts(),
            kind,
            lines,
        });
        if self.log.len() > LOG_CAP {
            let excess = self.log.len() - LOG_CAP;
            self.log.drain(..excess);
        }
    }

    pub(super) fn push_command(&mut self, line: &str) {
        self.push_entry(EntryKind::Command, vec![line.to_string()]);
    }

    pub(in crate::tui_shell) fn push_output(&mut self, lines: Vec<String>) {
        self.push_entry(EntryKind::Output, lines);
    }

    /// An "unauthorized" failure anywhere means the token is no longer good;
    /// reflect that in the header immediately.
    pub(in crate::tui_shell) fn push_error(&mut self, message: String) {
        if message.contains("unauthorized") {
            self.identity = None;
            self.identity_note = Some("auth: unauthorized".to_string());
        }
        self.push_entry(EntryKind::Error, vec![message]);
    }

    pub(in crate::tui_shell) fn open_modal(&mut self, title: &str, lines: Vec<String>) {
        self.modal = Some(Modal {
            title: title.to_string(),
            lines,
            scroll: 0,
            kind: ModalKind::Viewer,
            input: Input::default(),
        });
    }

    pub(in crate::tui_shell) fn open_text_input_modal(
        &mut self,
        title: &str,
        prompt: &str,
        action: TextInputAction,
        initial: Option<&str>,
        mut lines: Vec<String>,
    ) {
        lines.push(String::new());
        lines.push("Enter to submit; Esc to cancel.".to_string());
        let mut input = Input::default();
        if let Some(text) = initial {
            input.set(text);
        }
        self.modal = Some(Modal {
            title: title.to_string(),
            lines,
            scroll: 0,
            kind: ModalKind::TextInput {
                action,
                prompt: prompt.to_string(),
            },
            input,
        });
    }

    pub(super) fn open_confirm_navigation(&mut self) {
        let name = self
            .active_current_name()
            .unwrap_or_else(|| "the selected document".to_string());
        self.modal = Some(Modal {
            title: "Unsaved changes".to_string(),
            lines: vec![
                format!("'{}' has unsaved changes.", name),
                String::new(),
                "[s]   save, then continue".to_string(),
                "[d]   discard the changes, then continue".to_string(),
                "[Esc] stay here".to_string(),
            ],
            scroll: 0,
            kind: ModalKind::ConfirmNavigation,
            input: Input::default(),
        });
    }

    pub(in crate::tui_shell) fn modal_mut(&mut self) -> Option<&mut Modal> {
        self.modal.as_mut()
    }

    pub(in crate::tui_shell) fn close_modal(&mut self) {
        self.modal = None;
    }
}
