use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum Section {
    Configurations,
    Clusters,
}

impl Section {
    pub(in crate::tui_shell) fn toggle(self) -> Section {
        match self {
            Section::Configurations => Section::Clusters,
            Section::Clusters => Section::Configurations,
        }
    }

    pub(in crate::tui_shell) fn title(self) -> &'static str {
        match self {
            Section::Configurations => "Configurations",
            Section::Clusters => "Clusters",
        }
    }

    pub(in crate::tui_shell) fn prompt(self) -> &'static str {
        match self {
            Section::Configurations => "configs> ",
            Section::Clusters => "clusters> ",
        }
    }

    pub(in crate::tui_shell) fn record_label(self) -> &'static str {
        match self {
            Section::Configurations => "configuration",
            Section::Clusters => "cluster",
        }
    }
}

/// What to do with the text once a prompt modal submits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum TextInputAction {
    LoginUrl,
    LoginToken,
    FieldEdit { field: String },
    MemberName,
}

#[derive(Debug)]
pub(in crate::tui_shell) enum ModalKind {
    Viewer,
    TextInput {
        action: TextInputAction,
        prompt: String,
    },
    ConfirmNavigation,
}

#[derive(Debug)]
pub(in crate::tui_shell) struct Modal {
    pub(in crate::tui_shell) title: String,
    pub(in crate::tui_shell) lines: Vec<String>,
    pub(in crate::tui_shell) scroll: usize,
    pub(in crate::tui_shell) kind: ModalKind,
    pub(in crate::tui_shell) input: Input,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum EntryKind {
    Command,
    Output,
    Error,
}

/// One logged command or result, timestamped for the status panel.
#[derive(Clone, Debug)]
pub(in crate::tui_shell) struct ScrollEntry {
    pub(in crate::tui_shell) ts: String,
    pub(in crate::tui_shell) kind: EntryKind,
    pub(in crate::tui_shell) lines: Vec<String>,
}
