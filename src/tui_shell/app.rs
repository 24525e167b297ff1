use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use time::OffsetDateTime;

use crate::editor::{Editor, SaveOutcome, SelectOutcome};
use crate::model::{ClusterDocument, ConfigurationDocument, GROUP_USER_APIS, RemoteConfig};
use crate::remote::{RemoteClient, WhoAmI};
use crate::selection::SelectionPath;
use crate::store::ConsoleStore;

use super::modal::draw_modal;
use super::suggest::{score_match, sort_scored_suggestions};
use super::views::{TreeRow, TreeView};
use super::wizard::LoginWizard;
use super::{CommandDef, Input, RenderCtx, commands};

mod availability;
mod cmd_dispatch;
mod edit_cmds;
mod event_loop;
mod lifecycle;
mod modal_output;
mod render;
mod session;
mod time_utils;
mod types;

pub(super) use self::time_utils::{fmt_ts_list, fmt_ts_ui, now_ts};
pub(super) use self::types::{EntryKind, Modal, ModalKind, ScrollEntry, Section, TextInputAction};

pub(super) fn run() -> Result<()> {
    if !io::stdout().is_terminal() {
        anyhow::bail!("the console needs an interactive terminal (use the CLI subcommands instead)");
    }

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut app = App::load();
    let result = event_loop::run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// All state for the interactive console. One editor per document kind; both
/// stay resident so switching sections never loses work in progress.
pub(super) struct App {
    store: Option<ConsoleStore>,
    store_err: Option<String>,

    section: Section,

    identity: Option<WhoAmI>,
    identity_note: Option<String>,
    remote_label: Option<String>,

    configurations: Editor<ConfigurationDocument>,
    clusters: Editor<ClusterDocument>,

    cfg_view: TreeView,
    cluster_view: TreeView,

    log: Vec<ScrollEntry>,

    modal: Option<Modal>,
    pub(super) login_wizard: Option<LoginWizard>,

    input: Input,
    suggestions: Vec<CommandDef>,
    suggestion_selected: usize,

    quit: bool,
}

impl Default for App {
    fn default() -> Self {
        App {
            store: None,
            store_err: None,
            section: Section::Configurations,
            identity: None,
            identity_note: None,
            remote_label: None,
            configurations: Editor::default(),
            clusters: Editor::default(),
            cfg_view: TreeView::new("Configurations", "(no configurations)"),
            cluster_view: TreeView::new("Clusters", "(no clusters)"),
            log: Vec::new(),
            modal: None,
            login_wizard: None,
            input: Input::default(),
            suggestions: Vec::new(),
            suggestion_selected: 0,
            quit: false,
        }
    }
}

impl App {
    fn logged_in(&self) -> bool {
        self.identity.is_some()
    }

    fn admin(&self) -> bool {
        self.identity.as_ref().is_some_and(|w| w.administrator)
    }

    fn active_view(&self) -> &TreeView {
        match self.section {
            Section::Configurations => &self.cfg_view,
            Section::Clusters => &self.cluster_view,
        }
    }

    fn active_view_mut(&mut self) -> &mut TreeView {
        match self.section {
            Section::Configurations => &mut self.cfg_view,
            Section::Clusters => &mut self.cluster_view,
        }
    }

    fn active_selection(&self) -> Option<&SelectionPath> {
        match self.section {
            Section::Configurations => self.configurations.selection(),
            Section::Clusters => self.clusters.selection(),
        }
    }

    fn active_selection_depth(&self) -> usize {
        self.active_selection().map(|p| p.depth()).unwrap_or(0)
    }

    fn active_any_modified(&self) -> bool {
        match self.section {
            Section::Configurations => self.configurations.any_modified(),
            Section::Clusters => self.clusters.any_modified(),
        }
    }

    fn any_modified(&self) -> bool {
        self.configurations.any_modified() || self.clusters.any_modified()
    }

    fn active_current_dirty(&self) -> bool {
        match self.section {
            Section::Configurations => self.configurations.current_dirty(),
            Section::Clusters => self.clusters.current_dirty(),
        }
    }

    fn active_current_name(&self) -> Option<String> {
        match self.section {
            Section::Configurations => {
                self.configurations.current_document().map(|d| d.name.clone())
            }
            Section::Clusters => self.clusters.current_document().map(|d| d.name.clone()),
        }
    }

    fn rebuild_views(&mut self) {
        self.cfg_view.rebuild_configurations(&self.configurations);
        self.cluster_view.rebuild_clusters(&self.clusters);
    }

    fn current_row(&self) -> Option<&TreeRow> {
        let view = self.active_view();
        view.rows.get(view.selected_row)
    }

    fn move_selection(&mut self, delta: i32) {
        let view = self.active_view();
        if view.rows.is_empty() {
            return;
        }
        let len = view.rows.len() as i32;
        let cur = view.selected_row.min(view.rows.len() - 1) as i32;
        let next = (cur + delta).clamp(0, len - 1) as usize;
        let target = view.rows[next].path.clone();
        self.request_select(Some(target));
    }

    /// Route every selection change through the editor so unsaved changes can
    /// interpose the confirmation modal.
    fn request_select(&mut self, target: Option<SelectionPath>) {
        let outcome = match self.section {
            Section::Configurations => self.configurations.select(target),
            Section::Clusters => self.clusters.select(target),
        };
        match outcome {
            SelectOutcome::Applied => self.rebuild_views(),
            SelectOutcome::ConfirmationRequired => self.open_confirm_navigation(),
        }
    }

    fn toggle_expand_selected(&mut self) {
        let Some(row) = self.current_row() else {
            return;
        };
        if !row.expandable {
            return;
        }
        let path = row.path.clone();
        self.active_view_mut().toggle_expanded(&path);
        self.rebuild_views();
    }

    fn expand_selected(&mut self) {
        let Some(row) = self.current_row() else {
            return;
        };
        if !row.expandable || row.expanded {
            return;
        }
        let path = row.path.clone();
        self.active_view_mut().set_expanded(&path, true);
        self.rebuild_views();
    }

    fn collapse_selected(&mut self) {
        let Some(row) = self.current_row() else {
            return;
        };
        let path = row.path.clone();
        if row.expandable && row.expanded {
            self.active_view_mut().set_expanded(&path, false);
            self.rebuild_views();
        } else if let Some(parent) = path.parent() {
            self.request_select(Some(parent));
        }
    }
}
