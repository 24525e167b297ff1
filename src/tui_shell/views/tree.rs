use std::collections::HashSet;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, List, ListState, Paragraph, Wrap};

use crate::editor::Editor;
use crate::model::{ClusterDocument, ConfigurationDocument};
use crate::selection::SelectionPath;

use super::super::{RenderCtx, now_ts, render_view_chrome};

mod form;
mod rows;

/// One visible row of the document tree.
#[derive(Clone, Debug)]
pub(in crate::tui_shell) struct TreeRow {
    pub(in crate::tui_shell) path: SelectionPath,
    pub(in crate::tui_shell) depth: usize,
    pub(in crate::tui_shell) label: String,
    pub(in crate::tui_shell) expandable: bool,
    pub(in crate::tui_shell) expanded: bool,
    pub(in crate::tui_shell) dirty: bool,
    pub(in crate::tui_shell) flagged: bool,
}

/// One field line of the detail form.
#[derive(Clone, Debug)]
pub(in crate::tui_shell) struct FormLine {
    pub(in crate::tui_shell) label: String,
    pub(in crate::tui_shell) value: String,
    pub(in crate::tui_shell) errors: Vec<String>,
}

/// Tree-plus-form presentation of one document collection. The `rebuild_*`
/// methods recompute everything from the editor; `render` only reads.
#[derive(Debug)]
pub(in crate::tui_shell) struct TreeView {
    pub(in crate::tui_shell) title: &'static str,
    pub(in crate::tui_shell) empty_note: &'static str,
    pub(in crate::tui_shell) updated_at: String,
    pub(in crate::tui_shell) filter: Option<String>,
    expanded: HashSet<String>,
    pub(in crate::tui_shell) rows: Vec<TreeRow>,
    pub(in crate::tui_shell) selected_row: usize,
    form_title: String,
    form_lines: Vec<FormLine>,
}

impl TreeView {
    pub(in crate::tui_shell) fn new(title: &'static str, empty_note: &'static str) -> Self {
        TreeView {
            title,
            empty_note,
            updated_at: String::new(),
            filter: None,
            expanded: HashSet::new(),
            rows: Vec::new(),
            selected_row: 0,
            form_title: String::new(),
            form_lines: Vec::new(),
        }
    }

    pub(in crate::tui_shell) fn toggle_expanded(&mut self, path: &SelectionPath) {
        let key = path.encode();
        if !self.expanded.remove(&key) {
            self.expanded.insert(key);
        }
    }

    pub(in crate::tui_shell) fn set_expanded(&mut self, path: &SelectionPath, open: bool) {
        let key = path.encode();
        if open {
            self.expanded.insert(key);
        } else {
            self.expanded.remove(&key);
        }
    }

    /// The selected node must stay on screen, so its ancestors are forced
    /// open on every rebuild.
    fn keep_selection_visible(&mut self, selection: Option<&SelectionPath>) {
        let Some(path) = selection else {
            return;
        };
        let mut cursor = path.clone();
        while let Some(parent) = cursor.parent() {
            self.expanded.insert(parent.encode());
            cursor = parent;
        }
    }

    fn sync_selected_row(&mut self, selection: Option<&SelectionPath>) {
        let fallback = self.selected_row.min(self.rows.len().saturating_sub(1));
        self.selected_row = match selection {
            Some(path) => self
                .rows
                .iter()
                .position(|row| &row.path == path)
                .unwrap_or(fallback),
            None => fallback,
        };
    }

    pub(in crate::tui_shell) fn rebuild_configurations(
        &mut self,
        editor: &Editor<ConfigurationDocument>,
    ) {
        self.updated_at = now_ts();
        self.keep_selection_visible(editor.selection());
        self.rows = rows::configuration_rows(editor, self.filter.as_deref(), &self.expanded);
        self.sync_selected_row(editor.selection());
        let (title, lines) = form::configuration_form(editor);
        self.form_title = title;
        self.form_lines = lines;
    }

    pub(in crate::tui_shell) fn rebuild_clusters(&mut self, editor: &Editor<ClusterDocument>) {
        self.updated_at = now_ts();
        self.keep_selection_visible(editor.selection());
        self.rows = rows::cluster_rows(editor, self.filter.as_deref(), &self.expanded);
        self.sync_selected_row(editor.selection());
        let (title, lines) = form::cluster_form(editor);
        self.form_title = title;
        self.form_lines = lines;
    }

    pub(in crate::tui_shell) fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title, &self.updated_at, area, ctx);
        let parts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(inner);

        let tree_title = match &self.filter {
            Some(filter) => format!(" tree (filter: {}) ", filter),
            None => " tree ".to_string(),
        };
        let list = List::new(rows::list_rows(self))
            .block(Block::default().borders(Borders::RIGHT).title(tree_title))
            .highlight_style(Style::default().bg(Color::DarkGray));
        let mut state = ListState::default();
        if !self.rows.is_empty() {
            state.select(Some(self.selected_row.min(self.rows.len() - 1)));
        }
        frame.render_stateful_widget(list, parts[0], &mut state);

        let form = Paragraph::new(form::form_text(&self.form_title, &self.form_lines))
            .wrap(Wrap { trim: false });
        frame.render_widget(form, parts[1]);
    }
}
