use std::collections::HashSet;

use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::ListItem;

use crate::editor::Editor;
use crate::model::{
    ClusterDocument, ConfigurationDocument, GROUP_ORGANISATIONS, GROUP_USER_APIS,
};
use crate::selection::SelectionPath;
use crate::validate::ValidationError;

use super::{TreeRow, TreeView};

/// A row is flagged when any finding sits on its path or below it.
fn flags_path(errors: &[ValidationError], path: &SelectionPath) -> bool {
    let key = path.encode();
    let prefix = format!("{}|", key);
    errors
        .iter()
        .any(|e| e.id == key || e.id.starts_with(&prefix))
}

fn name_filter(filter: Option<&str>) -> Option<String> {
    let needle = filter?.trim().to_lowercase();
    if needle.is_empty() { None } else { Some(needle) }
}

pub(super) fn configuration_rows(
    editor: &Editor<ConfigurationDocument>,
    filter: Option<&str>,
    expanded: &HashSet<String>,
) -> Vec<TreeRow> {
    let needle = name_filter(filter);
    let errors = editor.errors();
    let mut out = Vec::new();

    for doc in editor.documents() {
        if let Some(needle) = &needle {
            if !doc.name.to_lowercase().contains(needle) {
                continue;
            }
        }
        let path = SelectionPath::root(&doc.id);
        let open = expanded.contains(&path.encode());
        out.push(TreeRow {
            path: path.clone(),
            depth: 0,
            label: doc.name.clone(),
            expandable: !doc.organisations.is_empty(),
            expanded: open,
            dirty: editor.is_modified(&doc.id),
            flagged: flags_path(errors, &path),
        });
        if !open {
            continue;
        }

        for org in &doc.organisations {
            let org_path = path.child(&org.organisation_name);
            let org_open = expanded.contains(&org_path.encode());
            out.push(TreeRow {
                path: org_path.clone(),
                depth: 1,
                label: org.organisation_name.clone(),
                expandable: !org.elastic_nodes.is_empty(),
                expanded: org_open,
                dirty: false,
                flagged: flags_path(errors, &org_path),
            });
            if !org_open {
                continue;
            }

            for node in &org.elastic_nodes {
                let node_path = org_path.child(node);
                out.push(TreeRow {
                    path: node_path.clone(),
                    depth: 2,
                    label: node.clone(),
                    expandable: false,
                    expanded: false,
                    dirty: false,
                    flagged: flags_path(errors, &node_path),
                });
            }
        }
    }

    out
}

pub(super) fn cluster_rows(
    editor: &Editor<ClusterDocument>,
    filter: Option<&str>,
    expanded: &HashSet<String>,
) -> Vec<TreeRow> {
    let needle = name_filter(filter);
    let errors = editor.errors();
    let mut out = Vec::new();

    for doc in editor.documents() {
        if let Some(needle) = &needle {
            if !doc.name.to_lowercase().contains(needle) {
                continue;
            }
        }
        let path = SelectionPath::root(&doc.id);
        let open = expanded.contains(&path.encode());
        out.push(TreeRow {
            path: path.clone(),
            depth: 0,
            label: doc.name.clone(),
            expandable: true,
            expanded: open,
            dirty: editor.is_modified(&doc.id),
            flagged: flags_path(errors, &path),
        });
        if !open {
            continue;
        }

        let apis = path.child(GROUP_USER_APIS);
        out.push(TreeRow {
            path: apis.clone(),
            depth: 1,
            label: format!("user APIs ({})", doc.user_apis.len()),
            expandable: false,
            expanded: false,
            dirty: false,
            flagged: flags_path(errors, &apis),
        });

        let members = path.child(GROUP_ORGANISATIONS);
        out.push(TreeRow {
            path: members.clone(),
            depth: 1,
            label: format!("organisations ({})", doc.organisations.len()),
            expandable: false,
            expanded: false,
            dirty: false,
            flagged: flags_path(errors, &members),
        });
    }

    out
}

pub(super) fn list_rows(view: &TreeView) -> Vec<ListItem<'static>> {
    if view.rows.is_empty() {
        return vec![ListItem::new(Span::styled(
            view.empty_note,
            Style::default().fg(Color::DarkGray),
        ))];
    }

    view.rows
        .iter()
        .map(|row| {
            let marker = if row.expandable {
                if row.expanded { "- " } else { "+ " }
            } else {
                "  "
            };
            let mut text = format!("{}{}{}", "  ".repeat(row.depth), marker, row.label);
            if row.dirty {
                text.push_str(" *");
            }
            if row.flagged {
                text.push_str(" !");
            }
            let style = if row.flagged {
                Style::default().fg(Color::Red)
            } else if row.dirty {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(text, style))
        })
        .collect()
}
