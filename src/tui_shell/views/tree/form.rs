use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::editor::Editor;
use crate::model::{
    ClusterDocument, ConfigurationDocument, GROUP_ORGANISATIONS, GROUP_USER_APIS,
    REQUIRED_USER_APIS,
};
use crate::validate::ValidationError;

use super::FormLine;
use super::super::super::fmt_ts_ui;

fn field_errors(errors: &[ValidationError], scope: &str, field: &str) -> Vec<String> {
    errors
        .iter()
        .filter(|e| e.id == scope && e.field == field)
        .flat_map(|e| e.errors.iter().cloned())
        .collect()
}

fn field(errors: &[ValidationError], scope: &str, name: &str, value: String) -> FormLine {
    FormLine {
        label: name.to_string(),
        value,
        errors: field_errors(errors, scope, name),
    }
}

fn plain(label: &str, value: String) -> FormLine {
    FormLine {
        label: label.to_string(),
        value,
        errors: Vec::new(),
    }
}

fn audit_value(ts: &str) -> String {
    if ts.trim().is_empty() {
        "-".to_string()
    } else {
        fmt_ts_ui(ts)
    }
}

fn audit_by(user: &str) -> String {
    if user.trim().is_empty() {
        "-".to_string()
    } else {
        user.to_string()
    }
}

pub(super) fn configuration_form(
    editor: &Editor<ConfigurationDocument>,
) -> (String, Vec<FormLine>) {
    let (Some(path), Some(doc)) = (editor.selection(), editor.current_document()) else {
        return (String::new(), Vec::new());
    };
    let errors = editor.errors();
    let scope = path.encode();

    match path.depth() {
        1 => (
            format!("configuration: {}", doc.name),
            vec![
                field(errors, &scope, "name", doc.name.clone()),
                plain("configType", doc.config_type.clone()),
                plain("version", doc.version.to_string()),
                plain("created", audit_value(&doc.created)),
                plain("createdBy", audit_by(&doc.created_by)),
                plain("lastUpdated", audit_value(&doc.last_updated)),
                plain("lastUpdatedBy", audit_by(&doc.last_updated_by)),
                field(
                    errors,
                    &scope,
                    "organisations",
                    doc.organisations.len().to_string(),
                ),
            ],
        ),
        2 => {
            let Some(org) = path.segment(1).and_then(|name| doc.organisation(name)) else {
                return (format!("configuration: {}", doc.name), Vec::new());
            };
            (
                format!("organisation: {}", org.organisation_name),
                vec![
                    field(
                        errors,
                        &scope,
                        "organisationName",
                        org.organisation_name.clone(),
                    ),
                    field(errors, &scope, "server", org.server.clone()),
                    field(errors, &scope, "database", org.database.clone()),
                    field(errors, &scope, "userId", org.user_id.clone()),
                    field(errors, &scope, "password", org.password.clone()),
                    plain("connectionString", org.connection_string.clone()),
                    field(errors, &scope, "elasticAlias", org.elastic_alias.clone()),
                    field(
                        errors,
                        &scope,
                        "elasticNodes",
                        org.elastic_nodes.len().to_string(),
                    ),
                ],
            )
        }
        _ => {
            let Some(node) = path.segment(2) else {
                return (format!("configuration: {}", doc.name), Vec::new());
            };
            (
                format!("elastic node: {}", node),
                vec![plain("name", node.to_string())],
            )
        }
    }
}

pub(super) fn cluster_form(editor: &Editor<ClusterDocument>) -> (String, Vec<FormLine>) {
    let (Some(path), Some(doc)) = (editor.selection(), editor.current_document()) else {
        return (String::new(), Vec::new());
    };
    let errors = editor.errors();
    let scope = path.encode();

    match path.segment(1) {
        None => (
            format!("cluster: {}", doc.name),
            vec![
                field(errors, &scope, "name", doc.name.clone()),
                field(errors, &scope, "application", doc.application.clone()),
                plain("configType", doc.config_type.clone()),
                plain("version", doc.version.to_string()),
                plain("created", audit_value(&doc.created)),
                plain("createdBy", audit_by(&doc.created_by)),
                plain("lastUpdated", audit_value(&doc.last_updated)),
                plain("lastUpdatedBy", audit_by(&doc.last_updated_by)),
                plain("user APIs", doc.user_apis.len().to_string()),
                plain("organisations", doc.organisations.len().to_string()),
            ],
        ),
        Some(GROUP_USER_APIS) => {
            let mut lines = Vec::new();
            for api in REQUIRED_USER_APIS.iter().copied() {
                let value = doc.user_api(api).unwrap_or("").to_string();
                let shown = if value.trim().is_empty() {
                    "(not set)".to_string()
                } else {
                    value
                };
                lines.push(field(errors, &scope, api, shown));
            }
            for (api, value) in &doc.user_apis {
                if REQUIRED_USER_APIS.contains(&api.as_str()) {
                    continue;
                }
                lines.push(field(errors, &scope, api, value.clone()));
            }
            (format!("user APIs: {}", doc.name), lines)
        }
        Some(GROUP_ORGANISATIONS) => {
            let mut lines = vec![field(
                errors,
                &scope,
                "organisations",
                format!("{} member(s)", doc.organisations.len()),
            )];
            for member in &doc.organisations {
                lines.push(FormLine {
                    label: String::new(),
                    value: format!("- {}", member),
                    errors: Vec::new(),
                });
            }
            (format!("organisations: {}", doc.name), lines)
        }
        Some(_) => (format!("cluster: {}", doc.name), Vec::new()),
    }
}

pub(super) fn form_text(title: &str, lines: &[FormLine]) -> Vec<Line<'static>> {
    if title.is_empty() {
        return vec![Line::from(Span::styled(
            " (nothing selected)".to_string(),
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let mut out = vec![
        Line::from(Span::styled(
            format!(" {}", title),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
    ];
    for line in lines {
        if line.label.is_empty() {
            out.push(Line::from(Span::raw(format!("   {}", line.value))));
        } else {
            out.push(Line::from(vec![
                Span::styled(
                    format!(" {:<17} ", line.label),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(line.value.clone()),
            ]));
        }
        for err in &line.errors {
            out.push(Line::from(Span::styled(
                format!("   ! {}", err),
                Style::default().fg(Color::Red),
            )));
        }
    }
    out
}
