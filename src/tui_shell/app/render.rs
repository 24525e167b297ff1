use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::*;

pub(super) fn draw(frame: &mut Frame, app: &App) {
    let ctx = RenderCtx {
        now: OffsetDateTime::now_utc(),
    };
    let suggest_height = if app.suggestions.is_empty() {
        0
    } else {
        (app.suggestions.len() as u16 + 2).min(9)
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(suggest_height),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    app.active_view().render(frame, chunks[1], &ctx);
    draw_last(frame, app, chunks[2], &ctx);
    if suggest_height > 0 {
        draw_suggestions(frame, app, chunks[3]);
    }
    draw_input(frame, app, chunks[4]);

    if let Some(modal) = &app.modal {
        dim_frame(frame);
        draw_modal(frame, modal);
    }
}

fn section_color(section: Section) -> Color {
    match section {
        Section::Configurations => Color::Yellow,
        Section::Clusters => Color::Blue,
    }
}

fn section_tab(app: &App, section: Section) -> Span<'static> {
    let dirty = match section {
        Section::Configurations => app.configurations.any_modified(),
        Section::Clusters => app.clusters.any_modified(),
    };
    let label = if dirty {
        format!(" {} * ", section.title())
    } else {
        format!(" {} ", section.title())
    };
    if app.section == section {
        Span::styled(
            label,
            Style::default()
                .fg(section_color(section))
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(label, Style::default().fg(Color::DarkGray))
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut top = vec![
        Span::styled(" confdesk ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        section_tab(app, Section::Configurations),
        Span::raw(" "),
        section_tab(app, Section::Clusters),
        Span::raw("   "),
    ];
    match &app.remote_label {
        Some(label) => top.push(Span::styled(
            label.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        None => top.push(Span::styled(
            "(no remote configured)",
            Style::default().fg(Color::DarkGray),
        )),
    }
    top.push(Span::raw("  "));
    if let Some(identity) = &app.identity {
        let mut who = identity.label().to_string();
        if let Some(label) = &app.remote_label {
            who = format!("{}@{}", identity.label(), label);
        }
        if !identity.administrator {
            who.push_str(" (read-only)");
        }
        top.push(Span::styled(who, Style::default().fg(Color::Green)));
    } else if let Some(note) = &app.identity_note {
        top.push(Span::styled(note.clone(), Style::default().fg(Color::Red)));
    }

    let hint = Line::from(Span::styled(
        " Tab: section   Enter: expand/run   arrows: move   q: quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(vec![Line::from(top), hint]), area);
}

fn draw_last(frame: &mut Frame, app: &App, area: Rect, ctx: &RenderCtx) {
    let block = Block::default().borders(Borders::ALL).title(" last ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let command = app.log.iter().rev().find(|e| e.kind == EntryKind::Command);
    let result = app.log.iter().rev().find(|e| e.kind != EntryKind::Command);
    if command.is_none() && result.is_none() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "(no commands yet)",
                Style::default().fg(Color::DarkGray),
            )),
            inner,
        );
        return;
    }

    let mut spans = Vec::new();
    if let Some(entry) = command {
        spans.push(Span::styled(
            format!("{}  ", entry.lines.join(" ")),
            Style::default().fg(Color::Cyan),
        ));
    }
    if let Some(entry) = result {
        let color = if entry.kind == EntryKind::Error {
            Color::Red
        } else {
            Color::Reset
        };
        let mut text = entry.lines.first().cloned().unwrap_or_default();
        if entry.lines.len() > 1 {
            text.push_str(&format!("  (+{} lines)", entry.lines.len() - 1));
        }
        spans.push(Span::styled(text, Style::default().fg(color)));
        spans.push(Span::styled(
            format!("  {}", fmt_ts_list(&entry.ts, ctx)),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn draw_suggestions(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" commands ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = inner.height as usize;
    if visible == 0 {
        return;
    }
    let total = app.suggestions.len();
    let selected = app.suggestion_selected.min(total.saturating_sub(1));
    let start = (selected + 1).saturating_sub(visible);

    let mut lines = Vec::new();
    for (idx, def) in app.suggestions.iter().enumerate().skip(start).take(visible) {
        let marker = if idx == selected { "> " } else { "  " };
        let name_style = if idx == selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{:<24}", marker, def.usage), name_style),
            Span::styled(
                format!(" {}", def.help),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn input_hint(app: &App) -> Option<String> {
    if !app.logged_in() {
        return Some("login to connect to a service".to_string());
    }
    if app.active_current_dirty() {
        return Some("unsaved changes: save or discard".to_string());
    }
    Some(format!(
        "/ for commands; Tab for {}",
        app.section.toggle().title().to_lowercase()
    ))
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let prompt = app.section.prompt();
    let mut spans = vec![
        Span::styled(
            prompt.to_string(),
            Style::default().fg(section_color(app.section)),
        ),
        Span::raw(app.input.buf.clone()),
    ];
    if app.input.buf.is_empty() {
        if let Some(hint) = input_hint(app) {
            spans.push(Span::styled(hint, Style::default().fg(Color::DarkGray)));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);

    if app.modal.is_none() {
        let cursor_x = inner.x
            + prompt.chars().count() as u16
            + app.input.buf[..app.input.cursor].chars().count() as u16;
        frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
    }
}

fn dim_frame(frame: &mut Frame) {
    let area = frame.area();
    let buf = frame.buffer_mut();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            buf[(x, y)].set_style(Style::default().fg(Color::DarkGray));
        }
    }
}
