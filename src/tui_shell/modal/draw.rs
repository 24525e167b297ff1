use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::super::{Modal, ModalKind};

pub(in crate::tui_shell) fn draw_modal(frame: &mut Frame, modal: &Modal) {
    let area = modal_area(frame.area());
    frame.render_widget(Clear, area);

    let key_hint = match &modal.kind {
        ModalKind::TextInput { .. } => "(Enter: submit, Esc: cancel)",
        ModalKind::ConfirmNavigation => "(s / d / Esc)",
        ModalKind::Viewer => "(Esc: close)",
    };
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", modal.title),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(key_hint, Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
    ]);
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &modal.kind {
        ModalKind::TextInput { prompt, .. } => draw_text_input(frame, modal, prompt, inner),
        _ => draw_lines(frame, modal, inner),
    }
}

fn modal_area(outer: Rect) -> Rect {
    let width = outer.width.saturating_sub(8).clamp(20, 90);
    let height = outer.height.saturating_sub(6).clamp(8, 22);
    let x = outer.x + outer.width.saturating_sub(width) / 2;
    let y = outer.y + outer.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn draw_lines(frame: &mut Frame, modal: &Modal, area: Rect) {
    let lines: Vec<Line> = modal.lines.iter().map(|l| style_line(l)).collect();
    let scroll = modal.scroll.min(lines.len().saturating_sub(1)) as u16;
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        area,
    );
}

fn style_line(line: &str) -> Line<'static> {
    if line.starts_with("error: ") {
        Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(Span::raw(line.to_string()))
    }
}

fn draw_text_input(frame: &mut Frame, modal: &Modal, prompt: &str, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);
    draw_lines(frame, modal, parts[0]);

    let input_block = Block::default().borders(Borders::ALL);
    let inner = input_block.inner(parts[1]);
    frame.render_widget(input_block, parts[1]);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(prompt.to_string(), Style::default().fg(Color::Cyan)),
            Span::raw(modal.input.buf.clone()),
        ])),
        inner,
    );

    let cursor_x = inner.x
        + prompt.chars().count() as u16
        + modal.input.buf[..modal.input.cursor].chars().count() as u16;
    frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
}
