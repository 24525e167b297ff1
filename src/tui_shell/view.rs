use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};
use time::OffsetDateTime;

use super::fmt_ts_list;

/// Per-frame context handed to view rendering.
pub(in crate::tui_shell) struct RenderCtx {
    pub(in crate::tui_shell) now: OffsetDateTime,
}

/// Draw the bordered frame around a section view, with the section title on
/// the left and the refresh age on the right. Returns the inner area.
pub(in crate::tui_shell) fn render_view_chrome(
    frame: &mut Frame,
    title: &str,
    updated_at: &str,
    area: Rect,
    ctx: &RenderCtx,
) -> Rect {
    let mut spans = vec![Span::styled(
        format!(" {} ", title),
        Style::default().fg(Color::Cyan),
    )];
    if !updated_at.is_empty() {
        spans.push(Span::styled(
            format!("(updated {}) ", fmt_ts_list(updated_at, ctx)),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(spans));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}
