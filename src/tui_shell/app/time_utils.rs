use std::sync::OnceLock;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::format_description::{self, FormatItem};

use super::RenderCtx;

fn ui_format() -> &'static Vec<FormatItem<'static>> {
    static FORMAT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();
    FORMAT.get_or_init(|| {
        format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")
            .unwrap_or_default()
    })
}

pub(in crate::tui_shell) fn now_ts() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}

/// "2026-08-25 13:04:55" in UTC, or the raw string when it does not parse.
pub(in crate::tui_shell) fn fmt_ts_ui(ts: &str) -> String {
    match OffsetDateTime::parse(ts, &Rfc3339) {
        Ok(t) => t.format(ui_format()).unwrap_or_else(|_| ts.to_string()),
        Err(_) => ts.to_string(),
    }
}

fn fmt_since(ts: &str, now: OffsetDateTime) -> Option<String> {
    let t = OffsetDateTime::parse(ts, &Rfc3339).ok()?;
    let secs = (now - t).whole_seconds();
    if secs < 0 {
        return None;
    }
    Some(if secs < 10 {
        "just now".to_string()
    } else if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86_400)
    })
}

/// Relative age for panel chrome, absolute fallback for odd timestamps.
pub(in crate::tui_shell) fn fmt_ts_list(ts: &str, ctx: &RenderCtx) -> String {
    fmt_since(ts, ctx.now).unwrap_or_else(|| fmt_ts_ui(ts))
}
