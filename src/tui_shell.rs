//! Interactive console: a two-section document browser (configurations and
//! clusters) with a command input line, a suggestion palette, and modal
//! prompts for text entry and unsaved-change confirmation.

use anyhow::Result;

mod app;
mod commands;
mod input;
mod modal;
mod suggest;
mod view;
mod views;
mod wizard;

// Shared across the submodules via `super::...`.
use app::{App, Modal, ModalKind, Section, TextInputAction, fmt_ts_list, fmt_ts_ui, now_ts};
use commands::CommandDef;
use input::Input;
use view::{RenderCtx, render_view_chrome};

pub fn run() -> Result<()> {
    app::run()
}
