use anyhow::Result;

/// Entry point for the interactive console.
pub fn run() -> Result<()> {
    crate::tui_shell::run()
}
