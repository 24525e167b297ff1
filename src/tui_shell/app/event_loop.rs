use super::super::modal;
use super::*;

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal
            .draw(|frame| render::draw(frame, app))
            .context("draw frame")?;
        if app.quit {
            return Ok(());
        }
        if event::poll(Duration::from_millis(50)).context("poll events")? {
            match event::read().context("read event")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if app.modal.is_some() {
        modal::handle_modal_key(app, key);
        return;
    }
    if handle_input_edit_key(app, key) {
        return;
    }
    match key.code {
        KeyCode::Char('q') if app.input.buf.is_empty() => app.quit = true,
        KeyCode::Esc => {
            if app.input.buf.is_empty() {
                app.quit = true;
            } else {
                app.input.clear();
                app.suggestions.clear();
                app.suggestion_selected = 0;
            }
        }
        KeyCode::Tab => {
            if app.suggestions.is_empty() {
                app.section = app.section.toggle();
                app.recompute_suggestions();
            } else {
                app.apply_selected_suggestion();
            }
        }
        KeyCode::Enter => {
            if app.input.buf.is_empty() {
                app.toggle_expand_selected();
            } else {
                app.run_current_input();
            }
        }
        KeyCode::Up => {
            if !app.suggestions.is_empty() {
                app.move_suggestion(-1);
            } else if !app.input.buf.is_empty() {
                app.input.history_up();
            } else {
                app.move_selection(-1);
            }
        }
        KeyCode::Down => {
            if !app.suggestions.is_empty() {
                app.move_suggestion(1);
            } else if !app.input.buf.is_empty() {
                app.input.history_down();
            } else {
                app.move_selection(1);
            }
        }
        KeyCode::Right if app.input.buf.is_empty() => app.expand_selected(),
        KeyCode::Left if app.input.buf.is_empty() => app.collapse_selected(),
        KeyCode::Char(c) => {
            app.input.insert_char(c);
            app.recompute_suggestions();
        }
        _ => {}
    }
}

/// Editing keys for the main input line. Consumes the key when the input has
/// text, so tree navigation only sees keys typed on an empty line.
fn handle_input_edit_key(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.quit = true,
            KeyCode::Char('u') => {
                app.input.clear();
                app.recompute_suggestions();
            }
            _ => {}
        }
        return true;
    }
    if app.input.buf.is_empty() {
        return false;
    }
    match key.code {
        KeyCode::Backspace => {
            app.input.backspace();
            app.recompute_suggestions();
            true
        }
        KeyCode::Delete => {
            app.input.delete();
            app.recompute_suggestions();
            true
        }
        KeyCode::Left => {
            app.input.move_left();
            true
        }
        KeyCode::Right => {
            app.input.move_right();
            true
        }
        _ => false,
    }
}
