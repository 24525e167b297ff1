use super::*;

impl App {
    pub(super) fn load() -> App {
        let mut app = App::default();
        app.push_output(vec![
            "Type `help` for commands, or `/` to list them while typing.".to_string(),
        ]);
        match ConsoleStore::open_default() {
            Ok(store) => app.store = Some(store),
            Err(err) => {
                let message = format!("settings: {:#}", err);
                app.store_err = Some(message.clone());
                app.push_error(message);
            }
        }
        app.try_restore_session();
        if !app.logged_in() {
            app.push_output(vec![
                "Not connected. Run `login` to reach a configuration service.".to_string(),
            ]);
        }
        app.rebuild_views();
        app
    }
}
