use super::*;

impl App {
    /// The commands that make sense right now. Typed commands resolve against
    /// this list too, so hidden commands are also unrunnable.
    pub(super) fn available_command_defs(&self) -> Vec<CommandDef> {
        let mut defs = commands::section_command_defs(self.section);

        if self.store.is_none() || !self.logged_in() {
            defs.retain(|d| matches!(d.name, "login" | "help" | "quit" | "clear"));
            defs.sort_by(|a, b| a.name.cmp(b.name));
            return defs;
        }

        if !self.admin() {
            defs.retain(|d| {
                !matches!(
                    d.name,
                    "add" | "add-org" | "add-node" | "add-member" | "remove" | "edit" | "set"
                        | "save"
                        | "discard"
                )
            });
        }

        // Refreshing would clobber unsaved work in either section.
        if self.any_modified() {
            defs.retain(|d| d.name != "refresh");
        }

        let depth = self.active_selection_depth();
        if depth == 0 {
            defs.retain(|d| {
                !matches!(
                    d.name,
                    "add-org" | "add-node" | "add-member" | "remove" | "edit" | "set" | "save"
                        | "discard"
                )
            });
        } else if self.section == Section::Configurations && depth < 2 {
            defs.retain(|d| d.name != "add-node" && d.name != "remove");
        }

        if !self.active_current_dirty() {
            // A clean record has nothing to save or throw away.
            defs.retain(|d| d.name != "discard" && d.name != "save");
        } else {
            // Settle the open record before starting another one.
            defs.retain(|d| d.name != "add");
        }

        defs.sort_by(|a, b| a.name.cmp(b.name));
        defs
    }

    /// Commands surfaced at the top of the empty-needle palette.
    pub(super) fn primary_hint_commands(&self) -> Vec<String> {
        if !self.logged_in() {
            return vec!["login".to_string(), "help".to_string()];
        }
        if self.active_current_dirty() {
            return vec!["save".to_string(), "discard".to_string()];
        }
        vec!["refresh".to_string(), "add".to_string()]
    }
}
