use super::*;

impl App {
    pub(super) fn cmd_refresh(&mut self) {
        if self.any_modified() {
            self.push_error("save or discard pending changes before refreshing".to_string());
            return;
        }
        self.refresh_documents();
    }

    pub(super) fn cmd_add(&mut self) {
        if self.active_current_dirty() {
            self.push_error("save or discard the current changes first".to_string());
            return;
        }
        let creator = self
            .identity
            .as_ref()
            .map(|who| who.user.clone())
            .unwrap_or_default();
        let result = match self.section {
            Section::Configurations => self.configurations.add_top_level(&creator),
            Section::Clusters => self.clusters.add_top_level(&creator),
        };
        match result {
            Ok(_) => {
                let label = self.section.record_label();
                let name = self.active_current_name().unwrap_or_default();
                self.rebuild_views();
                self.push_output(vec![format!("added {} '{}' (unsaved)", label, name)]);
            }
            Err(err) => self.push_error(format!("add: {:#}", err)),
        }
    }

    pub(super) fn cmd_add_org(&mut self) {
        match self.configurations.add_organisation() {
            Ok(path) => {
                if let Some(parent) = path.parent() {
                    self.cfg_view.set_expanded(&parent, true);
                }
                let name = path.segment(1).unwrap_or_default().to_string();
                self.rebuild_views();
                self.push_output(vec![format!("added organisation '{}' (unsaved)", name)]);
            }
            Err(err) => self.push_error(format!("add-org: {:#}", err)),
        }
    }

    pub(super) fn cmd_add_node(&mut self) {
        match self.configurations.add_elastic_node() {
            Ok(path) => {
                if let Some(parent) = path.parent() {
                    self.cfg_view.set_expanded(&parent, true);
                }
                let name = path.segment(2).unwrap_or_default().to_string();
                self.rebuild_views();
                self.push_output(vec![format!("added elastic node '{}' (unsaved)", name)]);
            }
            Err(err) => self.push_error(format!("add-node: {:#}", err)),
        }
    }

    pub(super) fn cmd_add_member(&mut self, args: &[String]) {
        if args.is_empty() {
            self.open_text_input_modal(
                "Add member organisation",
                "name> ",
                TextInputAction::MemberName,
                None,
                vec!["Name of the organisation to add to this cluster.".to_string()],
            );
            return;
        }
        let name = args.join(" ");
        match self.clusters.add_member(&name) {
            Ok(()) => {
                self.rebuild_views();
                self.push_output(vec![format!("added member '{}' (unsaved)", name.trim())]);
            }
            Err(err) => self.push_error(format!("add-member: {:#}", err)),
        }
    }

    pub(super) fn cmd_remove(&mut self, args: &[String]) {
        match self.section {
            Section::Configurations => {
                let removed = self
                    .active_selection()
                    .and_then(|p| p.segment(p.depth().saturating_sub(1)))
                    .unwrap_or_default()
                    .to_string();
                match self.configurations.delete_selected_child() {
                    Ok(_) => {
                        self.rebuild_views();
                        self.push_output(vec![format!("removed '{}' (unsaved)", removed)]);
                    }
                    Err(err) => self.push_error(format!("remove: {:#}", err)),
                }
            }
            Section::Clusters => {
                let name = args.join(" ");
                if name.trim().is_empty() {
                    self.push_error("usage: remove <member>".to_string());
                    return;
                }
                match self.clusters.remove_member(&name) {
                    Ok(()) => {
                        self.rebuild_views();
                        self.push_output(vec![format!(
                            "removed member '{}' (unsaved)",
                            name.trim()
                        )]);
                    }
                    Err(err) => self.push_error(format!("remove: {:#}", err)),
                }
            }
        }
    }

    pub(super) fn cmd_edit(&mut self, args: &[String]) {
        let Some(field) = args.first() else {
            self.push_error("usage: edit <field>".to_string());
            return;
        };
        let field = field.clone();
        let initial = self.current_field_value(&field);
        let prompt = format!("{}> ", field);
        self.open_text_input_modal(
            "Edit field",
            &prompt,
            TextInputAction::FieldEdit {
                field: field.clone(),
            },
            initial.as_deref(),
            vec![format!("New value for {}.", field)],
        );
    }

    pub(super) fn cmd_set(&mut self, args: &[String]) {
        let Some((field, rest)) = args.split_first() else {
            self.push_error("usage: set <field> <value>".to_string());
            return;
        };
        let field = field.clone();
        let value = rest.join(" ");
        self.apply_field_edit(&field, &value);
    }

    pub(super) fn apply_field_edit(&mut self, field: &str, value: &str) {
        let result = match self.section {
            Section::Configurations => self.configurations.edit_field(field, value),
            Section::Clusters => {
                let on_apis = self
                    .clusters
                    .selection()
                    .and_then(|p| p.segment(1))
                    .is_some_and(|seg| seg == GROUP_USER_APIS);
                if on_apis && field != "name" && field != "application" {
                    self.clusters.set_user_api(field, value)
                } else {
                    self.clusters.edit_field(field, value)
                }
            }
        };
        match result {
            Ok(()) => {
                self.rebuild_views();
                self.push_output(vec![format!("{} updated (unsaved)", field)]);
            }
            Err(err) => self.push_error(format!("edit: {:#}", err)),
        }
    }

    fn current_field_value(&self, field: &str) -> Option<String> {
        match self.section {
            Section::Configurations => {
                let path = self.configurations.selection()?;
                let doc = self.configurations.current_document()?;
                match path.depth() {
                    1 => (field == "name").then(|| doc.name.clone()),
                    2 => {
                        let org = doc.organisation(path.segment(1)?)?;
                        match field {
                            "organisationName" => Some(org.organisation_name.clone()),
                            "server" => Some(org.server.clone()),
                            "database" => Some(org.database.clone()),
                            "userId" => Some(org.user_id.clone()),
                            "password" => Some(org.password.clone()),
                            "elasticAlias" => Some(org.elastic_alias.clone()),
                            _ => None,
                        }
                    }
                    _ => (field == "name").then(|| path.segment(2).unwrap_or("").to_string()),
                }
            }
            Section::Clusters => {
                let doc = self.clusters.current_document()?;
                match field {
                    "name" => Some(doc.name.clone()),
                    "application" => Some(doc.application.clone()),
                    _ => doc.user_api(field).map(str::to_string),
                }
            }
        }
    }

    pub(super) fn cmd_save(&mut self) {
        match self.section {
            Section::Configurations => self.save_configurations(false),
            Section::Clusters => self.save_clusters(false),
        }
    }

    pub(super) fn cmd_discard(&mut self) {
        if !self.active_current_dirty() {
            self.push_error("no unsaved changes on the selected document".to_string());
            return;
        }
        match self.section {
            Section::Configurations => self.configurations.discard(),
            Section::Clusters => self.clusters.discard(),
        }
        self.rebuild_views();
        self.push_output(vec!["changes discarded".to_string()]);
    }

    pub(super) fn cmd_filter(&mut self, args: &[String]) {
        let text = args.join(" ").trim().to_string();
        if text.is_empty() {
            self.active_view_mut().filter = None;
            self.rebuild_views();
            self.push_output(vec!["filter cleared".to_string()]);
            return;
        }

        self.active_view_mut().filter = Some(text.clone());
        let needle = text.to_lowercase();
        let selected_visible = match self.section {
            Section::Configurations => self
                .configurations
                .selection()
                .and_then(|p| self.configurations.document(p.top_level()))
                .map(|d| d.name.to_lowercase().contains(&needle))
                .unwrap_or(true),
            Section::Clusters => self
                .clusters
                .selection()
                .and_then(|p| self.clusters.document(p.top_level()))
                .map(|d| d.name.to_lowercase().contains(&needle))
                .unwrap_or(true),
        };
        // Hiding the selected document counts as navigating away from it.
        if !selected_visible {
            self.request_select(None);
        }
        self.rebuild_views();
        self.push_output(vec![format!("filter: {}", text)]);
    }

    pub(in crate::tui_shell) fn guard_save(&mut self) {
        match self.section {
            Section::Configurations => self.save_configurations(true),
            Section::Clusters => self.save_clusters(true),
        }
    }

    pub(in crate::tui_shell) fn guard_discard(&mut self) {
        match self.section {
            Section::Configurations => self.configurations.discard(),
            Section::Clusters => self.clusters.discard(),
        }
        self.rebuild_views();
        self.push_output(vec!["changes discarded".to_string()]);
    }

    pub(in crate::tui_shell) fn guard_cancel(&mut self) {
        match self.section {
            Section::Configurations => self.configurations.cancel_navigation(),
            Section::Clusters => self.clusters.cancel_navigation(),
        }
        // Staying put with a filter that hides the dirty record would strand
        // it off screen, so the filter goes too.
        self.active_view_mut().filter = None;
        self.rebuild_views();
    }

    pub(in crate::tui_shell) fn submit_text_input(&mut self, action: TextInputAction, value: String) {
        match action {
            action @ (TextInputAction::LoginUrl | TextInputAction::LoginToken) => {
                self.continue_login_wizard(action, value);
            }
            TextInputAction::FieldEdit { field } => self.apply_field_edit(&field, &value),
            TextInputAction::MemberName => match self.clusters.add_member(&value) {
                Ok(()) => {
                    self.rebuild_views();
                    self.push_output(vec![format!("added member '{}' (unsaved)", value.trim())]);
                }
                Err(err) => self.push_error(format!("add-member: {:#}", err)),
            },
        }
    }

    fn save_configurations(&mut self, resolving_guard: bool) {
        let outcome = match self.configurations.save_prepare() {
            Ok(outcome) => outcome,
            Err(err) => {
                if resolving_guard {
                    self.configurations.cancel_navigation();
                }
                self.push_error(format!("save: {:#}", err));
                return;
            }
        };
        let plan = match outcome {
            SaveOutcome::Ready(plan) => plan,
            SaveOutcome::Blocked(findings) => {
                if resolving_guard {
                    self.configurations.cancel_navigation();
                }
                self.rebuild_views();
                self.push_error(validation_summary(&findings));
                return;
            }
        };
        let Some(client) = self.remote_client() else {
            if resolving_guard {
                self.configurations.cancel_navigation();
            }
            return;
        };
        let result = if plan.is_new {
            client.create_configuration(&plan.request)
        } else {
            client.update_configuration(&plan.request)
        };
        match result {
            Ok(canonical) => {
                let name = canonical.name.clone();
                self.configurations.save_commit(&plan, canonical);
                if resolving_guard {
                    if let Some(target) = self.configurations.take_pending() {
                        self.configurations.select(target);
                    }
                }
                self.rebuild_views();
                self.push_output(vec![format!("saved configuration '{}'", name)]);
            }
            Err(err) => {
                if resolving_guard {
                    self.configurations.cancel_navigation();
                }
                self.push_error(format!("save: {:#}", err));
            }
        }
    }

    fn save_clusters(&mut self, resolving_guard: bool) {
        let outcome = match self.clusters.save_prepare() {
            Ok(outcome) => outcome,
            Err(err) => {
                if resolving_guard {
                    self.clusters.cancel_navigation();
                }
                self.push_error(format!("save: {:#}", err));
                return;
            }
        };
        let plan = match outcome {
            SaveOutcome::Ready(plan) => plan,
            SaveOutcome::Blocked(findings) => {
                if resolving_guard {
                    self.clusters.cancel_navigation();
                }
                self.rebuild_views();
                self.push_error(validation_summary(&findings));
                return;
            }
        };
        let Some(client) = self.remote_client() else {
            if resolving_guard {
                self.clusters.cancel_navigation();
            }
            return;
        };
        let result = if plan.is_new {
            client.create_cluster(&plan.request)
        } else {
            client.update_cluster(&plan.request)
        };
        match result {
            Ok(canonical) => {
                let name = canonical.name.clone();
                self.clusters.save_commit(&plan, canonical);
                if resolving_guard {
                    if let Some(target) = self.clusters.take_pending() {
                        self.clusters.select(target);
                    }
                }
                self.rebuild_views();
                self.push_output(vec![format!("saved cluster '{}'", name)]);
            }
            Err(err) => {
                if resolving_guard {
                    self.clusters.cancel_navigation();
                }
                self.push_error(format!("save: {:#}", err));
            }
        }
    }
}

fn validation_summary(findings: &[crate::validate::ValidationError]) -> String {
    let count: usize = findings.iter().map(|f| f.errors.len()).sum();
    format!(
        "validation failed ({} problem{}); fix the flagged fields",
        count,
        if count == 1 { "" } else { "s" }
    )
}
