use super::*;

impl App {
    /// The palette opens while the input starts with `/`. With no needle the
    /// full list shows, hinted commands first; otherwise matches are scored.
    pub(super) fn recompute_suggestions(&mut self) {
        self.suggestions.clear();
        self.suggestion_selected = 0;
        let buf = self.input.buf.clone();
        let Some(rest) = buf.strip_prefix('/') else {
            return;
        };
        let needle = rest.split_whitespace().next().unwrap_or("").to_lowercase();

        let mut scored: Vec<(i64, CommandDef)> = Vec::new();
        for def in self.available_command_defs() {
            if needle.is_empty() {
                scored.push((0, def));
                continue;
            }
            let mut best = score_match(def.name, &needle);
            for alias in def.aliases {
                if let Some(score) = score_match(alias, &needle) {
                    best = Some(best.map_or(score, |b| b.max(score)));
                }
            }
            if let Some(score) = best {
                scored.push((score, def));
            }
        }

        let hinted = if needle.is_empty() {
            self.primary_hint_commands()
        } else {
            Vec::new()
        };
        sort_scored_suggestions(&mut scored, &hinted);
        self.suggestions = scored.into_iter().map(|(_, def)| def).collect();
    }

    /// Replace the first token with the highlighted suggestion, keeping any
    /// arguments already typed.
    pub(super) fn apply_selected_suggestion(&mut self) {
        let Some(def) = self.suggestions.get(self.suggestion_selected) else {
            return;
        };
        let name = def.name;
        let takes_args = def.usage.contains('<') || def.usage.contains('[');

        let buf = self.input.buf.clone();
        let rest = buf.strip_prefix('/').unwrap_or(&buf);
        let mut parts = rest.split_whitespace();
        let _first = parts.next();
        let tail: Vec<&str> = parts.collect();

        let mut line = name.to_string();
        if !tail.is_empty() {
            line.push(' ');
            line.push_str(&tail.join(" "));
        } else if takes_args {
            line.push(' ');
        }
        self.input.set(&line);
        self.suggestions.clear();
        self.suggestion_selected = 0;
    }

    pub(super) fn move_suggestion(&mut self, delta: i32) {
        if self.suggestions.is_empty() {
            return;
        }
        let len = self.suggestions.len() as i32;
        let next = (self.suggestion_selected as i32 + delta).rem_euclid(len);
        self.suggestion_selected = next as usize;
    }

    pub(super) fn run_current_input(&mut self) {
        let raw = self.input.buf.trim().to_string();
        if raw.is_empty() {
            return;
        }
        self.input.push_history(&raw);
        self.input.clear();
        self.suggestions.clear();
        self.suggestion_selected = 0;
        self.push_command(&raw);

        let line = raw.strip_prefix('/').unwrap_or(&raw).to_string();
        let tokens = match tokenize(&line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.push_error(format!("parse: {:#}", err));
                return;
            }
        };
        let Some((first, args)) = tokens.split_first() else {
            return;
        };
        let first_lc = first.to_lowercase();

        let defs = self.available_command_defs();
        let mut resolved: Option<&'static str> = None;
        for def in &defs {
            if def.name == first_lc || def.aliases.contains(&first_lc.as_str()) {
                resolved = Some(def.name);
                break;
            }
        }
        if resolved.is_none() {
            let prefixed: Vec<&CommandDef> =
                defs.iter().filter(|d| d.name.starts_with(&first_lc)).collect();
            match prefixed.len() {
                1 => resolved = Some(prefixed[0].name),
                n if n > 1 => {
                    let names: Vec<&str> = prefixed.iter().map(|d| d.name).collect();
                    self.push_error(format!(
                        "ambiguous command '{}' ({})",
                        first,
                        names.join(", ")
                    ));
                    return;
                }
                _ => {}
            }
        }
        let Some(name) = resolved else {
            let all = commands::section_command_defs(self.section);
            let known = all
                .iter()
                .find(|d| d.name == first_lc || d.aliases.contains(&first_lc.as_str()));
            match known {
                Some(def) => {
                    self.push_error(format!("'{}' is not available right now", def.name))
                }
                None => self.push_error(format!("unknown command '{}' (try `help`)", first)),
            }
            return;
        };

        if name == "help" {
            self.cmd_help(&defs, args);
            return;
        }
        self.dispatch_root(name, args);
    }

    fn dispatch_root(&mut self, name: &str, args: &[String]) {
        match name {
            "refresh" => self.cmd_refresh(),
            "add" => self.cmd_add(),
            "add-org" => self.cmd_add_org(),
            "add-node" => self.cmd_add_node(),
            "add-member" => self.cmd_add_member(args),
            "remove" => self.cmd_remove(args),
            "edit" => self.cmd_edit(args),
            "set" => self.cmd_set(args),
            "save" => self.cmd_save(),
            "discard" => self.cmd_discard(),
            "filter" => self.cmd_filter(args),
            "login" => self.start_login_wizard(),
            "logout" => self.cmd_logout(),
            "whoami" => self.cmd_whoami(),
            "clear" => self.cmd_clear(),
            "quit" => self.quit = true,
            other => self.push_error(format!("unknown command '{}'", other)),
        }
    }

    fn cmd_help(&mut self, defs: &[CommandDef], args: &[String]) {
        if let Some(topic) = args.first() {
            let topic_lc = topic.to_lowercase();
            let found = defs
                .iter()
                .find(|d| d.name == topic_lc || d.aliases.contains(&topic_lc.as_str()));
            match found {
                Some(def) => self.push_output(vec![format!("{}  -  {}", def.usage, def.help)]),
                None => self.push_error(format!("no such command '{}'", topic)),
            }
            return;
        }

        let mut lines = vec![
            format!("Commands in the {} section:", self.section.title().to_lowercase()),
            String::new(),
        ];
        for def in defs {
            lines.push(format!("{:<24} {}", def.usage, def.help));
        }
        lines.push(String::new());
        lines.push("Start with / to see suggestions while typing.".to_string());
        lines.push("Tab switches section; Enter expands the selected row.".to_string());
        self.open_modal("Help", lines);
    }

    pub(super) fn cmd_clear(&mut self) {
        self.log.clear();
    }
}

/// Split a command line into tokens. Quotes group words; backslash escapes
/// the next character inside or outside quotes.
pub(super) fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut has_current = false;
    let mut in_quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match in_quote {
            Some(quote) => {
                if c == quote {
                    in_quote = None;
                } else if c == '\\' {
                    let Some(next) = chars.next() else {
                        anyhow::bail!("dangling escape");
                    };
                    current.push(next);
                } else {
                    current.push(c);
                }
            }
            None => match c {
                '"' | '\'' => {
                    in_quote = Some(c);
                    has_current = true;
                }
                '\\' => {
                    let Some(next) = chars.next() else {
                        anyhow::bail!("dangling escape");
                    };
                    current.push(next);
                    has_current = true;
                }
                c if c.is_whitespace() => {
                    if has_current {
                        tokens.push(std::mem::take(&mut current));
                        has_current = false;
                    }
                }
                c => {
                    current.push(c);
                    has_current = true;
                }
            },
        }
    }

    if in_quote.is_some() {
        anyhow::bail!("unterminated quote");
    }
    if has_current {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
#[path = "../../tests/tui_shell/dispatch_tests.rs"]
mod tests;
