use super::Section;

/// Static description of a console command. `usage` is the one-line form shown
/// in help and suggestion hints.
#[derive(Clone, Copy, Debug)]
pub(in crate::tui_shell) struct CommandDef {
    pub(in crate::tui_shell) name: &'static str,
    pub(in crate::tui_shell) aliases: &'static [&'static str],
    pub(in crate::tui_shell) usage: &'static str,
    pub(in crate::tui_shell) help: &'static str,
}

/// Every command the active section understands, before availability
/// filtering. Section-specific entries replace their generic wording.
pub(in crate::tui_shell) fn section_command_defs(section: Section) -> Vec<CommandDef> {
    let mut defs = vec![
        CommandDef {
            name: "refresh",
            aliases: &["r"],
            usage: "refresh",
            help: "reload documents from the service",
        },
        CommandDef {
            name: "filter",
            aliases: &[],
            usage: "filter [text]",
            help: "filter top-level rows by name (empty clears)",
        },
        CommandDef {
            name: "edit",
            aliases: &["e"],
            usage: "edit <field>",
            help: "edit a field of the selected row in a prompt",
        },
        CommandDef {
            name: "save",
            aliases: &["s"],
            usage: "save",
            help: "validate and save the selected document",
        },
        CommandDef {
            name: "discard",
            aliases: &["d"],
            usage: "discard",
            help: "throw away unsaved changes to the selected document",
        },
        CommandDef {
            name: "login",
            aliases: &[],
            usage: "login",
            help: "connect to a configuration service",
        },
        CommandDef {
            name: "logout",
            aliases: &[],
            usage: "logout",
            help: "forget the stored token for this service",
        },
        CommandDef {
            name: "whoami",
            aliases: &["id"],
            usage: "whoami",
            help: "show the authenticated user",
        },
        CommandDef {
            name: "clear",
            aliases: &[],
            usage: "clear",
            help: "clear the last command output",
        },
        CommandDef {
            name: "help",
            aliases: &["h", "?"],
            usage: "help [command]",
            help: "show commands",
        },
        CommandDef {
            name: "quit",
            aliases: &["q", "exit"],
            usage: "quit",
            help: "exit the console",
        },
    ];

    match section {
        Section::Configurations => {
            defs.push(CommandDef {
                name: "add",
                aliases: &["a"],
                usage: "add",
                help: "create a new configuration",
            });
            defs.push(CommandDef {
                name: "add-org",
                aliases: &[],
                usage: "add-org",
                help: "add an organisation to the selected configuration",
            });
            defs.push(CommandDef {
                name: "add-node",
                aliases: &[],
                usage: "add-node",
                help: "add an elastic node to the selected organisation",
            });
            defs.push(CommandDef {
                name: "remove",
                aliases: &["rm"],
                usage: "remove",
                help: "remove the selected organisation or elastic node",
            });
            defs.push(CommandDef {
                name: "set",
                aliases: &[],
                usage: "set <field> <value>",
                help: "set a field of the selected row inline",
            });
        }
        Section::Clusters => {
            defs.push(CommandDef {
                name: "add",
                aliases: &["a"],
                usage: "add",
                help: "create a new cluster",
            });
            defs.push(CommandDef {
                name: "add-member",
                aliases: &[],
                usage: "add-member [name]",
                help: "add a member organisation to the selected cluster",
            });
            defs.push(CommandDef {
                name: "remove",
                aliases: &["rm"],
                usage: "remove <member>",
                help: "remove a member organisation from the selected cluster",
            });
            defs.push(CommandDef {
                name: "set",
                aliases: &[],
                usage: "set <field|api> <value>",
                help: "set a field or a user API URL on the selected cluster",
            });
        }
    }

    defs
}
