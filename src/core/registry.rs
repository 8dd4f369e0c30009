//! The command registry.
//!
//! One static table maps every command name and alias to a constructor.
//! Lookup is exact-match over the table; the first listed name is the
//! canonical one used in usage output.

use crate::commands::{
    AddCommand, AutoCheckinCommand, AutoSyncCommand, AutoUncheckoutCommand, CheckinCommand,
    CheckoutCommand, Command, DiffCommand, HelpCommand, ListCommand, LogCommand, LscoCommand,
    MoveCommand, RemoveCommand, UncheckoutCommand, UpdateCommand, VersionTreeCommand,
};
use crate::core::error::{ClearNavError, Result};

/// One registry row: the command's names and how to build it.
pub struct CommandSpec {
    /// Canonical name first, then aliases
    pub names: &'static [&'static str],
    /// One-line summary for the global usage listing
    pub summary: &'static str,
    construct: fn() -> Box<dyn Command>,
}

impl CommandSpec {
    pub fn canonical_name(&self) -> &'static str {
        self.names[0]
    }

    pub fn build(&self) -> Box<dyn Command> {
        (self.construct)()
    }
}

pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        names: &["list", "ls", "status", "stat"],
        summary: "List element status",
        construct: || Box::new(ListCommand::new()),
    },
    CommandSpec {
        names: &["lsco"],
        summary: "List checkouts by ALL users",
        construct: || Box::new(LscoCommand::new()),
    },
    CommandSpec {
        names: &["diff"],
        summary: "Show changes relative to predecessor versions",
        construct: || Box::new(DiffCommand::new()),
    },
    CommandSpec {
        names: &["log", "history"],
        summary: "List element history",
        construct: || Box::new(LogCommand::new()),
    },
    CommandSpec {
        names: &["tree", "vtree"],
        summary: "Display element version-trees",
        construct: || Box::new(VersionTreeCommand::new()),
    },
    CommandSpec {
        names: &["update", "up"],
        summary: "Update the snapshot view",
        construct: || Box::new(UpdateCommand::new()),
    },
    CommandSpec {
        names: &["checkin", "ci", "commit"],
        summary: "Check-in elements",
        construct: || Box::new(CheckinCommand::new()),
    },
    CommandSpec {
        names: &["checkout", "co", "edit"],
        summary: "Check-out elements for editing",
        construct: || Box::new(CheckoutCommand::new()),
    },
    CommandSpec {
        names: &["uncheckout", "unco", "revert"],
        summary: "Undo checkouts",
        construct: || Box::new(UncheckoutCommand::new()),
    },
    CommandSpec {
        names: &["add"],
        summary: "Add elements to the repository",
        construct: || Box::new(AddCommand::new()),
    },
    CommandSpec {
        names: &["remove", "rm", "delete", "del"],
        summary: "Mark elements as deleted",
        construct: || Box::new(RemoveCommand::new()),
    },
    CommandSpec {
        names: &["move", "mv", "rename"],
        summary: "Move or rename an element",
        construct: || Box::new(MoveCommand::new()),
    },
    CommandSpec {
        names: &["auto-checkin", "auto-ci", "auto-commit"],
        summary: "Bulk check-in",
        construct: || Box::new(AutoCheckinCommand::new()),
    },
    CommandSpec {
        names: &["auto-uncheckout", "auto-unco", "auto-revert"],
        summary: "Bulk revert",
        construct: || Box::new(AutoUncheckoutCommand::new()),
    },
    CommandSpec {
        names: &["auto-sync", "auto-addrm"],
        summary: "Bulk add/remove",
        construct: || Box::new(AutoSyncCommand::new()),
    },
    CommandSpec {
        names: &["help"],
        summary: "Describe available commands",
        construct: || Box::new(HelpCommand::new()),
    },
];

/// Look up a command by any of its names.
pub fn find(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.names.contains(&name))
}

/// Build the command named on the command line.
pub fn make_command(name: Option<&str>) -> Result<Box<dyn Command>> {
    let name = name.ok_or(ClearNavError::NoCommandSpecified)?;
    let spec = find(name).ok_or_else(|| ClearNavError::unknown_command(name))?;
    Ok(spec.build())
}

/// The global usage listing: canonical names, aliases and summaries.
pub fn global_usage() -> String {
    let mut text = String::from("usage: clearnav [-t] [-d] <command> [<options>] [<targets>]\n\n");
    text.push_str("Commands (aliases in parentheses):\n");
    for spec in COMMANDS {
        let aliases = if spec.names.len() > 1 {
            format!(" ({})", spec.names[1..].join(", "))
        } else {
            String::new()
        };
        text.push_str(&format!(
            "  {:<16} {}{}\n",
            spec.canonical_name(),
            spec.summary,
            aliases
        ));
    }
    text.push_str("\nUse \"clearnav help <command>\" for details.\n");
    text
}
