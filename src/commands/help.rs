//! `help`: describe available commands.

use crate::commands::Command;
use crate::core::context::Context;
use crate::core::error::{ClearNavError, Result};
use crate::core::registry;
use crate::core::report::Reporter;

/// `help`: global usage, or detailed help for named commands.
#[derive(Debug, Default)]
pub struct HelpCommand {
    targets: Vec<String>,
}

impl HelpCommand {
    pub fn new() -> Self {
        Self::default()
    }

    fn describe(name: &str) -> Result<String> {
        let spec = registry::find(name).ok_or_else(|| ClearNavError::unknown_command(name))?;
        let command = spec.build();
        let mut text = format!("% clearnav {} {}\n", spec.canonical_name(), command.synopsis());
        for line in command.help().lines() {
            text.push_str(&format!("    {line}\n"));
        }
        if spec.names.len() > 1 {
            text.push_str(&format!("    (aliases: {})\n", spec.names[1..].join(", ")));
        }
        Ok(text)
    }
}

impl Command for HelpCommand {
    fn synopsis(&self) -> &'static str {
        "[<command> ...]"
    }

    fn help(&self) -> &'static str {
        "Display usage information, or detailed help for the named\n\
         commands."
    }

    fn targets(&self) -> &[String] {
        &self.targets
    }

    fn set_targets(&mut self, targets: Vec<String>) {
        self.targets = targets;
    }

    fn execute(&mut self, _ctx: &Context, _reporter: &mut dyn Reporter) -> Result<()> {
        if self.targets.is_empty() {
            print!("{}", registry::global_usage());
            return Ok(());
        }
        for name in &self.targets {
            print!("{}", Self::describe(name)?);
        }
        Ok(())
    }
}
