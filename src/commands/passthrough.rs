//! Commands whose tool output is already fit for humans: `diff`, `log`
//! and `tree`.
//!
//! These wrap an invocation for its ergonomics (shorter names, saner
//! defaults) and pass the output through untranslated.

use crate::commands::Command;
use crate::core::context::Context;
use crate::core::error::{ClearNavError, Result};
use crate::core::options::OptionSpec;
use crate::core::report::Reporter;
use crate::core::translate::{dispatch, Translation, Translator};

/// Every line reaches the user untouched.
pub struct PassThroughTranslator;

impl Translator for PassThroughTranslator {
    fn feed(&self, _line: &str) -> Translation {
        Translation::PassThrough
    }
}

/// `diff`: compare elements against their predecessor versions.
#[derive(Debug, Default)]
pub struct DiffCommand {
    pub graphical: bool,
    targets: Vec<String>,
}

impl DiffCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for DiffCommand {
    fn synopsis(&self) -> &'static str {
        "[-g] <element> ..."
    }

    fn help(&self) -> &'static str {
        "Show changes made to checked-out elements, relative to their\n\
         predecessor versions.\n\n\
         -g    Use the graphical diff tool."
    }

    fn option_specs(&self) -> &'static [OptionSpec] {
        &[OptionSpec {
            name: "graphical",
            aliases: &["g"],
            arity: 0,
        }]
    }

    fn apply_option(&mut self, name: &str, _args: &[String]) -> Result<()> {
        if name == "graphical" {
            self.graphical = true;
        }
        Ok(())
    }

    fn targets(&self) -> &[String] {
        &self.targets
    }

    fn set_targets(&mut self, targets: Vec<String>) {
        self.targets = targets;
    }

    fn execute(&mut self, ctx: &Context, reporter: &mut dyn Reporter) -> Result<()> {
        for target in self.specified_targets()?.as_args() {
            let mut args = vec!["diff".to_string()];
            if self.graphical {
                args.push("-graphical".to_string());
            }
            args.push("-predecessor".to_string());
            args.push(target);

            let outcome = ctx.tool.run(&args, |line| {
                dispatch(&PassThroughTranslator, line, reporter);
            });
            match outcome {
                // diff signals "files differ" through its exit status; the
                // differences themselves are already on screen.
                Err(ClearNavError::ToolFailed { .. }) => {}
                other => other?,
            }
        }
        Ok(())
    }
}

/// `log`: show element history.
#[derive(Debug, Default)]
pub struct LogCommand {
    pub recursive: bool,
    pub directory_only: bool,
    pub graphical: bool,
    targets: Vec<String>,
}

impl LogCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for LogCommand {
    fn synopsis(&self) -> &'static str {
        "[-r] [-d] [-g] [<element> ...]"
    }

    fn help(&self) -> &'static str {
        "List the history of the specified elements.\n\n\
         -r(ecurse)    Recursively list sub-directories.\n\
         -d(irectory)  List directories themselves, not their contents.\n\
         -g            Use the graphical history browser."
    }

    fn option_specs(&self) -> &'static [OptionSpec] {
        &[
            OptionSpec {
                name: "recurse",
                aliases: &["r"],
                arity: 0,
            },
            OptionSpec {
                name: "directory",
                aliases: &["d"],
                arity: 0,
            },
            OptionSpec {
                name: "graphical",
                aliases: &["g"],
                arity: 0,
            },
        ]
    }

    fn apply_option(&mut self, name: &str, _args: &[String]) -> Result<()> {
        match name {
            "recurse" => self.recursive = true,
            "directory" => self.directory_only = true,
            "graphical" => self.graphical = true,
            _ => {}
        }
        Ok(())
    }

    fn targets(&self) -> &[String] {
        &self.targets
    }

    fn set_targets(&mut self, targets: Vec<String>) {
        self.targets = targets;
    }

    fn execute(&mut self, ctx: &Context, reporter: &mut dyn Reporter) -> Result<()> {
        let mut args = vec!["lshistory".to_string()];
        if self.recursive {
            args.push("-recurse".to_string());
        }
        if self.directory_only {
            args.push("-directory".to_string());
        }
        if self.graphical {
            args.push("-graphical".to_string());
        }
        args.extend(self.effective_targets().as_args());

        ctx.tool.run(&args, |line| {
            dispatch(&PassThroughTranslator, line, reporter);
        })
    }
}

/// `tree`: browse an element's version tree.
#[derive(Debug, Default)]
pub struct VersionTreeCommand {
    pub graphical: bool,
    targets: Vec<String>,
}

impl VersionTreeCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for VersionTreeCommand {
    fn synopsis(&self) -> &'static str {
        "[-g] [<element> ...]"
    }

    fn help(&self) -> &'static str {
        "Display the version-tree of the specified elements.\n\n\
         -g    Use the graphical version-tree browser."
    }

    fn option_specs(&self) -> &'static [OptionSpec] {
        &[OptionSpec {
            name: "graphical",
            aliases: &["g"],
            arity: 0,
        }]
    }

    fn apply_option(&mut self, name: &str, _args: &[String]) -> Result<()> {
        if name == "graphical" {
            self.graphical = true;
        }
        Ok(())
    }

    fn targets(&self) -> &[String] {
        &self.targets
    }

    fn set_targets(&mut self, targets: Vec<String>) {
        self.targets = targets;
    }

    fn execute(&mut self, ctx: &Context, reporter: &mut dyn Reporter) -> Result<()> {
        let mut args = vec!["lsvtree".to_string()];
        if self.graphical {
            args.push("-graphical".to_string());
        }
        args.extend(self.effective_targets().as_args());

        ctx.tool.run(&args, |line| {
            dispatch(&PassThroughTranslator, line, reporter);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_line_passes_through() {
        for line in ["< old", "> new", "", "anything at all"] {
            assert_eq!(PassThroughTranslator.feed(line), Translation::PassThrough);
        }
    }

    #[test]
    fn test_diff_requires_targets() {
        let cmd = DiffCommand::new();
        assert!(cmd.specified_targets().is_err());
    }

    #[test]
    fn test_log_flags() -> Result<()> {
        let mut cmd = LogCommand::new();
        crate::commands::accept_args(&mut cmd, vec!["-r".into(), "-g".into()])?;
        assert!(cmd.recursive);
        assert!(cmd.graphical);
        assert!(!cmd.directory_only);
        Ok(())
    }

    #[test]
    fn test_tree_defaults_to_current_directory() {
        let cmd = VersionTreeCommand::new();
        assert_eq!(cmd.effective_targets().as_args(), ["."]);
    }
}
