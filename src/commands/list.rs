//! Element listing: `list` (per-element status) and `lsco` (checkouts by
//! all users).
//!
//! The list translator is the workhorse of the whole tool: the auto
//! commands and the directory-unlock step all run a `list` internally and
//! filter its events.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::commands::Command;
use crate::core::context::Context;
use crate::core::error::Result;
use crate::core::ignore::IgnoreMatcher;
use crate::core::options::OptionSpec;
use crate::core::report::Reporter;
use crate::core::status::{Status, StatusEvent};
use crate::core::target::normalize_path;
use crate::core::translate::{dispatch, Translation, Translator};

static HIJACKED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+)@@(\S+) \[hijacked").unwrap());
static LOADED_MISSING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+)@@(\S+) \[loaded but missing\]").unwrap());
static CHECKED_OUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+)@@\S*[\\/]CHECKEDOUT(?: from (\S+))?").unwrap());
static UP_TO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+)@@(\S+) +Rule: ").unwrap());

/// Rules for `cleartool ls` output.
pub struct ListTranslator<'a> {
    pub include_all: bool,
    pub ignores: &'a IgnoreMatcher,
}

impl Translator for ListTranslator<'_> {
    fn feed(&self, line: &str) -> Translation {
        if let Some(c) = HIJACKED.captures(line) {
            return Translation::event(StatusEvent::with_version(
                normalize_path(&c[1]),
                Status::Hijacked,
                &c[2],
            ));
        }
        if let Some(c) = LOADED_MISSING.captures(line) {
            return Translation::event(StatusEvent::with_version(
                normalize_path(&c[1]),
                Status::Missing,
                &c[2],
            ));
        }
        if let Some(c) = CHECKED_OUT.captures(line) {
            let path = normalize_path(&c[1]);
            // The tool reports the checkout whether or not the file is
            // still on disk; re-check against the filesystem rather than
            // trusting the claim.
            let status = if path.exists() {
                Status::CheckedOut
            } else {
                Status::Missing
            };
            let version = c.get(2).map_or("new", |m| m.as_str());
            return Translation::event(StatusEvent::with_version(path, status, version));
        }
        if let Some(c) = UP_TO_DATE.captures(line) {
            // Up-to-date elements are noise unless -a was given.
            if self.include_all {
                return Translation::event(StatusEvent::with_version(
                    normalize_path(&c[1]),
                    Status::Ok,
                    &c[2],
                ));
            }
            return Translation::Suppress;
        }
        if line.trim().is_empty() {
            return Translation::Suppress;
        }
        let path = normalize_path(line);
        if self.ignores.is_ignored(&path) {
            log::debug!("ignoring {}", path.display());
            return Translation::Suppress;
        }
        Translation::event(StatusEvent::new(path, Status::Local))
    }
}

/// `list`: report the status of elements.
#[derive(Debug, Default)]
pub struct ListCommand {
    pub include_all: bool,
    pub recursive: bool,
    pub directory_only: bool,
    targets: Vec<String>,
}

impl ListCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for ListCommand {
    fn synopsis(&self) -> &'static str {
        "[-a] [-r] [-d] [<element> ...]"
    }

    fn help(&self) -> &'static str {
        "List element status.\n\n\
         -a(ll)        Show all files.\n\
         \u{20}             (by default, up-to-date files are not reported)\n\
         -r(ecurse)    Recursively list sub-directories.\n\
         \u{20}             (by default, just lists current directory)\n\
         -d(irectory)  List directories themselves, not their contents."
    }

    fn option_specs(&self) -> &'static [OptionSpec] {
        &[
            OptionSpec {
                name: "all",
                aliases: &["a"],
                arity: 0,
            },
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
        ]
    }

    fn apply_option(&mut self, name: &str, _args: &[String]) -> Result<()> {
        match name {
            "all" => self.include_all = true,
            "recurse" => self.recursive = true,
            "directory" => self.directory_only = true,
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
        let mut args = vec!["ls".to_string()];
        if self.recursive {
            args.push("-recurse".to_string());
        }
        if self.directory_only {
            args.push("-directory".to_string());
        }
        args.extend(self.effective_targets().as_args());

        let translator = ListTranslator {
            include_all: self.include_all,
            ignores: &ctx.ignores,
        };
        ctx.tool.run(&args, |line| {
            dispatch(&translator, line, reporter);
        })
    }
}

static USER_CHECKOUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^.*\s\S+\s+checkout.*version "(\S+)" from (\S+)"#).unwrap());
static ALREADY_CHECKED_OUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^Element "(.+)" is already checked out"#).unwrap());

/// Rules for `cleartool lsco` output.
pub struct LscoTranslator;

impl Translator for LscoTranslator {
    fn feed(&self, line: &str) -> Translation {
        if let Some(c) = USER_CHECKOUT.captures(line) {
            return Translation::event(StatusEvent::with_version(
                normalize_path(&c[1]),
                Status::CheckedOut,
                &c[2],
            ));
        }
        if let Some(c) = ALREADY_CHECKED_OUT.captures(line) {
            return Translation::event(StatusEvent::with_version(
                normalize_path(&c[1]),
                Status::CheckedOut,
                "already",
            ));
        }
        if line.starts_with("Added ") || line.starts_with("  ") {
            return Translation::Suppress;
        }
        Translation::Unrecognized
    }
}

/// `lsco`: list checkouts by all users.
#[derive(Debug, Default)]
pub struct LscoCommand {
    pub recursive: bool,
    pub directory_only: bool,
    targets: Vec<String>,
}

impl LscoCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for LscoCommand {
    fn synopsis(&self) -> &'static str {
        "[-r] [-d] [<element> ...]"
    }

    fn help(&self) -> &'static str {
        "List checkouts by ALL users."
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
        ]
    }

    fn apply_option(&mut self, name: &str, _args: &[String]) -> Result<()> {
        match name {
            "recurse" => self.recursive = true,
            "directory" => self.directory_only = true,
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
        let mut args = vec!["lsco".to_string()];
        if self.recursive {
            args.push("-recurse".to_string());
        }
        if self.directory_only {
            args.push("-directory".to_string());
        }
        args.extend(self.effective_targets().as_args());

        ctx.tool.run(&args, |line| {
            dispatch(&LscoTranslator, line, reporter);
        })
    }
}
