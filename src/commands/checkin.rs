//! `checkin`: commit checked-out elements with a shared comment.
//!
//! The comment is collected once, into a temporary file, and handed to the
//! tool with `-cfile` so every element in the batch gets the same message.
//! Without `-m` the user's editor is opened on the comment file first.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::PathBuf;

use crate::commands::Command;
use crate::core::context::Context;
use crate::core::edit::edit_file;
use crate::core::error::Result;
use crate::core::options::OptionSpec;
use crate::core::output::print_info;
use crate::core::report::Reporter;
use crate::core::status::{Status, StatusEvent};
use crate::core::target::normalize_path;
use crate::core::translate::{Translation, Translator};

const COMMENT_FILE: &str = "clearnav-comment.tmp";

static CHECKED_IN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^Checked in "(.+)" version "(\S+)"\."#).unwrap());

/// Rules for `cleartool checkin` output.
pub struct CheckinTranslator;

impl Translator for CheckinTranslator {
    fn feed(&self, line: &str) -> Translation {
        if let Some(c) = CHECKED_IN.captures(line) {
            return Translation::event(StatusEvent::with_version(
                normalize_path(&c[1]),
                Status::Commit,
                &c[2],
            ));
        }
        if line.is_empty() || line.starts_with("Loading ") || line.starts_with("Making dir ") {
            return Translation::Suppress;
        }
        Translation::Unrecognized
    }
}

/// `checkin`: check in elements, prompting for a comment if none is given.
#[derive(Debug, Default)]
pub struct CheckinCommand {
    pub comment: Option<String>,
    targets: Vec<String>,
}

impl CheckinCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comment(comment: Option<String>) -> Self {
        Self {
            comment,
            ..Self::default()
        }
    }

    /// Write the comment file, invoking the editor when no `-m` comment
    /// was supplied.
    fn prepare_comment_file(&self, ctx: &Context) -> Result<PathBuf> {
        let path = ctx.cwd.join(COMMENT_FILE);
        match &self.comment {
            Some(comment) => fs::write(&path, comment)?,
            None => {
                fs::write(&path, "")?;
                edit_file(&path)?;
            }
        }
        Ok(path)
    }
}

impl Command for CheckinCommand {
    fn synopsis(&self) -> &'static str {
        "[-m <comment>] <element> ..."
    }

    fn help(&self) -> &'static str {
        "Check-in elements, prompting for a check-in comment.\n\n\
         -m <comment>    Use the specified check-in comment."
    }

    fn option_specs(&self) -> &'static [OptionSpec] {
        &[OptionSpec {
            name: "comment",
            aliases: &["m"],
            arity: 1,
        }]
    }

    fn apply_option(&mut self, name: &str, args: &[String]) -> Result<()> {
        if name == "comment" {
            self.comment = Some(args[0].clone());
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
        let targets = self.specified_targets()?;
        print_info(&format!("Checking-in: {targets}"));

        let comment_file = self.prepare_comment_file(ctx)?;
        let mut args = vec![
            "checkin".to_string(),
            "-cfile".to_string(),
            comment_file.display().to_string(),
        ];
        args.extend(targets.as_args());

        let outcome =
            crate::commands::run_mutating_translated(ctx, &args, &CheckinTranslator, reporter);
        let _ = fs::remove_file(&comment_file);
        outcome
    }
}
