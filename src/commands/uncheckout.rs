//! `uncheckout`: cancel checkouts.
//!
//! The safe default keeps the working copy as a `.keep` file; `-r` discards
//! it outright. The tool reports the saved copy on its own line, which is
//! surfaced as a KEPT row so nothing vanishes silently.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::commands::Command;
use crate::core::context::Context;
use crate::core::error::Result;
use crate::core::options::OptionSpec;
use crate::core::report::Reporter;
use crate::core::status::{Status, StatusEvent};
use crate::core::target::normalize_path;
use crate::core::translate::{Translation, Translator};

static CANCELLED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^Checkout cancelled for "(.+)"\."#).unwrap());
static SAVED_COPY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^Private version of "(.+)" saved in "(.+)"\."#).unwrap());

/// Rules for `cleartool uncheckout` output.
pub struct UncheckoutTranslator;

impl Translator for UncheckoutTranslator {
    fn feed(&self, line: &str) -> Translation {
        if let Some(c) = CANCELLED.captures(line) {
            return Translation::event(StatusEvent::new(normalize_path(&c[1]), Status::Unco));
        }
        if let Some(c) = SAVED_COPY.captures(line) {
            return Translation::event(StatusEvent::new(normalize_path(&c[2]), Status::Kept));
        }
        // Reverting reloads the checked-in copy into the snapshot.
        if line.is_empty() || line.starts_with("Loading ") || line.starts_with("Making dir ") {
            return Translation::Suppress;
        }
        Translation::Unrecognized
    }
}

/// `uncheckout`: cancel checkouts, keeping the working copy by default.
#[derive(Debug, Default)]
pub struct UncheckoutCommand {
    pub discard: bool,
    targets: Vec<String>,
}

impl UncheckoutCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn discarding() -> Self {
        Self {
            discard: true,
            ..Self::default()
        }
    }
}

impl Command for UncheckoutCommand {
    fn synopsis(&self) -> &'static str {
        "[-r] <element> ..."
    }

    fn help(&self) -> &'static str {
        "Undo a checkout, reverting to the checked-in version.\n\n\
         -r    Discard the working copy instead of keeping it as a\n\
               \".keep\" file."
    }

    fn option_specs(&self) -> &'static [OptionSpec] {
        &[OptionSpec {
            name: "remove",
            aliases: &["r", "rm"],
            arity: 0,
        }]
    }

    fn apply_option(&mut self, name: &str, _args: &[String]) -> Result<()> {
        if name == "remove" {
            self.discard = true;
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
        let mut args = vec!["uncheckout".to_string()];
        args.push(if self.discard {
            "-rm".to_string()
        } else {
            "-keep".to_string()
        });
        args.extend(targets.as_args());

        crate::commands::run_mutating_translated(ctx, &args, &UncheckoutTranslator, reporter)
    }
}
