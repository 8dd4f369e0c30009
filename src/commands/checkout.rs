//! `checkout`: make elements editable.
//!
//! Checkouts are always unreserved and uncommented; the interesting
//! decision is `-h`, which turns an existing hijack into a proper checkout
//! instead of clobbering the local edits.

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

static CHECKED_OUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^Checked out "(.+)" from version "(\S+)"\."#).unwrap());
static ALREADY_CHECKED_OUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^Element "(.+)" is already checked out"#).unwrap());

/// Rules for `cleartool checkout` output.
pub struct CheckoutTranslator;

impl Translator for CheckoutTranslator {
    fn feed(&self, line: &str) -> Translation {
        if let Some(c) = CHECKED_OUT.captures(line) {
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
        if line.is_empty() {
            return Translation::Suppress;
        }
        Translation::Unrecognized
    }
}

/// `checkout`: check out (unreserved) elements for editing.
#[derive(Debug, Default)]
pub struct CheckoutCommand {
    pub keep_hijack: bool,
    targets: Vec<String>,
}

impl CheckoutCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hijacked() -> Self {
        Self {
            keep_hijack: true,
            ..Self::default()
        }
    }
}

impl Command for CheckoutCommand {
    fn synopsis(&self) -> &'static str {
        "[-h] <element> ..."
    }

    fn help(&self) -> &'static str {
        "Check-out elements (unreserved). This is required before content\n\
         can be modified.\n\n\
         -h    Keep the local (hijacked) file contents."
    }

    fn option_specs(&self) -> &'static [OptionSpec] {
        &[OptionSpec {
            name: "hijack",
            aliases: &["h"],
            arity: 0,
        }]
    }

    fn apply_option(&mut self, name: &str, _args: &[String]) -> Result<()> {
        if name == "hijack" {
            self.keep_hijack = true;
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
        let mut args = vec![
            "checkout".to_string(),
            "-unreserved".to_string(),
            "-ncomment".to_string(),
        ];
        if self.keep_hijack {
            args.push("-usehijack".to_string());
        } else {
            args.push("-nquery".to_string());
        }
        args.extend(targets.as_args());

        crate::commands::run_mutating_translated(ctx, &args, &CheckoutTranslator, reporter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_out_line() {
        assert_eq!(
            CheckoutTranslator.feed(r#"Checked out "lib/util.c" from version "/main/4"."#),
            Translation::event(StatusEvent::with_version(
                "lib/util.c",
                Status::CheckedOut,
                "/main/4"
            ))
        );
    }

    #[test]
    fn test_checked_out_path_is_normalised() {
        assert_eq!(
            CheckoutTranslator.feed(r#"Checked out "lib\util.c" from version "/main/4"."#),
            Translation::event(StatusEvent::with_version(
                "lib/util.c",
                Status::CheckedOut,
                "/main/4"
            ))
        );
    }

    #[test]
    fn test_already_checked_out_line() {
        assert_eq!(
            CheckoutTranslator
                .feed(r#"Element "lib/util.c" is already checked out to view "dev"."#),
            Translation::event(StatusEvent::with_version(
                "lib/util.c",
                Status::CheckedOut,
                "already"
            ))
        );
    }

    #[test]
    fn test_unknown_checkout_line_is_unrecognised() {
        assert_eq!(
            CheckoutTranslator.feed("cleartool: Warning: something"),
            Translation::Unrecognized
        );
    }

    #[test]
    fn test_hijack_flag() -> Result<()> {
        let mut cmd = CheckoutCommand::new();
        crate::commands::accept_args(&mut cmd, vec!["-h".into(), "a.c".into()])?;
        assert!(cmd.keep_hijack);
        Ok(())
    }

    #[test]
    fn test_checkout_requires_targets() {
        let cmd = CheckoutCommand::new();
        assert!(cmd.specified_targets().is_err());
    }
}
