//! Directory-modifying commands: `add`, `remove` and `move`.
//!
//! Element namespaces live in directory versions, so each of these must
//! first check out the parent directories that are still locked. The
//! parents are discovered with an internal directory-only `list` and
//! unlocked with an internal `checkout`; both inner commands report
//! through the caller's reporter so the extra checkouts stay visible.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::commands::list::ListCommand;
use crate::commands::Command;
use crate::commands::CheckoutCommand;
use crate::core::context::Context;
use crate::core::error::{ClearNavError, Result};
use crate::core::report::{CollectingReporter, Reporter};
use crate::core::status::{Status, StatusEvent};
use crate::core::target::{normalize_path, TargetList};
use crate::core::translate::{Translation, Translator};

/// Find the targets' parent directories that are not yet checked out.
///
/// An up-to-date directory version is a locked one; a checked-out parent
/// needs no further action.
fn find_locked_parents(ctx: &Context, targets: &TargetList) -> Result<Vec<String>> {
    let parents = targets.parents();
    if parents.is_empty() {
        return Ok(Vec::new());
    }

    let mut probe = ListCommand::new();
    probe.include_all = true;
    probe.directory_only = true;
    probe.set_targets(parents.as_args());

    let mut collected = CollectingReporter::new();
    probe.execute(ctx, &mut collected)?;

    Ok(collected
        .into_events()
        .into_iter()
        .filter(|event| event.status == Status::Ok)
        .map(|event| event.path.display().to_string())
        .collect())
}

/// Check out any still-locked parent directories of the targets.
fn unlock_parents(
    ctx: &Context,
    targets: &TargetList,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    let locked = find_locked_parents(ctx, targets)?;
    if locked.is_empty() {
        return Ok(());
    }
    let mut checkout = CheckoutCommand::new();
    checkout.set_targets(locked);
    checkout.execute(ctx, reporter)
}

static MKELEM_CHECKOUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^Checked out "(.+)" from version "(\S+)"\."#).unwrap());

/// Rules for `cleartool mkelem` output. The interesting line is the implicit
/// checkout of the new element.
pub struct AddTranslator;

impl Translator for AddTranslator {
    fn feed(&self, line: &str) -> Translation {
        if let Some(c) = MKELEM_CHECKOUT.captures(line) {
            return Translation::event(StatusEvent::with_version(
                normalize_path(&c[1]),
                Status::Added,
                &c[2],
            ));
        }
        if line.starts_with("Created element ") || line.is_empty() {
            return Translation::Suppress;
        }
        Translation::Unrecognized
    }
}

/// `add`: put view-private files under version control.
#[derive(Debug, Default)]
pub struct AddCommand {
    targets: Vec<String>,
}

impl AddCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for AddCommand {
    fn synopsis(&self) -> &'static str {
        "<element> ..."
    }

    fn help(&self) -> &'static str {
        "Add elements to the repository.\n\
         (Parent directories are checked-out automatically as required.)"
    }

    fn targets(&self) -> &[String] {
        &self.targets
    }

    fn set_targets(&mut self, targets: Vec<String>) {
        self.targets = targets;
    }

    fn execute(&mut self, ctx: &Context, reporter: &mut dyn Reporter) -> Result<()> {
        let targets = self.specified_targets()?;
        unlock_parents(ctx, &targets, reporter)?;

        let mut args = vec!["mkelem".to_string(), "-ncomment".to_string()];
        args.extend(targets.as_args());
        crate::commands::run_mutating_translated(ctx, &args, &AddTranslator, reporter)
    }
}

static RMNAME_REMOVED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^Removed "(.+)"\."#).unwrap());

/// Rules for `cleartool rmname` output.
pub struct RemoveTranslator;

impl Translator for RemoveTranslator {
    fn feed(&self, line: &str) -> Translation {
        if let Some(c) = RMNAME_REMOVED.captures(line) {
            return Translation::event(StatusEvent::new(normalize_path(&c[1]), Status::Removed));
        }
        // The view unloads the entry once the name is gone.
        if line.is_empty() || line.starts_with("Unloaded ") {
            return Translation::Suppress;
        }
        Translation::Unrecognized
    }
}

/// `remove`: remove elements from their parent directories.
#[derive(Debug, Default)]
pub struct RemoveCommand {
    targets: Vec<String>,
}

impl RemoveCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for RemoveCommand {
    fn synopsis(&self) -> &'static str {
        "<element> ..."
    }

    fn help(&self) -> &'static str {
        "Mark elements as deleted.\n\
         (Parent directories are checked-out automatically as required.)\n\n\
         The element history is retained; only the directory entry goes."
    }

    fn targets(&self) -> &[String] {
        &self.targets
    }

    fn set_targets(&mut self, targets: Vec<String>) {
        self.targets = targets;
    }

    fn execute(&mut self, ctx: &Context, reporter: &mut dyn Reporter) -> Result<()> {
        let targets = self.specified_targets()?;
        unlock_parents(ctx, &targets, reporter)?;

        let mut args = vec!["rmname".to_string(), "-ncomment".to_string()];
        args.extend(targets.as_args());
        crate::commands::run_mutating_translated(ctx, &args, &RemoveTranslator, reporter)
    }
}

static MOVED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^Moved "(.+)" to "(.+)"\."#).unwrap());

/// Rules for `cleartool move` output. One line becomes two events: the old
/// name goes away and the new one appears.
pub struct MoveTranslator;

impl Translator for MoveTranslator {
    fn feed(&self, line: &str) -> Translation {
        if let Some(c) = MOVED.captures(line) {
            return Translation::Events(vec![
                StatusEvent::new(normalize_path(&c[1]), Status::Removed),
                StatusEvent::new(normalize_path(&c[2]), Status::Added),
            ]);
        }
        if line.is_empty() {
            return Translation::Suppress;
        }
        Translation::Unrecognized
    }
}

/// `move`: rename an element.
#[derive(Debug, Default)]
pub struct MoveCommand {
    targets: Vec<String>,
}

impl MoveCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for MoveCommand {
    fn synopsis(&self) -> &'static str {
        "<from> <to>"
    }

    fn help(&self) -> &'static str {
        "Move or rename an element.\n\
         (Parent directories are checked-out automatically as required.)"
    }

    fn targets(&self) -> &[String] {
        &self.targets
    }

    fn set_targets(&mut self, targets: Vec<String>) {
        self.targets = targets;
    }

    fn execute(&mut self, ctx: &Context, reporter: &mut dyn Reporter) -> Result<()> {
        let targets = self.specified_targets()?;
        if targets.len() != 2 {
            return Err(ClearNavError::wrong_argument_count(2, targets.len()));
        }
        // Both the source and destination parent need to be writable.
        unlock_parents(ctx, &targets, reporter)?;

        let mut args = vec!["move".to_string(), "-ncomment".to_string()];
        args.extend(targets.as_args());
        crate::commands::run_mutating_translated(ctx, &args, &MoveTranslator, reporter)
    }
}
