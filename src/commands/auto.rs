//! Bulk composition commands: `auto-checkin`, `auto-uncheckout` and
//! `auto-sync`.
//!
//! Each one runs an internal recursive `list`, collects its events rather
//! than printing them, filters for the statuses it cares about, and then
//! drives a fresh primitive command over the selected paths. The primitive
//! reports through the caller's reporter, so the user sees the real work
//! and not the survey.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;

use crate::commands::checkin::CheckinCommand;
use crate::commands::checkout::CheckoutCommand;
use crate::commands::dirmod::{AddCommand, RemoveCommand};
use crate::commands::list::ListCommand;
use crate::commands::uncheckout::UncheckoutCommand;
use crate::commands::Command;
use crate::core::context::Context;
use crate::core::edit::edit_file;
use crate::core::error::Result;
use crate::core::options::OptionSpec;
use crate::core::output::print_info;
use crate::core::report::{CollectingReporter, Reporter};
use crate::core::status::{Status, StatusEvent};

/// Run a recursive status survey over `targets` and return the events.
fn survey(ctx: &Context, targets: &[String]) -> Result<Vec<StatusEvent>> {
    let mut list = ListCommand::new();
    list.recursive = true;
    list.set_targets(targets.to_vec());

    let mut collected = CollectingReporter::new();
    list.execute(ctx, &mut collected)?;
    Ok(collected.into_events())
}

fn paths_with_status(events: &[StatusEvent], status: Status) -> Vec<String> {
    events
        .iter()
        .filter(|event| event.status == status)
        .map(|event| event.path.display().to_string())
        .collect()
}

/// `auto-checkin`: find all checkouts under the targets and check them in
/// with a single shared comment.
#[derive(Debug, Default)]
pub struct AutoCheckinCommand {
    pub comment: Option<String>,
    targets: Vec<String>,
}

impl AutoCheckinCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for AutoCheckinCommand {
    fn synopsis(&self) -> &'static str {
        "[-m <comment>] [<element> ...]"
    }

    fn help(&self) -> &'static str {
        "Bulk check-in: check-in all checked-out elements below the\n\
         specified directories (or the current directory).\n\n\
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
        let events = survey(ctx, &self.effective_targets().as_args())?;
        let checked_out = paths_with_status(&events, Status::CheckedOut);
        if checked_out.is_empty() {
            print_info("Nothing to check-in");
            return Ok(());
        }
        let mut checkin = CheckinCommand::with_comment(self.comment.clone());
        checkin.set_targets(checked_out);
        checkin.execute(ctx, reporter)
    }
}

/// `auto-uncheckout`: revert all checkouts under the targets, discarding
/// local modifications.
#[derive(Debug, Default)]
pub struct AutoUncheckoutCommand {
    targets: Vec<String>,
}

impl AutoUncheckoutCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for AutoUncheckoutCommand {
    fn synopsis(&self) -> &'static str {
        "[<element> ...]"
    }

    fn help(&self) -> &'static str {
        "Bulk revert: uncheckout all checked-out elements below the\n\
         specified directories (or the current directory), discarding\n\
         changes."
    }

    fn targets(&self) -> &[String] {
        &self.targets
    }

    fn set_targets(&mut self, targets: Vec<String>) {
        self.targets = targets;
    }

    fn execute(&mut self, ctx: &Context, reporter: &mut dyn Reporter) -> Result<()> {
        let events = survey(ctx, &self.effective_targets().as_args())?;
        let checked_out = paths_with_status(&events, Status::CheckedOut);
        if checked_out.is_empty() {
            print_info("Nothing to revert");
            return Ok(());
        }
        let mut uncheckout = UncheckoutCommand::discarding();
        uncheckout.set_targets(checked_out);
        uncheckout.execute(ctx, reporter)
    }
}

const CONTROL_FILE: &str = "clearnav-autosync.tmp";

const CONTROL_HEADER: &str = "\
# Review the actions below, uncomment the ones you want applied,
# then save and exit. Lines starting with '#' are skipped.
#
# ADD     put a local file under version control
# RM      mark a missing element as deleted
# UPDATE  turn a hijack into a real checkout
";

static ACTION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(ADD|RM|UPDATE)\s+(.*\S)").unwrap());

/// The actions parsed back from an edited control file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub add: Vec<String>,
    pub remove: Vec<String>,
    pub update: Vec<String>,
}

impl SyncPlan {
    /// Propose a plan from survey events: local files become ADD
    /// candidates, missing elements RM, hijacks UPDATE.
    fn propose(events: &[StatusEvent]) -> Self {
        Self {
            add: paths_with_status(events, Status::Local),
            remove: paths_with_status(events, Status::Missing),
            update: paths_with_status(events, Status::Hijacked),
        }
    }

    fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty() && self.update.is_empty()
    }

    /// Render the control file: every proposed action present but
    /// commented out, so nothing happens unless the user opts in.
    fn render(&self) -> String {
        let mut text = String::from(CONTROL_HEADER);
        for path in &self.add {
            text.push_str(&format!("#ADD\t{path}\n"));
        }
        for path in &self.remove {
            text.push_str(&format!("#RM\t{path}\n"));
        }
        for path in &self.update {
            text.push_str(&format!("#UPDATE\t{path}\n"));
        }
        text
    }

    /// Parse the edited control file back into actions. Only lines the
    /// user uncommented count; everything else is ignored.
    fn parse(text: &str) -> Self {
        let mut plan = Self::default();
        for line in text.lines() {
            if let Some(c) = ACTION_LINE.captures(line) {
                let path = c[2].to_string();
                match &c[1] {
                    "ADD" => plan.add.push(path),
                    "RM" => plan.remove.push(path),
                    _ => plan.update.push(path),
                }
            }
        }
        plan
    }
}

/// `auto-sync`: reconcile the view with the local tree, interactively.
#[derive(Debug, Default)]
pub struct AutoSyncCommand {
    targets: Vec<String>,
}

impl AutoSyncCommand {
    pub fn new() -> Self {
        Self::default()
    }

    fn confirm_plan(&self, ctx: &Context, plan: &SyncPlan) -> Result<SyncPlan> {
        let control = ctx.cwd.join(CONTROL_FILE);
        fs::write(&control, plan.render())?;
        let outcome = edit_file(&control).and_then(|()| {
            let text = fs::read_to_string(&control)?;
            Ok(SyncPlan::parse(&text))
        });
        let _ = fs::remove_file(&control);
        outcome
    }
}

impl Command for AutoSyncCommand {
    fn synopsis(&self) -> &'static str {
        "[<element> ...]"
    }

    fn help(&self) -> &'static str {
        "Bulk add/remove: compare the local tree to the repository,\n\
         then (after confirmation) add local files, remove missing\n\
         elements and check-out hijacked ones."
    }

    fn targets(&self) -> &[String] {
        &self.targets
    }

    fn set_targets(&mut self, targets: Vec<String>) {
        self.targets = targets;
    }

    fn execute(&mut self, ctx: &Context, reporter: &mut dyn Reporter) -> Result<()> {
        let events = survey(ctx, &self.effective_targets().as_args())?;
        let proposed = SyncPlan::propose(&events);
        if proposed.is_empty() {
            print_info("Nothing to sync");
            return Ok(());
        }

        let plan = self.confirm_plan(ctx, &proposed)?;
        if plan.is_empty() {
            print_info("Nothing selected");
            return Ok(());
        }

        if !plan.add.is_empty() {
            let mut add = AddCommand::new();
            add.set_targets(plan.add);
            add.execute(ctx, reporter)?;
        }
        if !plan.update.is_empty() {
            let mut checkout = CheckoutCommand::hijacked();
            checkout.set_targets(plan.update);
            checkout.execute(ctx, reporter)?;
        }
        if !plan.remove.is_empty() {
            let mut remove = RemoveCommand::new();
            remove.set_targets(plan.remove);
            remove.execute(ctx, reporter)?;
        }
        Ok(())
    }
}
