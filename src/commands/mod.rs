//! Command implementations for clearnav.
//!
//! Each module contains one command family: its option table, its
//! cleartool invocation, and the line-recognition rules that translate the
//! tool's output into status events. The [`Command`] trait is the common
//! lifecycle: constructed by the registry, configured by [`accept_args`],
//! executed exactly once.

pub mod auto;
pub mod checkin;
pub mod checkout;
pub mod dirmod;
pub mod help;
pub mod list;
pub mod passthrough;
pub mod uncheckout;
pub mod update;

pub use auto::{AutoCheckinCommand, AutoSyncCommand, AutoUncheckoutCommand};
pub use checkin::CheckinCommand;
pub use checkout::CheckoutCommand;
pub use dirmod::{AddCommand, MoveCommand, RemoveCommand};
pub use help::HelpCommand;
pub use list::{ListCommand, LscoCommand};
pub use passthrough::{DiffCommand, LogCommand, VersionTreeCommand};
pub use uncheckout::UncheckoutCommand;
pub use update::UpdateCommand;

use crate::core::context::Context;
use crate::core::error::{ClearNavError, Result};
use crate::core::options::{parse_options, OptionSpec};
use crate::core::report::Reporter;
use crate::core::target::TargetList;
use crate::core::translate::{dispatch, Translator};

/// A configured operation. Commands are single-use: the registry constructs
/// one, `accept_args` configures it, `execute` runs it, and it is discarded.
/// Composition commands construct fresh inner commands of their own.
pub trait Command: std::fmt::Debug {
    /// One-line argument synopsis for help output
    fn synopsis(&self) -> &'static str {
        ""
    }

    /// Long-form help text
    fn help(&self) -> &'static str {
        "Sorry, no help provided ..."
    }

    /// The options this command understands. Commands not listed here are
    /// rejected with an `UnrecognizedOption` usage error.
    fn option_specs(&self) -> &'static [OptionSpec] {
        &[]
    }

    /// Apply one resolved option. `name` is the canonical name from the
    /// option table; `args` holds exactly the declared arity's tokens.
    fn apply_option(&mut self, _name: &str, _args: &[String]) -> Result<()> {
        Ok(())
    }

    /// Raw target tokens, as given on the command line
    fn targets(&self) -> &[String];

    fn set_targets(&mut self, targets: Vec<String>);

    /// Targets for read-only operations: defaults to the current directory
    /// when none were given.
    fn effective_targets(&self) -> TargetList {
        if self.targets().is_empty() {
            TargetList::from_raw(&["."])
        } else {
            TargetList::from_raw(self.targets())
        }
    }

    /// Targets for mutating operations: at least one must be explicit,
    /// because an implicit "everything" default would be dangerous.
    fn specified_targets(&self) -> Result<TargetList> {
        if self.targets().is_empty() {
            return Err(ClearNavError::NoTargetSpecified);
        }
        Ok(TargetList::from_raw(self.targets()))
    }

    fn execute(&mut self, ctx: &Context, reporter: &mut dyn Reporter) -> Result<()>;
}

/// Run a mutating tool invocation, translating its output. A run that
/// produced no recognisable line at all gets a warning: the tool may have
/// changed its output format out from under us.
fn run_mutating_translated<T: Translator>(
    ctx: &Context,
    args: &[String],
    translator: &T,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    let mut recognised = false;
    ctx.tool.run_mutating(args, |line| {
        recognised |= dispatch(translator, line, reporter);
    })?;
    if !ctx.test_mode && !recognised {
        log::warn!("no recognisable output from: {}", args.join(" "));
    }
    Ok(())
}

/// Configure a command from its remaining command-line tokens: options
/// first, then targets verbatim.
pub fn accept_args(command: &mut dyn Command, args: Vec<String>) -> Result<()> {
    let (options, targets) = parse_options(command.option_specs(), args)?;
    for option in options {
        command.apply_option(option.name, &option.args)?;
    }
    command.set_targets(targets);
    Ok(())
}
