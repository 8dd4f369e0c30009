use clap::Parser;
use clearnav::commands::accept_args;
use clearnav::core::registry;
use clearnav::core::{print_error, ConsoleReporter, Context, Result};
use std::env;

#[derive(Parser)]
#[command(name = "clearnav")]
#[command(about = "CVS-like ergonomics for the ClearCase command line")]
#[command(version)]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Dry-run: show what would be done without modifying anything
    #[arg(short = 't', long = "test")]
    test: bool,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// The command to run (see "clearnav help")
    command: Option<String>,

    /// Command options and targets, passed through unparsed
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn run(cli: Cli) -> Result<()> {
    let ctx = Context::new(cli.test)?;
    let mut command = registry::make_command(cli.command.as_deref())?;
    accept_args(command.as_mut(), cli.args)?;

    let mut reporter = ConsoleReporter::new();
    command.execute(&ctx, &mut reporter)
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "warn");
    }
    env_logger::init();

    if let Err(e) = run(cli) {
        print_error(&e.to_string());
        if e.is_usage() {
            eprintln!("try 'clearnav help' for usage information");
        }
        std::process::exit(1);
    }
}
