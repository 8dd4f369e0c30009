//! clearnav - CVS-like ergonomics for the ClearCase command line.
//!
//! This library wraps the `cleartool` executable: it runs the primitive
//! operations with sane defaults, translates their free-text output into
//! uniform status rows, and composes them into bulk commands such as
//! `auto-checkin` and `auto-sync`.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module:
//! - The [`core::ClearTool`] subprocess boundary
//! - Status events, reporters and line translators
//! - The command registry and option parsing
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    dispatch,
    format_event,
    normalize_path,
    parse_options,
    // Output formatting
    print_error,
    print_info,

    // Error handling
    ClearNavError,
    // Tool boundary
    ClearTool,
    CollectingReporter,
    ConsoleReporter,
    // Execution context
    Context,
    // Ignore patterns
    IgnoreMatcher,
    // Option parsing
    OptionSpec,
    ParsedOption,
    // Reporting
    Reporter,
    Result,

    // Status events
    Status,
    StatusEvent,
    // Targets
    TargetList,
    // Line translation
    Translation,
    Translator,
};
