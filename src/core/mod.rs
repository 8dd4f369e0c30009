//! Core functionality for clearnav.
//!
//! This module provides the building blocks the commands are assembled
//! from: the cleartool subprocess boundary, status events and reporters,
//! line translation, option parsing, ignore handling and error types.

pub mod cleartool;
pub mod context;
pub mod edit;
pub mod error;
pub mod ignore;
pub mod options;
pub mod output;
pub mod registry;
pub mod report;
pub mod status;
pub mod target;
pub mod translate;

// === Error handling ===
// Core error type and result alias used throughout the application
pub use error::{ClearNavError, Result};

// === Tool boundary ===
// Configured runner for the external cleartool executable
pub use cleartool::ClearTool;

// === Execution context ===
// Per-invocation state passed by reference into every command
pub use context::Context;

// === Status events ===
// Type-safe status codes and the events the translators produce
pub use status::{Status, StatusEvent};

// === Reporting ===
// Event sinks: console rows for users, collection for composition
pub use report::{format_event, CollectingReporter, ConsoleReporter, Reporter};

// === Line translation ===
// Per-command recognition rules for tool output
pub use translate::{dispatch, Translation, Translator};

// === Option parsing ===
// Table-driven option handling shared by every command
pub use options::{parse_options, OptionSpec, ParsedOption};

// === Targets ===
// Path normalisation and target-list handling
pub use target::{normalize_path, TargetList};

// === Ignore patterns ===
// Glob-based filtering of view-private noise
pub use ignore::IgnoreMatcher;

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{print_error, print_info};
