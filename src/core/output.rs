//! Output formatting utilities for consistent CLI presentation.
//!
//! Status rows go through the [`crate::core::report`] reporters; this module
//! covers the remaining human-facing messages (errors, informational
//! notices) with a consistent colour scheme.

use colored::*;

/// Formats and prints an error message to stderr
///
/// # Format
/// ```text
/// ✕ Error: <message>
/// ```
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✕ Error:".red(), message.white());
}

/// Formats and prints an informational message
pub fn print_info(message: &str) {
    println!("{}", message.white());
}
