//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`ClearNavError`] which covers every failure mode of
//! clearnav. It uses `thiserror` for ergonomic error definitions and keeps
//! the usage-error family distinguishable from operational failures so the
//! driver can attach a help hint and a nonzero exit code.
//!
//! # Public API
//! - [`ClearNavError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, ClearNavError>`
//!
//! # Error Categories
//! - **Usage errors**: Unknown command, unrecognised option, missing targets
//! - **External tool**: cleartool could not be started or exited abnormally
//! - **Patterns**: Invalid ignore patterns
//! - **I/O**: Comment/control file handling, editor invocation

use std::process::ExitStatus;
use thiserror::Error;

/// Domain-specific error types for clearnav
#[derive(Error, Debug)]
pub enum ClearNavError {
    // Usage errors
    #[error("No command specified")]
    NoCommandSpecified,

    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },

    #[error("Unrecognised option: {option}")]
    UnrecognizedOption { option: String },

    #[error("Option {option} expects an argument")]
    MissingOptionArgument { option: String },

    #[error("No target specified")]
    NoTargetSpecified,

    #[error("Expected {expected} targets, got {actual}")]
    WrongArgumentCount { expected: usize, actual: usize },

    // External tool errors
    #[error("Failed to start {program}: {source}")]
    ToolSpawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} exited abnormally ({status})")]
    ToolFailed { program: String, status: ExitStatus },

    #[error("Could not determine the view root")]
    ViewRootUnavailable,

    // Ignore pattern errors
    #[error("Invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },

    // Editor / file errors
    #[error("Editor '{editor}' exited with failure")]
    EditorFailed { editor: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results using ClearNavError
pub type Result<T> = std::result::Result<T, ClearNavError>;

impl ClearNavError {
    /// True for errors caused by how the command line was written, as
    /// opposed to something going wrong while running it. The driver adds
    /// a "try 'clearnav help'" hint for these.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::NoCommandSpecified
                | Self::UnknownCommand { .. }
                | Self::UnrecognizedOption { .. }
                | Self::MissingOptionArgument { .. }
                | Self::NoTargetSpecified
                | Self::WrongArgumentCount { .. }
        )
    }

    /// Create an unknown command error
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::UnknownCommand { name: name.into() }
    }

    /// Create an unrecognised option error carrying the literal token
    pub fn unrecognized_option(option: impl Into<String>) -> Self {
        Self::UnrecognizedOption {
            option: option.into(),
        }
    }

    /// Create a missing option argument error
    pub fn missing_option_argument(option: impl Into<String>) -> Self {
        Self::MissingOptionArgument {
            option: option.into(),
        }
    }

    /// Create a wrong argument count error
    pub fn wrong_argument_count(expected: usize, actual: usize) -> Self {
        Self::WrongArgumentCount { expected, actual }
    }

    /// Create a tool spawn error
    pub fn tool_spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::ToolSpawn {
            program: program.into(),
            source,
        }
    }

    /// Create a tool failure error from an abnormal exit status
    pub fn tool_failed(program: impl Into<String>, status: ExitStatus) -> Self {
        Self::ToolFailed {
            program: program.into(),
            status,
        }
    }

    /// Create an invalid ignore pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, source: glob::PatternError) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create an editor failure error
    pub fn editor_failed(editor: impl Into<String>) -> Self {
        Self::EditorFailed {
            editor: editor.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClearNavError::NoCommandSpecified;
        assert_eq!(err.to_string(), "No command specified");
    }

    #[test]
    fn test_unknown_command_error() {
        let err = ClearNavError::unknown_command("frobnicate");
        assert_eq!(err.to_string(), "Unknown command: frobnicate");
    }

    #[test]
    fn test_unrecognized_option_carries_literal_token() {
        let err = ClearNavError::unrecognized_option("--frobnicate");
        assert_eq!(err.to_string(), "Unrecognised option: --frobnicate");
    }

    #[test]
    fn test_wrong_argument_count_error() {
        let err = ClearNavError::wrong_argument_count(2, 1);
        assert_eq!(err.to_string(), "Expected 2 targets, got 1");
    }

    #[test]
    fn test_usage_classification() {
        assert!(ClearNavError::NoCommandSpecified.is_usage());
        assert!(ClearNavError::unknown_command("x").is_usage());
        assert!(ClearNavError::unrecognized_option("-z").is_usage());
        assert!(ClearNavError::NoTargetSpecified.is_usage());
        assert!(ClearNavError::wrong_argument_count(2, 3).is_usage());

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(!ClearNavError::tool_spawn("cleartool", io).is_usage());
        assert!(!ClearNavError::ViewRootUnavailable.is_usage());
    }

    #[test]
    fn test_invalid_pattern_error() {
        let source = glob::Pattern::new("a[").unwrap_err();
        let err = ClearNavError::invalid_pattern("a[", source);
        assert!(err.to_string().contains("Invalid ignore pattern 'a['"));
    }

    #[test]
    fn test_editor_failed_error() {
        let err = ClearNavError::editor_failed("vi");
        assert_eq!(err.to_string(), "Editor 'vi' exited with failure");
    }
}
