//! Per-invocation execution context.
//!
//! Everything that used to be ambient state lives here: the working
//! directory, the dry-run flag, the active ignore patterns and the
//! configured external tool. Built once at startup, read-only for the
//! remainder of the run, and passed by reference into every command.

use std::path::PathBuf;

use crate::core::cleartool::ClearTool;
use crate::core::error::Result;
use crate::core::ignore::IgnoreMatcher;

/// Read-only configuration shared by every command in one invocation.
#[derive(Debug)]
pub struct Context {
    pub cwd: PathBuf,
    pub test_mode: bool,
    pub ignores: IgnoreMatcher,
    pub tool: ClearTool,
}

impl Context {
    /// Build the context for a real invocation: current directory, standard
    /// ignore set, tool resolved from the environment.
    pub fn new(test_mode: bool) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let ignores = IgnoreMatcher::standard(cwd.clone())?;
        let tool = ClearTool::from_env(test_mode);
        Ok(Self {
            cwd,
            test_mode,
            ignores,
            tool,
        })
    }

    /// A context with explicit parts; used by tests to avoid touching the
    /// process environment.
    pub fn with_parts(cwd: PathBuf, ignores: IgnoreMatcher, tool: ClearTool) -> Self {
        let test_mode = tool.test_mode();
        Self {
            cwd,
            test_mode,
            ignores,
            tool,
        }
    }
}
