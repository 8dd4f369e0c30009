//! The cleartool subprocess boundary.
//!
//! One invocation at a time, stdout consumed line-by-line in emission order
//! (carriage returns stripped) and handed to a sink closure. All operation
//! semantics come from line content; the exit status is only checked for
//! abnormal termination, which is propagated without retry.
//!
//! # Public API
//! - [`ClearTool`]: Configured runner for the external executable
//!
//! The executable name defaults to `cleartool` and can be overridden with
//! the `CLEARTOOL` environment variable, which is how the test suite
//! substitutes a stub tool.

use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::core::error::{ClearNavError, Result};
use crate::core::target::normalize_path;

/// Environment variable overriding the external executable.
pub const TOOL_ENV: &str = "CLEARTOOL";

const DEFAULT_PROGRAM: &str = "cleartool";

/// Runner for the external version-control executable.
#[derive(Debug, Clone)]
pub struct ClearTool {
    program: String,
    test_mode: bool,
}

impl ClearTool {
    pub fn new(program: impl Into<String>, test_mode: bool) -> Self {
        Self {
            program: program.into(),
            test_mode,
        }
    }

    /// Resolve the executable from the environment.
    pub fn from_env(test_mode: bool) -> Self {
        let program =
            std::env::var(TOOL_ENV).unwrap_or_else(|_| DEFAULT_PROGRAM.to_string());
        Self::new(program, test_mode)
    }

    /// Whether mutating invocations are suppressed (dry-run).
    pub fn test_mode(&self) -> bool {
        self.test_mode
    }

    /// Run the tool and feed each stdout line to `sink`, in order, as the
    /// process produces it. Blocks until the process exits; an abnormal
    /// exit becomes [`ClearNavError::ToolFailed`].
    pub fn run<F>(&self, args: &[String], mut sink: F) -> Result<()>
    where
        F: FnMut(&str),
    {
        log::debug!("RUNNING: {} {}", self.program, args.join(" "));
        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| ClearNavError::tool_spawn(&self.program, e))?;

        // The child owns the write end; reading to EOF before wait() avoids
        // deadlocking on a full pipe.
        let stdout = child.stdout.take().expect("stdout was piped");
        for line in BufReader::new(stdout).lines() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            log::debug!("<<< {line}");
            sink(line);
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(ClearNavError::tool_failed(&self.program, status));
        }
        Ok(())
    }

    /// Run a mutating operation. In test mode the invocation is logged and
    /// skipped; nothing reaches the external tool.
    pub fn run_mutating<F>(&self, args: &[String], sink: F) -> Result<()>
    where
        F: FnMut(&str),
    {
        if self.test_mode {
            log::debug!("WOULD RUN: {} {}", self.program, args.join(" "));
            return Ok(());
        }
        self.run(args, sink)
    }

    /// The root of the view this invocation runs in, obtained with a single
    /// `pwv -root` sub-invocation. Tool-reported absolute paths are made
    /// relative against this root.
    pub fn view_root(&self) -> Result<PathBuf> {
        let mut root: Option<PathBuf> = None;
        self.run(&["pwv".to_string(), "-root".to_string()], |line| {
            let line = line.trim();
            if root.is_none() && !line.is_empty() {
                root = Some(normalize_path(line));
            }
        })?;
        let root = root.ok_or(ClearNavError::ViewRootUnavailable)?;
        log::debug!("view_root = {}", root.display());
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    fn write_stub(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("stubtool");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[test]
    fn test_run_streams_lines_in_order() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let stub = write_stub(dir.path(), "printf 'first\\nsecond\\n'");
        let tool = ClearTool::new(stub.to_string_lossy(), false);

        let mut lines = Vec::new();
        tool.run(&["ls".to_string()], |line| lines.push(line.to_string()))?;
        assert_eq!(lines, ["first", "second"]);
        Ok(())
    }

    #[test]
    fn test_run_strips_carriage_returns() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let stub = write_stub(dir.path(), "printf 'dos line\\r\\n'");
        let tool = ClearTool::new(stub.to_string_lossy(), false);

        let mut lines = Vec::new();
        tool.run(&[], |line| lines.push(line.to_string()))?;
        assert_eq!(lines, ["dos line"]);
        Ok(())
    }

    #[test]
    fn test_abnormal_exit_is_an_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let stub = write_stub(dir.path(), "exit 3");
        let tool = ClearTool::new(stub.to_string_lossy(), false);

        let err = tool.run(&[], |_| {}).unwrap_err();
        assert!(matches!(err, ClearNavError::ToolFailed { .. }));
        Ok(())
    }

    #[test]
    fn test_spawn_failure_is_an_error() {
        let tool = ClearTool::new("/nonexistent/clearnav-no-such-tool", false);
        let err = tool.run(&[], |_| {}).unwrap_err();
        assert!(matches!(err, ClearNavError::ToolSpawn { .. }));
    }

    #[test]
    fn test_test_mode_suppresses_mutations() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let marker = dir.path().join("ran");
        let stub = write_stub(
            dir.path(),
            &format!("touch '{}'", marker.display()),
        );
        let tool = ClearTool::new(stub.to_string_lossy(), true);

        let mut saw_output = false;
        tool.run_mutating(&["checkin".to_string()], |_| saw_output = true)?;
        assert!(!marker.exists(), "dry-run must not invoke the tool");
        assert!(!saw_output);
        Ok(())
    }

    #[test]
    fn test_view_root_takes_first_line() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let stub = write_stub(dir.path(), "printf '/view/myview\\nnoise\\n'");
        let tool = ClearTool::new(stub.to_string_lossy(), false);

        assert_eq!(tool.view_root()?, PathBuf::from("/view/myview"));
        Ok(())
    }

    #[test]
    fn test_view_root_missing_is_an_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let stub = write_stub(dir.path(), "true");
        let tool = ClearTool::new(stub.to_string_lossy(), false);

        let err = tool.view_root().unwrap_err();
        assert!(matches!(err, ClearNavError::ViewRootUnavailable));
        Ok(())
    }
}
