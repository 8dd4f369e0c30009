//! Stub tool management and view setup utilities
//!
//! Provides a fake cleartool executable with canned, per-subcommand output
//! and an invocation log, plus a temporary directory standing in for the
//! snapshot view. The binary under test picks the stub up through the
//! `CLEARTOOL` environment variable.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use tempfile::TempDir;

/// A temporary view directory with a stub cleartool beside it. The TempDir
/// must be kept alive for the duration of the test to prevent cleanup.
pub struct TestView {
    pub temp_dir: TempDir,
    script: PathBuf,
    log: PathBuf,
    responses: Vec<(String, String, i32)>,
}

impl TestView {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let script = temp_dir.path().join("stub-cleartool");
        let log = temp_dir.path().join("stub-invocations.log");
        let view = Self {
            temp_dir,
            script,
            log,
            responses: Vec::new(),
        };
        view.write_script()?;
        Ok(view)
    }

    /// The directory the binary runs in
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Canned stdout for one cleartool subcommand. Any subcommand without
    /// a response produces no output and exits zero.
    pub fn respond(&mut self, subcommand: &str, output: &str) -> anyhow::Result<()> {
        let mut output = output.to_string();
        if !output.is_empty() && !output.ends_with('\n') {
            output.push('\n');
        }
        self.responses.push((subcommand.to_string(), output, 0));
        self.write_script()
    }

    /// Make one subcommand exit abnormally with the given code
    pub fn fail_with(&mut self, subcommand: &str, code: i32) -> anyhow::Result<()> {
        self.responses
            .push((subcommand.to_string(), String::new(), code));
        self.write_script()
    }

    fn write_script(&self) -> anyhow::Result<()> {
        let mut script = String::from("#!/bin/sh\n");
        script.push_str(&format!(
            "printf '%s\\n' \"$*\" >> '{}'\n",
            self.log.display()
        ));
        script.push_str("case \"$1\" in\n");
        for (i, (subcommand, output, code)) in self.responses.iter().enumerate() {
            script.push_str(&format!(
                "{subcommand}) cat <<'STUB_EOF_{i}'\n{output}STUB_EOF_{i}\nexit {code}\n;;\n"
            ));
        }
        script.push_str("*) : ;;\nesac\n");
        fs::write(&self.script, script)?;

        let mut perms = fs::metadata(&self.script)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&self.script, perms)?;
        Ok(())
    }

    /// Every stub invocation so far, one argument line per call
    pub fn invocations(&self) -> anyhow::Result<Vec<String>> {
        if !self.log.exists() {
            return Ok(Vec::new());
        }
        Ok(fs::read_to_string(&self.log)?
            .lines()
            .map(str::to_string)
            .collect())
    }

    /// A command for the binary under test, wired to this view and stub
    pub fn clearnav(&self) -> anyhow::Result<Command> {
        let mut cmd = Command::cargo_bin("clearnav")?;
        cmd.env("CLEARTOOL", &self.script).current_dir(self.path());
        Ok(cmd)
    }
}

/// Create a file (and any missing parent directories) inside the view
pub fn create_file(view: &TestView, name: &str, content: &str) -> anyhow::Result<PathBuf> {
    let path = view.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, content)?;
    Ok(path)
}
