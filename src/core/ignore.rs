//! Ignore patterns for untracked-file reporting.
//!
//! [`IgnoreMatcher`] holds a set of absolute-path glob patterns. A path is
//! ignored iff it matches at least one pattern; the set is a plain union, so
//! pattern order never affects the answer and adding a pattern can only grow
//! the ignored set.
//!
//! Patterns come from two sources: a built-in default set (backup files,
//! `.keep` copies, clearnav's own temp files) and optional `.ccignore`
//! files, walked from the working directory up to the filesystem root. Each
//! non-comment line of a `.ccignore` is a pattern relative to that file's
//! directory. A pattern ending in `/` ignores the directory itself and
//! everything beneath it.

use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{ClearNavError, Result};
use crate::core::target::normalize_path;

/// Name of the per-directory pattern file.
pub const IGNORE_FILE: &str = ".ccignore";

const DEFAULT_PATTERNS: &[&str] = &[
    "**/*.hijacked",
    "**/*.keep",
    "**/*.keep.[0-9]",
    "**/#*#",
    "**/*~",
    "**/clearnav-*.tmp",
];

// FNM_PATHNAME-style matching: `*` never crosses a separator, but leading
// dots are matched like any other character.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Unordered union of absolute-path glob patterns.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    base: PathBuf,
    patterns: Vec<Pattern>,
}

impl IgnoreMatcher {
    /// An empty matcher rooted at `base`; relative patterns and candidate
    /// paths are resolved against this directory.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            patterns: Vec::new(),
        }
    }

    /// The standard matcher: built-in defaults plus any `.ccignore`
    /// patterns found between `base` and the filesystem root.
    pub fn standard(base: impl Into<PathBuf>) -> Result<Self> {
        let mut matcher = Self::new(base);
        for pattern in DEFAULT_PATTERNS {
            matcher.add(None, pattern)?;
        }
        matcher.load_project_patterns();
        Ok(matcher)
    }

    /// Add one pattern, resolved against `dir` (or the matcher base when
    /// `None`). A trailing `/` marks a directory: the directory itself and
    /// all files within it are ignored.
    pub fn add(&mut self, dir: Option<&Path>, pattern: &str) -> Result<()> {
        if let Some(stripped) = pattern.strip_suffix('/') {
            self.add_one(dir, stripped)?;
            self.add_one(dir, &format!("{stripped}/**/*"))?;
        } else {
            self.add_one(dir, pattern)?;
        }
        Ok(())
    }

    fn add_one(&mut self, dir: Option<&Path>, pattern: &str) -> Result<()> {
        let base = dir.unwrap_or(&self.base);
        let absolute = base.join(normalize_path(pattern));
        let text = absolute.to_string_lossy();
        log::debug!("ignore {text}");
        let compiled = Pattern::new(&text)
            .map_err(|e| ClearNavError::invalid_pattern(text.clone().into_owned(), e))?;
        self.patterns.push(compiled);
        Ok(())
    }

    /// Walk from the base directory to the root, folding in `.ccignore`
    /// patterns. Malformed patterns are reported and skipped rather than
    /// aborting the whole run.
    fn load_project_patterns(&mut self) {
        let mut dir = self.base.clone();
        loop {
            let ignore_file = dir.join(IGNORE_FILE);
            if let Ok(content) = fs::read_to_string(&ignore_file) {
                for line in content.lines() {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if let Err(e) = self.add(Some(&dir), line) {
                        log::warn!("{}: {e}", ignore_file.display());
                    }
                }
            }
            if !dir.pop() {
                break;
            }
        }
    }

    /// True iff the path matches at least one pattern. Relative paths are
    /// resolved against the matcher base before matching.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base.join(path)
        };
        self.patterns
            .iter()
            .any(|p| p.matches_path_with(&absolute, MATCH_OPTIONS))
    }

    /// Number of active patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
