//! Type-safe element status codes and status events.
//!
//! This module defines [`Status`], the closed set of states an element can
//! be reported in, and [`StatusEvent`], the structured record emitted by the
//! output translators for each element the external tool mentions.
//!
//! # Public API
//! - [`Status`]: Enumeration of all element status codes
//! - [`StatusEvent`]: One reported element (path, status, optional version)

use std::fmt;
use std::path::PathBuf;

/// Status of a version-controlled element, as derived from cleartool output.
///
/// The string codes are what the reporter prints and what scripts parse, so
/// they are part of the tool's output contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Exists on disk but is not tracked
    Local,
    /// Tracked, up to date, no local modification
    Ok,
    /// Checked out (editable)
    CheckedOut,
    /// Modified on disk without a checkout
    Hijacked,
    /// Tracked but absent on disk
    Missing,
    /// Newly materialised by an update
    New,
    /// Content refreshed by an update
    Updated,
    /// Removed from the working area
    Removed,
    /// Requires a three-way merge
    Merge,
    /// Checked in
    Commit,
    /// Newly added to tracking
    Added,
    /// Checkout undone
    Unco,
    /// A private (hijacked) copy preserved on disk
    Kept,
}

impl Status {
    /// The fixed code printed in the status column
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Local => "LOCAL",
            Status::Ok => "OK",
            Status::CheckedOut => "CO",
            Status::Hijacked => "HIJACK",
            Status::Missing => "MISSING",
            Status::New => "NEW",
            Status::Updated => "UPDATED",
            Status::Removed => "REMOVED",
            Status::Merge => "MERGE",
            Status::Commit => "COMMIT",
            Status::Added => "ADDED",
            Status::Unco => "UNCO",
            Status::Kept => "KEPT",
        }
    }

    /// Parse a printed status code back into a [`Status`]
    pub fn from_code(code: &str) -> Option<Status> {
        Some(match code {
            "LOCAL" => Status::Local,
            "OK" => Status::Ok,
            "CO" => Status::CheckedOut,
            "HIJACK" => Status::Hijacked,
            "MISSING" => Status::Missing,
            "NEW" => Status::New,
            "UPDATED" => Status::Updated,
            "REMOVED" => Status::Removed,
            "MERGE" => Status::Merge,
            "COMMIT" => Status::Commit,
            "ADDED" => Status::Added,
            "UNCO" => Status::Unco,
            "KEPT" => Status::Kept,
            _ => return None,
        })
    }

    /// Whether events with this status carry a version label.
    ///
    /// Purely local/structural statuses never have one.
    pub fn is_version_qualified(&self) -> bool {
        matches!(
            self,
            Status::Ok
                | Status::CheckedOut
                | Status::Hijacked
                | Status::Missing
                | Status::Merge
                | Status::Commit
                | Status::Added
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One reported element: path, status, and an optional version label
/// (a revision identifier, or `"new"` for a first checkout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    pub path: PathBuf,
    pub status: Status,
    pub version: Option<String>,
}

impl StatusEvent {
    /// An event with no version label
    pub fn new(path: impl Into<PathBuf>, status: Status) -> Self {
        Self {
            path: path.into(),
            status,
            version: None,
        }
    }

    /// An event carrying a version label
    pub fn with_version(
        path: impl Into<PathBuf>,
        status: Status,
        version: impl Into<String>,
    ) -> Self {
        debug_assert!(status.is_version_qualified());
        Self {
            path: path.into(),
            status,
            version: Some(version.into()),
        }
    }
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path.display(), self.status)?;
        if let Some(version) = &self.version {
            write!(f, " [{version}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(Status::Local.as_str(), "LOCAL");
        assert_eq!(Status::CheckedOut.as_str(), "CO");
        assert_eq!(Status::Hijacked.as_str(), "HIJACK");
        assert_eq!(Status::Commit.as_str(), "COMMIT");
        assert_eq!(Status::Kept.as_str(), "KEPT");
    }

    #[test]
    fn test_status_from_code_round_trips() {
        for status in [
            Status::Local,
            Status::Ok,
            Status::CheckedOut,
            Status::Hijacked,
            Status::Missing,
            Status::New,
            Status::Updated,
            Status::Removed,
            Status::Merge,
            Status::Commit,
            Status::Added,
            Status::Unco,
            Status::Kept,
        ] {
            assert_eq!(Status::from_code(status.as_str()), Some(status));
        }
        assert_eq!(Status::from_code("BOGUS"), None);
    }

    #[test]
    fn test_version_qualified_statuses() {
        assert!(Status::CheckedOut.is_version_qualified());
        assert!(Status::Hijacked.is_version_qualified());
        assert!(Status::Commit.is_version_qualified());
        assert!(Status::Added.is_version_qualified());

        assert!(!Status::Local.is_version_qualified());
        assert!(!Status::Removed.is_version_qualified());
        assert!(!Status::Unco.is_version_qualified());
        assert!(!Status::Kept.is_version_qualified());
    }

    #[test]
    fn test_event_display() {
        let event = StatusEvent::new("a.txt", Status::Local);
        assert_eq!(event.to_string(), "a.txt (LOCAL)");

        let event = StatusEvent::with_version("src/lib.c", Status::Hijacked, "/main/3");
        assert_eq!(event.to_string(), "src/lib.c (HIJACK) [/main/3]");
    }
}
