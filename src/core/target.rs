//! Target path handling.
//!
//! User-supplied target paths arrive as raw strings, possibly with
//! backslash separators or a leading `./`. [`normalize_path`] canonicalises
//! them so paths compare equal regardless of how they were typed, and
//! [`TargetList`] holds the ordered result with the derived operations the
//! commands need (parent set, argument rendering).

use std::fmt;
use std::path::PathBuf;

/// Canonicalise a raw path string: backslashes become `/` and any leading
/// `./` segments are stripped. Idempotent: normalising an already-normalised
/// path is a no-op.
pub fn normalize_path(raw: &str) -> PathBuf {
    let mut path = raw.replace('\\', "/");
    while let Some(rest) = path.strip_prefix("./") {
        path = rest.to_string();
    }
    PathBuf::from(path)
}

/// An ordered list of normalised target paths.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetList {
    paths: Vec<PathBuf>,
}

impl TargetList {
    /// Build from raw user-supplied path strings, normalising each.
    pub fn from_raw<S: AsRef<str>>(raw: &[S]) -> Self {
        Self {
            paths: raw.iter().map(|s| normalize_path(s.as_ref())).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.paths.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// The parent directory of each target, in first-seen order with
    /// duplicates removed.
    pub fn parents(&self) -> TargetList {
        let mut parents: Vec<PathBuf> = Vec::new();
        for path in &self.paths {
            let parent = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => PathBuf::from("."),
            };
            if !parents.contains(&parent) {
                parents.push(parent);
            }
        }
        TargetList { paths: parents }
    }

    /// The targets as plain strings, ready to append to a cleartool
    /// argument vector.
    pub fn as_args(&self) -> Vec<String> {
        self.paths
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for TargetList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted: Vec<String> = self
            .paths
            .iter()
            .map(|p| format!("'{}'", p.display()))
            .collect();
        write!(f, "{}", quoted.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_backslashes() {
        assert_eq!(normalize_path("src\\core\\main.c"), PathBuf::from("src/core/main.c"));
    }

    #[test]
    fn test_normalize_strips_leading_dot_slash() {
        assert_eq!(normalize_path("./a.txt"), PathBuf::from("a.txt"));
        assert_eq!(normalize_path("././a.txt"), PathBuf::from("a.txt"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_path(".\\dir\\file.c");
        let twice = normalize_path(&once.to_string_lossy());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_from_raw_preserves_order() {
        let list = TargetList::from_raw(&["b.txt", "a.txt"]);
        let paths: Vec<_> = list.iter().collect();
        assert_eq!(paths, [&PathBuf::from("b.txt"), &PathBuf::from("a.txt")]);
    }

    #[test]
    fn test_parents_deduplicates() {
        let list = TargetList::from_raw(&["dir/a.txt", "dir/b.txt", "other/c.txt"]);
        let parents = list.parents();
        assert_eq!(parents.len(), 2);
        let paths: Vec<_> = parents.iter().collect();
        assert_eq!(paths, [&PathBuf::from("dir"), &PathBuf::from("other")]);
    }

    #[test]
    fn test_parents_idempotent_on_parent_set() {
        let list = TargetList::from_raw(&["dir/a.txt", "dir/b.txt"]);
        let parents = list.parents();
        // Parents of a deduplicated parent set contain no duplicates either.
        let grandparents = parents.parents();
        assert_eq!(grandparents.len(), 1);
        assert_eq!(grandparents.iter().next(), Some(&PathBuf::from(".")));
    }

    #[test]
    fn test_parent_of_bare_filename_is_current_dir() {
        let list = TargetList::from_raw(&["a.txt"]);
        let parents = list.parents();
        assert_eq!(parents.iter().next(), Some(&PathBuf::from(".")));
    }

    #[test]
    fn test_display_quotes_paths() {
        let list = TargetList::from_raw(&["a.txt", "dir/b.txt"]);
        assert_eq!(list.to_string(), "'a.txt' 'dir/b.txt'");
    }

    #[test]
    fn test_as_args() {
        let list = TargetList::from_raw(&["a.txt", "dir\\b.txt"]);
        assert_eq!(list.as_args(), vec!["a.txt", "dir/b.txt"]);
    }
}
