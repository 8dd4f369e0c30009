//! `update`: refresh the snapshot view, then look for needed merges.
//!
//! Update output names paths rooted at the view root, so the translator
//! re-expresses them relative to the invocation's working directory. The
//! root is obtained once, with a `pwv -root` sub-invocation, before any
//! update line is translated.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

use crate::commands::Command;
use crate::core::context::Context;
use crate::core::error::Result;
use crate::core::options::OptionSpec;
use crate::core::report::Reporter;
use crate::core::status::{Status, StatusEvent};
use crate::core::target::normalize_path;
use crate::core::translate::{dispatch, Translation, Translator};

static MAKING_DIR: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^Making dir "(.*)""#).unwrap());
static LOADING: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^Loading "(.*)""#).unwrap());
static UNLOADED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^Unloaded "(.*)""#).unwrap());
static KEEPING_HIJACKED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^Keeping hijacked object "(.*)" - base "(.*)""#).unwrap());
static KEEPING: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^Keeping "(.*)""#).unwrap());
static PROCESSING_DIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^Processing dir "(.*)""#).unwrap());
static PROGRESS_DOTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\.*$").unwrap());

static NEEDS_MERGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^Needs Merge "(.+)" \[to \S+ from (\S+) base (\S+)\]"#).unwrap());

/// Rules for `cleartool update` output. Paths are rooted at `view_root`
/// and reported relative to `cwd`.
pub struct UpdateTranslator {
    view_root: PathBuf,
    cwd: PathBuf,
}

impl UpdateTranslator {
    pub fn new(view_root: PathBuf, cwd: PathBuf) -> Self {
        Self { view_root, cwd }
    }

    fn relative(&self, reported: &str) -> PathBuf {
        let full = self.view_root.join(normalize_path(reported));
        pathdiff::diff_paths(&full, &self.cwd).unwrap_or(full)
    }
}

impl Translator for UpdateTranslator {
    fn feed(&self, line: &str) -> Translation {
        if PROCESSING_DIR.is_match(line) || PROGRESS_DOTS.is_match(line) {
            return Translation::Suppress;
        }
        if let Some(c) = MAKING_DIR.captures(line) {
            return Translation::event(StatusEvent::new(self.relative(&c[1]), Status::New));
        }
        if let Some(c) = LOADING.captures(line) {
            return Translation::event(StatusEvent::new(self.relative(&c[1]), Status::Updated));
        }
        if let Some(c) = UNLOADED.captures(line) {
            return Translation::event(StatusEvent::new(self.relative(&c[1]), Status::Removed));
        }
        if let Some(c) = KEEPING_HIJACKED.captures(line) {
            return Translation::event(StatusEvent::with_version(
                self.relative(&c[1]),
                Status::Hijacked,
                &c[2],
            ));
        }
        // Plain "Keeping" must come after the hijacked form: the hijacked
        // line is a prefix match for this one.
        if KEEPING.is_match(line)
            || line.starts_with("End dir")
            || line.starts_with("Done loading")
        {
            return Translation::Suppress;
        }
        Translation::Unrecognized
    }
}

/// Rules for the merge-detection phase (`cleartool findmerge`). Everything
/// except an explicit merge requirement is progress noise.
pub struct MergeTranslator;

impl Translator for MergeTranslator {
    fn feed(&self, line: &str) -> Translation {
        if let Some(c) = NEEDS_MERGE.captures(line) {
            return Translation::event(StatusEvent::with_version(
                normalize_path(&c[1]),
                Status::Merge,
                &c[2],
            ));
        }
        Translation::Suppress
    }
}

/// `update`: update the snapshot view and report what changed.
#[derive(Debug, Default)]
pub struct UpdateCommand {
    pub nomerge: bool,
    pub graphical: bool,
    targets: Vec<String>,
}

impl UpdateCommand {
    pub fn new() -> Self {
        Self::default()
    }

    fn execute_update(&self, ctx: &Context, reporter: &mut dyn Reporter) -> Result<()> {
        let mut args = vec![
            "update".to_string(),
            "-log".to_string(),
            "nul".to_string(),
            "-force".to_string(),
        ];
        if ctx.test_mode {
            // Native preview: the tool prints what it would do without
            // touching the view, in the same phrasing as a real run.
            args.push("-print".to_string());
        }
        args.extend(self.effective_targets().as_args());

        let translator = UpdateTranslator::new(ctx.tool.view_root()?, ctx.cwd.clone());
        ctx.tool.run(&args, |line| {
            dispatch(&translator, line, reporter);
        })
    }

    fn execute_merge(&self, ctx: &Context, reporter: &mut dyn Reporter) -> Result<()> {
        let mut args = vec!["findmerge".to_string()];
        args.extend(self.effective_targets().as_args());
        args.push("-log".to_string());
        args.push("nul".to_string());
        args.push("-flatest".to_string());
        if ctx.test_mode {
            args.push("-print".to_string());
        } else if self.graphical {
            args.push("-gmerge".to_string());
        } else {
            args.push("-merge".to_string());
            args.push("-gmerge".to_string());
        }

        ctx.tool.run(&args, |line| {
            dispatch(&MergeTranslator, line, reporter);
        })
    }
}

impl Command for UpdateCommand {
    fn synopsis(&self) -> &'static str {
        "[-nomerge] [<element> ...]"
    }

    fn help(&self) -> &'static str {
        "Update your (snapshot) view.\n\n\
         -nomerge    Don't attempt to merge in changes to checked-out files."
    }

    fn option_specs(&self) -> &'static [OptionSpec] {
        &[
            OptionSpec {
                name: "nomerge",
                aliases: &[],
                arity: 0,
            },
            OptionSpec {
                name: "graphical",
                aliases: &["g"],
                arity: 0,
            },
        ]
    }

    fn apply_option(&mut self, name: &str, _args: &[String]) -> Result<()> {
        match name {
            "nomerge" => self.nomerge = true,
            "graphical" => self.graphical = true,
            _ => {}
        }
        Ok(())
    }

    fn targets(&self) -> &[String] {
        &self.targets
    }

    fn set_targets(&mut self, targets: Vec<String>) {
        self.targets = targets;
    }

    fn execute(&mut self, ctx: &Context, reporter: &mut dyn Reporter) -> Result<()> {
        self.execute_update(ctx, reporter)?;
        if !self.nomerge {
            self.execute_merge(ctx, reporter)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> UpdateTranslator {
        UpdateTranslator::new(PathBuf::from("/view/proj"), PathBuf::from("/view/proj/sub"))
    }

    #[test]
    fn test_progress_noise_is_suppressed() {
        let t = translator();
        assert_eq!(t.feed(r#"Processing dir "/view/proj/sub""#), Translation::Suppress);
        assert_eq!(t.feed("...."), Translation::Suppress);
        assert_eq!(t.feed(""), Translation::Suppress);
        assert_eq!(t.feed(r#"Keeping "sub/mine.c""#), Translation::Suppress);
        assert_eq!(t.feed("End dir processing"), Translation::Suppress);
        assert_eq!(t.feed("Done loading."), Translation::Suppress);
    }

    #[test]
    fn test_making_dir_is_new() {
        let t = translator();
        assert_eq!(
            t.feed(r#"Making dir "sub/newdir""#),
            Translation::event(StatusEvent::new("newdir", Status::New))
        );
    }

    #[test]
    fn test_loading_is_updated() {
        let t = translator();
        assert_eq!(
            t.feed(r#"Loading "sub/refreshed.c""#),
            Translation::event(StatusEvent::new("refreshed.c", Status::Updated))
        );
    }

    #[test]
    fn test_unloaded_is_removed() {
        let t = translator();
        assert_eq!(
            t.feed(r#"Unloaded "sub/gone.c""#),
            Translation::event(StatusEvent::new("gone.c", Status::Removed))
        );
    }

    #[test]
    fn test_keeping_hijacked_carries_base_version() {
        let t = translator();
        assert_eq!(
            t.feed(r#"Keeping hijacked object "sub/mine.c" - base "/main/3""#),
            Translation::event(StatusEvent::with_version(
                "mine.c",
                Status::Hijacked,
                "/main/3"
            ))
        );
    }

    #[test]
    fn test_paths_outside_cwd_go_up() {
        let t = translator();
        assert_eq!(
            t.feed(r#"Loading "other/far.c""#),
            Translation::event(StatusEvent::new("../other/far.c", Status::Updated))
        );
    }

    #[test]
    fn test_unknown_update_line_is_unrecognised() {
        let t = translator();
        assert_eq!(t.feed("something new entirely"), Translation::Unrecognized);
    }

    #[test]
    fn test_needs_merge_line() {
        let result = MergeTranslator
            .feed(r#"Needs Merge "src/lib.c" [to /main/br/1 from /main/9 base /main/7]"#);
        assert_eq!(
            result,
            Translation::event(StatusEvent::with_version(
                "src/lib.c",
                Status::Merge,
                "/main/9"
            ))
        );
    }

    #[test]
    fn test_findmerge_noise_is_suppressed() {
        assert_eq!(
            MergeTranslator.feed("Comparing some versions"),
            Translation::Suppress
        );
    }
}
