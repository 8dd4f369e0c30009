//! Output translation plumbing.
//!
//! cleartool speaks free text, one line at a time. Each command variant owns
//! a small rule set that turns those lines into [`StatusEvent`]s; this
//! module defines the narrow interface those rule sets sit behind so they
//! can be unit-tested against captured transcripts, independent of any
//! process invocation.
//!
//! Unrecognised lines are deliberately fail-open: they are surfaced as a
//! warning and processing continues, because aborting mid-stream would
//! leave the user uncertain which of several targets succeeded.
//!
//! # Public API
//! - [`Translator`]: `feed(line) -> Translation`, one rule set per command
//! - [`Translation`]: What to do with one line of output
//! - [`dispatch`]: Routes one translated line to a reporter

use crate::core::report::Reporter;
use crate::core::status::StatusEvent;

/// The outcome of translating a single output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// Structured events derived from the line, in emission order
    Events(Vec<StatusEvent>),
    /// Progress noise; drop silently
    Suppress,
    /// Human-oriented output (diff/log bodies); echo verbatim
    PassThrough,
    /// No rule matched; surface as a diagnostic
    Unrecognized,
}

impl Translation {
    /// Shorthand for a single-event translation
    pub fn event(event: StatusEvent) -> Self {
        Translation::Events(vec![event])
    }
}

/// Per-command line-recognition rules. Implementations must be stateless
/// between lines: feeding the same noise line twice produces the same
/// result twice, with no accumulated side state.
pub trait Translator {
    fn feed(&self, line: &str) -> Translation;
}

/// Route one line through a translator to a reporter. Returns `true` when
/// the line was recognised (translated to events, suppressed, or passed
/// through); a mutating command that never sees a recognised line can use
/// this to flag a suspiciously silent invocation.
pub fn dispatch<T: Translator>(translator: &T, line: &str, reporter: &mut dyn Reporter) -> bool {
    match translator.feed(line) {
        Translation::Events(events) => {
            for event in events {
                reporter.report(event);
            }
            true
        }
        Translation::Suppress => true,
        Translation::PassThrough => {
            println!("{line}");
            true
        }
        Translation::Unrecognized => {
            log::warn!("unrecognised output: {line}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::CollectingReporter;
    use crate::core::status::Status;

    struct ToyTranslator;

    impl Translator for ToyTranslator {
        fn feed(&self, line: &str) -> Translation {
            match line {
                "noise" => Translation::Suppress,
                "event" => Translation::event(StatusEvent::new("a.txt", Status::Local)),
                _ => Translation::Unrecognized,
            }
        }
    }

    #[test]
    fn test_dispatch_reports_events() {
        let mut collector = CollectingReporter::new();
        assert!(dispatch(&ToyTranslator, "event", &mut collector));
        assert_eq!(collector.events().len(), 1);
        assert_eq!(collector.events()[0].status, Status::Local);
    }

    #[test]
    fn test_noise_suppression_is_idempotent() {
        let mut collector = CollectingReporter::new();
        assert!(dispatch(&ToyTranslator, "noise", &mut collector));
        assert!(dispatch(&ToyTranslator, "noise", &mut collector));
        assert!(collector.events().is_empty());
    }

    #[test]
    fn test_unrecognised_line_is_nonfatal() {
        let mut collector = CollectingReporter::new();
        assert!(!dispatch(&ToyTranslator, "garbage", &mut collector));
        // Subsequent lines continue to translate normally.
        assert!(dispatch(&ToyTranslator, "event", &mut collector));
        assert_eq!(collector.events().len(), 1);
    }
}
