//! Reporting sinks for status events.
//!
//! Every command funnels its [`StatusEvent`]s through a [`Reporter`]. The
//! default sink prints a fixed-width, script-parseable table; the collecting
//! sink accumulates events in memory so composition commands can filter the
//! result of one command and feed it into another.
//!
//! # Public API
//! - [`Reporter`]: Event sink trait
//! - [`ConsoleReporter`]: Prints `STATUS VERSION PATH` columns on stdout
//! - [`CollectingReporter`]: Gathers events for programmatic reuse

use crate::core::status::StatusEvent;

/// Consumes a sequence of status events in the order they were produced.
pub trait Reporter {
    fn report(&mut self, event: StatusEvent);
}

/// Renders one event as the fixed-width table row the console reporter
/// prints. Kept separate from the reporter so tests can parse rows back.
pub fn format_event(event: &StatusEvent) -> String {
    format!(
        "{:<7} {:<15} {}",
        event.status.as_str(),
        event.version.as_deref().unwrap_or(""),
        event.path.display()
    )
}

/// Default reporter: one table row per event on stdout.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: StatusEvent) {
        println!("{}", format_event(&event));
    }
}

/// Reporter that collects events into memory. Used by the auto commands and
/// the directory-unlock step to run an inner command and inspect its result.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    events: Vec<StatusEvent>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[StatusEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<StatusEvent> {
        self.events
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, event: StatusEvent) {
        self.events.push(event);
    }
}
