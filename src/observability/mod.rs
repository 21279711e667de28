//! Observability subsystem for csvdb
//!
//! Table loads, resets, exports and query outcomes are reported as typed
//! [`Event`]s. Each event becomes one JSON line on stderr, so command output
//! on stdout is never interleaved with logs. Events below the configured
//! [`Severity`] are dropped before formatting.
//!
//!
//! ```ignore
//! use csvdb::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Info);
//! log_event_with_fields(Event::TableLoaded, &[("path", "people.csv")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{format_line, Logger, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // Error is never below the threshold
        assert!(Logger::enabled(Severity::Error));
        log_event(Event::TableReset);
        log_event_with_fields(Event::ConfigLoaded, &[("path", "/tmp/csvdb.json")]);
    }
}
