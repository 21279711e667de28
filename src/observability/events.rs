//! Observable events in csvdb
//!
//! Events are explicit and typed; each one carries a fixed severity.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded
    ConfigLoaded,

    // Database
    /// Database directory enumerated
    DatabaseOpened,

    // Table lifecycle
    /// Table header parsed and file handle open
    TableLoaded,
    /// Table could not be loaded
    TableLoadFailed,
    /// Table reopened for a new scan
    TableReset,
    /// Table written to another path
    TableExported,

    // Query processing
    /// Query text parsed into an expression
    QueryParsed,
    /// Expression failed its validity check
    QueryRejected,
    /// Expression executed
    QueryComplete,
}

impl Event {
    /// Returns the event name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DatabaseOpened => "DATABASE_OPENED",
            Event::TableLoaded => "TABLE_LOADED",
            Event::TableLoadFailed => "TABLE_LOAD_FAILED",
            Event::TableReset => "TABLE_RESET",
            Event::TableExported => "TABLE_EXPORTED",
            Event::QueryParsed => "QUERY_PARSED",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::QueryComplete => "QUERY_COMPLETE",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::TableLoadFailed | Event::QueryRejected => Severity::Warn,
            Event::TableReset | Event::QueryParsed => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
