//! Observable events
//!
//! Every lifecycle step and record outcome has a fixed event name.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    ConfigLoaded,
    StoreOpened,
    ServerStarting,
    Serving,
    ShutdownComplete,

    // Record outcomes
    StudentCreated,
    StudentUpdated,
    StudentDeleted,
    StudentSearched,
    ValidationRejected,
    StudentNotFound,
    PersistenceFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreOpened => "STORE_OPENED",
            Event::ServerStarting => "SERVER_STARTING",
            Event::Serving => "ENROLLDB_SERVING",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::StudentCreated => "STUDENT_CREATED",
            Event::StudentUpdated => "STUDENT_UPDATED",
            Event::StudentDeleted => "STUDENT_DELETED",
            Event::StudentSearched => "STUDENT_SEARCH",
            Event::ValidationRejected => "VALIDATION_REJECTED",
            Event::StudentNotFound => "STUDENT_NOT_FOUND",
            Event::PersistenceFailed => "PERSISTENCE_FAILED",
        }
    }

    /// Default severity for this event
    pub fn severity(&self) -> Severity {
        match self {
            Event::StudentSearched => Severity::Trace,
            Event::ValidationRejected | Event::StudentNotFound => Severity::Warn,
            Event::PersistenceFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
