//! Observability for enrolldb
//!
//! - Structured JSON-lines logging
//! - Typed lifecycle and record events
//! - Monotonic operation counters
//!
//! Observability is read-only: nothing here changes the outcome of an
//! operation, and a failed log write is dropped.
//!
//! # Usage
//!
//! ```ignore
//! use enrolldb::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::StudentCreated, &[("id", "42")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_created();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log an event with fields at its default severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
