//! Observability for tupledesc
//!
//! Structured JSON logging of descriptor lifecycle events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. Logging never changes the result of an operation
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use tupledesc::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Trace);
//! log_event_with_fields(Event::ConfigLoaded, Severity::Info, &[("path", "tupledesc.json")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

#[cfg(test)]
pub(crate) use logger::capture_events;

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, severity: Severity, fields: &[(&str, &str)]) {
    Logger::log(severity, event.as_str(), fields);
}
