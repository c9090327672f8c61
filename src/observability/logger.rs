//! Structured JSON logger
//!
//! - One JSON object per line
//! - `event` first, `severity` second, other keys sorted
//! - Synchronous, unbuffered
//! - Process-wide minimum severity

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Per-operation detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Suspicious but accepted input
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable
    Fatal = 4,
}

impl Severity {
    /// Returns the upper-case name written to the `severity` key
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Severity::Trace,
            1 => Severity::Info,
            2 => Severity::Warn,
            3 => Severity::Error,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static MIN_SEVERITY: AtomicU8 = AtomicU8::new(Severity::Info as u8);

/// A structured logger that outputs JSON lines
pub struct Logger;

impl Logger {
    /// Set the lowest severity that will be written
    pub fn set_min_severity(severity: Severity) {
        MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
    }

    /// Returns the current threshold
    pub fn min_severity() -> Severity {
        Severity::from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
    }

    /// Returns true if a record at `severity` would be written
    pub fn enabled(severity: Severity) -> bool {
        #[cfg(test)]
        if capture::active() {
            return true;
        }
        severity >= Self::min_severity()
    }

    /// Log an event. ERROR and FATAL go to stderr, everything else to stdout.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if !Self::enabled(severity) {
            return;
        }

        #[cfg(test)]
        if capture::record(&Self::format_line(severity, event, fields)) {
            return;
        }

        if severity >= Severity::Error {
            Self::log_to_writer(severity, event, fields, &mut io::stderr());
        } else {
            Self::log_to_writer(severity, event, fields, &mut io::stdout());
        }
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let line = Self::format_line(severity, event, fields);
        // Logging must never fail the caller
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    fn format_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut line = String::with_capacity(128);
        line.push('{');
        Self::push_pair(&mut line, "event", event);
        line.push(',');
        Self::push_pair(&mut line, "severity", severity.as_str());

        let mut sorted: Vec<_> = fields.iter().collect();
        sorted.sort_by_key(|(key, _)| *key);
        for (key, value) in sorted {
            line.push(',');
            Self::push_pair(&mut line, key, value);
        }

        line.push_str("}\n");
        line
    }

    fn push_pair(line: &mut String, key: &str, value: &str) {
        line.push('"');
        Self::push_escaped(line, key);
        line.push_str("\":\"");
        Self::push_escaped(line, value);
        line.push('"');
    }

    fn push_escaped(line: &mut String, s: &str) {
        for c in s.chars() {
            match c {
                '"' => line.push_str("\\\""),
                '\\' => line.push_str("\\\\"),
                '\n' => line.push_str("\\n"),
                '\r' => line.push_str("\\r"),
                '\t' => line.push_str("\\t"),
                c if c.is_control() => line.push_str(&format!("\\u{:04x}", c as u32)),
                c => line.push(c),
            }
        }
    }
}

/// Per-thread sink that diverts `Logger::log` output during tests.
///
/// While a capture is active on the current thread every severity is
/// recorded, regardless of the process-wide threshold.
#[cfg(test)]
mod capture {
    use std::cell::RefCell;

    thread_local! {
        static LINES: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
    }

    pub(super) fn active() -> bool {
        LINES.with(|lines| lines.borrow().is_some())
    }

    pub(super) fn record(line: &str) -> bool {
        LINES.with(|lines| match lines.borrow_mut().as_mut() {
            Some(buffer) => {
                buffer.push(line.to_string());
                true
            }
            None => false,
        })
    }

    pub(super) fn start() {
        LINES.with(|lines| *lines.borrow_mut() = Some(Vec::new()));
    }

    pub(super) fn finish() -> Vec<String> {
        LINES.with(|lines| lines.borrow_mut().take().unwrap_or_default())
    }
}

/// Run `f` and return its result with every log line it emitted, parsed.
#[cfg(test)]
pub fn capture_events<R>(f: impl FnOnce() -> R) -> (R, Vec<serde_json::Value>) {
    capture::start();
    let result = f();
    let lines = capture::finish();
    let events = lines
        .iter()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (result, events)
}

/// Format one log line to a buffer, bypassing the severity threshold
#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    Logger::log_to_writer(severity, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_threshold_order() {
        let ladder = [
            Severity::Trace,
            Severity::Info,
            Severity::Warn,
            Severity::Error,
            Severity::Fatal,
        ];
        for pair in ladder.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        for severity in ladder {
            assert_eq!(Severity::from_u8(severity as u8), severity);
        }
    }

    #[test]
    fn test_severity_serde_lowercase() {
        let parsed: Severity = serde_json::from_str("\"warn\"").unwrap();
        assert_eq!(parsed, Severity::Warn);
        assert_eq!(serde_json::to_string(&Severity::Trace).unwrap(), "\"trace\"");
    }

    #[test]
    fn test_combined_line_shape() {
        let output = capture_log(
            Severity::Trace,
            "DESCRIPTOR_COMBINED",
            &[("left_fields", "2"), ("right_fields", "3")],
        );

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "DESCRIPTOR_COMBINED");
        assert_eq!(parsed["severity"], "TRACE");
        assert_eq!(parsed["left_fields"], "2");
        assert_eq!(parsed["right_fields"], "3");
        assert!(output.starts_with("{\"event\":\"DESCRIPTOR_COMBINED\",\"severity\""));
        assert_eq!(output.matches('\n').count(), 1);
    }

    #[test]
    fn test_duplicate_name_keys_sorted() {
        let output = capture_log(
            Severity::Warn,
            "DUPLICATE_FIELD_NAME",
            &[("name", "id"), ("first_index", "0"), ("duplicate_index", "4")],
        );
        let reordered = capture_log(
            Severity::Warn,
            "DUPLICATE_FIELD_NAME",
            &[("duplicate_index", "4"), ("name", "id"), ("first_index", "0")],
        );
        assert_eq!(output, reordered);

        let duplicate_pos = output.find("duplicate_index").unwrap();
        let first_pos = output.find("first_index").unwrap();
        let name_pos = output.find("\"name\"").unwrap();
        assert!(duplicate_pos < first_pos);
        assert!(first_pos < name_pos);
    }

    #[test]
    fn test_field_names_escaped() {
        // Field names are caller data and may hold anything
        let name = "total \"usd\"\\\n\t\u{1}";
        let output = capture_log(Severity::Warn, "DUPLICATE_FIELD_NAME", &[("name", name)]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["name"], name);
    }

    #[test]
    fn test_capture_diverts_log_calls() {
        let ((), events) = capture_events(|| {
            Logger::log(Severity::Trace, "DESCRIPTOR_COMBINED", &[("left_fields", "1")]);
            Logger::log(Severity::Error, "CONFIG_LOADED", &[]);
        });

        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["severity"], "TRACE");
        assert_eq!(events[1]["event"], "CONFIG_LOADED");

        // The sink is gone once the capture finishes
        let ((), after) = capture_events(|| {});
        assert!(after.is_empty());
        assert!(!capture::active());
    }

    #[test]
    fn test_threshold_filter() {
        let previous = Logger::min_severity();

        Logger::set_min_severity(Severity::Warn);
        assert!(!Logger::enabled(Severity::Trace));
        assert!(!Logger::enabled(Severity::Info));
        assert!(Logger::enabled(Severity::Warn));
        assert!(Logger::enabled(Severity::Fatal));

        Logger::set_min_severity(previous);
    }
}
