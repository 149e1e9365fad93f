//! Structured JSON logger
//!
//! - One line per event
//! - `event` first, then `severity`, then fields sorted by key
//! - Synchronous, no buffering
//! - WARN and below go to stdout, ERROR and above to stderr

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// Log severity levels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Per-request detail
    Trace = 0,
    /// Normal operations
    #[default]
    Info = 1,
    /// Rejected requests
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Process cannot continue
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    fn from_u8(level: u8) -> Self {
        match level {
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

/// Lines below this level are discarded
static MIN_SEVERITY: AtomicU8 = AtomicU8::new(Severity::Info as u8);

/// Process-wide structured logger
pub struct Logger;

impl Logger {
    /// Set the minimum severity that is written
    pub fn set_min_severity(severity: Severity) {
        MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
    }

    pub fn min_severity() -> Severity {
        Severity::from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
    }

    pub fn enabled(severity: Severity) -> bool {
        severity >= Self::min_severity()
    }

    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if !Self::enabled(severity) {
            return;
        }
        if severity >= Severity::Error {
            Self::write_line(&mut io::stderr().lock(), severity, event, fields);
        } else {
            Self::write_line(&mut io::stdout().lock(), severity, event, fields);
        }
    }

    fn write_line<W: Write>(writer: &mut W, severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let line = format_line(severity, event, fields);
        // One write per line; failures are dropped
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }
}

/// Render one JSON log line, newline-terminated
pub(crate) fn format_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut sorted: Vec<&(&str, &str)> = fields.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);

    let mut out = String::with_capacity(128);
    out.push_str("{\"event\":");
    push_json_str(&mut out, event);
    out.push_str(",\"severity\":");
    push_json_str(&mut out, severity.as_str());
    for (key, value) in sorted {
        out.push(',');
        push_json_str(&mut out, key);
        out.push(':');
        push_json_str(&mut out, value);
    }
    out.push_str("}\n");
    out
}

fn push_json_str(out: &mut String, s: &str) {
    match serde_json::to_string(s) {
        Ok(quoted) => out.push_str(&quoted),
        Err(_) => out.push_str("\"\""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn test_severity_from_config() {
        let s: Severity = serde_json::from_str("\"warn\"").unwrap();
        assert_eq!(s, Severity::Warn);
    }

    #[test]
    fn test_log_json_format() {
        let output = format_line(Severity::Info, "TEST_EVENT", &[]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "TEST_EVENT");
        assert_eq!(parsed["severity"], "INFO");
    }

    #[test]
    fn test_log_deterministic_ordering() {
        let output1 = format_line(Severity::Info, "TEST", &[("zebra", "1"), ("apple", "2"), ("mango", "3")]);
        let output2 = format_line(Severity::Info, "TEST", &[("apple", "2"), ("mango", "3"), ("zebra", "1")]);
        assert_eq!(output1, output2);

        let apple = output1.find("apple").unwrap();
        let mango = output1.find("mango").unwrap();
        let zebra = output1.find("zebra").unwrap();
        assert!(apple < mango && mango < zebra);
        assert!(output1.find("\"event\"").unwrap() < output1.find("\"severity\"").unwrap());
    }

    #[test]
    fn test_log_escapes_special_chars() {
        let output = format_line(Severity::Warn, "TEST", &[("message", "hello \"world\"\nline2")]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["message"], "hello \"world\"\nline2");
        assert_eq!(output.matches('\n').count(), 1);
        assert!(output.ends_with('\n'));
    }
}
