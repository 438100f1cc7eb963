//! Structured JSON logger
//!
//! - One log line = one event
//! - `event` first, then `severity`, then `run_id`, then fields sorted by key
//! - Synchronous, no buffering
//! - Everything goes to stderr; stdout belongs to the query report

use std::fmt;
use std::io::{self, Write};
use std::sync::OnceLock;

static RUN_ID: OnceLock<String> = OnceLock::new();

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, process exits
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
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Process-wide structured logger.
pub struct Logger;

impl Logger {
    /// Tags every subsequent event with `run_id`.
    ///
    /// Only the first call has an effect; returns false if an id was
    /// already set.
    pub fn set_run_id(run_id: impl Into<String>) -> bool {
        RUN_ID.set(run_id.into()).is_ok()
    }

    /// The id attached to events, if one was set.
    pub fn run_id() -> Option<&'static str> {
        RUN_ID.get().map(String::as_str)
    }

    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        Self::emit(&Self::render(severity, event, Self::run_id(), fields));
    }

    /// Writes one rendered event to stderr.
    pub(crate) fn emit(line: &str) {
        let mut stderr = io::stderr().lock();
        // Logging never fails the caller.
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
    }

    /// Renders one event as a newline-terminated JSON object.
    pub(crate) fn render(
        severity: Severity,
        event: &str,
        run_id: Option<&str>,
        fields: &[(&str, &str)],
    ) -> String {
        let mut output = String::with_capacity(256);

        output.push('{');
        Self::push_pair(&mut output, "event", event);
        output.push(',');
        Self::push_pair(&mut output, "severity", severity.as_str());

        if let Some(id) = run_id {
            output.push(',');
            Self::push_pair(&mut output, "run_id", id);
        }

        let mut sorted_fields: Vec<_> = fields.iter().collect();
        sorted_fields.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted_fields {
            output.push(',');
            Self::push_pair(&mut output, key, value);
        }

        output.push_str("}\n");
        output
    }

    fn push_pair(output: &mut String, key: &str, value: &str) {
        output.push('"');
        Self::escape_json_string(output, key);
        output.push_str("\":\"");
        Self::escape_json_string(output, value);
        output.push('"');
    }

    fn escape_json_string(output: &mut String, s: &str) {
        for c in s.chars() {
            match c {
                '"' => output.push_str("\\\""),
                '\\' => output.push_str("\\\\"),
                '\n' => output.push_str("\\n"),
                '\r' => output.push_str("\\r"),
                '\t' => output.push_str("\\t"),
                c if c.is_control() => {
                    output.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => output.push(c),
            }
        }
    }

    /// Log at INFO level
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }
}
