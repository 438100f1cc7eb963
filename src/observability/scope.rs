//! ObservationScope for automatic begin/complete logging
//!
//! - Logs `{name}_BEGIN` on creation
//! - Logs `{name}_COMPLETE` or `{name}_FAILED` when finished, with `elapsed_ms`
//! - Logs `{name}_INCOMPLETE` on drop if neither happened

use std::time::Instant;

use super::logger::{Logger, Severity};

/// A scope that logs the start and outcome of one unit of work.
///
/// ```ignore
/// let scope = ObservationScope::with_fields("STEP", &[("label", "Page 1")]);
/// // ... run the query ...
/// scope.complete_with_fields(&[("documents", "5")]);
/// ```
pub struct ObservationScope<'a> {
    name: &'a str,
    finished: bool,
    fields: Vec<(&'a str, String)>,
    timer: Timer,
}

impl<'a> ObservationScope<'a> {
    /// Create a new observation scope
    pub fn new(name: &'a str) -> Self {
        Self::with_fields(name, &[])
    }

    /// Create a new observation scope whose fields repeat on every event
    pub fn with_fields(name: &'a str, fields: &[(&'a str, &str)]) -> Self {
        Logger::info(&format!("{}_BEGIN", name), fields);

        Self {
            name,
            finished: false,
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            timer: Timer::new(),
        }
    }

    /// Mark the scope as successfully completed
    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    /// Mark the scope as successfully completed with additional fields
    pub fn complete_with_fields(mut self, extra_fields: &[(&str, &str)]) {
        let line = self.finish(Severity::Info, "COMPLETE", extra_fields);
        Logger::emit(&line);
    }

    /// Mark the scope as failed with a reason
    pub fn fail(mut self, reason: &str) {
        let line = self.finish(Severity::Error, "FAILED", &[("reason", reason)]);
        Logger::emit(&line);
    }

    /// Check if the scope has been finished
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn finish(&mut self, severity: Severity, outcome: &str, extra_fields: &[(&str, &str)]) -> String {
        self.finished = true;
        let elapsed = self.timer.elapsed_ms();

        let mut all_fields = self.field_refs();
        all_fields.extend(extra_fields.iter().copied());
        all_fields.push(("elapsed_ms", elapsed.as_str()));

        let event = format!("{}_{}", self.name, outcome);
        Logger::render(severity, &event, Logger::run_id(), &all_fields)
    }

    /// The event logged when the scope ends unfinished, if it would be.
    fn incomplete_event(&self) -> Option<String> {
        if self.finished {
            return None;
        }
        let mut fields = self.field_refs();
        fields.push(("reason", "scope dropped without completion"));
        let event = format!("{}_INCOMPLETE", self.name);
        Some(Logger::render(Severity::Warn, &event, Logger::run_id(), &fields))
    }

    fn field_refs(&self) -> Vec<(&str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect()
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if let Some(line) = self.incomplete_event() {
            Logger::emit(&line);
        }
    }
}
/// A simple duration timer for logging elapsed time
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed milliseconds as a string
    pub fn elapsed_ms(&self) -> String {
        self.start.elapsed().as_millis().to_string()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_starts_unfinished() {
        let scope = ObservationScope::new("TEST");
        assert!(!scope.is_finished());
        scope.complete();
    }

    fn parse(line: &str) -> serde_json::Value {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn test_scope_complete_with_fields() {
        let mut scope = ObservationScope::with_fields("STEP", &[("label", "Page 1")]);
        let line = scope.finish(Severity::Info, "COMPLETE", &[("documents", "5")]);

        assert!(scope.is_finished());
        let event = parse(&line);
        assert_eq!(event["event"], "STEP_COMPLETE");
        assert_eq!(event["severity"], "INFO");
        assert_eq!(event["label"], "Page 1");
        assert_eq!(event["documents"], "5");
        assert!(event["elapsed_ms"].as_str().unwrap().parse::<u64>().is_ok());
    }

    #[test]
    fn test_scope_fail() {
        let mut scope = ObservationScope::with_fields("STEP", &[("label", "Page 2")]);
        let line = scope.finish(Severity::Error, "FAILED", &[("reason", "server selection timeout")]);

        assert!(scope.is_finished());
        let event = parse(&line);
        assert_eq!(event["event"], "STEP_FAILED");
        assert_eq!(event["severity"], "ERROR");
        assert_eq!(event["reason"], "server selection timeout");
        assert!(event.get("elapsed_ms").is_some());
    }

    #[test]
    fn test_scope_drop_without_complete() {
        let scope = ObservationScope::with_fields("STEP", &[("label", "Page 1")]);

        let event = parse(&scope.incomplete_event().unwrap());
        assert_eq!(event["event"], "STEP_INCOMPLETE");
        assert_eq!(event["severity"], "WARN");
        assert_eq!(event["label"], "Page 1");
        drop(scope);
    }

    #[test]
    fn test_finished_scope_logs_nothing_on_drop() {
        let mut scope = ObservationScope::new("TEST");
        scope.finish(Severity::Info, "COMPLETE", &[]);
        assert!(scope.incomplete_event().is_none());
    }

    #[test]
    fn test_timer() {
        let timer = Timer::new();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let ms: u64 = timer.elapsed_ms().parse().unwrap();
        assert!(ms >= 10);
    }
}
