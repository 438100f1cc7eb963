//! Report lines for step outcomes.

use std::io::{self, Write};

use clap::ValueEnum;
use serde_json::json;

use super::operation::StepOutcome;

/// Shape of the report lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// `<label>: <json>`
    #[default]
    Text,
    /// `{"label":..,"result":..,"step":n}`
    Json,
}

/// Writes one line per step outcome.
pub struct Reporter<W: Write> {
    out: W,
    format: ReportFormat,
}

impl Reporter<io::Stdout> {
    pub fn stdout(format: ReportFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: ReportFormat) -> Self {
        Self { out, format }
    }

    pub fn report(&mut self, step: usize, label: &str, outcome: &StepOutcome) -> io::Result<()> {
        let result = outcome.to_json();

        match self.format {
            ReportFormat::Text => writeln!(self.out, "{}: {}", label, result)?,
            ReportFormat::Json => {
                let line = serde_json::to_string(&json!({
                    "step": step,
                    "label": label,
                    "result": result,
                }))?;
                writeln!(self.out, "{}", line)?;
            }
        }

        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn render(format: ReportFormat, outcome: &StepOutcome) -> String {
        let mut reporter = Reporter::new(Vec::new(), format);
        reporter.report(4, "Updated price result", outcome).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_text_line_is_prefixed_by_label() {
        let line = render(
            ReportFormat::Text,
            &StepOutcome::Updated {
                matched: 1,
                modified: 1,
            },
        );

        assert_eq!(
            line,
            "Updated price result: {\"matchedCount\":1,\"modifiedCount\":1}\n"
        );
    }

    #[test]
    fn test_json_line() {
        let line = render(
            ReportFormat::Json,
            &StepOutcome::Documents(vec![doc! { "title": "1984" }]),
        );

        assert_eq!(line.matches('\n').count(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["step"], 4);
        assert_eq!(parsed["label"], "Updated price result");
        assert_eq!(parsed["result"][0]["title"], "1984");
    }

    #[test]
    fn test_default_format_is_text() {
        assert_eq!(ReportFormat::default(), ReportFormat::Text);
    }
}
