//! JSON output formatter

use super::OutputFormatter;
use crate::diagnostic::Violation;
use crate::engine::LintResult;
use serde::Serialize;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter {
    /// Pretty print with indentation
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn render<T: Serialize>(&self, value: &T) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_default()
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    violations: Vec<JsonViolation<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonViolation<'a> {
    rule_id: &'a str,
    severity: String,
    message: &'a str,
    file: String,
    offset: usize,
    length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    misspelled: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<&'a str>,
}

impl<'a> From<&'a Violation> for JsonViolation<'a> {
    fn from(v: &'a Violation) -> Self {
        Self {
            rule_id: &v.rule_id,
            severity: v.severity.to_string(),
            message: &v.message,
            file: v.location.file.display().to_string(),
            offset: v.location.offset,
            length: v.location.length,
            name: v.name.as_deref(),
            misspelled: &v.misspelled,
            help: v.help.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct JsonSummary {
    files_processed: usize,
    declarations_checked: usize,
    files_with_errors: usize,
    files_with_warnings: usize,
    error_count: usize,
    warning_count: usize,
    info_count: usize,
    duration_ms: u128,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &LintResult) -> String {
        let output = JsonOutput {
            violations: result.violations.iter().map(JsonViolation::from).collect(),
            summary: JsonSummary {
                files_processed: result.files_processed,
                declarations_checked: result.declarations_checked,
                files_with_errors: result.files_with_errors,
                files_with_warnings: result.files_with_warnings,
                error_count: result.error_count,
                warning_count: result.warning_count,
                info_count: result.info_count,
                duration_ms: result.duration.as_millis(),
            },
        };
        self.render(&output)
    }

    fn format_violation(&self, violation: &Violation) -> String {
        self.render(&JsonViolation::from(violation))
    }
}
