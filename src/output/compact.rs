//! Compact output formatter
//!
//! One line per violation, minimal output for scripting.

use super::OutputFormatter;
use crate::diagnostic::Violation;
use crate::engine::LintResult;

/// Compact one-line-per-violation formatter
#[derive(Default)]
pub struct CompactFormatter;

impl CompactFormatter {
    /// Create a new compact formatter
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for CompactFormatter {
    fn format(&self, result: &LintResult) -> String {
        result
            .violations
            .iter()
            .map(|v| self.format_violation(v) + "\n")
            .collect()
    }

    fn format_violation(&self, violation: &Violation) -> String {
        format!(
            "{}:{}: {}: {}: {}",
            violation.location.file.display(),
            violation.location.offset,
            violation.severity,
            violation.rule_id,
            violation.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Location, Severity};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn violation(message: &str, severity: Severity, offset: usize) -> Violation {
        Violation::new("identifier_spelling", severity, message, Location::new(offset))
            .in_file(PathBuf::from("Model.swift"))
    }

    #[test]
    fn test_compact_format() {
        let formatter = CompactFormatter::new();
        let v = violation("Variable 'myVarible' is misspelled", Severity::Warning, 42);

        assert_eq!(
            formatter.format_violation(&v),
            "Model.swift:42: warning: identifier_spelling: Variable 'myVarible' is misspelled"
        );
    }

    #[test]
    fn test_compact_result() {
        let formatter = CompactFormatter::new();
        let mut result = LintResult::default();
        result.push(violation("E1", Severity::Error, 1));
        result.push(violation("W1", Severity::Warning, 9));

        let output = formatter.format(&result);
        assert_eq!(output.lines().count(), 2);
    }
}
