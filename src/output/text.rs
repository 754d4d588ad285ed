//! Human-readable text output formatter

use super::OutputFormatter;
use crate::diagnostic::{Severity, Violation};
use crate::engine::LintResult;
use colored::*;
use std::collections::BTreeMap;

/// Text formatter with optional color support
pub struct TextFormatter {
    /// Enable colored output
    pub colored: bool,

    /// Show help text
    pub show_help: bool,

    /// Show statistics
    pub show_stats: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            colored: true,
            show_help: true,
            show_stats: true,
        }
    }
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn severity_str(&self, severity: Severity) -> ColoredString {
        let s = severity.to_string();
        if !self.colored {
            return s.normal();
        }
        match severity {
            Severity::Error => s.red().bold(),
            Severity::Warning => s.yellow().bold(),
            Severity::Info => s.blue(),
        }
    }

    fn paint(&self, s: String, color: Color) -> String {
        if self.colored {
            s.color(color).to_string()
        } else {
            s
        }
    }

    fn count(&self, n: usize, singular: &str, plural: &str, color: Color) -> Option<String> {
        (n > 0).then(|| self.paint(format!("{} {}", n, if n == 1 { singular } else { plural }), color))
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &LintResult) -> String {
        let mut output = String::new();

        let mut by_file: BTreeMap<_, Vec<_>> = BTreeMap::new();
        for violation in &result.violations {
            by_file
                .entry(&violation.location.file)
                .or_default()
                .push(violation);
        }

        for (file, violations) in &by_file {
            let header = file.display().to_string();
            if self.colored {
                output.push_str(&format!("{}\n", header.underline()));
            } else {
                output.push_str(&format!("{}\n", header));
            }

            for violation in violations {
                output.push_str(&self.format_violation(violation));
            }
            output.push('\n');
        }

        if self.show_stats {
            output.push_str(&format!(
                "{} {} processed, {} {} checked",
                result.files_processed,
                if result.files_processed == 1 { "file" } else { "files" },
                result.declarations_checked,
                if result.declarations_checked == 1 {
                    "declaration"
                } else {
                    "declarations"
                }
            ));

            let counts: Vec<String> = [
                self.count(result.error_count, "error", "errors", Color::Red),
                self.count(result.warning_count, "warning", "warnings", Color::Yellow),
                self.count(result.info_count, "info", "infos", Color::Blue),
            ]
            .into_iter()
            .flatten()
            .collect();

            if !counts.is_empty() {
                output.push_str(&format!(": {}", counts.join(", ")));
            }
            output.push('\n');

            output.push_str(&format!(
                "Finished in {:.2}s\n",
                result.duration.as_secs_f64()
            ));
        }

        output
    }

    fn format_violation(&self, violation: &Violation) -> String {
        let mut output = format!(
            "{}:{}: {}[{}]: {}\n",
            violation.location.file.display(),
            violation.location.offset,
            self.severity_str(violation.severity),
            self.paint(violation.rule_id.clone(), Color::Cyan),
            violation.message
        );

        if self.show_help {
            if let Some(help) = &violation.help {
                output.push_str(&format!(
                    "   {} help: {}\n",
                    self.paint("=".to_string(), Color::Blue),
                    help
                ));
            }
        }

        output
    }
}
