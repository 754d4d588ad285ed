//! Output formatters for lint results

mod compact;
mod json;
mod text;

pub use compact::CompactFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::config::{OutputConfig, OutputFormat};
use crate::diagnostic::Violation;
use crate::engine::LintResult;

/// Output formatter trait
pub trait OutputFormatter: Send + Sync {
    /// Format the entire lint result
    fn format(&self, result: &LintResult) -> String;

    /// Format a single violation
    fn format_violation(&self, violation: &Violation) -> String;
}

/// Build the formatter selected by the output configuration
pub fn formatter_for(output: &OutputConfig, colored: bool) -> Box<dyn OutputFormatter> {
    match output.format {
        OutputFormat::Text => {
            let mut formatter = TextFormatter::new();
            formatter.colored = colored;
            formatter.show_stats = output.statistics;
            formatter.show_help = output.verbose;
            Box::new(formatter)
        }
        OutputFormat::Json => Box::new(JsonFormatter::new().pretty()),
        OutputFormat::Compact => Box::new(CompactFormatter::new()),
    }
}
