//! Violation types for linting results

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for violations
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,
    /// Warning - potential issue
    #[default]
    Warning,
    /// Error - definite problem
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" | "hint" | "note" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" | "err" => Ok(Severity::Error),
            _ => Err(()),
        }
    }
}

/// Position of a violation in the linted source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Source file path (empty until the engine attaches one)
    pub file: PathBuf,
    /// Byte offset from the start of the file
    pub offset: usize,
    /// Length of the highlighted region in bytes
    pub length: usize,
}

impl Location {
    pub fn new(offset: usize) -> Self {
        Self {
            file: PathBuf::new(),
            offset,
            length: 0,
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }
}

/// A reported spelling violation (or a file-level failure)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule ID that triggered this violation
    pub rule_id: String,
    /// Severity level
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Source location
    pub location: Location,
    /// Name of the offending declaration
    #[serde(default)]
    pub name: Option<String>,
    /// Misspelled tokens, in identifier order
    #[serde(default)]
    pub misspelled: Vec<String>,
    /// Help text (usually rule description)
    #[serde(default)]
    pub help: Option<String>,
}

impl Violation {
    /// Create a new violation
    pub fn new(rule_id: &str, severity: Severity, message: &str, location: Location) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            severity,
            message: message.to_string(),
            location,
            name: None,
            misspelled: Vec::new(),
            help: None,
        }
    }

    /// Record the declaration name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Record the misspelled tokens
    pub fn with_misspelled(mut self, words: Vec<String>) -> Self {
        self.misspelled = words;
        self
    }

    /// Add help text
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Attach the source file
    pub fn in_file(mut self, file: PathBuf) -> Self {
        self.location.file = file;
        self
    }
}
