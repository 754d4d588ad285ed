//! Rule description for the identifier spelling rule

use crate::diagnostic::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the spelling rule
pub const IDENTIFIER_SPELLING: &str = "identifier_spelling";

/// Rule category for grouping related rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    /// Code that is definitely wrong or useless
    Correctness,
    /// Idiomatic and consistent style rules
    #[default]
    Style,
    /// Extra strict rules that may have false positives
    Pedantic,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCategory::Correctness => write!(f, "correctness"),
            RuleCategory::Style => write!(f, "style"),
            RuleCategory::Pedantic => write!(f, "pedantic"),
        }
    }
}

/// A lint rule definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Unique rule identifier
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Detailed description
    pub description: String,

    /// Default severity level
    #[serde(default)]
    pub severity: Severity,

    /// Rule category
    #[serde(default)]
    pub category: RuleCategory,

    /// Whether the rule must be enabled explicitly
    #[serde(default)]
    pub opt_in: bool,

    /// Rationale explaining why this rule exists
    #[serde(default)]
    pub rationale: Option<String>,

    /// Declarations that trigger the rule (`↓` marks the reported position)
    #[serde(default)]
    pub triggering_examples: Vec<String>,

    /// Declarations that do not trigger the rule
    #[serde(default)]
    pub non_triggering_examples: Vec<String>,

    /// Tags for categorization
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Rule {
    /// The identifier spelling rule
    pub fn identifier_spelling() -> Self {
        Self {
            id: IDENTIFIER_SPELLING.to_string(),
            name: "Identifier Spelling".to_string(),
            description: "Identifier names should be correctly spelled in the configured language."
                .to_string(),
            severity: Severity::Warning,
            category: RuleCategory::Style,
            opt_in: true,
            rationale: Some(
                "Misspelled words in names make code harder to search and read. Words shorter \
                 than the configured minimum length are treated as abbreviations and skipped."
                    .to_string(),
            ),
            triggering_examples: [
                "let my↓IncorectLet = 0",
                "var my↓IncorectVariable = 0",
                "private let _my↓SeperateVariable = 0",
                "func is↓Oparator(name: String) -> Bool",
                "func isEven(↓nuber: Int) -> Bool",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            non_triggering_examples: [
                "let myLet = 0",
                "var myVariable = 0",
                "private let _myLet = 0",
                "let myURLVariable = 0",
                "let URL: NSURL? = nil",
                "let XMLString: String? = nil",
                "override var i = 0",
                "enum Foo { case myEnum }",
                "func isOperator(name: String) -> Bool",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            tags: vec!["naming".to_string(), "spelling".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_spelling_rule() {
        let rule = Rule::identifier_spelling();

        assert_eq!(rule.id, "identifier_spelling");
        assert_eq!(rule.name, "Identifier Spelling");
        assert_eq!(rule.severity, Severity::Warning);
        assert_eq!(rule.category, RuleCategory::Style);
        assert!(rule.opt_in);
        assert_eq!(rule.tags, vec!["naming", "spelling"]);
    }

    #[test]
    fn test_triggering_examples_mark_position() {
        let rule = Rule::identifier_spelling();
        assert!(rule.triggering_examples.iter().all(|e| e.contains('↓')));
        assert!(rule
            .non_triggering_examples
            .iter()
            .all(|e| !e.contains('↓')));
    }

    #[test]
    fn test_category_display() {
        assert_eq!(RuleCategory::Style.to_string(), "style");
        assert_eq!(RuleCategory::Correctness.to_string(), "correctness");
    }

    #[test]
    fn test_rule_yaml_roundtrip_keeps_examples() {
        let rule = Rule::identifier_spelling();
        let yaml = serde_yaml::to_string(&rule).unwrap();
        let parsed: Rule = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.id, rule.id);
        assert_eq!(parsed.triggering_examples.len(), 5);
    }
}
