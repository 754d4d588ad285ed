//! identspell - identifier spelling linter
//!
//! Checks that the names of declarations are made of correctly spelled
//! words. A host parser supplies the declarations (kind, name, offsets);
//! this crate splits each name into words, filters abbreviations and
//! excluded words, and asks a spell checker about the rest.
//!
//! # Architecture
//!
//! ```text
//! CLI/API -> Engine -> SpellingEvaluator -> tokenizer + SpellChecker
//! ```
//!
//! The engine loads declaration files, walks every declaration (including
//! nested ones), and collects at most one violation per declaration.
//!
//! # Example
//!
//! ```
//! use identspell::{evaluate, DeclarationKind, SpellingConfiguration, WordListChecker};
//!
//! let checker = WordListChecker::new().with_words("en", ["my", "variable"]);
//! let config = SpellingConfiguration::default();
//!
//! let violation = evaluate("myVarible", DeclarationKind::VarGlobal, 0, &config, &checker)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(violation.misspelled, vec!["Varible"]);
//! ```

pub mod checker;
pub mod config;
pub mod declaration;
pub mod diagnostic;
pub mod engine;
pub mod evaluator;
pub mod output;
pub mod rule;
pub mod tokenizer;

// Re-export main types
pub use checker::{CachingChecker, SpellCheckError, SpellChecker, WordListChecker};
pub use config::{Config, ConfigError, SpellingConfiguration};
pub use declaration::{Accessibility, Declaration, DeclarationFile, DeclarationKind};
pub use diagnostic::{Location, Severity, Violation};
pub use engine::{Engine, LintError, LintResult};
pub use evaluator::{evaluate, SpellingEvaluator};
pub use output::{CompactFormatter, JsonFormatter, OutputFormatter, TextFormatter};
pub use rule::{Rule, RuleCategory};
pub use tokenizer::{tokenize, Token, TokenSequence};
