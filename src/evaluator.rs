//! Spelling evaluation of a single declaration
//!
//! ```text
//! name -> normalize -> tokenize -> exclusion/length filter
//!      -> phrase check -> per-token check -> Violation
//! ```
//!
//! At most one violation is produced per declaration. It is anchored at the
//! first misspelled token and lists every misspelled token in the name.

use crate::checker::{SpellCheckError, SpellChecker};
use crate::config::SpellingConfiguration;
use crate::declaration::{Declaration, DeclarationKind};
use crate::diagnostic::{Location, Violation};
use crate::rule::{Rule, IDENTIFIER_SPELLING};
use crate::tokenizer::{tokenize, TokenSequence};
use log::debug;
use std::sync::Arc;

/// Evaluates declarations against a spelling policy
pub struct SpellingEvaluator {
    config: SpellingConfiguration,
    checker: Arc<dyn SpellChecker>,
    help: String,
}

impl SpellingEvaluator {
    /// Create an evaluator
    ///
    /// Fails if the checker cannot serve the configured language.
    pub fn new(
        config: SpellingConfiguration,
        checker: Arc<dyn SpellChecker>,
    ) -> Result<Self, SpellCheckError> {
        if !checker.supports_language(config.language()) {
            return Err(SpellCheckError::UnsupportedLanguage(
                config.language().to_string(),
            ));
        }

        Ok(Self {
            config,
            checker,
            help: Rule::identifier_spelling().description,
        })
    }

    /// The spelling policy in use
    pub fn config(&self) -> &SpellingConfiguration {
        &self.config
    }

    /// Evaluate a host declaration
    ///
    /// Overrides and declarations without a name or offset are not applicable.
    pub fn evaluate_declaration(
        &self,
        declaration: &Declaration,
    ) -> Result<Option<Violation>, SpellCheckError> {
        if declaration.is_override() {
            return Ok(None);
        }

        let (Some(anchor), Some((name, prefix))) =
            (declaration.anchor_offset(), declaration.checkable_name())
        else {
            return Ok(None);
        };

        let violation = evaluate(
            name,
            declaration.kind,
            anchor + prefix,
            &self.config,
            self.checker.as_ref(),
        )?;

        Ok(violation.map(|v| v.with_help(&self.help)))
    }
}

/// Check if a declaration kind is evaluated under a policy
pub fn is_checkable(kind: DeclarationKind, config: &SpellingConfiguration) -> bool {
    kind.is_variable()
        || kind.is_parameter()
        || kind.is_function()
        || (config.check_types() && kind.is_type())
}

/// The linguistically meaningful part of a name
///
/// Function names lose their parameter list (`isEven(number:)` -> `isEven`).
pub fn normalize_name(name: &str, kind: DeclarationKind) -> &str {
    if kind.is_function() {
        name.split('(').next().unwrap_or(name)
    } else {
        name
    }
}

/// Tokens of `name` that are subject to spell checking
pub fn checkable_tokens(
    name: &str,
    kind: DeclarationKind,
    config: &SpellingConfiguration,
) -> TokenSequence {
    tokenize(normalize_name(name, kind))
        .into_iter()
        .filter(|t| !config.is_excluded(t) && !config.is_too_short(t))
        .collect()
}

/// Evaluate one name
///
/// `position` is the byte offset of `name` in the source. The violation is
/// reported at `position` plus the offset of the first misspelled token.
pub fn evaluate(
    name: &str,
    kind: DeclarationKind,
    position: usize,
    config: &SpellingConfiguration,
    checker: &dyn SpellChecker,
) -> Result<Option<Violation>, SpellCheckError> {
    if !is_checkable(kind, config) {
        return Ok(None);
    }

    let tokens = checkable_tokens(name, kind, config);
    if tokens.is_empty() {
        return Ok(None);
    }

    let language = config.language();
    if !checker.check_phrase(&tokens.join(" "), language)? {
        return Ok(None);
    }

    let mut misspelled = Vec::new();
    for token in tokens {
        if checker.is_word_misspelled(&token, language)? {
            misspelled.push(token);
        }
    }

    let Some(first) = misspelled.first() else {
        debug!(
            "Phrase check flagged '{}' but no single token is misspelled",
            name
        );
        return Ok(None);
    };

    let token_offset = name.find(first.as_str()).unwrap_or(0);
    let location = Location::new(position + token_offset).with_length(first.len());

    let words = misspelled
        .iter()
        .map(|w| format!("'{}'", w))
        .collect::<Vec<_>>()
        .join(", ");
    let message = format!(
        "{} '{}' contains incorrectly spelled word(s): {}",
        kind.label(),
        name,
        words
    );

    debug!("{} at offset {}", message, location.offset);

    Ok(Some(
        Violation::new(IDENTIFIER_SPELLING, config.severity(), &message, location)
            .with_name(name)
            .with_misspelled(misspelled),
    ))
}
