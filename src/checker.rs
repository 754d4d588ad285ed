//! Spell-check service abstraction
//!
//! The evaluator never talks to a dictionary directly. It receives a
//! [`SpellChecker`] and only asks yes/no questions about words and phrases
//! for a language code.

use log::{debug, info};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::RwLock;
use thiserror::Error;

/// Error raised by a spell checker
#[derive(Debug, Error)]
pub enum SpellCheckError {
    #[error("No dictionary available for language '{0}'")]
    UnsupportedLanguage(String),

    #[error("Failed to load dictionary for '{language}': {source}")]
    Dictionary {
        language: String,
        #[source]
        source: std::io::Error,
    },
}

/// A reentrant spell-check service keyed by language code
pub trait SpellChecker: Send + Sync {
    /// Check whether a single word is misspelled
    fn is_word_misspelled(&self, word: &str, language: &str) -> Result<bool, SpellCheckError>;

    /// Check whether a space-separated phrase contains any misspelling
    fn check_phrase(&self, text: &str, language: &str) -> Result<bool, SpellCheckError> {
        for word in text.split_whitespace() {
            if self.is_word_misspelled(word, language)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Check whether the checker can serve a language
    fn supports_language(&self, language: &str) -> bool;
}

/// Checker backed by plain word lists, one per language
///
/// Lookups are case-insensitive. Words without any alphabetic character
/// (numbers, punctuation) are never reported.
#[derive(Debug, Default)]
pub struct WordListChecker {
    languages: HashMap<String, HashSet<String>>,
}

impl WordListChecker {
    /// Create an empty checker
    pub fn new() -> Self {
        Self::default()
    }

    /// Add words for a language
    pub fn with_words<I, S>(mut self, language: &str, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_words(language, words);
        self
    }

    /// Add words for a language (creating the language if needed)
    pub fn add_words<I, S>(&mut self, language: &str, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self.languages.entry(language.to_string()).or_default();
        entry.extend(words.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
    }

    /// Load a newline-separated word list for a language
    ///
    /// Blank lines and lines starting with `#` are ignored. Hunspell-style
    /// `word/FLAGS` entries keep only the word.
    pub fn load_file(&mut self, language: &str, path: &Path) -> Result<usize, SpellCheckError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| SpellCheckError::Dictionary {
                language: language.to_string(),
                source,
            })?;

        let words: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .filter_map(|l| l.split('/').next())
            .collect();

        let count = words.len();
        self.add_words(language, words);
        info!(
            "Loaded {} words for '{}' from {}",
            count,
            language,
            path.display()
        );
        Ok(count)
    }

    /// Number of words known for a language
    pub fn word_count(&self, language: &str) -> usize {
        self.languages.get(language).map_or(0, HashSet::len)
    }
}

impl SpellChecker for WordListChecker {
    fn is_word_misspelled(&self, word: &str, language: &str) -> Result<bool, SpellCheckError> {
        let words = self
            .languages
            .get(language)
            .ok_or_else(|| SpellCheckError::UnsupportedLanguage(language.to_string()))?;

        if !word.chars().any(char::is_alphabetic) {
            return Ok(false);
        }

        Ok(!words.contains(&word.to_lowercase()))
    }

    fn supports_language(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }
}

/// Memoizes word verdicts of another checker
///
/// Shared across worker threads; only successful verdicts are cached.
pub struct CachingChecker<C> {
    inner: C,
    cache: RwLock<HashMap<(String, String), bool>>,
}

impl<C: SpellChecker> CachingChecker<C> {
    /// Wrap a checker
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Number of cached verdicts
    pub fn len(&self) -> usize {
        self.cache.read().map_or(0, |c| c.len())
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C: SpellChecker> SpellChecker for CachingChecker<C> {
    fn is_word_misspelled(&self, word: &str, language: &str) -> Result<bool, SpellCheckError> {
        let key = (language.to_string(), word.to_string());

        if let Ok(cache) = self.cache.read() {
            if let Some(&verdict) = cache.get(&key) {
                return Ok(verdict);
            }
        }

        let verdict = self.inner.is_word_misspelled(word, language)?;
        debug!("Spell check '{}' ({}): misspelled={}", word, language, verdict);

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key, verdict);
        }

        Ok(verdict)
    }

    fn supports_language(&self, language: &str) -> bool {
        self.inner.supports_language(language)
    }
}
