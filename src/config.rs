//! Configuration system for the identifier spelling linter
//!
//! Reads configuration from:
//! - `.identspellrc.yaml` / `.identspellrc.json` (project-level)
//! - `~/.identspellrc.yaml` (user-level)
//!
//! The `identifier_spelling` section is kept untyped until
//! [`SpellingConfiguration::from_value`] validates it.

use crate::diagnostic::Severity;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default language code
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default minimum checkable word length
pub const DEFAULT_MIN_LENGTH: usize = 4;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Spelling policy shared by every evaluation of a lint run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellingConfiguration {
    language: String,
    min_length: usize,
    excluded: BTreeSet<String>,
    severity: Severity,
    check_types: bool,
}

impl Default for SpellingConfiguration {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            min_length: DEFAULT_MIN_LENGTH,
            excluded: BTreeSet::new(),
            severity: Severity::Warning,
            check_types: true,
        }
    }
}

impl SpellingConfiguration {
    /// Build a configuration from an untyped map
    ///
    /// Recognized keys: `language` (string), `min_length` (non-negative
    /// integer), `excluded` (string or list of strings), `severity`
    /// (`warning`/`error`) and `check_types` (bool). A null value yields the
    /// defaults.
    pub fn from_value(value: &serde_yaml::Value) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let map = match value {
            serde_yaml::Value::Null => return Ok(config),
            serde_yaml::Value::Mapping(map) => map,
            _ => {
                return Err(ConfigError::Invalid(
                    "identifier_spelling must be a mapping".to_string(),
                ))
            }
        };

        for (key, value) in map {
            let key = key
                .as_str()
                .ok_or_else(|| ConfigError::Invalid("option names must be strings".to_string()))?;

            match key {
                "language" => {
                    config.language = value
                        .as_str()
                        .filter(|s| !s.trim().is_empty())
                        .ok_or_else(|| invalid_option(key, "a non-empty string"))?
                        .to_string();
                }
                "min_length" => {
                    let length = value
                        .as_u64()
                        .ok_or_else(|| invalid_option(key, "a non-negative integer"))?;
                    config.min_length = usize::try_from(length)
                        .map_err(|_| invalid_option(key, "a non-negative integer"))?;
                }
                "excluded" => {
                    config.excluded = string_list(value)
                        .ok_or_else(|| invalid_option(key, "a string or a list of strings"))?
                        .into_iter()
                        .map(|w| w.to_lowercase())
                        .collect();
                }
                "severity" => {
                    config.severity = value
                        .as_str()
                        .and_then(|s| s.parse::<Severity>().ok())
                        .filter(|s| *s != Severity::Info)
                        .ok_or_else(|| invalid_option(key, "warning or error"))?;
                }
                "check_types" => {
                    config.check_types = value
                        .as_bool()
                        .ok_or_else(|| invalid_option(key, "a boolean"))?;
                }
                other => {
                    return Err(ConfigError::Invalid(format!(
                        "Unknown identifier_spelling option: {}",
                        other
                    )))
                }
            }
        }

        Ok(config)
    }

    /// Language code passed to the spell checker
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Tokens shorter than this are not checked
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Lowercased excluded words
    pub fn excluded(&self) -> &BTreeSet<String> {
        &self.excluded
    }

    /// Severity of produced violations
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Whether type declarations are checked
    pub fn check_types(&self) -> bool {
        self.check_types
    }

    /// Check if a token is excluded (case-insensitive)
    pub fn is_excluded(&self, token: &str) -> bool {
        self.excluded.contains(&token.to_lowercase())
    }

    /// Check if a token is too short to be spell-checked
    pub fn is_too_short(&self, token: &str) -> bool {
        token.chars().count() < self.min_length
    }

    /// Copy with a different language
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    /// Copy with a different minimum length
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Copy with additional excluded words
    pub fn with_excluded<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    /// Copy with a different severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Copy with type checking toggled
    pub fn with_check_types(mut self, check_types: bool) -> Self {
        self.check_types = check_types;
        self
    }
}

impl fmt::Display for SpellingConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let excluded: Vec<&str> = self.excluded.iter().map(String::as_str).collect();
        write!(
            f,
            "severity: {}, language: {}, min_length: {}, excluded: [{}], check_types: {}",
            self.severity,
            self.language,
            self.min_length,
            excluded.join(", "),
            self.check_types
        )
    }
}

fn invalid_option(key: &str, expected: &str) -> ConfigError {
    ConfigError::Invalid(format!("identifier_spelling.{} must be {}", key, expected))
}

fn string_list(value: &serde_yaml::Value) -> Option<Vec<String>> {
    match value {
        serde_yaml::Value::String(s) => Some(vec![s.clone()]),
        serde_yaml::Value::Sequence(items) => items
            .iter()
            .map(|v| v.as_str().map(String::from))
            .collect(),
        _ => None,
    }
}

/// Engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Enable parallel processing
    pub parallel: bool,

    /// Number of parallel jobs (0 = auto-detect)
    pub jobs: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            jobs: 0,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,

    /// Color mode
    pub color: ColorMode,

    /// Verbose output
    pub verbose: bool,

    /// Show statistics
    pub statistics: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: ColorMode::Auto,
            verbose: false,
            statistics: true,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Compact,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "compact" => Ok(OutputFormat::Compact),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Color mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// File handling settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Exclude patterns
    pub exclude: Vec<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine settings
    pub engine: EngineConfig,

    /// Output settings
    pub output: OutputConfig,

    /// File handling settings
    pub files: FilesConfig,

    /// Word list per language code
    pub dictionaries: BTreeMap<String, PathBuf>,

    /// Raw rule options, validated by [`Config::spelling`]
    pub identifier_spelling: serde_yaml::Value,
}

impl Config {
    /// Create default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    ///
    /// Relative dictionary paths are resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let mut config: Self = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "Unknown config file format: {}",
                    ext
                )))
            }
        };

        let base_dir = path.parent().unwrap_or(Path::new("."));
        for dict in config.dictionaries.values_mut() {
            if dict.is_relative() {
                *dict = base_dir.join(&*dict);
            }
        }

        // Fail early on malformed rule options
        config.spelling()?;

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_names = [
            ".identspellrc.yaml",
            ".identspellrc.yml",
            ".identspellrc.json",
            "identspell.yaml",
            "identspell.yml",
            "identspell.json",
        ];

        // Check current directory
        for name in &config_names {
            let path = PathBuf::from(name);
            if path.exists() {
                return Self::load(&path);
            }
        }

        // Check home directory
        if let Some(home) = dirs::home_dir() {
            for name in &config_names {
                let path = home.join(name);
                if path.exists() {
                    return Self::load(&path);
                }
            }
        }

        Ok(Self::default())
    }

    /// Validated spelling policy
    pub fn spelling(&self) -> Result<SpellingConfiguration, ConfigError> {
        SpellingConfiguration::from_value(&self.identifier_spelling)
    }

    /// Merge CLI arguments into configuration
    pub fn merge_cli(
        &mut self,
        format: Option<OutputFormat>,
        verbose: Option<bool>,
        jobs: Option<usize>,
        dictionaries: Vec<(String, PathBuf)>,
    ) {
        if let Some(f) = format {
            self.output.format = f;
        }
        if let Some(v) = verbose {
            self.output.verbose = v;
        }
        if let Some(j) = jobs {
            self.engine.jobs = j;
        }
        self.dictionaries.extend(dictionaries);
    }

    /// Check if a file matches one of the exclude patterns
    pub fn is_file_excluded(&self, file_path: &Path) -> bool {
        let file_str = file_path.to_string_lossy();

        self.files.exclude.iter().any(|pattern| {
            globset::Glob::new(pattern)
                .map(|glob| glob.compile_matcher().is_match(file_str.as_ref()))
                .unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn yaml(s: &str) -> serde_yaml::Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn test_default_spelling_config() {
        let config = SpellingConfiguration::default();
        assert_eq!(config.language(), "en");
        assert_eq!(config.min_length(), 4);
        assert!(config.excluded().is_empty());
        assert_eq!(config.severity(), Severity::Warning);
        assert!(config.check_types());
    }

    #[test]
    fn test_from_value_null_is_default() {
        let config = SpellingConfiguration::from_value(&serde_yaml::Value::Null).unwrap();
        assert_eq!(config, SpellingConfiguration::default());
    }

    #[test]
    fn test_from_value() {
        let config = SpellingConfiguration::from_value(&yaml(
            r#"
language: fr
min_length: 2
excluded: [FOOBAR, garp]
severity: error
check_types: false
"#,
        ))
        .unwrap();

        assert_eq!(config.language(), "fr");
        assert_eq!(config.min_length(), 2);
        assert!(config.is_excluded("foobar"));
        assert!(config.is_excluded("Garp"));
        assert_eq!(config.severity(), Severity::Error);
        assert!(!config.check_types());
    }

    #[test]
    fn test_from_value_single_excluded_string() {
        let config = SpellingConfiguration::from_value(&yaml("excluded: Garp")).unwrap();
        assert!(config.is_excluded("garp"));
    }

    #[test]
    fn test_from_value_rejects_malformed_values() {
        for input in [
            "language: 42",
            "language: ''",
            "min_length: -1",
            "min_length: four",
            "excluded: {a: b}",
            "excluded: [1, 2]",
            "severity: fatal",
            "severity: info",
            "check_types: maybe",
            "spelling: en",
            "[en]",
        ] {
            let result = SpellingConfiguration::from_value(&yaml(input));
            assert!(
                matches!(result, Err(ConfigError::Invalid(_))),
                "expected error for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_invalid_option_message() {
        let err = SpellingConfiguration::from_value(&yaml("min_length: x")).unwrap_err();
        assert_eq!(
            format!("{}", err),
            "Invalid configuration: identifier_spelling.min_length must be a non-negative integer"
        );
    }

    #[test]
    fn test_length_and_exclusion_predicates() {
        let config = SpellingConfiguration::default().with_excluded(["Sdk"]);
        assert!(config.is_excluded("SDK"));
        assert!(config.is_too_short("Let"));
        assert!(!config.is_too_short("Incorect"));
        assert!(!config.with_min_length(0).is_too_short(""));
    }

    #[test]
    fn test_spelling_display() {
        let config = SpellingConfiguration::default().with_excluded(["b", "a"]);
        assert_eq!(
            config.to_string(),
            "severity: warning, language: en, min_length: 4, excluded: [a, b], check_types: true"
        );
    }

    #[test]
    fn test_default_config() {
        let config = Config::new();
        assert!(config.engine.parallel);
        assert_eq!(config.engine.jobs, 0);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.dictionaries.is_empty());
        assert_eq!(config.spelling().unwrap(), SpellingConfiguration::default());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(
            "compact".parse::<OutputFormat>().unwrap(),
            OutputFormat::Compact
        );
        assert!("sarif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_yaml_deserialize() {
        let yaml = r#"
engine:
  parallel: false
  jobs: 4
output:
  format: json
dictionaries:
  en: /usr/share/dict/words
identifier_spelling:
  min_length: 3
  excluded: [sdk]
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.engine.parallel);
        assert_eq!(config.engine.jobs, 4);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(
            config.dictionaries.get("en"),
            Some(&PathBuf::from("/usr/share/dict/words"))
        );

        let spelling = config.spelling().unwrap();
        assert_eq!(spelling.min_length(), 3);
        assert!(spelling.is_excluded("SDK"));
    }

    #[test]
    fn test_load_resolves_relative_dictionaries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".identspellrc.yaml");
        std::fs::write(&path, "dictionaries:\n  en: words.txt\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.dictionaries["en"], dir.path().join("words.txt"));
    }

    #[test]
    fn test_load_rejects_bad_rule_options() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identspell.json");
        std::fs::write(&path, r#"{"identifier_spelling": {"excluded": 3}}"#).unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_merge_cli() {
        let mut config = Config::new();
        config.merge_cli(
            Some(OutputFormat::Compact),
            Some(true),
            Some(2),
            vec![("en".to_string(), PathBuf::from("words.txt"))],
        );

        assert_eq!(config.output.format, OutputFormat::Compact);
        assert!(config.output.verbose);
        assert_eq!(config.engine.jobs, 2);
        assert_eq!(config.dictionaries["en"], PathBuf::from("words.txt"));
    }

    #[test]
    fn test_file_excluded() {
        let mut config = Config::new();
        config.files.exclude.push("**/generated/**".to_string());

        assert!(config.is_file_excluded(Path::new("src/generated/decls.yaml")));
        assert!(!config.is_file_excluded(Path::new("src/decls.yaml")));
    }
}
