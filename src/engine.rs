//! Core linter engine

use crate::checker::SpellCheckError;
use crate::config::Config;
use crate::declaration::{Declaration, DeclarationError, DeclarationFile};
use crate::diagnostic::{Location, Severity, Violation};
use crate::evaluator::SpellingEvaluator;
use log::{debug, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Error aborting a lint run
#[derive(Debug, Error)]
pub enum LintError {
    #[error("Spell checker failed: {0}")]
    Checker(#[from] SpellCheckError),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result of linting operation
#[derive(Debug, Default)]
pub struct LintResult {
    /// All violations
    pub violations: Vec<Violation>,

    /// Files processed
    pub files_processed: usize,

    /// Declarations evaluated
    pub declarations_checked: usize,

    /// Files with errors
    pub files_with_errors: usize,

    /// Files with warnings
    pub files_with_warnings: usize,

    /// Total errors
    pub error_count: usize,

    /// Total warnings
    pub warning_count: usize,

    /// Total info messages
    pub info_count: usize,

    /// Processing duration
    pub duration: Duration,
}

impl LintResult {
    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        self.warning_count > 0
    }

    /// Check if result is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        self.error_count == 0 && self.warning_count == 0
    }

    /// Get exit code (0 = success, 1 = warnings, 2 = errors)
    pub fn exit_code(&self) -> i32 {
        if self.error_count > 0 {
            2
        } else if self.warning_count > 0 {
            1
        } else {
            0
        }
    }

    /// Record a violation and update counters
    pub fn push(&mut self, violation: Violation) {
        match violation.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Info => self.info_count += 1,
        }
        self.violations.push(violation);
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: LintResult) {
        self.violations.extend(other.violations);
        self.files_processed += other.files_processed;
        self.declarations_checked += other.declarations_checked;
        self.files_with_errors += other.files_with_errors;
        self.files_with_warnings += other.files_with_warnings;
        self.error_count += other.error_count;
        self.warning_count += other.warning_count;
        self.info_count += other.info_count;
    }
}

/// The main linter engine
pub struct Engine {
    /// Configuration
    config: Config,

    /// Spelling evaluator shared by all workers
    evaluator: SpellingEvaluator,
}

impl Engine {
    /// Create a new engine
    pub fn new(config: Config, evaluator: SpellingEvaluator) -> Self {
        Self { config, evaluator }
    }

    /// Lint multiple declaration files
    pub fn lint(&self, files: &[PathBuf]) -> Result<LintResult, LintError> {
        let start = Instant::now();

        let files: Vec<&PathBuf> = files
            .iter()
            .filter(|f| {
                let excluded = self.config.is_file_excluded(f);
                if excluded {
                    debug!("Skipping excluded file {}", f.display());
                }
                !excluded
            })
            .collect();

        let results: Vec<Result<LintResult, LintError>> = if self.config.engine.parallel {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(if self.config.engine.jobs > 0 {
                    self.config.engine.jobs
                } else {
                    num_cpus::get()
                })
                .build()?;

            pool.install(|| files.par_iter().map(|f| self.lint_file(f)).collect())
        } else {
            files.iter().map(|f| self.lint_file(f)).collect()
        };

        let mut combined = LintResult::default();
        for result in results {
            combined.merge(result?);
        }

        combined.duration = start.elapsed();
        Ok(combined)
    }

    /// Lint a single declaration file
    ///
    /// Unreadable or malformed files are reported as error violations;
    /// only spell checker failures abort.
    pub fn lint_file(&self, path: &Path) -> Result<LintResult, LintError> {
        let mut result = LintResult {
            files_processed: 1,
            ..LintResult::default()
        };

        let file = match DeclarationFile::load(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
                let rule_id = match e {
                    DeclarationError::Io(_) => "file-read-error",
                    _ => "parse-error",
                };
                result.push(
                    Violation::new(
                        rule_id,
                        Severity::Error,
                        &format!("Failed to load declarations: {}", e),
                        Location::default(),
                    )
                    .in_file(path.to_path_buf()),
                );
                result.files_with_errors = 1;
                return Ok(result);
            }
        };

        let source = file.file.clone().unwrap_or_else(|| path.to_path_buf());
        let declarations: Vec<&Declaration> = file.iter().collect();
        let file_result = self.lint_declarations(&declarations, &source)?;
        result.merge(file_result);

        if result.error_count > 0 {
            result.files_with_errors = 1;
        }
        if result.warning_count > 0 {
            result.files_with_warnings = 1;
        }

        Ok(result)
    }

    /// Evaluate already-flattened declarations belonging to `source`
    pub fn lint_declarations(
        &self,
        declarations: &[&Declaration],
        source: &Path,
    ) -> Result<LintResult, LintError> {
        let mut result = LintResult::default();

        for declaration in declarations {
            result.declarations_checked += 1;
            if let Some(violation) = self.evaluator.evaluate_declaration(declaration)? {
                result.push(violation.in_file(source.to_path_buf()));
            }
        }

        debug!(
            "{}: {} declarations, {} violations",
            source.display(),
            result.declarations_checked,
            result.violations.len()
        );

        Ok(result)
    }
}
