//! identspell CLI - identifier spelling linter
//!
//! Reads declaration files produced by a host parser and reports identifiers
//! containing misspelled words.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use glob::glob;
use identspell::checker::{CachingChecker, SpellChecker, WordListChecker};
use identspell::config::{ColorMode, Config, OutputFormat, SpellingConfiguration};
use identspell::diagnostic::Severity;
use identspell::engine::Engine;
use identspell::evaluator::SpellingEvaluator;
use identspell::output::formatter_for;
use identspell::rule::Rule;
use identspell::tokenizer::tokenize;
use log::{debug, info};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Exit code for configuration and checker failures
const EXIT_FAILURE: i32 = 3;

#[derive(Parser)]
#[command(
    name = "identspell",
    version,
    about = "Identifier spelling linter",
    long_about = "Splits declaration names into words and reports identifiers containing misspelled words."
)]
struct Cli {
    /// Declaration files or glob patterns to lint
    files: Vec<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Word list for a language, as LANG=PATH (repeatable)
    #[arg(short, long = "dictionary", value_parser = parse_dictionary)]
    dictionaries: Vec<(String, PathBuf)>,

    /// Language code to check against
    #[arg(short, long)]
    language: Option<String>,

    /// Words shorter than this are not checked
    #[arg(long)]
    min_length: Option<usize>,

    /// Words never reported (comma-separated, case-insensitive)
    #[arg(long, value_delimiter = ',')]
    exclude: Option<Vec<String>>,

    /// Severity of spelling violations
    #[arg(long, value_parser = parse_severity)]
    severity: Option<Severity>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Exit with 0 even if violations are found
    #[arg(long)]
    exit_zero: bool,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show detailed information about the spelling rule
    Explain,
    /// Print the words an identifier splits into
    Tokenize {
        /// Identifiers to split
        #[arg(required = true)]
        identifiers: Vec<String>,
    },
    /// Initialize a configuration file
    Init {
        /// Output format (yaml, json)
        #[arg(long, default_value = "yaml")]
        output_format: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Compact,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Compact => OutputFormat::Compact,
        }
    }
}

fn parse_dictionary(s: &str) -> Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((lang, path)) if !lang.is_empty() && !path.is_empty() => {
            Ok((lang.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected LANG=PATH, got '{}'", s)),
    }
}

fn parse_severity(s: &str) -> Result<Severity, String> {
    match s.parse() {
        Ok(Severity::Info) | Err(_) => Err(format!("invalid severity '{}' (warning, error)", s)),
        Ok(severity) => Ok(severity),
    }
}

/// Print detailed rule explanation
fn explain_rule(rule: &Rule, spelling: &SpellingConfiguration) {
    println!("{}", "Rule Details".bold());
    println!();
    println!("  {}: {}", "ID".bold(), rule.id.cyan());
    println!("  {}: {}", "Name".bold(), rule.name);
    println!(
        "  {}: {}",
        "Severity".bold(),
        match spelling.severity() {
            Severity::Error => "error".red(),
            Severity::Warning => "warning".yellow(),
            Severity::Info => "info".blue(),
        }
    );
    println!("  {}: {}", "Category".bold(), rule.category);
    println!("  {}: {}", "Opt-in".bold(), rule.opt_in);
    println!("  {}: {}", "Configuration".bold(), spelling);

    println!();
    println!("  {}", "Description".bold());
    println!("  {}", rule.description);

    if let Some(rationale) = &rule.rationale {
        println!();
        println!("  {}", "Rationale".bold());
        println!("  {}", rationale);
    }

    println!();
    println!("  {} {}", "Examples".bold(), "(incorrect)".red());
    for example in &rule.triggering_examples {
        println!("    {}", example);
    }

    println!();
    println!("  {} {}", "Examples".bold(), "(correct)".green());
    for example in &rule.non_triggering_examples {
        println!("    {}", example);
    }

    if !rule.tags.is_empty() {
        println!();
        println!("  {}: {}", "Tags".bold(), rule.tags.join(", "));
    }
}

fn handle_tokenize(identifiers: &[String]) {
    for identifier in identifiers {
        let tokens = tokenize(identifier);
        println!("{}: {}", identifier.cyan(), tokens.join(" "));
    }
}

fn handle_init(output_format: &str) -> Result<()> {
    let filename = match output_format {
        "json" => ".identspellrc.json",
        "yaml" | "yml" => ".identspellrc.yaml",
        other => bail!("Unknown init format '{}'. Available: yaml, json", other),
    };

    if Path::new(filename).exists() {
        bail!("{} already exists. Remove it first to reinitialize.", filename);
    }

    let defaults = SpellingConfiguration::default();
    let mut spelling = serde_yaml::Mapping::new();
    spelling.insert("language".into(), defaults.language().into());
    spelling.insert("min_length".into(), (defaults.min_length() as u64).into());
    spelling.insert("excluded".into(), serde_yaml::Value::Sequence(Vec::new()));
    spelling.insert("severity".into(), defaults.severity().to_string().into());
    spelling.insert("check_types".into(), defaults.check_types().into());

    let config = Config {
        identifier_spelling: serde_yaml::Value::Mapping(spelling),
        ..Config::default()
    };

    let content = if output_format == "json" {
        serde_json::to_string_pretty(&config)?
    } else {
        format!(
            "# identspell configuration\n# Generated with: identspell init\n\n{}",
            serde_yaml::to_string(&config)?
        )
    };

    std::fs::write(filename, content).with_context(|| format!("Failed to write {}", filename))?;

    println!("{} Created {}", "success".green().bold(), filename);
    println!();
    println!("Next steps:");
    println!("  1. Point `dictionaries` at a word list for your language");
    println!("  2. Run {} to lint your files", "identspell decls/*.yaml".cyan());
    Ok(())
}

/// Apply CLI overrides on top of the configured spelling policy
fn spelling_config(cli: &Cli, config: &Config) -> Result<SpellingConfiguration> {
    let mut spelling = config.spelling()?;
    if let Some(language) = &cli.language {
        spelling = spelling.with_language(language);
    }
    if let Some(min_length) = cli.min_length {
        spelling = spelling.with_min_length(min_length);
    }
    if let Some(words) = &cli.exclude {
        spelling = spelling.with_excluded(words.iter().map(|w| w.trim()));
    }
    if let Some(severity) = cli.severity {
        spelling = spelling.with_severity(severity);
    }
    Ok(spelling)
}

fn load_checker(config: &Config) -> Result<Arc<dyn SpellChecker>> {
    let mut checker = WordListChecker::new();
    for (language, path) in &config.dictionaries {
        checker.load_file(language, path)?;
    }
    Ok(Arc::new(CachingChecker::new(checker)))
}

/// Expand glob patterns into existing files
fn expand_files(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let paths = glob(pattern).with_context(|| format!("Invalid pattern '{}'", pattern))?;
        files.extend(paths.flatten().filter(|p| p.is_file()));
    }
    Ok(files)
}

fn run(cli: &Cli) -> Result<i32> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load_default().context("Failed to load config")?,
    };

    config.merge_cli(
        cli.format.map(OutputFormat::from),
        cli.verbose.then_some(true),
        cli.jobs,
        cli.dictionaries.clone(),
    );

    let spelling = spelling_config(cli, &config)?;
    debug!("Spelling configuration: {}", spelling);

    if let Some(Commands::Explain) = &cli.command {
        explain_rule(&Rule::identifier_spelling(), &spelling);
        return Ok(0);
    }

    let checker = load_checker(&config)?;
    let evaluator = SpellingEvaluator::new(spelling, checker)?;

    let files = expand_files(&cli.files)?;
    if files.is_empty() {
        bail!("No files found to lint");
    }
    info!("Linting {} files", files.len());

    let colored = !cli.no_color
        && match config.output.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        };
    colored::control::set_override(colored);

    let formatter = formatter_for(&config.output, colored);
    let engine = Engine::new(config, evaluator);
    let result = engine.lint(&files)?;

    print!("{}", formatter.format(&result));

    Ok(if cli.exit_zero { 0 } else { result.exit_code() })
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let outcome = match &cli.command {
        Some(Commands::Tokenize { identifiers }) => {
            handle_tokenize(identifiers);
            Ok(0)
        }
        Some(Commands::Init { output_format }) => handle_init(output_format).map(|_| 0),
        _ => run(&cli),
    };

    match outcome {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            std::process::exit(EXIT_FAILURE);
        }
    }
}
