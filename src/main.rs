// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use wordwell::app_config::{self, Config, DictionaryProvider, WordListKind};
use wordwell::{AppError, RefreshController, RefreshReport, WordDetail};

/// CLI Wrapper for DictionaryProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliDictionaryProvider {
    MerriamWebster,
    WordsApi,
}

impl From<CliDictionaryProvider> for DictionaryProvider {
    fn from(cli_provider: CliDictionaryProvider) -> Self {
        match cli_provider {
            CliDictionaryProvider::MerriamWebster => DictionaryProvider::MerriamWebster,
            CliDictionaryProvider::WordsApi => DictionaryProvider::WordsApi,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Draw random words and look them up (default command)
    Refresh(RefreshArgs),

    /// Generate shell completions for wordwell
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug, Clone)]
struct RefreshArgs {
    /// Number of words to draw
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Dictionary provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliDictionaryProvider>,

    /// Dictionary API key
    #[arg(long, env = "WORDWELL_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Read candidate words from a local file instead of the word list service
    #[arg(short, long, value_name = "PATH")]
    word_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

/// wordwell - random words with dictionary details
///
/// Draws a few random words from a word list and shows their pronunciation,
/// part of speech, etymology, definitions and related forms.
#[derive(Parser, Debug)]
#[command(name = "wordwell")]
#[command(version)]
#[command(about = "Random words with dictionary details")]
#[command(long_about = "wordwell draws random words from a word list and looks each one up in a dictionary.

EXAMPLES:
    wordwell                                  # Five words using conf.json
    wordwell -n 10                            # Ten words
    wordwell -p words-api                     # Use WordsAPI instead of Merriam-Webster
    wordwell -w /usr/share/dict/words         # Sample from a local word file
    wordwell --json                           # Machine readable output
    wordwell completions bash > wordwell.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't
    exist, a default one is created. The dictionary API key is read from
    --api-key, dictionary.api_key or the WORDWELL_API_KEY variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    refresh: RefreshArgs,
}

// @struct: Custom logger implementation
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // The max level is adjusted after the config is loaded
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", colour, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // The level is updated after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "wordwell", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Refresh(args)) => Ok(run_refresh(args).await?),
        None => Ok(run_refresh(cli.refresh).await?),
    }
}

async fn run_refresh(options: RefreshArgs) -> Result<(), AppError> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let config = load_config(&options).map_err(config_error)?;

    // Validate the configuration after loading and overriding
    config.validate().map_err(config_error)?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    debug!(
        "Using {} with {} word(s) per refresh",
        config.dictionary.provider.display_name(),
        config.sample_size
    );

    let controller = RefreshController::with_config(&config).map_err(config_error)?;

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{bar:20}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .progress_chars("=> "),
    );
    progress.set_message("Looking up words");
    progress.enable_steady_tick(Duration::from_millis(100));

    let outcome = controller
        .refresh_with_progress(|done, total| {
            progress.set_length(total as u64);
            progress.set_position(done as u64);
        })
        .await;

    progress.finish_and_clear();

    // Pool-level failure: single top-level error, nothing rendered
    let report = outcome?;

    if options.json {
        let json = serde_json::to_string_pretty(&report.details)
            .map_err(|e| AppError::Unknown(format!("Failed to serialize result to JSON: {}", e)))?;
        println!("{}", json);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn config_error(error: anyhow::Error) -> AppError {
    AppError::Config(format!("{:#}", error))
}

// Load or create configuration, then apply command line overrides
fn load_config(options: &RefreshArgs) -> Result<Config> {
    let config_path = Path::new(&options.config_path);

    let mut config = if config_path.exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", options.config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    if let Some(count) = options.count {
        config.sample_size = count;
    }

    if let Some(provider) = &options.provider {
        config.dictionary.provider = provider.clone().into();
    }

    if let Some(api_key) = &options.api_key {
        config.dictionary.api_key = api_key.clone();
    }

    if let Some(word_file) = &options.word_file {
        config.word_list.source = WordListKind::File;
        config.word_list.path = Some(word_file.to_string_lossy().into_owned());
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}

fn print_report(report: &RefreshReport) {
    if report.details.is_empty() {
        println!("No words available.");
        return;
    }

    for detail in &report.details {
        println!("{}", render_detail(detail));
    }
}

fn render_detail(detail: &WordDetail) -> String {
    let mut out = String::new();

    let mut heading = detail.word.clone();
    if let Some(phonetic) = &detail.phonetic {
        heading.push_str(&format!("  \\{}\\", phonetic));
    }
    if let Some(part_of_speech) = &detail.part_of_speech {
        heading.push_str(&format!("  ({})", part_of_speech));
    }
    out.push_str(&heading);
    out.push('\n');

    if let Some(error) = &detail.error {
        out.push_str(&format!("  {}\n", error));
        return out;
    }

    for (index, definition) in detail.definitions.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", index + 1, definition));
    }

    if detail.definitions.is_empty() {
        for short in &detail.short_definition {
            out.push_str(&format!("  - {}\n", short));
        }
    }

    if let Some(origin) = &detail.origin {
        out.push_str(&format!("  Origin: {}\n", origin));
    }

    if !detail.related_words.is_empty() {
        out.push_str(&format!("  Related: {}\n", detail.related_words.join(", ")));
    }

    out
}
