// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use papersort::app_config::{self, Config, TemplateVariant};
use papersort::app_controller::{Controller, RunMode};

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

/// CLI Wrapper for TemplateVariant to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTemplateVariant {
    Minimal,
    Detailed,
}

impl From<CliTemplateVariant> for TemplateVariant {
    fn from(cli_variant: CliTemplateVariant) -> Self {
        match cli_variant {
            CliTemplateVariant::Minimal => TemplateVariant::Minimal,
            CliTemplateVariant::Detailed => TemplateVariant::Detailed,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check documents and move accepted ones into their folders (default command)
    File(RunArgs),

    /// Check documents and report their folders without moving anything
    Check(RunArgs),

    /// Generate shell completions for papersort
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// PDF file or directory to process (defaults to the configured upload directory)
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,
}

/// Options accepted before or after the subcommand
#[derive(Parser, Debug, Clone)]
struct SharedOptions {
    /// Configuration file path
    #[arg(short, long = "config", value_name = "FILE", default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Replace the configured template with a built-in one
    #[arg(short, long, value_enum, global = true)]
    template: Option<CliTemplateVariant>,

    /// Root folder for filed documents
    #[arg(short, long, value_name = "DIR", global = true)]
    output_dir: Option<PathBuf>,
}

/// papersort - template checking and filing of course PDFs
///
/// Reads the first page of each PDF, checks it against the institutional
/// template and moves accepted documents into a folder per year and department.
#[derive(Parser, Debug)]
#[command(name = "papersort")]
#[command(version)]
#[command(about = "Template checking and filing of course PDFs")]
#[command(long_about = "papersort checks the first page of course PDFs against an institutional template and files accepted documents by department, year and semester.

EXAMPLES:
    papersort                                   # File everything in the upload directory
    papersort syllabus.pdf                      # File a single document
    papersort check uploads/                    # Report where documents would go
    papersort -t detailed -o archive uploads/   # Detailed template, custom output root
    papersort --log-level debug uploads/        # Show every check
    papersort completions bash > papersort.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

TEMPLATES:
    minimal   - institution line, subject code line, Calibri typography
    detailed  - department, program/year, semester and section headings")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// PDF file or directory to process (defaults to the configured upload directory)
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    #[command(flatten)]
    options: SharedOptions,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
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
        // Dependencies only get through with warnings and errors
        let ours = metadata.target().starts_with(env!("CARGO_CRATE_NAME"));
        metadata.level() <= self.level && (ours || metadata.level() <= Level::Warn)
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is set once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "papersort", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::File(args)) => run(args.input_path, &cli.options, RunMode::File).await,
        Some(Commands::Check(args)) => run(args.input_path, &cli.options, RunMode::Check).await,
        None => run(cli.input_path, &cli.options, RunMode::File).await,
    }
}

/// Load the config file or create it with defaults
fn load_config(options: &SharedOptions) -> Result<Config> {
    let config_path = Path::new(&options.config_path);

    let mut config = if config_path.exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", options.config_path);
        let config = Config::default();
        config
            .save(config_path)
            .context("Failed to write default config")?;
        config
    };

    if let Some(template) = &options.template {
        let variant: TemplateVariant = template.clone().into();
        let output_root = config.routing.output_root.clone();
        config.template = app_config::TemplateConfig::preset(variant);
        config.routing = app_config::RoutingConfig {
            output_root,
            ..app_config::RoutingConfig::for_variant(variant)
        };
    }

    if let Some(output_dir) = &options.output_dir {
        config.routing.output_root = output_dir.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

async fn run(input_path: Option<PathBuf>, options: &SharedOptions, mode: RunMode) -> Result<()> {
    // Apply a command line level before the config is read
    if let Some(level) = &options.log_level {
        log::set_max_level(level_filter(&level.clone().into()));
    }

    let config = load_config(options)?;
    log::set_max_level(level_filter(&config.log_level));

    let input_path = input_path.unwrap_or_else(|| config.intake.upload_dir.clone());

    let controller = Controller::with_config(config)?;
    controller.prepare_directories(mode)?;

    if input_path.is_file() {
        controller.run(&input_path, mode).await;
    } else if input_path.is_dir() {
        info!("Processing documents in {:?}", input_path);
        let summary = controller.run_folder(&input_path, mode).await?;
        for outcome in summary.outcomes.iter().filter(|o| !o.accepted) {
            info!("Left in place: {:?}", outcome.source);
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}
