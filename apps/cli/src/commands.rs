//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use dotdoc_core::pipeline::{ProgressReporter, check_diagrams, import_diagrams};
use dotdoc_shared::{
    AppConfig, CheckOutcome, DotdocError, ImportConfig, ImportOutcome, ImportReport, init_config,
    load_config, load_config_from,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// dotdoc: embed Doxygen's Graphviz diagrams in a Sphinx build.
#[derive(Parser)]
#[command(
    name = "dotdoc",
    version,
    about = "Collect Doxygen .dot graphs into a single reStructuredText page.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Config file (defaults to ./dotdoc.toml when present).
    #[arg(long, env = "DOTDOC_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Defaults to `import` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate the diagram document from the Doxygen output tree.
    Import {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Fail if the diagram document is missing or out of date.
    Check {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Input/output overrides shared by `import` and `check`.
#[derive(Args, Default)]
pub(crate) struct PathArgs {
    /// Doxygen output directory to scan for .dot files.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Path of the generated .rst document.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a default dotdoc.toml in the working directory.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "dotdoc=info",
        1 => "dotdoc=debug",
        _ => "dotdoc=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        None => cmd_import(config_path, PathArgs::default()),
        Some(Command::Import { paths }) => cmd_import(config_path, paths),
        Some(Command::Check { paths }) => cmd_check(config_path, paths),
        Some(Command::Config { action }) => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

/// Load the app config from `--config`, or from the working directory.
fn resolve_app_config(config_path: Option<&Path>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Config file + CLI overrides, merged into the runtime import config.
fn resolve_import_config(config_path: Option<&Path>, paths: PathArgs) -> Result<ImportConfig> {
    let app = resolve_app_config(config_path)?;
    Ok(ImportConfig::from(&app).with_overrides(paths.input, paths.output))
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_import(config_path: Option<&Path>, paths: PathArgs) -> Result<()> {
    let config = resolve_import_config(config_path, paths)?;

    info!(
        input = %config.input_dir.display(),
        output = %config.output_file.display(),
        "importing diagrams"
    );

    let reporter = CliProgress::new();
    let outcome = import_diagrams(&config, &reporter);
    reporter.clear();

    // The missing-input warning is already logged by the pipeline.
    if let Some(summary) = import_summary(&outcome?) {
        println!("{summary}");
    }

    Ok(())
}

/// Result lines for stdout, if the run wrote anything.
fn import_summary(outcome: &ImportOutcome) -> Option<String> {
    let ImportOutcome::Written(report) = outcome else {
        return None;
    };
    Some(format!(
        "\n  Diagram document generated!\n  Output:     {}\n  Found:      {}\n  Embedded:   {}\n  Legends:    {}\n",
        report.output_file.display(),
        report.discovered,
        report.emitted,
        report.skipped_legends,
    ))
}

fn cmd_check(config_path: Option<&Path>, paths: PathArgs) -> Result<()> {
    let config = resolve_import_config(config_path, paths)?;

    match check_diagrams(&config)? {
        // Logged by the pipeline; nothing to compare.
        CheckOutcome::MissingInput { .. } => Ok(()),
        CheckOutcome::UpToDate {
            output_file,
            emitted,
        } => {
            println!(
                "{} is up to date ({emitted} diagrams).",
                output_file.display()
            );
            Ok(())
        }
        CheckOutcome::Stale {
            output_file,
            reason,
        } => Err(DotdocError::validation(format!(
            "{} is out of date: {reason}. Run `dotdoc import` to regenerate it.",
            output_file.display()
        ))
        .into()),
    }
}

fn cmd_config_init() -> Result<()> {
    let cwd = std::env::current_dir()
        .map_err(|e| eyre!("cannot determine working directory: {e}"))?;
    let path = init_config(&cwd)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_app_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn clear(&self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn diagram_rendered(&self, title: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Rendering [{current}/{total}] {title}"));
    }

    fn done(&self, _report: &ImportReport) {
        self.spinner.finish_and_clear();
    }
}
