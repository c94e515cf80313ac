//! # Commands
//!
//! - `keygate scan` - Scan source files for exposed secrets before a build
//! - `keygate init` - Wire the scanner into a project's build script
//! - `keygate patterns` - List detection patterns

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod commands;
mod files;
mod ui;

use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use console::style;
pub use keygate_core::CONFIG_FILENAME;

use crate::ui::colors;

const REPO_URL: &str = "https://github.com/keygate-dev/keygate";

#[derive(Debug, Parser)]
#[command(
    name = "keygate",
    version,
    styles = ui::clap_styles(),
    arg_required_else_help = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(visible_alias = "s")]
    Scan(ScanArgs),

    Init(InitArgs),

    #[command(visible_alias = "p")]
    Patterns(PatternsArgs),
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Arguments for the `keygate scan` command.
#[derive(Debug, Parser)]
pub struct ScanArgs {
    /// Paths to scan for exposed secrets.
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write an HTML report to this path.
    #[arg(short, long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Path to `.keygate.toml` configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run even when NODE_ENV indicates a non-production build.
    #[arg(long)]
    pub no_env_check: bool,

    /// Always exit with code 0, even when exposures are found.
    #[arg(long)]
    pub exit_zero: bool,

    /// Glob patterns to exclude from scanning.
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Skip `.gitignore` rules when collecting files.
    #[arg(long)]
    pub skip_gitignore: bool,

    /// Skip files larger than this size in bytes.
    #[arg(long)]
    pub max_file_size: Option<u64>,

    /// Number of parallel scanning threads.
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Increase output verbosity (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments for the `keygate init` command.
#[derive(Debug, Parser)]
pub struct InitArgs {
    /// Project directory containing `package.json`.
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

/// Arguments for the `keygate patterns` command.
#[derive(Debug, Parser)]
pub struct PatternsArgs {
    /// Filter patterns by provider name.
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Show pattern details including regex and education material.
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() {
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).without_time())
            .with(EnvFilter::from_default_env())
            .init();
    }

    let cli = parse_cli();

    if let Err(e) = run(cli.command) {
        ui::print_error(&format!("{e:#}"));
        std::process::exit(ui::exit::ERROR);
    }
}

fn parse_cli() -> Cli {
    let cmd = Cli::command().about(build_about()).after_help(build_after_help());

    let matches = cmd.get_matches();

    #[expect(clippy::expect_used, reason = "clap already validated args; this cannot fail")]
    Cli::from_arg_matches(&matches).expect("failed to parse arguments")
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Scan(args) => commands::scan::run(&args),
        Command::Init(args) => commands::init::run(&args.dir),
        Command::Patterns(args) => commands::patterns::run(args.provider.as_deref(), args.verbose),
    }
}

fn build_about() -> String {
    format!(
        r"
  {} stops secrets from shipping in your frontend build.

  Detects provider credentials, high-entropy literals, base64-wrapped
  secrets, and server-only env vars in client code. Works offline.",
        colors::accent().apply_to("keygate").bold()
    )
}

fn build_after_help() -> String {
    format!(
        r"
  {}
    keygate scan .                 Scan current directory
    keygate scan src/ app/         Scan multiple paths
    keygate scan . --format json   Output as JSON
    keygate scan . --report r.html Write an HTML report
    keygate init                   Add keygate to the build script
    keygate patterns               List detection patterns

  Learn more: {}",
        style("Examples:").bold(),
        colors::accent().apply_to(REPO_URL).underlined()
    )
}
