//! Scan command - scans source files for exposed secrets.

mod output;
mod runner;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context as _;
use keygate_core::prelude::*;

use self::output::{OutputContext, ScanStats, write_output};
use self::runner::run_scan;
use crate::files::collect_files;
use crate::ui::{self, colors, exit, print_command_header};
use crate::{CONFIG_FILENAME, OutputFormat, ScanArgs};

/// Executes the `keygate scan` command.
pub fn run(args: &ScanArgs) -> super::Result {
    if let Some(reason) = env_skip_reason(args) {
        ui::print_info(&reason);
        return Ok(());
    }

    configure_thread_pool(args.concurrency)?;

    let show_progress = should_show_progress(args);
    let start = Instant::now();

    if show_progress {
        print_command_header("scan");
    }

    let config = load_config(args);
    let scanner = Scanner::new(config).context("compiling detection patterns")?;

    let ignore_globs: Vec<String> = scanner
        .config()
        .ignored_files
        .iter()
        .chain(args.exclude.iter())
        .cloned()
        .collect();
    let files = collect_files(&args.paths, &ignore_globs, !args.skip_gitignore)?;

    if files.is_empty() {
        print_no_files();
        return Ok(());
    }

    let result = run_scan(&scanner, &files, args.max_file_size, show_progress);
    let elapsed = start.elapsed();

    let ctx = OutputContext {
        findings: &result.findings,
        stats: ScanStats {
            file_count: result.files_scanned,
            elapsed,
        },
        passed: result.passed(),
    };

    write_output(args, &ctx)?;

    if let Some(path) = &args.report {
        output::html::write_report(path, &ctx)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        if show_progress {
            ui::print_info(&format!("report written to {}", path.display()));
        }
    }

    if !result.passed() && !args.exit_zero {
        std::process::exit(exit::FINDINGS);
    }

    Ok(())
}

const fn should_show_progress(args: &ScanArgs) -> bool {
    args.output.is_none() && matches!(args.format, OutputFormat::Text)
}

/// Returns a skip message when the surrounding build is not one that ships
/// to production.
///
/// The gate exists so `keygate scan && next build` does not slow down every
/// dev-server restart: `NODE_ENV=production` and an unset `NODE_ENV` both
/// scan, anything else skips.
fn env_skip_reason(args: &ScanArgs) -> Option<String> {
    if args.no_env_check {
        return None;
    }
    match std::env::var("NODE_ENV") {
        Ok(value) if value != "production" => Some(format!(
            "skipping scan for NODE_ENV={value} (use --no-env-check to force)"
        )),
        _ => None,
    }
}

/// Loads configuration, falling back to defaults when the file is invalid.
///
/// A broken config must not let secrets through, so the scan still runs
/// with built-in settings and a warning.
fn load_config(args: &ScanArgs) -> ScanConfig {
    let path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

    match ScanConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            ui::print_warning(&format!("{e:#}; scanning with default configuration"));
            ScanConfig::default()
        }
    }
}

fn configure_thread_pool(concurrency: Option<usize>) -> super::Result {
    if let Some(n) = concurrency {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("failed to configure thread pool")?;
    }
    Ok(())
}

fn print_no_files() {
    println!("{} no source files to scan", colors::warning().apply_to("●"));
    println!();
    println!("  Check your paths, .gitignore, or ignore globs.");
    println!();
}
