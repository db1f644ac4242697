//! Extension importer CLI entrypoint.
//!
//! This binary rebuilds the upstream translations extension (or reuses the
//! package from an earlier build) and imports it into the `extension`
//! directory of the host tree.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;
use tracing_subscriber::EnvFilter;
use xpi_import::cli::Cli;
use xpi_import::command::SystemCommandExecutor;
use xpi_import::config::ImportConfig;
use xpi_import::error::{ImportError, Result};
use xpi_import::extraction::ZipExtractor;
use xpi_import::import_flow::Importer;
use xpi_import::output::{COMPLETION_MESSAGE, DryRunInfo, summary_text, write_stderr_line};
use xpi_import::preflight::ensure_invocation_dir;
use xpi_import::prompt::StreamPrompt;

/// Environment variable overriding the log filter chosen from `-v`/`-q`.
const LOG_ENV_VAR: &str = "XPI_IMPORT_LOG";

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn init_logging(cli: &Cli) {
    let filter = std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| cli.log_filter().to_owned());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();
    if subscriber.try_init().is_err() {
        // A global subscriber is already installed.
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let root = resolve_root(cli.directory.as_deref())?;
    let mut config = ImportConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    if cli.dry_run {
        return run_dry(&root, &config, stderr);
    }

    let executor = SystemCommandExecutor;
    let extractor = ZipExtractor;
    let importer = Importer::new(&root, &config, &executor, &extractor);

    let summary = match cli.preset_answer() {
        Some(mut answer) => importer.run(&mut answer)?,
        None => importer.run(&mut StreamPrompt::stdio())?,
    };

    if !cli.quiet {
        write_stderr_line(stderr, summary_text(&summary));
    }
    write_stderr_line(stderr, COMPLETION_MESSAGE);
    Ok(())
}

/// Runs in dry-run mode, showing the plan without side effects.
fn run_dry(root: &Utf8Path, config: &ImportConfig, stderr: &mut dyn Write) -> Result<()> {
    ensure_invocation_dir(root, &config.marker_file)?;
    write_stderr_line(stderr, DryRunInfo { root, config }.display_text());
    Ok(())
}

/// Resolves the invocation directory from `--directory` or the current directory.
fn resolve_root(directory: Option<&Utf8Path>) -> Result<Utf8PathBuf> {
    if let Some(dir) = directory {
        return Ok(dir.to_owned());
    }

    let cwd = std::env::current_dir()?;
    Utf8PathBuf::try_from(cwd).map_err(|e| ImportError::NonUtf8Path(e.to_string()))
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}
