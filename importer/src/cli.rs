//! CLI argument definitions for the extension importer.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use crate::config::ImportConfig;
use crate::prompt::PresetAnswer;
use camino::Utf8PathBuf;
use clap::Parser;

/// Import the Firefox Translations extension into the host tree.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "xpi-import")]
#[command(version, about)]
#[command(long_about = concat!(
    "Import the Firefox Translations extension into the host tree.\n\n",
    "Clones the pinned upstream release, runs its build, and extracts the ",
    "packaged extension into ./extension together with a generated jar.mn. ",
    "Extracted scripts are passed to `mach lint --linter license --fix`.\n\n",
    "Run it from the browser/extensions/translations directory. When a package ",
    "from an earlier build is present you are asked whether to reuse it.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Rebuild upstream and import:\n",
    "    $ xpi-import --rebuild\n\n",
    "  Re-import the package from the previous build:\n",
    "    $ xpi-import --reuse\n\n",
    "  Stop at the first failing external command:\n",
    "    $ xpi-import --fail-fast\n\n",
    "  Preview the plan without touching anything:\n",
    "    $ xpi-import --dry-run",
))]
pub struct Cli {
    /// Configuration file overriding the built-in defaults.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Run as if started in DIR instead of the current directory.
    #[arg(short = 'C', long, value_name = "DIR")]
    pub directory: Option<Utf8PathBuf>,

    /// Reuse an existing package without asking.
    #[arg(long, conflicts_with = "rebuild")]
    pub reuse: bool,

    /// Rebuild even when a package exists, without asking.
    #[arg(long)]
    pub rebuild: bool,

    /// Abort on the first external command that exits unsuccessfully.
    #[arg(long)]
    pub fail_fast: bool,

    /// Do not run the license lint on extracted scripts.
    #[arg(long)]
    pub skip_lint_fix: bool,

    /// Show the plan and exit without side effects.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    ///
    /// Flags only ever switch behaviour on; an absent flag keeps the value
    /// from the configuration file.
    pub fn apply_overrides(&self, config: &mut ImportConfig) {
        if self.fail_fast {
            config.fail_fast = true;
        }
        if self.skip_lint_fix {
            config.lint_fix.enabled = false;
        }
    }

    /// The fixed answer to the rebuild prompt, if one was given.
    #[must_use]
    pub const fn preset_answer(&self) -> Option<PresetAnswer> {
        if self.reuse {
            Some(PresetAnswer::reuse())
        } else if self.rebuild {
            Some(PresetAnswer::rebuild())
        } else {
            None
        }
    }

    /// Default log filter for the chosen verbosity.
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
