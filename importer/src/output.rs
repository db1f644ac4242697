//! Output formatting for the importer CLI.
//!
//! Completion summaries and dry-run plans are built as strings here so the
//! binary only decides where they are written.

use crate::config::ImportConfig;
use crate::import_flow::ImportSummary;
use crate::manifest::MANIFEST_FILE_NAME;
use crate::pipeline::rebuild_plan;
use camino::Utf8Path;
use std::io::Write;

/// Final line printed after a successful import.
pub const COMPLETION_MESSAGE: &str = "Import finalized successfully";

/// Write one line to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Format the summary of a completed import.
///
/// # Example
///
/// ```
/// use camino::Utf8PathBuf;
/// use xpi_import::import_flow::ImportSummary;
/// use xpi_import::output::summary_text;
///
/// let summary = ImportSummary {
///     rebuilt: false,
///     manifest_path: Utf8PathBuf::from("extension/jar.mn"),
///     extracted: vec!["a.js".to_owned()],
///     skipped: vec!["notes.md".to_owned()],
///     license_fixes: vec!["browser/extensions/translations/extension/a.js".to_owned()],
///     failed_steps: Vec::new(),
/// };
///
/// let text = summary_text(&summary);
/// assert!(text.contains("Extracted 1 file"));
/// ```
#[must_use]
pub fn summary_text(summary: &ImportSummary) -> String {
    let source = if summary.rebuilt {
        "rebuilt from upstream"
    } else {
        "reused existing package"
    };
    let noun = if summary.extracted.len() == 1 { "file" } else { "files" };

    let mut lines = vec![
        format!("Package: {source}"),
        format!(
            "Extracted {} {noun}, skipped {}",
            summary.extracted.len(),
            summary.skipped.len()
        ),
        format!("License fixes: {}", summary.license_fixes.len()),
        format!("Manifest: {}", summary.manifest_path),
    ];

    if !summary.failed_steps.is_empty() {
        lines.push(String::new());
        lines.push("Warning: these external steps failed and were ignored:".to_owned());
        for failure in &summary.failed_steps {
            lines.push(format!("  - {failure}"));
        }
        lines.push("Re-run with --fail-fast to stop at the first failure.".to_owned());
    }

    lines.join("\n")
}

/// Configuration information for dry-run output.
#[derive(Debug)]
pub struct DryRunInfo<'a> {
    /// Invocation directory.
    pub root: &'a Utf8Path,
    /// Resolved configuration.
    pub config: &'a ImportConfig,
}

impl DryRunInfo<'_> {
    /// Format the dry-run information for display.
    #[must_use]
    pub fn display_text(&self) -> String {
        let config = self.config;
        let mut lines = vec![
            "Dry run - no files will be modified".to_owned(),
            String::new(),
            format!("Invocation directory: {}", self.root),
            format!("Repository: {} ({})", config.repository_url, config.tag),
            format!("Checkout: {}", config.checkout_dir),
            format!("Package: {}", config.artifact_path),
            format!(
                "Manifest: {}",
                config.destination_dir.join(MANIFEST_FILE_NAME)
            ),
            format!("Fail fast: {}", config.fail_fast),
            format!("License fix: {}", config.lint_fix.enabled),
            format!("Exclusions: {}", config.exclusions.join(", ")),
            String::new(),
            "Rebuild steps:".to_owned(),
        ];

        for step in rebuild_plan(config, self.root) {
            lines.push(format!("  - {}: {}", step.name, step.invocation));
        }

        lines.join("\n")
    }
}
