//! End-to-end import orchestration.
//!
//! Runs the stages in order: preflight, rebuild decision, optional rebuild,
//! destination reset, manifest, filtered extraction, and license fix-up.
//! Collaborators that touch the outside world are injected so the whole flow
//! can run against a temporary directory in tests.

use crate::command::{CommandExecutor, FailurePolicy, StepFailure, StepRunner};
use crate::config::ImportConfig;
use crate::error::Result;
use crate::exclusion::ExclusionRules;
use crate::extraction::ArchiveExtractor;
use crate::license_fix::fix_extracted_scripts;
use crate::manifest::{reset_destination, write_manifest};
use crate::pipeline::run_rebuild;
use crate::preflight::ensure_invocation_dir;
use crate::prompt::{RebuildDecision, RebuildPrompt, decide_rebuild};
use camino::{Utf8Path, Utf8PathBuf};
use log::info;

/// Result of a completed import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Whether the upstream build ran during this import.
    pub rebuilt: bool,
    /// Location of the generated `jar.mn`.
    pub manifest_path: Utf8PathBuf,
    /// Archive entries written to the destination, in archive order.
    pub extracted: Vec<String>,
    /// Archive entries dropped by the exclusion rules.
    pub skipped: Vec<String>,
    /// Logical paths passed to the license fix-up.
    pub license_fixes: Vec<String>,
    /// External steps that failed but were tolerated.
    pub failed_steps: Vec<StepFailure>,
}

/// Imports the packaged extension into the directory at `root`.
pub struct Importer<'a> {
    root: &'a Utf8Path,
    config: &'a ImportConfig,
    executor: &'a dyn CommandExecutor,
    extractor: &'a dyn ArchiveExtractor,
}

impl<'a> Importer<'a> {
    /// Create an importer operating on `root` with the given collaborators.
    #[must_use]
    pub fn new(
        root: &'a Utf8Path,
        config: &'a ImportConfig,
        executor: &'a dyn CommandExecutor,
        extractor: &'a dyn ArchiveExtractor,
    ) -> Self {
        Self {
            root,
            config,
            executor,
            extractor,
        }
    }

    /// Run the import.
    ///
    /// Nothing is touched before the marker file check passes.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker file is missing, the prompt fails, a
    /// program cannot be started, a step fails under fail-fast, or the
    /// package cannot be extracted.
    pub fn run(&self, prompt: &mut dyn RebuildPrompt) -> Result<ImportSummary> {
        ensure_invocation_dir(self.root, &self.config.marker_file)?;

        let mut runner = StepRunner::new(
            self.executor,
            FailurePolicy::from_fail_fast(self.config.fail_fast),
        );

        let artifact = self.root.join(&self.config.artifact_path);
        let decision = decide_rebuild(&artifact, prompt)?;
        if decision == RebuildDecision::Rebuild {
            info!("rebuilding {} at {}", self.config.repository_url, self.config.tag);
            run_rebuild(&mut runner, self.config, self.root)?;
        } else {
            info!("reusing {artifact}");
        }

        let destination = self.root.join(&self.config.destination_dir);
        reset_destination(&destination)?;
        let manifest_path = write_manifest(&destination)?;

        let rules = ExclusionRules::new(self.config.exclusions.iter().map(String::as_str));
        let report = self.extractor.extract(&artifact, &destination, &rules)?;

        let license_fixes = if self.config.lint_fix.enabled {
            fix_extracted_scripts(
                &mut runner,
                &self.config.lint_fix,
                self.root,
                &self.config.destination_dir,
                &report.extracted,
            )?
        } else {
            Vec::new()
        };

        Ok(ImportSummary {
            rebuilt: decision == RebuildDecision::Rebuild,
            manifest_path,
            extracted: report.extracted,
            skipped: report.skipped,
            license_fixes,
            failed_steps: runner.into_failures(),
        })
    }
}
