//! License header fix-up for extracted scripts.
//!
//! Upstream scripts lack the host tree's license header. Each extracted script
//! is handed to `mach lint --linter license --fix`, which runs from the root
//! of the host tree and therefore needs the script's path relative to it.

use crate::command::{Invocation, StepRunner};
use crate::config::LintFixConfig;
use crate::error::Result;
use camino::Utf8Path;

/// Path of an extracted entry as seen from the lint working directory.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use xpi_import::config::LintFixConfig;
/// use xpi_import::license_fix::logical_path;
///
/// let path = logical_path(&LintFixConfig::default(), Utf8Path::new("extension"), "a.js");
/// assert_eq!(path, "browser/extensions/translations/extension/a.js");
/// ```
#[must_use]
pub fn logical_path(config: &LintFixConfig, destination_dir: &Utf8Path, entry: &str) -> String {
    let module_path = config.module_path.trim_end_matches('/');
    let destination = destination_dir.as_str().trim_end_matches('/');
    format!("{module_path}/{destination}/{entry}")
}

/// The lint invocation for one logical path, run relative to `root`.
#[must_use]
pub fn fix_invocation(config: &LintFixConfig, root: &Utf8Path, logical: &str) -> Invocation {
    Invocation::new(
        config.program.as_str(),
        ["lint", "--linter", config.linter.as_str(), logical, "--fix"],
    )
    .in_dir(root.join(&config.working_dir))
}

/// Returns `true` when the entry is a script the lint should process.
#[must_use]
pub fn needs_fix(config: &LintFixConfig, entry: &str) -> bool {
    entry.ends_with(config.script_suffix.as_str())
}

/// Run the lint fix for every extracted script, in archive order.
///
/// Returns the logical paths that were passed to the lint tool.
///
/// # Errors
///
/// Returns an error if the lint program cannot be started, or if it fails
/// under the fail-fast policy.
pub fn fix_extracted_scripts(
    runner: &mut StepRunner<'_>,
    config: &LintFixConfig,
    root: &Utf8Path,
    destination_dir: &Utf8Path,
    extracted: &[String],
) -> Result<Vec<String>> {
    let mut fixed = Vec::new();

    for entry in extracted.iter().filter(|entry| needs_fix(config, entry)) {
        let logical = logical_path(config, destination_dir, entry);
        let invocation = fix_invocation(config, root, &logical);
        runner.run(&format!("license fix for {entry}"), &invocation)?;
        fixed.push(logical);
    }

    Ok(fixed)
}
