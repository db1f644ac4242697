//! Upstream rebuild pipeline.
//!
//! Removes any stale checkout, clones the pinned tag, and runs the upstream
//! build steps inside the checkout. Each step goes through a [`StepRunner`],
//! so whether a failing step aborts the run is decided by the failure policy.

use crate::command::{Invocation, StepRunner};
use crate::config::ImportConfig;
use crate::error::Result;
use camino::Utf8Path;
use log::{debug, info};

/// Name of the clone step in logs and errors.
pub const CLONE_STEP: &str = "clone upstream";

/// A named invocation in the rebuild plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    /// Human-readable step name.
    pub name: String,
    /// The command to run.
    pub invocation: Invocation,
}

/// The `git clone` invocation for the pinned tag, run in `root`.
#[must_use]
pub fn clone_invocation(config: &ImportConfig, root: &Utf8Path) -> Invocation {
    Invocation::new(
        "git",
        [
            "clone",
            "-b",
            config.tag.as_str(),
            config.repository_url.as_str(),
            config.checkout_dir.as_str(),
        ],
    )
    .in_dir(root)
}

/// Every step of a rebuild, in execution order.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use xpi_import::config::ImportConfig;
/// use xpi_import::pipeline::rebuild_plan;
///
/// let plan = rebuild_plan(&ImportConfig::default(), Utf8Path::new("/src"));
/// assert_eq!(plan.first().map(|step| step.invocation.program.as_str()), Some("git"));
/// assert_eq!(plan.len(), 6);
/// ```
#[must_use]
pub fn rebuild_plan(config: &ImportConfig, root: &Utf8Path) -> Vec<PlannedStep> {
    let checkout = root.join(&config.checkout_dir);
    let mut plan = Vec::with_capacity(config.build_steps.len() + 1);

    plan.push(PlannedStep {
        name: CLONE_STEP.to_owned(),
        invocation: clone_invocation(config, root),
    });

    plan.extend(config.build_steps.iter().map(|step| PlannedStep {
        name: step.name.clone(),
        invocation: Invocation::new(step.program.as_str(), step.args.iter().map(String::as_str))
            .in_dir(checkout.clone()),
    }));

    plan
}

/// Remove the checkout directory; a missing directory is not an error.
///
/// # Errors
///
/// Returns an I/O error if the directory exists but cannot be removed.
pub fn remove_checkout(checkout: &Utf8Path) -> Result<()> {
    match std::fs::remove_dir_all(checkout) {
        Ok(()) => {
            debug!("removed previous checkout at {checkout}");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Run the full rebuild: clean the checkout, then every planned step.
///
/// # Errors
///
/// Returns an error if the checkout cannot be removed, a program cannot be
/// started, or a step fails under the fail-fast policy.
pub fn run_rebuild(runner: &mut StepRunner<'_>, config: &ImportConfig, root: &Utf8Path) -> Result<()> {
    remove_checkout(&root.join(&config.checkout_dir))?;

    for step in rebuild_plan(config, root) {
        runner.run(&step.name, &step.invocation)?;
    }

    info!("rebuild finished with {} failed step(s)", runner.failures().len());
    Ok(())
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
