//! External command execution.
//!
//! Every program the importer launches goes through [`CommandExecutor`], so
//! tests can observe the exact sequence of invocations without spawning
//! anything. [`StepRunner`] applies the [`FailurePolicy`] to each result.

use crate::error::{ImportError, Result};
use camino::Utf8PathBuf;
use log::{info, warn};
use std::fmt;
use std::process::{Command, ExitStatus};

/// A single external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to execute.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Directory to run in; `None` inherits the current directory.
    pub working_dir: Option<Utf8PathBuf>,
}

impl Invocation {
    /// Create an invocation that inherits the current directory.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: None,
        }
    }

    /// Run the invocation in `dir`.
    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        if let Some(dir) = &self.working_dir {
            write!(f, " (in {dir})")?;
        }
        Ok(())
    }
}

/// Abstraction for running external commands.
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor {
    /// Runs the invocation to completion and returns its exit status.
    ///
    /// Standard streams are inherited so upstream build output reaches the
    /// operator directly.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Spawn`] if the program cannot be started.
    fn run(&self, invocation: &Invocation) -> Result<ExitStatus>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, invocation: &Invocation) -> Result<ExitStatus> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);

        if let Some(dir) = &invocation.working_dir {
            cmd.current_dir(dir.as_std_path());
        }

        cmd.status().map_err(|source| ImportError::Spawn {
            program: invocation.program.clone(),
            source,
        })
    }
}

/// How unsuccessful exit statuses are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and carry on with the next step.
    #[default]
    Continue,
    /// Abort the run on the first failure.
    FailFast,
}

impl FailurePolicy {
    /// Select the policy from the `fail_fast` setting.
    #[must_use]
    pub const fn from_fail_fast(fail_fast: bool) -> Self {
        if fail_fast {
            Self::FailFast
        } else {
            Self::Continue
        }
    }
}

/// A step that exited unsuccessfully but was tolerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    /// Name of the step.
    pub step: String,
    /// Exit status reported by the process.
    pub status: ExitStatus,
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.step, self.status)
    }
}

/// Runs named steps through an executor and applies the failure policy.
pub struct StepRunner<'a> {
    executor: &'a dyn CommandExecutor,
    policy: FailurePolicy,
    failures: Vec<StepFailure>,
}

impl<'a> StepRunner<'a> {
    /// Create a runner over `executor`.
    #[must_use]
    pub fn new(executor: &'a dyn CommandExecutor, policy: FailurePolicy) -> Self {
        Self {
            executor,
            policy,
            failures: Vec::new(),
        }
    }

    /// Run one step.
    ///
    /// Under [`FailurePolicy::Continue`] an unsuccessful exit is logged and
    /// recorded, and `Ok(false)` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Spawn`] if the program cannot be started, and
    /// [`ImportError::StepFailed`] for an unsuccessful exit under
    /// [`FailurePolicy::FailFast`].
    pub fn run(&mut self, step: &str, invocation: &Invocation) -> Result<bool> {
        info!("{step}: {invocation}");
        let status = self.executor.run(invocation)?;

        if status.success() {
            return Ok(true);
        }

        match self.policy {
            FailurePolicy::FailFast => Err(ImportError::StepFailed {
                step: step.to_owned(),
                status,
            }),
            FailurePolicy::Continue => {
                warn!("{step} failed with {status}; continuing");
                self.failures.push(StepFailure {
                    step: step.to_owned(),
                    status,
                });
                Ok(false)
            }
        }
    }

    /// Steps that failed and were tolerated so far.
    #[must_use]
    pub fn failures(&self) -> &[StepFailure] {
        &self.failures
    }

    /// Consume the runner, returning the tolerated failures.
    #[must_use]
    pub fn into_failures(self) -> Vec<StepFailure> {
        self.failures
    }
}
