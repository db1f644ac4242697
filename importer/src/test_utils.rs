//! Shared test utilities for the importer crate.

use crate::command::{CommandExecutor, Invocation};
use crate::error::Result;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::process::ExitStatus;

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

/// Represents an expected command invocation for testing.
#[derive(Debug)]
pub struct ExpectedCall {
    /// The invocation the code under test must make.
    pub invocation: Invocation,
    /// The result to return when this invocation is made.
    pub result: Result<ExitStatus>,
}

impl ExpectedCall {
    /// Expect `invocation` and report a zero exit.
    #[must_use]
    pub fn succeeding(invocation: Invocation) -> Self {
        Self {
            invocation,
            result: Ok(exit_status(0)),
        }
    }

    /// Expect `invocation` and report the given non-zero exit code.
    #[must_use]
    pub fn failing(invocation: Invocation, code: i32) -> Self {
        Self {
            invocation,
            result: Ok(exit_status(code)),
        }
    }
}

/// A stub implementation of `CommandExecutor` for testing.
///
/// Checks each invocation against an ordered list of expectations and returns
/// the predefined result.
#[derive(Debug)]
pub struct StubExecutor {
    expected: RefCell<VecDeque<ExpectedCall>>,
}

impl StubExecutor {
    /// Creates a new `StubExecutor` with the given expected calls.
    #[must_use]
    pub fn new(expected: Vec<ExpectedCall>) -> Self {
        Self {
            expected: RefCell::new(expected.into()),
        }
    }

    /// Asserts that all expected command invocations have been consumed.
    ///
    /// # Panics
    ///
    /// Panics if there are remaining expected calls that were not invoked.
    pub fn assert_finished(&self) {
        assert!(
            self.expected.borrow().is_empty(),
            "expected no further command invocations"
        );
    }
}

impl CommandExecutor for StubExecutor {
    fn run(&self, invocation: &Invocation) -> Result<ExitStatus> {
        let mut expected = self.expected.borrow_mut();
        let call = expected
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected command invocation: {invocation}"));

        assert_eq!(&call.invocation, invocation);

        call.result
    }
}

/// Records every invocation and succeeds unless told otherwise.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    calls: RefCell<Vec<Invocation>>,
    failing_programs: Vec<String>,
}

impl RecordingExecutor {
    /// Creates an executor whose invocations all succeed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report exit code 1 for every invocation of `program`.
    #[must_use]
    pub fn failing(mut self, program: &str) -> Self {
        self.failing_programs.push(program.to_owned());
        self
    }

    /// Invocations made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Invocations of `program` made so far, in order.
    #[must_use]
    pub fn calls_to(&self, program: &str) -> Vec<Invocation> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.program == program)
            .cloned()
            .collect()
    }
}

impl CommandExecutor for RecordingExecutor {
    fn run(&self, invocation: &Invocation) -> Result<ExitStatus> {
        self.calls.borrow_mut().push(invocation.clone());
        let code = i32::from(self.failing_programs.contains(&invocation.program));
        Ok(exit_status(code))
    }
}
