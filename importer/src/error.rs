//! Error types for the extension importer.
//!
//! Each variant names the stage that failed so the operator can tell a broken
//! upstream build apart from a broken archive or a misplaced invocation.

use crate::extraction::ExtractionError;
use camino::Utf8PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that can occur while importing the extension.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The importer was started outside the directory it manages.
    #[error(
        "this tool is intended to be executed from the extension's local folder \
         ({marker} not found)"
    )]
    WrongDirectory {
        /// Marker file that was expected in the invocation directory.
        marker: Utf8PathBuf,
    },

    /// An external step exited unsuccessfully while fail-fast was enabled.
    #[error("step `{step}` failed with {status}")]
    StepFailed {
        /// Human-readable name of the step.
        step: String,
        /// Exit status reported by the process.
        status: ExitStatus,
    },

    /// An external program could not be started at all.
    #[error("failed to start `{program}`")]
    Spawn {
        /// Program that was being launched.
        program: String,
        /// The underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The built package could not be extracted.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The configuration file could not be read or parsed.
    #[error("invalid configuration at {path}: {reason}")]
    Config {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// Reading the operator's answer to the rebuild prompt failed.
    #[error("failed to read rebuild answer")]
    Prompt {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A path could not be represented as UTF-8.
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`ImportError`].
pub type Result<T> = std::result::Result<T, ImportError>;
