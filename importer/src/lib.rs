//! Firefox Translations extension importer.
//!
//! This crate rebuilds the upstream browser extension at a pinned release and
//! imports the packaged `.xpi` into the host source tree. It is used by the
//! `xpi-import` CLI binary and can be driven programmatically with injected
//! command and archive collaborators for testing.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`command`] - External command execution and failure policy
//! - [`config`] - Import settings and TOML configuration loading
//! - [`error`] - Semantic error types
//! - [`exclusion`] - Archive entry exclusion rules
//! - [`extraction`] - Filtered extraction of the packaged extension
//! - [`import_flow`] - End-to-end import orchestration
//! - [`license_fix`] - License header fix-up for extracted scripts
//! - [`manifest`] - Destination reset and `jar.mn` generation
//! - [`output`] - Completion summary and dry-run formatting
//! - [`pipeline`] - Upstream clone and build steps
//! - [`preflight`] - Invocation directory check
//! - [`prompt`] - Reuse-or-rebuild decision

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod extraction;
pub mod import_flow;
pub mod license_fix;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod preflight;
pub mod prompt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
