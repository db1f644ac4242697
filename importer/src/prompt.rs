//! Reuse-or-rebuild decision for an existing package.
//!
//! Rebuilding the extension takes a long time, so when a package from an
//! earlier run is still on disk the operator is asked whether to reuse it.
//! Anything other than an explicit yes rebuilds.

use crate::error::{ImportError, Result};
use camino::Utf8Path;
use log::debug;
use std::io::{BufRead, Write};

/// Outcome of the rebuild decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildDecision {
    /// Run the full upstream build before extracting.
    Rebuild,
    /// Extract the package already on disk.
    Reuse,
}

/// Source of the operator's answer when a package already exists.
#[cfg_attr(test, mockall::automock)]
pub trait RebuildPrompt {
    /// Ask whether the package at `artifact` should be reused.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Prompt`] if the answer cannot be read.
    fn confirm_reuse(&mut self, artifact: &Utf8Path) -> Result<bool>;
}

/// Prompt that writes a question to `output` and reads one line from `input`.
pub struct StreamPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StreamPrompt<R, W> {
    /// Create a prompt over the given streams.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl StreamPrompt<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Prompt on standard input, writing the question to standard output.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> RebuildPrompt for StreamPrompt<R, W> {
    fn confirm_reuse(&mut self, artifact: &Utf8Path) -> Result<bool> {
        write!(
            self.output,
            "Extension package exists at {artifact}. \
             Press Y to use it or any other key to rebuild it: "
        )
        .and_then(|()| self.output.flush())
        .map_err(|source| ImportError::Prompt { source })?;

        let mut answer = String::new();
        self.input
            .read_line(&mut answer)
            .map_err(|source| ImportError::Prompt { source })?;

        Ok(is_affirmative(&answer))
    }
}

/// Prompt with a fixed answer, used for `--reuse` and `--rebuild`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetAnswer {
    reuse: bool,
}

impl PresetAnswer {
    /// Always answer "reuse".
    #[must_use]
    pub const fn reuse() -> Self {
        Self { reuse: true }
    }

    /// Always answer "rebuild".
    #[must_use]
    pub const fn rebuild() -> Self {
        Self { reuse: false }
    }
}

impl RebuildPrompt for PresetAnswer {
    fn confirm_reuse(&mut self, _artifact: &Utf8Path) -> Result<bool> {
        Ok(self.reuse)
    }
}

/// Returns `true` for `y` or `yes` in any case, ignoring surrounding whitespace.
///
/// # Examples
///
/// ```
/// use xpi_import::prompt::is_affirmative;
///
/// assert!(is_affirmative("Y\n"));
/// assert!(!is_affirmative(""));
/// ```
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Decide whether to rebuild, asking `prompt` only when `artifact` exists.
///
/// # Errors
///
/// Propagates errors from the prompt.
pub fn decide_rebuild(artifact: &Utf8Path, prompt: &mut dyn RebuildPrompt) -> Result<RebuildDecision> {
    if !artifact.is_file() {
        debug!("no package at {artifact}; rebuilding");
        return Ok(RebuildDecision::Rebuild);
    }

    if prompt.confirm_reuse(artifact)? {
        Ok(RebuildDecision::Reuse)
    } else {
        Ok(RebuildDecision::Rebuild)
    }
}
