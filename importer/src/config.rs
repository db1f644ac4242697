//! Import configuration.
//!
//! Every path, URL, and command the importer touches lives in
//! [`ImportConfig`]. The defaults reproduce the pinned Firefox Translations
//! import exactly; a TOML file can override any subset of them. Relative paths
//! are resolved against the invocation directory.

use crate::error::{ImportError, Result};
use crate::exclusion::DEFAULT_EXCLUSIONS;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

/// Upstream repository holding the extension source.
pub const DEFAULT_REPOSITORY_URL: &str =
    "https://github.com/mozilla-extensions/bergamot-browser-extension/";

/// Release tag cloned from upstream.
pub const DEFAULT_TAG: &str = "v0.4.0";

/// Directory the upstream repository is cloned into.
pub const DEFAULT_CHECKOUT_DIR: &str = "bergamot-browser-extension-src";

/// Location of the packaged extension produced by the upstream build.
pub const DEFAULT_ARTIFACT_PATH: &str = concat!(
    "bergamot-browser-extension-src/dist/production/firefox/",
    "firefox-infobar-ui/firefox-translations-0.4.0.xpi"
);

/// Directory the package is extracted into.
pub const DEFAULT_DESTINATION_DIR: &str = "extension";

/// File whose presence identifies the invocation directory.
pub const DEFAULT_MARKER_FILE: &str = "moz.build";

/// Settings for the whole import run.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    /// File that must exist in the invocation directory.
    pub marker_file: Utf8PathBuf,
    /// Upstream git repository URL.
    pub repository_url: String,
    /// Pinned tag or branch passed to `git clone -b`.
    pub tag: String,
    /// Directory the upstream repository is cloned into.
    pub checkout_dir: Utf8PathBuf,
    /// Packaged extension produced by the upstream build.
    pub artifact_path: Utf8PathBuf,
    /// Directory that receives the extracted files and `jar.mn`.
    pub destination_dir: Utf8PathBuf,
    /// Substrings that disqualify an archive entry from extraction.
    pub exclusions: Vec<String>,
    /// Commands run inside the checkout after cloning, in order.
    pub build_steps: Vec<BuildStep>,
    /// License lint fix-up applied to extracted scripts.
    pub lint_fix: LintFixConfig,
    /// Abort on the first external command that exits unsuccessfully.
    pub fail_fast: bool,
}

/// One external command of the upstream build, run inside the checkout.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BuildStep {
    /// Human-readable step name used in logs and errors.
    pub name: String,
    /// Program to execute.
    pub program: String,
    /// Arguments passed to the program.
    #[serde(default)]
    pub args: Vec<String>,
}

impl BuildStep {
    /// Create a build step from string slices.
    #[must_use]
    pub fn new(name: &str, program: &str, args: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            program: program.to_owned(),
            args: args.iter().map(|arg| (*arg).to_owned()).collect(),
        }
    }
}

/// Settings for the per-script license lint fix-up.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LintFixConfig {
    /// Whether extracted scripts are passed to the lint tool.
    pub enabled: bool,
    /// Lint driver, relative to `working_dir`.
    pub program: String,
    /// Linter name passed to `--linter`.
    pub linter: String,
    /// Directory the lint driver runs in, relative to the invocation directory.
    pub working_dir: Utf8PathBuf,
    /// Path of the invocation directory as seen from `working_dir`.
    pub module_path: String,
    /// Entries ending with this suffix are linted.
    pub script_suffix: String,
}

impl Default for LintFixConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "./mach".to_owned(),
            linter: "license".to_owned(),
            working_dir: Utf8PathBuf::from("../../.."),
            module_path: "browser/extensions/translations".to_owned(),
            script_suffix: ".js".to_owned(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            marker_file: Utf8PathBuf::from(DEFAULT_MARKER_FILE),
            repository_url: DEFAULT_REPOSITORY_URL.to_owned(),
            tag: DEFAULT_TAG.to_owned(),
            checkout_dir: Utf8PathBuf::from(DEFAULT_CHECKOUT_DIR),
            artifact_path: Utf8PathBuf::from(DEFAULT_ARTIFACT_PATH),
            destination_dir: Utf8PathBuf::from(DEFAULT_DESTINATION_DIR),
            exclusions: DEFAULT_EXCLUSIONS.iter().map(|s| (*s).to_owned()).collect(),
            build_steps: default_build_steps(),
            lint_fix: LintFixConfig::default(),
            fail_fast: false,
        }
    }
}

/// The upstream build sequence run after cloning.
#[must_use]
pub fn default_build_steps() -> Vec<BuildStep> {
    vec![
        BuildStep::new("install dependencies", "yarn", &["install"]),
        BuildStep::new(
            "fetch submodules",
            "git",
            &["submodule", "update", "--init", "--recursive"],
        ),
        BuildStep::new(
            "build wasm module",
            "./bergamot-translator/build-wasm.sh",
            &[],
        ),
        BuildStep::new(
            "import wasm module",
            "./import-bergamot-translator.sh",
            &["./bergamot-translator/build-wasm/"],
        ),
        BuildStep::new(
            "package extension",
            "yarn",
            &["build:firefox-infobar-ui"],
        ),
    ]
}

impl ImportConfig {
    /// Parse a configuration from TOML text.
    ///
    /// Keys missing from the document keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Config`] if the text is not valid TOML or names
    /// an unknown key. `origin` is only used in the error message.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use xpi_import::config::ImportConfig;
    ///
    /// let config = ImportConfig::from_toml_str("tag = \"v0.5.0\"", Utf8Path::new("inline"))?;
    /// assert_eq!(config.tag, "v0.5.0");
    /// assert_eq!(config.destination_dir, "extension");
    /// # Ok::<(), xpi_import::error::ImportError>(())
    /// ```
    pub fn from_toml_str(contents: &str, origin: &Utf8Path) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ImportError::Config {
            path: origin.to_owned(),
            reason: e.message().to_owned(),
        })
    }

    /// Load the configuration, falling back to defaults when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Config`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path).map_err(|e| ImportError::Config {
            path: path.to_owned(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&contents, path)
    }
}
