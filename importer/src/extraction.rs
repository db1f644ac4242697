//! Filtered extraction of the packaged extension.
//!
//! Walks the `.xpi` (a zip archive) in entry order, drops every entry matched
//! by the exclusion rules, and writes the rest under the destination
//! directory. Entry names are sanitized first, so `..` and absolute paths
//! always land inside the destination.

use crate::exclusion::ExclusionRules;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, trace};
use std::fs::File;

/// Trait for extracting the package, enabling test mocking.
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveExtractor {
    /// Extract every entry of `archive_path` accepted by `rules` into `dest_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::ArchiveMissing`] if the package does not
    /// exist, and [`ExtractionError::Archive`] or [`ExtractionError::Io`] on
    /// read or write failures.
    fn extract(
        &self,
        archive_path: &Utf8Path,
        dest_dir: &Utf8Path,
        rules: &ExclusionRules,
    ) -> Result<ExtractionReport, ExtractionError>;
}

/// Errors arising from package extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The package was not found, usually because the upstream build failed.
    #[error("extension package not found at {path}; did the upstream build succeed?")]
    ArchiveMissing {
        /// Expected location of the package.
        path: Utf8PathBuf,
    },

    /// The package is not a readable zip archive.
    #[error("failed to read extension package: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// I/O error during extraction.
    #[error("extraction I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// What an extraction wrote and what it skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Sanitized paths of the file entries written, in archive order.
    pub extracted: Vec<String>,
    /// Names of the entries dropped by the exclusion rules, in archive order.
    pub skipped: Vec<String>,
}

/// Default extractor using the `zip` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipExtractor;

impl ArchiveExtractor for ZipExtractor {
    fn extract(
        &self,
        archive_path: &Utf8Path,
        dest_dir: &Utf8Path,
        rules: &ExclusionRules,
    ) -> Result<ExtractionReport, ExtractionError> {
        let file = File::open(archive_path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ExtractionError::ArchiveMissing {
                path: archive_path.to_owned(),
            },
            _ => ExtractionError::Io(e),
        })?;
        let mut archive = zip::ZipArchive::new(file)?;
        let mut report = ExtractionReport::default();

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let name = entry.name().to_owned();

            if let Some(rule) = rules.matching_rule(&name) {
                trace!("skipping {name} (matches {rule})");
                report.skipped.push(name);
                continue;
            }

            let Some(relative) = sanitize_entry_name(&name) else {
                trace!("skipping {name} (no path left after sanitizing)");
                continue;
            };
            if relative != name {
                debug!("extracting {name} as {relative}");
            }
            let dest_path = dest_dir.join(&relative);

            if entry.is_dir() {
                std::fs::create_dir_all(&dest_path)?;
                continue;
            }

            if let Some(parent) = dest_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut output = File::create(&dest_path)?;
            std::io::copy(&mut entry, &mut output)?;

            report.extracted.push(relative);
        }

        debug!(
            "extracted {} entries, skipped {}",
            report.extracted.len(),
            report.skipped.len()
        );
        Ok(report)
    }
}

/// Reduce an entry name to a relative path inside the destination.
///
/// Empty, `.` and `..` segments are dropped, which also strips a leading `/`.
/// Returns `None` when nothing is left.
///
/// # Examples
///
/// ```
/// use xpi_import::extraction::sanitize_entry_name;
///
/// assert_eq!(sanitize_entry_name("../c.js").as_deref(), Some("c.js"));
/// assert_eq!(sanitize_entry_name("./lib//b.js").as_deref(), Some("lib/b.js"));
/// assert_eq!(sanitize_entry_name("../"), None);
/// ```
#[must_use]
pub fn sanitize_entry_name(name: &str) -> Option<String> {
    let parts: Vec<&str> = name
        .split('/')
        .filter(|part| !matches!(*part, "" | "." | ".."))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
