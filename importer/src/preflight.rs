//! Invocation directory check.
//!
//! The importer deletes and recreates directories relative to where it runs,
//! so it refuses to start unless the marker file is present.

use crate::error::{ImportError, Result};
use camino::Utf8Path;
use log::debug;

/// Verify that `marker` exists relative to `root`.
///
/// # Errors
///
/// Returns [`ImportError::WrongDirectory`] when the marker is missing.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use xpi_import::preflight::ensure_invocation_dir;
///
/// let result = ensure_invocation_dir(Utf8Path::new("/nonexistent"), Utf8Path::new("moz.build"));
/// assert!(result.is_err());
/// ```
pub fn ensure_invocation_dir(root: &Utf8Path, marker: &Utf8Path) -> Result<()> {
    let marker_path = root.join(marker);
    if marker_path.is_file() {
        debug!("found marker {marker_path}");
        return Ok(());
    }

    Err(ImportError::WrongDirectory {
        marker: marker.to_owned(),
    })
}
