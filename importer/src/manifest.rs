//! `jar.mn` generation.
//!
//! The manifest maps the extracted files into the `builtin-addons` resource
//! of `browser.jar`. Its content never varies between runs.

use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;

/// File name of the generated manifest inside the destination directory.
pub const MANIFEST_FILE_NAME: &str = "jar.mn";

/// Full text of the generated manifest.
pub const MANIFEST_CONTENT: &str = concat!(
    "##### This file was automatically generated by the xpi-import tool ####\n",
    "# This Source Code Form is subject to the terms of the Mozilla Public\n",
    "# License, v. 2.0. If a copy of the MPL was not distributed with this\n",
    "# file, You can obtain one at http://mozilla.org/MPL/2.0/.\n",
    "\n",
    "browser.jar:\n",
    "%   resource builtin-addons %builtin-addons/  contentaccessible=yes\n",
    "    builtin-addons/translations/ (**)\n",
);

/// Delete `dir` and everything in it, then create it again empty.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be removed or created.
pub fn reset_destination(dir: &Utf8Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => debug!("cleared {dir}"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// Write [`MANIFEST_CONTENT`] to `jar.mn` inside `dir`.
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn write_manifest(dir: &Utf8Path) -> Result<Utf8PathBuf> {
    let path = dir.join(MANIFEST_FILE_NAME);
    std::fs::write(&path, MANIFEST_CONTENT)?;
    debug!("wrote {path}");
    Ok(path)
}
