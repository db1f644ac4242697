//! Test support utilities for importer behavioural tests.
//!
//! Provides helpers for building extension packages and inspecting the
//! imported tree.

use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write;
use zip::write::SimpleFileOptions;

/// Entries of the package used across scenarios.
pub const PACKAGE_ENTRIES: &[(&str, &[u8])] = &[
    ("a.js", b"console.log(\"a\");\n"),
    ("META-INF/sig.rsa", b"signature"),
    ("notes.md", b"# notes\n"),
    ("x.map", b"{}"),
];

/// Creates a temporary invocation directory.
pub fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("UTF-8 temp dir");
    (dir, root)
}

/// Writes a zip package at `path`, creating parent directories.
pub fn write_package(path: &Utf8Path, entries: &[(&str, &[u8])]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create package dir");
    }
    let file = std::fs::File::create(path).expect("create package");
    let mut zip = zip::ZipWriter::new(file);
    for (name, contents) in entries {
        zip.start_file(*name, SimpleFileOptions::default())
            .expect("start entry");
        zip.write_all(contents).expect("write entry");
    }
    zip.finish().expect("finish package");
}

/// Relative paths of every file under `dir`, sorted.
pub fn files_under(dir: &Utf8Path) -> Vec<String> {
    fn walk(base: &Utf8Path, current: &Utf8Path, out: &mut Vec<String>) {
        for entry in current.read_dir_utf8().expect("read dir") {
            let entry = entry.expect("dir entry");
            let path = entry.path();
            if path.is_dir() {
                walk(base, path, out);
            } else {
                let relative = path.strip_prefix(base).expect("path under base");
                out.push(relative.as_str().replace('\\', "/"));
            }
        }
    }

    let mut files = Vec::new();
    walk(dir, dir, &mut files);
    files.sort();
    files
}
