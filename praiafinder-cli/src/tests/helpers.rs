//! Test helpers for writing CLI input files into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use std::fs;
use tempfile::TempDir;

/// A temporary directory addressed through UTF-8 paths.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `contents` to `name` under the workspace and return its path.
    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.root.join(name);
        write_utf8(&path, contents.as_bytes());
        path
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date")
}

pub(super) fn output(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).expect("utf-8 output")
}
