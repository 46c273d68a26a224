//! Unit tests for input file access.

use super::helpers::Workspace;
use crate::fs::{is_regular_file, read_input};
use camino::Utf8Path;
use rstest::rstest;
use std::io::ErrorKind;

#[rstest]
fn saved_file_is_regular_and_readable() {
    let workspace = Workspace::new();
    let path = workspace.write("top.json", "[]");
    assert!(is_regular_file(&path).expect("inspect file"));
    assert_eq!(read_input(&path).expect("read file"), "[]");
}

#[rstest]
fn directory_is_not_a_regular_file() {
    let workspace = Workspace::new();
    let dir = workspace.root().join("nested");
    std::fs::create_dir(dir.as_std_path()).expect("create dir");
    assert!(!is_regular_file(&dir).expect("inspect dir"));
}

#[rstest]
fn missing_entry_reports_not_found() {
    let workspace = Workspace::new();
    let err = is_regular_file(&workspace.root().join("absent.json")).expect_err("missing file");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
fn path_without_file_name_is_invalid_input() {
    let err = is_regular_file(Utf8Path::new("/")).expect_err("root has no file name");
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(err.to_string().contains("does not end in a file name"));
}
