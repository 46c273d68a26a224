//! Input file access for the `rank` and `beaches` commands.
//!
//! Saved `/top` bodies and beach lists are read through `cap-std` directory
//! handles so a path is always resolved relative to the directory that holds
//! it.

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use std::io::{self, Read};

/// Open a saved input file for streaming.
pub(crate) fn open_input(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Split `path` into a handle on its containing directory and the entry name.
///
/// Bare file names are looked up in the working directory.
fn containing_dir(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, &str)> {
    let entry = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("input path {path} does not end in a file name"),
        )
    })?;
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, entry))
}

/// Report whether `path` is a regular file; a missing entry is an error of
/// kind [`io::ErrorKind::NotFound`].
pub(crate) fn is_regular_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, entry) = containing_dir(path)?;
    Ok(dir.metadata(entry)?.is_file())
}

/// Load a saved input file as text.
pub(crate) fn read_input(path: &Utf8Path) -> io::Result<String> {
    let mut body = String::new();
    open_input(path)?.read_to_string(&mut body)?;
    Ok(body)
}
