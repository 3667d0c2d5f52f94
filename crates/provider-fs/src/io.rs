//! File reading

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::{Error, Result};

/// Read text content from a file.
///
/// A path that does not name an existing regular file yields
/// [`Error::NotFound`]; any other failure is reported as [`Error::Io`].
pub fn read_text(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }

    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::NotFound {
            path: path.to_path_buf(),
        },
        _ => Error::io(path, e),
    })
}
