// NewsSleuth - platform/fs.rs
//
// Filesystem helpers for reading content submitted via `--file`.

use crate::util::constants::MAX_CONTENT_FILE_SIZE;
use crate::util::error::{InputError, NewsSleuthError};
use std::path::Path;

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion. Files larger than
/// `MAX_CONTENT_FILE_SIZE` are rejected before being read.
pub fn read_content_file(path: &Path) -> Result<String, NewsSleuthError> {
    let io_err = |operation, source| NewsSleuthError::Io {
        path: path.to_path_buf(),
        operation,
        source,
    };

    let size = std::fs::metadata(path).map_err(|e| io_err("stat", e))?.len();
    if size > MAX_CONTENT_FILE_SIZE {
        return Err(InputError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max: MAX_CONTENT_FILE_SIZE,
        }
        .into());
    }

    let bytes = std::fs::read(path).map_err(|e| io_err("read", e))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Content file read");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
