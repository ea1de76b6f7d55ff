//! I/O utilities for reading DDL text and writing insert scripts.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::LoaderError;

/// Classifies I/O errors into `LoaderError::IoError` with context.
pub fn classify_io_error(error: std::io::Error, context: &str) -> LoaderError {
    match error.kind() {
        ErrorKind::NotFound => {
            LoaderError::IoError(format!("{}: file not found ({})", context, error))
        }
        ErrorKind::PermissionDenied => {
            LoaderError::IoError(format!("{}: permission denied ({})", context, error))
        }
        ErrorKind::InvalidData => {
            LoaderError::IoError(format!("{}: not valid UTF-8 text ({})", context, error))
        }
        _ => LoaderError::IoError(format!("{}: {}", context, error)),
    }
}

/// Reads a UTF-8 text file.
pub fn read_text(path: &Path) -> Result<String, LoaderError> {
    std::fs::read_to_string(path)
        .map_err(|e| classify_io_error(e, &format!("reading {}", path.display())))
}

/// Writes text to `path`, replacing any existing file.
pub fn write_text(path: &Path, text: &str) -> Result<(), LoaderError> {
    std::fs::write(path, text)
        .map_err(|e| classify_io_error(e, &format!("writing {}", path.display())))
}
