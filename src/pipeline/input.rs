//! Input loading: read the Markdown source from disk.
//!
//! The file is read in one go with `tokio::fs`; documentation pages are small
//! and the rest of the pipeline needs the whole text anyway. I/O error kinds
//! are mapped to dedicated [`Md2ClipError`] variants so the CLI can print a
//! useful hint instead of a bare `os error 2`.

use crate::error::Md2ClipError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Read a Markdown file as UTF-8 text.
///
/// A leading byte-order mark is dropped; comrak would otherwise render it as
/// a stray character at the start of the first paragraph.
pub async fn read_markdown(path: &Path) -> Result<String, Md2ClipError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| map_read_error(path, e))?;

    if !metadata.is_file() {
        return Err(Md2ClipError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| map_read_error(path, e))?;

    let mut text = String::from_utf8(bytes).map_err(|e| Md2ClipError::NotUtf8 {
        path: path.to_path_buf(),
        detail: e.utf8_error().to_string(),
    })?;

    if text.starts_with('\u{FEFF}') {
        text.drain(..'\u{FEFF}'.len_utf8());
    }

    debug!("Read {} bytes of Markdown from {}", text.len(), path.display());
    Ok(text)
}

fn map_read_error(path: &Path, e: std::io::Error) -> Md2ClipError {
    match e.kind() {
        ErrorKind::NotFound => Md2ClipError::FileNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => Md2ClipError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => Md2ClipError::InputReadFailed {
            path: path.to_path_buf(),
            source: e,
        },
    }
}
