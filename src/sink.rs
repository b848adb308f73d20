//! Output sinks: the clipboard and the optional output file.
//!
//! Clipboard access goes through the [`ClipboardSink`] trait. The CLI uses
//! [`SystemClipboard`]; tests and embedding applications inject a
//! [`MemoryClipboard`] (or their own sink) via
//! [`crate::config::ConversionConfigBuilder::clipboard`].

use crate::config::ClipboardFormat;
use crate::error::Md2ClipError;
use arboard::Clipboard;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

/// Destination for the finished HTML.
///
/// Implementations are called from a blocking thread and must be
/// `Send + Sync`.
pub trait ClipboardSink: Send + Sync {
    /// Replace the clipboard content with `html`.
    fn write(&self, html: &str, format: ClipboardFormat) -> Result<(), Md2ClipError>;
}

/// The operating-system clipboard, via arboard.
///
/// A fresh `arboard::Clipboard` is opened per write. On X11 and Wayland the
/// content is handed to the clipboard manager when it is dropped, which is
/// what keeps it available after the process exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn write(&self, html: &str, format: ClipboardFormat) -> Result<(), Md2ClipError> {
        let mut clipboard =
            Clipboard::new().map_err(|e| Md2ClipError::ClipboardUnavailable(e.to_string()))?;

        let result = match format {
            ClipboardFormat::PlainText => clipboard.set_text(html),
            ClipboardFormat::Html => clipboard.set_html(html, Some(html)),
        };
        result.map_err(|e| Md2ClipError::ClipboardWriteFailed(e.to_string()))
    }
}

/// An in-process clipboard that records every write.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    writes: Mutex<Vec<(String, ClipboardFormat)>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently written content, if any.
    pub fn contents(&self) -> Option<String> {
        self.lock().last().map(|(html, _)| html.clone())
    }

    /// Format used by the most recent write.
    pub fn format(&self) -> Option<ClipboardFormat> {
        self.lock().last().map(|(_, format)| *format)
    }

    /// Number of writes received so far.
    pub fn write_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(String, ClipboardFormat)>> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write(&self, html: &str, format: ClipboardFormat) -> Result<(), Md2ClipError> {
        self.lock().push((html.to_string(), format));
        Ok(())
    }
}

/// Write `html` to `sink` on a blocking thread.
pub async fn copy_to_clipboard(
    sink: Arc<dyn ClipboardSink>,
    html: &str,
    format: ClipboardFormat,
) -> Result<(), Md2ClipError> {
    let html = html.to_string();
    let len = html.len();
    tokio::task::spawn_blocking(move || sink.write(&html, format))
        .await
        .map_err(|e| Md2ClipError::Internal(format!("Clipboard task panicked: {e}")))??;
    info!("Copied {} bytes of HTML to the clipboard ({:?})", len, format);
    Ok(())
}

/// Write `html` to `path`, creating parent directories as needed.
///
/// Uses atomic write (temp file + rename) so an existing file is never left
/// half-written.
pub async fn write_output_file(path: &Path, html: &str) -> Result<(), Md2ClipError> {
    let fail = |source: std::io::Error| Md2ClipError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(fail)?;
    }

    let tmp_path = temp_sibling(path).ok_or_else(|| {
        fail(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "output path has no file name",
        ))
    })?;

    tokio::fs::write(&tmp_path, html).await.map_err(fail)?;

    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(fail(e));
    }

    debug!("Wrote {} bytes to {}", html.len(), path.display());
    Ok(())
}

fn temp_sibling(path: &Path) -> Option<PathBuf> {
    let mut name: OsString = path.file_name()?.to_os_string();
    name.push(".tmp");
    Some(path.with_file_name(name))
}
