//! Error types for the md2clip library.
//!
//! Every stage of the pipeline either hands its result to the next stage or
//! fails the whole conversion, so a single fatal error type is enough. Each
//! variant names the file or the detail that went wrong; the CLI adds
//! context with `anyhow` and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the md2clip library.
#[derive(Debug, Error)]
pub enum Md2ClipError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Markdown file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The path exists but is a directory or other non-regular file.
    #[error("'{path}' is not a regular file")]
    NotAFile { path: PathBuf },

    /// The file was read but its bytes are not valid UTF-8.
    #[error("Markdown file '{path}' is not valid UTF-8: {detail}")]
    NotUtf8 { path: PathBuf, detail: String },

    /// Any other I/O failure while reading the input.
    #[error("Failed to read '{path}': {source}")]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Stylesheet errors ─────────────────────────────────────────────────
    /// A custom stylesheet could not be read.
    #[error("Failed to read stylesheet '{path}': {source}")]
    StylesheetReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stylesheet could not be parsed or minified.
    #[error("Invalid stylesheet: {detail}")]
    InvalidStylesheet { detail: String },

    // ── Transformation errors ─────────────────────────────────────────────
    /// syntect failed while tokenising a code block.
    #[error("Syntax highlighting failed for {language} block: {detail}")]
    HighlightFailed { language: String, detail: String },

    /// The transformed DOM could not be written back to HTML.
    #[error("HTML serialization failed: {0}")]
    HtmlSerializationFailed(String),

    // ── Sink errors ───────────────────────────────────────────────────────
    /// The system clipboard could not be opened.
    #[error("Clipboard is not available: {0}\nA desktop session with a clipboard is required.")]
    ClipboardUnavailable(String),

    /// The clipboard was opened but rejected the content.
    #[error("Failed to write to clipboard: {0}")]
    ClipboardWriteFailed(String),

    /// Could not create or write the output HTML file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
