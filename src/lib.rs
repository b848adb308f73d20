//! # md2clip
//!
//! Convert a Markdown document into styled, syntax-highlighted HTML and put
//! it on the clipboard, ready to paste into a rich-text documentation editor.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown file
//!  │
//!  ├─ 1. Input      read the file (UTF-8, BOM stripped)
//!  ├─ 2. Convert    CommonMark → HTML via comrak
//!  ├─ 3. Highlight  every `pre > code` block via syntect, marked `hljs`
//!  ├─ 4. Style      bundled CSS minified by lightningcss, prepended as <style>
//!  └─ 5. Output     clipboard (always) + output file (optional)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2clip::{convert_to_clipboard, ConversionConfig};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let stats = convert_to_clipboard("README.md", Some(Path::new("README.html")), &config).await?;
//!     eprintln!("{} code blocks highlighted", stats.code_blocks);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2clip` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod sink;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ClipboardFormat, ConversionConfig, ConversionConfigBuilder, StylesheetSource};
pub use convert::{convert, convert_markdown, convert_sync, convert_to_clipboard, publish};
pub use error::Md2ClipError;
pub use output::{ConversionOutput, ConversionStats};
pub use pipeline::highlight::MARKER_CLASS;
pub use sink::{ClipboardSink, MemoryClipboard, SystemClipboard};
