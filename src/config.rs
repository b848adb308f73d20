//! Configuration types for Markdown-to-HTML conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The defaults reproduce what the CLI
//! does with no flags: CommonMark with raw HTML passed through, TypeScript as
//! the fallback language, the bundled stylesheet, and plain-text output on
//! the system clipboard.

use crate::error::Md2ClipError;
use crate::sink::ClipboardSink;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Language used for code blocks that carry no language tag.
pub const DEFAULT_FALLBACK_LANGUAGE: &str = "typescript";

/// Configuration for a Markdown-to-HTML conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use md2clip::{ClipboardFormat, ConversionConfig};
///
/// let config = ConversionConfig::builder()
///     .fallback_language("rust")
///     .clipboard_format(ClipboardFormat::Html)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Language used to highlight fenced blocks without a tag. Default: `typescript`.
    pub fallback_language: String,

    /// Pass raw HTML in the Markdown through to the output. Default: true.
    ///
    /// When false, raw HTML blocks and inline tags are escaped instead of
    /// emitted verbatim.
    pub raw_html: bool,

    /// Where the inlined stylesheet comes from. Default: [`StylesheetSource::Bundled`].
    pub stylesheet: StylesheetSource,

    /// How the HTML is offered on the clipboard. Default: [`ClipboardFormat::PlainText`].
    pub clipboard_format: ClipboardFormat,

    /// Pre-constructed clipboard sink. If None, the system clipboard is used.
    pub clipboard: Option<Arc<dyn ClipboardSink>>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            fallback_language: DEFAULT_FALLBACK_LANGUAGE.to_string(),
            raw_html: true,
            stylesheet: StylesheetSource::default(),
            clipboard_format: ClipboardFormat::default(),
            clipboard: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("fallback_language", &self.fallback_language)
            .field("raw_html", &self.raw_html)
            .field("stylesheet", &self.stylesheet)
            .field("clipboard_format", &self.clipboard_format)
            .field(
                "clipboard",
                &self.clipboard.as_ref().map(|_| "<dyn ClipboardSink>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn fallback_language(mut self, language: impl Into<String>) -> Self {
        self.config.fallback_language = language.into().trim().to_string();
        self
    }

    pub fn raw_html(mut self, v: bool) -> Self {
        self.config.raw_html = v;
        self
    }

    pub fn stylesheet(mut self, source: StylesheetSource) -> Self {
        self.config.stylesheet = source;
        self
    }

    pub fn stylesheet_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.stylesheet = StylesheetSource::File(path.into());
        self
    }

    pub fn clipboard_format(mut self, format: ClipboardFormat) -> Self {
        self.config.clipboard_format = format;
        self
    }

    pub fn clipboard(mut self, sink: Arc<dyn ClipboardSink>) -> Self {
        self.config.clipboard = Some(sink);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Md2ClipError> {
        let c = &self.config;
        if c.fallback_language.is_empty() {
            return Err(Md2ClipError::InvalidConfig(
                "Fallback language must not be empty".into(),
            ));
        }
        if let StylesheetSource::File(ref path) = c.stylesheet {
            if path.as_os_str().is_empty() {
                return Err(Md2ClipError::InvalidConfig(
                    "Stylesheet path must not be empty".into(),
                ));
            }
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Source of the CSS inlined at the top of the output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StylesheetSource {
    /// The stylesheet shipped inside the binary. (default)
    #[default]
    Bundled,
    /// A stylesheet read from the local filesystem at conversion time.
    File(PathBuf),
}

/// How the finished HTML is placed on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClipboardFormat {
    /// The HTML source as plain text. Paste targets with an HTML source
    /// view (most documentation editors) expect this. (default)
    #[default]
    PlainText,
    /// Rich `text/html` content, with the HTML source as the plain-text
    /// alternative for targets that only accept text.
    Html,
}
