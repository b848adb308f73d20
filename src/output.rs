//! Result types returned by the conversion entry points.

use serde::{Deserialize, Serialize};

/// The finished HTML fragment plus statistics about how it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Self-contained HTML: an inline `<style>` block followed by the body.
    pub html: String,
    pub stats: ConversionStats,
}

/// Counters collected while running the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Number of `pre > code` blocks found in the document.
    pub code_blocks: usize,
    /// Blocks highlighted with the language named in their tag.
    pub tagged_blocks: usize,
    /// Blocks without a tag, highlighted with the fallback language.
    pub fallback_blocks: usize,
    /// Blocks whose language is not known to the highlighter (emitted as plain text).
    pub plain_text_blocks: usize,
    /// Size of the Markdown source in bytes.
    pub markdown_bytes: usize,
    /// Size of the minified stylesheet in bytes.
    pub css_bytes: usize,
    /// Size of the final HTML in bytes.
    pub html_bytes: usize,
    /// Wall-clock time spent converting, in milliseconds.
    pub duration_ms: u64,
}
