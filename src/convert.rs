//! Conversion entry points.
//!
//! [`convert`] and [`convert_markdown`] produce the HTML without side
//! effects; [`publish`] sends finished HTML to the clipboard and optional
//! output file; [`convert_to_clipboard`] does both, which is what the CLI
//! runs.

use crate::config::ConversionConfig;
use crate::error::Md2ClipError;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline::dom::HtmlFragment;
use crate::pipeline::highlight::{self, HighlightSummary};
use crate::pipeline::{input, markdown, stylesheet};
use crate::sink::{self, ClipboardSink, SystemClipboard};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Convert a Markdown file to self-contained, highlighted HTML.
///
/// This is the primary entry point for the library. Nothing is written to
/// the clipboard or disk; see [`convert_to_clipboard`] for that.
///
/// # Errors
/// - the file is missing, unreadable, or not UTF-8
/// - a custom stylesheet cannot be read or parsed
/// - a code block cannot be tokenised
pub async fn convert(
    input_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2ClipError> {
    let input_path = input_path.as_ref();
    info!("Starting conversion: {}", input_path.display());

    let markdown = input::read_markdown(input_path).await?;
    convert_markdown(&markdown, config).await
}

/// Convert Markdown text already in memory.
pub async fn convert_markdown(
    markdown: &str,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2ClipError> {
    let start = Instant::now();

    let css_source = stylesheet::load_stylesheet(&config.stylesheet).await?;

    // Highlighting and minification are CPU-bound, and the DOM is `!Send`,
    // so the whole transformation runs on one blocking thread.
    let markdown_owned = markdown.to_string();
    let raw_html = config.raw_html;
    let fallback_language = config.fallback_language.clone();
    let rendered = tokio::task::spawn_blocking(move || {
        render_document(&markdown_owned, &css_source, raw_html, &fallback_language)
    })
    .await
    .map_err(|e| Md2ClipError::Internal(format!("Render task panicked: {e}")))??;

    let stats = ConversionStats {
        code_blocks: rendered.summary.total(),
        tagged_blocks: rendered.summary.tagged,
        fallback_blocks: rendered.summary.fallback,
        plain_text_blocks: rendered.summary.plain_text,
        markdown_bytes: markdown.len(),
        css_bytes: rendered.css_bytes,
        html_bytes: rendered.html.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {} code blocks, {} bytes of HTML, {}ms",
        stats.code_blocks, stats.html_bytes, stats.duration_ms
    );

    Ok(ConversionOutput {
        html: rendered.html,
        stats,
    })
}

/// Copy `html` to the clipboard, then write it to `output_path` if given.
///
/// The clipboard write comes first; if it fails, no file is written.
pub async fn publish(
    html: &str,
    output_path: Option<&Path>,
    config: &ConversionConfig,
) -> Result<(), Md2ClipError> {
    sink::copy_to_clipboard(resolve_clipboard(config), html, config.clipboard_format).await?;

    if let Some(path) = output_path {
        sink::write_output_file(path, html).await?;
        info!("Saved HTML to {}", path.display());
    }

    Ok(())
}

/// Convert a Markdown file and publish the result.
///
/// Returns the stats; the HTML itself is on the clipboard (and in the
/// output file, when one was given).
pub async fn convert_to_clipboard(
    input_path: impl AsRef<Path>,
    output_path: Option<&Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Md2ClipError> {
    let output = convert(input_path, config).await?;
    publish(&output.html, output_path, config).await?;
    Ok(output.stats)
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2ClipError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Md2ClipError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(convert(input_path, config))
}

// ── Internal helpers ─────────────────────────────────────────────────────

struct RenderedDocument {
    html: String,
    summary: HighlightSummary,
    css_bytes: usize,
}

/// Markdown → HTML → highlighted DOM → `<style>` + fragment.
fn render_document(
    source: &str,
    css_source: &str,
    raw_html: bool,
    fallback_language: &str,
) -> Result<RenderedDocument, Md2ClipError> {
    let body = markdown::markdown_to_html(source, raw_html);
    let fragment = HtmlFragment::parse(&body)?;
    let summary = highlight::highlight_blocks(&fragment, fallback_language)?;

    let css = stylesheet::minify_css(css_source)?;
    fragment.prepend_style(&css);

    Ok(RenderedDocument {
        html: fragment.to_html()?,
        summary,
        css_bytes: css.len(),
    })
}

/// The injected clipboard sink, or the system clipboard.
fn resolve_clipboard(config: &ConversionConfig) -> Arc<dyn ClipboardSink> {
    match config.clipboard {
        Some(ref sink) => Arc::clone(sink),
        None => Arc::new(SystemClipboard),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemoryClipboard;

    #[test]
    fn render_document_starts_with_style() {
        let doc = render_document("# Hi\n", "p { color: red; }", true, "typescript").unwrap();
        assert!(doc.html.starts_with("<style>p{color:red}</style>"), "got: {}", doc.html);
        assert!(doc.html.contains("<h1>Hi</h1>"));
        assert_eq!(doc.summary.total(), 0);
        assert_eq!(doc.css_bytes, "p{color:red}".len());
    }

    #[tokio::test]
    async fn convert_markdown_counts_blocks() {
        let md = "```rust\nfn a() {}\n```\n\n```\nlet b = 1;\n```\n";
        let out = convert_markdown(md, &ConversionConfig::default()).await.unwrap();
        assert_eq!(out.stats.code_blocks, 2);
        assert_eq!(out.stats.tagged_blocks, 1);
        assert_eq!(out.stats.fallback_blocks, 1);
        assert_eq!(out.stats.plain_text_blocks, 0);
        assert_eq!(out.stats.markdown_bytes, md.len());
        assert_eq!(out.stats.html_bytes, out.html.len());
    }

    #[tokio::test]
    async fn publish_without_output_only_touches_clipboard() {
        let clip = Arc::new(MemoryClipboard::new());
        let config = ConversionConfig::builder()
            .clipboard(clip.clone())
            .build()
            .unwrap();

        publish("<p>x</p>", None, &config).await.unwrap();
        assert_eq!(clip.contents().as_deref(), Some("<p>x</p>"));
    }

    #[test]
    fn resolve_clipboard_prefers_injected_sink() {
        let clip = Arc::new(MemoryClipboard::new());
        let config = ConversionConfig::builder()
            .clipboard(clip.clone())
            .build()
            .unwrap();
        let sink = resolve_clipboard(&config);
        sink.write("y", config.clipboard_format).unwrap();
        assert_eq!(clip.contents().as_deref(), Some("y"));
    }
}
