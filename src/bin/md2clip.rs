//! CLI binary for md2clip.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use md2clip::{convert_to_clipboard, ClipboardFormat, ConversionConfig, ConversionStats};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Copy styled HTML to the clipboard
  md2clip notes.md

  # Also keep a copy on disk
  md2clip notes.md notes.html

  # Use your own stylesheet instead of the bundled one
  md2clip --stylesheet theme.css notes.md

  # Offer text/html so rich-text editors paste formatted content
  md2clip --html-clipboard notes.md

  # Machine-readable stats on stdout
  md2clip --json notes.md > stats.json

CODE BLOCKS:
  Fenced blocks with a language tag (```rust) are highlighted with that
  grammar. Untagged blocks are highlighted as TypeScript. Blocks with an
  unknown tag are kept as escaped plain text. Every block gets the `hljs`
  class so the bundled stylesheet applies.

LOGGING:
  RUST_LOG overrides the level chosen by --verbose / --quiet.
"#;

/// Convert a Markdown file to styled HTML and copy it to the clipboard.
#[derive(Parser, Debug)]
#[command(
    name = "md2clip",
    version,
    about = "Convert a Markdown file to styled HTML and copy it to the clipboard",
    long_about = "Convert a Markdown file to HTML with syntax-highlighted code blocks and an \
inlined, minified stylesheet, then place it on the system clipboard ready to paste into a \
documentation editor. Optionally also write the HTML to a file.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown file to convert.
    file: PathBuf,

    /// Also write the HTML to this file.
    output: Option<PathBuf>,

    /// CSS file to inline instead of the bundled stylesheet.
    #[arg(long, value_name = "PATH")]
    stylesheet: Option<PathBuf>,

    /// Put the HTML on the clipboard as text/html (with a plain-text alternative).
    #[arg(long)]
    html_clipboard: bool,

    /// Print conversion stats as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let config = build_config(&cli)?;

    let output_path = cli
        .output
        .as_deref()
        .map(std::path::absolute)
        .transpose()
        .context("Failed to resolve output path")?;

    // ── Run conversion ───────────────────────────────────────────────────
    let stats = convert_to_clipboard(&cli.file, output_path.as_deref(), &config)
        .await
        .with_context(|| format!("Failed to convert {}", cli.file.display()))?;

    if cli.json {
        let json = serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?;
        println!("{json}");
    }

    if !cli.quiet {
        print_summary(&stats, output_path.as_deref());
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder();

    if let Some(ref path) = cli.stylesheet {
        builder = builder.stylesheet_file(path);
    }
    if cli.html_clipboard {
        builder = builder.clipboard_format(ClipboardFormat::Html);
    }

    builder.build().context("Invalid configuration")
}

fn print_summary(stats: &ConversionStats, output_path: Option<&Path>) {
    eprintln!(
        "{} Saved to clipboard. Paste into your documentation editor.",
        green("✔")
    );
    if let Some(path) = output_path {
        eprintln!("{} Saved to {}", green("✔"), bold(&path.display().to_string()));
    }
    eprintln!(
        "   {}",
        dim(&format!(
            "{} code blocks ({} tagged, {} fallback, {} plain)  {} bytes  {}ms",
            stats.code_blocks,
            stats.tagged_blocks,
            stats.fallback_blocks,
            stats.plain_text_blocks,
            stats.html_bytes,
            stats.duration_ms,
        ))
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use md2clip::StylesheetSource;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positional_output_is_optional() {
        let cli = Cli::try_parse_from(["md2clip", "notes.md"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("notes.md"));
        assert!(cli.output.is_none());

        let cli = Cli::try_parse_from(["md2clip", "notes.md", "out.html"]).unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out.html")));
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["md2clip", "-v", "-q", "notes.md"]).is_err());
    }

    #[test]
    fn flags_map_onto_config() {
        let cli = Cli::try_parse_from([
            "md2clip",
            "--stylesheet",
            "theme.css",
            "--html-clipboard",
            "notes.md",
        ])
        .unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.clipboard_format, ClipboardFormat::Html);
        assert_eq!(
            config.stylesheet,
            StylesheetSource::File(PathBuf::from("theme.css"))
        );
    }

    #[test]
    fn defaults_use_bundled_css_and_plain_text() {
        let cli = Cli::try_parse_from(["md2clip", "notes.md"]).unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.clipboard_format, ClipboardFormat::PlainText);
        assert_eq!(config.stylesheet, StylesheetSource::Bundled);
    }
}
