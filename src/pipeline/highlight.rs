//! Syntax highlighting of `pre > code` blocks with syntect.
//!
//! Each block's text is tokenised with the grammar for its language tag and
//! re-emitted as classed `<span>`s. Every scope atom becomes a class with an
//! `hljs-` prefix (`keyword.control.rust` → `hljs-keyword hljs-control
//! hljs-rust`), so stylesheets written for highlight.js match the common
//! token kinds. The `code` element itself gets the [`MARKER_CLASS`].
//!
//! Language resolution never fails a conversion: a block whose language has
//! no grammar is emitted as escaped plain text and a warning is logged.

use crate::error::Md2ClipError;
use crate::pipeline::dom::{self, HtmlFragment};
use once_cell::sync::Lazy;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tracing::{debug, warn};

/// Class added to every highlighted `code` element.
pub const MARKER_CLASS: &str = "hljs";

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hljs-" };

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(|| {
    debug!("Loading syntect syntax set");
    SyntaxSet::load_defaults_newlines()
});

/// How a block's grammar was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageMatch {
    /// The block's own language tag resolved to a grammar.
    Tagged,
    /// The block had no tag; the fallback language was used.
    Fallback,
    /// No grammar matched; the block was emitted as plain text.
    PlainText,
}

/// Highlighted markup for one code block.
#[derive(Debug, Clone)]
pub struct HighlightedCode {
    pub html: String,
    /// Name of the syntect grammar used, e.g. "Rust" or "Plain Text".
    pub syntax_name: String,
    pub matched: LanguageMatch,
}

/// Per-kind block counts from [`highlight_blocks`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightSummary {
    pub tagged: usize,
    pub fallback: usize,
    pub plain_text: usize,
}

impl HighlightSummary {
    pub fn total(&self) -> usize {
        self.tagged + self.fallback + self.plain_text
    }

    fn record(&mut self, matched: LanguageMatch) {
        match matched {
            LanguageMatch::Tagged => self.tagged += 1,
            LanguageMatch::Fallback => self.fallback += 1,
            LanguageMatch::PlainText => self.plain_text += 1,
        }
    }
}

/// Highlight every `pre > code` block in `fragment` in place.
///
/// Blocks without a language tag are highlighted as `fallback_language`.
pub fn highlight_blocks(
    fragment: &HtmlFragment,
    fallback_language: &str,
) -> Result<HighlightSummary, Md2ClipError> {
    let mut summary = HighlightSummary::default();

    for block in fragment.code_blocks() {
        let code = dom::text_content(&block);
        let tag = language_from_class(dom::attribute(&block, "class").as_deref());
        let highlighted = highlight_code(&code, tag.as_deref(), fallback_language)?;

        dom::replace_children_with_html(&block, &highlighted.html)?;
        dom::add_class(&block, MARKER_CLASS);
        summary.record(highlighted.matched);
    }

    debug!(
        "Highlighted {} code blocks ({} tagged, {} fallback, {} plain text)",
        summary.total(),
        summary.tagged,
        summary.fallback,
        summary.plain_text
    );
    Ok(summary)
}

/// Extract the language from a `class` attribute value.
///
/// Only the first class name counts. comrak writes `language-rust`; a bare
/// `rust` or `lang-rust` is accepted too.
pub fn language_from_class(class: Option<&str>) -> Option<String> {
    let first = class?.split_whitespace().next()?;
    let language = first
        .strip_prefix("language-")
        .or_else(|| first.strip_prefix("lang-"))
        .unwrap_or(first);
    if language.is_empty() {
        None
    } else {
        Some(language.to_string())
    }
}

/// Highlight `code` as `language`, or as `fallback_language` when untagged.
pub fn highlight_code(
    code: &str,
    language: Option<&str>,
    fallback_language: &str,
) -> Result<HighlightedCode, Md2ClipError> {
    let (requested, matched) = match language {
        Some(lang) => (lang, LanguageMatch::Tagged),
        None => (fallback_language, LanguageMatch::Fallback),
    };

    let (syntax, matched) = match find_syntax(requested) {
        Some(syntax) => (syntax, matched),
        None => {
            warn!("No grammar for language '{}'; emitting plain text", requested);
            (SYNTAX_SET.find_syntax_plain_text(), LanguageMatch::PlainText)
        }
    };

    let mut generator = ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, CLASS_STYLE);
    for line in LinesWithEndings::from(code) {
        generator
            .parse_html_for_line_which_includes_newline(line)
            .map_err(|e| Md2ClipError::HighlightFailed {
                language: requested.to_string(),
                detail: e.to_string(),
            })?;
    }

    Ok(HighlightedCode {
        html: generator.finalize(),
        syntax_name: syntax.name.clone(),
        matched,
    })
}

/// Look up a grammar by language tag.
///
/// Tries, in order: a known alias mapped to a file extension, the tag as an
/// extension, the tag as a grammar name, and a case-insensitive name match.
pub fn find_syntax(language: &str) -> Option<&'static SyntaxReference> {
    let language = language.trim();
    if language.is_empty() {
        return None;
    }
    let lower = language.to_lowercase();

    let extension = match lower.as_str() {
        "rust" | "rs" => "rs",
        "python" | "py" => "py",
        "javascript" | "js" | "jsx" | "mjs" | "cjs" => "js",
        // The default grammar set ships no TypeScript; JavaScript covers
        // most of its token kinds.
        "typescript" | "ts" | "tsx" => "js",
        "c" => "c",
        "cpp" | "c++" | "cxx" => "cpp",
        "csharp" | "c#" | "cs" => "cs",
        "java" => "java",
        "go" | "golang" => "go",
        "ruby" | "rb" => "rb",
        "php" => "php",
        "scala" => "scala",
        "html" | "htm" | "xhtml" => "html",
        "css" => "css",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "xml" => "xml",
        "markdown" | "md" => "md",
        "sql" => "sql",
        "shell" | "sh" | "bash" | "zsh" | "console" => "sh",
        "powershell" | "ps1" | "ps" => "ps1",
        "makefile" | "make" => "Makefile",
        "lua" => "lua",
        "perl" | "pl" => "pl",
        "r" => "r",
        "haskell" | "hs" => "hs",
        "erlang" | "erl" => "erl",
        "clojure" | "clj" => "clj",
        "diff" | "patch" => "diff",
        "ini" | "cfg" => "ini",
        "batch" | "bat" | "cmd" => "bat",
        other => other,
    };

    SYNTAX_SET
        .find_syntax_by_extension(extension)
        .or_else(|| SYNTAX_SET.find_syntax_by_name(language))
        .or_else(|| {
            SYNTAX_SET
                .syntaxes()
                .iter()
                .find(|syntax| syntax.name.to_lowercase() == lower)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_from_class_variants() {
        assert_eq!(language_from_class(Some("language-rust")).as_deref(), Some("rust"));
        assert_eq!(language_from_class(Some("lang-go extra")).as_deref(), Some("go"));
        assert_eq!(language_from_class(Some("python hljs")).as_deref(), Some("python"));
        assert_eq!(language_from_class(Some("   ")), None);
        assert_eq!(language_from_class(Some("language-")), None);
        assert_eq!(language_from_class(None), None);
    }

    #[test]
    fn finds_common_grammars() {
        assert_eq!(find_syntax("rust").unwrap().name, "Rust");
        assert_eq!(find_syntax("py").unwrap().name, "Python");
        assert_eq!(find_syntax("JSON").unwrap().name, "JSON");
        assert!(find_syntax("typescript").is_some());
        assert!(find_syntax("definitely-not-a-language").is_none());
        assert!(find_syntax("").is_none());
    }

    #[test]
    fn tagged_block_uses_its_grammar() {
        let out = highlight_code("fn main() {}\n", Some("rust"), "typescript").unwrap();
        assert_eq!(out.matched, LanguageMatch::Tagged);
        assert_eq!(out.syntax_name, "Rust");
        assert!(out.html.contains("hljs-source hljs-rust"), "got: {}", out.html);
        assert!(out.html.contains("main"));
    }

    #[test]
    fn untagged_block_uses_fallback() {
        let out = highlight_code("const x = 1;\n", None, "typescript").unwrap();
        assert_eq!(out.matched, LanguageMatch::Fallback);
        assert_eq!(out.syntax_name, "JavaScript");
        assert!(out.html.contains("hljs-source hljs-js"), "got: {}", out.html);
    }

    #[test]
    fn unknown_language_is_plain_text() {
        let out = highlight_code("a < b\n", Some("klingon"), "typescript").unwrap();
        assert_eq!(out.matched, LanguageMatch::PlainText);
        assert!(out.html.contains("a &lt; b"), "got: {}", out.html);
    }

    #[test]
    fn highlight_blocks_marks_every_block() {
        let frag = HtmlFragment::parse(
            "<pre><code class=\"language-rust\">let x = 1;\n</code></pre>\
             <pre><code>let y = 2;\n</code></pre>\
             <pre><code class=\"language-nope\">z\n</code></pre>",
        )
        .unwrap();

        let summary = highlight_blocks(&frag, "typescript").unwrap();
        assert_eq!(
            summary,
            HighlightSummary {
                tagged: 1,
                fallback: 1,
                plain_text: 1
            }
        );

        for block in frag.code_blocks() {
            let class = dom::attribute(&block, "class").unwrap();
            assert!(class.split_whitespace().any(|c| c == MARKER_CLASS), "class: {class}");
        }
        let html = frag.to_html().unwrap();
        assert!(html.contains("class=\"language-rust hljs\""), "got: {html}");
        assert!(html.contains("<code class=\"hljs\">"), "got: {html}");
    }

    #[test]
    fn code_is_escaped_exactly_once() {
        let frag = HtmlFragment::parse("<pre><code class=\"language-nope\">if a &lt; b &amp;&amp; c {}\n</code></pre>")
            .unwrap();
        highlight_blocks(&frag, "typescript").unwrap();
        let html = frag.to_html().unwrap();
        assert!(html.contains("if a &lt; b &amp;&amp; c {}"), "got: {html}");
        assert!(!html.contains("&amp;lt;"), "double-escaped: {html}");
    }

    #[test]
    fn inline_code_is_untouched() {
        let frag = HtmlFragment::parse("<p><code>x</code></p>").unwrap();
        let summary = highlight_blocks(&frag, "typescript").unwrap();
        assert_eq!(summary.total(), 0);
        assert_eq!(frag.to_html().unwrap(), "<p><code>x</code></p>");
    }
}
