//! Markdown → HTML conversion with comrak.
//!
//! Plain CommonMark only: tables, strikethrough, autolinks and the other GFM
//! extensions stay off. Fenced code blocks come out as
//! `<pre><code class="language-LANG">`, which is what the highlighter keys on.

use comrak::{markdown_to_html as render, Options};

/// Render Markdown to an HTML fragment.
///
/// With `raw_html` set, inline and block HTML in the source is emitted as-is;
/// otherwise comrak escapes it.
pub fn markdown_to_html(markdown: &str, raw_html: bool) -> String {
    let mut options = Options::default();
    options.render.unsafe_ = raw_html;
    options.render.escape = !raw_html;
    render(markdown, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_blocks() {
        let html = markdown_to_html("# Hello\n\n*World* and [a link](https://example.com)\n", true);
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<em>World</em>"));
        assert!(html.contains(r#"<a href="https://example.com">a link</a>"#));
    }

    #[test]
    fn renders_lists() {
        let html = markdown_to_html("- one\n- two\n\n1. first\n", true);
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>two</li>"));
        assert!(html.contains("<ol>"));
    }

    #[test]
    fn fenced_block_carries_language_class() {
        let html = markdown_to_html("```rust\nfn main() {}\n```\n", true);
        assert!(
            html.contains(r#"<pre><code class="language-rust">fn main() {}"#),
            "got: {html}"
        );
    }

    #[test]
    fn untagged_fence_has_no_class() {
        let html = markdown_to_html("```\nplain\n```\n", true);
        assert!(html.contains("<pre><code>plain\n</code></pre>"), "got: {html}");
    }

    #[test]
    fn raw_html_passthrough_is_configurable() {
        let src = "<div class=\"note\">hi</div>\n";
        assert!(markdown_to_html(src, true).contains("<div class=\"note\">hi</div>"));
        assert!(!markdown_to_html(src, false).contains("<div class=\"note\">"));
    }

    #[test]
    fn extensions_stay_disabled() {
        let html = markdown_to_html("~~gone~~\n", true);
        assert!(!html.contains("<del>"));
    }
}
