//! A mutable HTML fragment backed by html5ever's reference-counted DOM.
//!
//! html5ever only parses whole documents (or fragments with a context
//! element), so the comrak output is parsed as a document and the `<body>`
//! element is treated as the fragment root. Nodes the tree builder hoists
//! out of the body (a leading raw `<style>`, `<meta>`, or a comment before
//! any content) are moved back to the front of the root so serialising the
//! root's children reproduces everything the input contained.
//!
//! `RcDom` is built on `Rc`, so an [`HtmlFragment`] never crosses threads;
//! the whole parse/transform/serialise sequence runs inside one blocking task.

use crate::error::Md2ClipError;
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{ns, parse_document, Attribute, LocalName, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Parsed HTML whose root element stands in for the fragment.
pub struct HtmlFragment {
    // Owns the tree `root` points into.
    _dom: RcDom,
    root: Handle,
}

impl HtmlFragment {
    /// Parse an HTML string into a fragment.
    pub fn parse(html: &str) -> Result<Self, Md2ClipError> {
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
        let root = document_body(&dom)?;

        let mut hoisted: Vec<Handle> = Vec::new();

        // Comments ahead of the first tag attach to the document node.
        {
            let mut doc_children = dom.document.children.borrow_mut();
            let (comments, rest): (Vec<Handle>, Vec<Handle>) = doc_children
                .drain(..)
                .partition(|n| matches!(n.data, NodeData::Comment { .. }));
            *doc_children = rest;
            hoisted.extend(comments);
        }

        if let Some(head) = find_child_element(&document_element(&dom)?, "head") {
            hoisted.extend(head.children.borrow_mut().drain(..));
        }

        if !hoisted.is_empty() {
            let mut children = root.children.borrow_mut();
            for (i, node) in hoisted.into_iter().enumerate() {
                node.parent.set(Some(Rc::downgrade(&root)));
                children.insert(i, node);
            }
        }

        Ok(Self { _dom: dom, root })
    }

    /// Every `code` element that is a direct child of a `pre`, in document order.
    pub fn code_blocks(&self) -> Vec<Handle> {
        let mut blocks = Vec::new();
        collect_code_blocks(&self.root, &mut blocks);
        blocks
    }

    /// Insert `<style>css</style>` as the first node of the fragment.
    pub fn prepend_style(&self, css: &str) {
        let style = create_element("style", &[]);
        append_child(&style, create_text(css));
        style.parent.set(Some(Rc::downgrade(&self.root)));
        self.root.children.borrow_mut().insert(0, style);
    }

    /// Serialise the fragment root's children back to an HTML string.
    pub fn to_html(&self) -> Result<String, Md2ClipError> {
        let mut output = Vec::new();
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::IncludeNode,
            ..Default::default()
        };

        for child in self.root.children.borrow().iter() {
            let serializable = SerializableHandle::from(child.clone());
            serialize(&mut output, &serializable, opts.clone())
                .map_err(|e| Md2ClipError::HtmlSerializationFailed(e.to_string()))?;
        }

        String::from_utf8(output)
            .map_err(|e| Md2ClipError::HtmlSerializationFailed(format!("UTF-8 conversion failed: {e}")))
    }
}

// ── Node helpers ─────────────────────────────────────────────────────────────

/// True if `node` is an element with the given local name.
pub fn is_element(node: &Handle, tag: &str) -> bool {
    matches!(node.data, NodeData::Element { ref name, .. } if &*name.local == tag)
}

/// Value of the attribute `name`, if `node` is an element that has it.
pub fn attribute(node: &Handle, name: &str) -> Option<String> {
    match node.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Add `class` to the element's class list unless it is already present.
pub fn add_class(node: &Handle, class: &str) {
    let NodeData::Element { ref attrs, .. } = node.data else {
        return;
    };
    let mut attrs = attrs.borrow_mut();
    match attrs.iter_mut().find(|a| &*a.name.local == "class") {
        Some(attr) => {
            if attr.value.split_whitespace().any(|c| c == class) {
                return;
            }
            let existing = attr.value.trim();
            let joined = if existing.is_empty() {
                class.to_string()
            } else {
                format!("{existing} {class}")
            };
            attr.value = joined.into();
        }
        None => attrs.push(Attribute {
            name: QualName::new(None, ns!(), LocalName::from("class")),
            value: class.to_string().into(),
        }),
    }
}

/// Concatenated text of every descendant text node.
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    push_text(node, &mut text);
    text
}

/// Replace the children of `node` with the nodes parsed from `html`.
pub fn replace_children_with_html(node: &Handle, html: &str) -> Result<(), Md2ClipError> {
    // Wrapping in a div puts the tree builder in body mode before the first
    // character, so leading whitespace in `html` survives.
    let parsed = HtmlFragment::parse(&format!("<div>{html}</div>"))?;
    let container = parsed
        .root
        .children
        .borrow()
        .iter()
        .find(|n| is_element(n, "div"))
        .cloned()
        .ok_or_else(|| Md2ClipError::Internal("highlighted markup did not parse".into()))?;

    let new_children: Vec<Handle> = container.children.borrow_mut().drain(..).collect();
    for child in &new_children {
        child.parent.set(Some(Rc::downgrade(node)));
    }
    *node.children.borrow_mut() = new_children;
    Ok(())
}

// ── Internal helpers ─────────────────────────────────────────────────────────

fn document_element(dom: &RcDom) -> Result<Handle, Md2ClipError> {
    find_child_element(&dom.document, "html")
        .ok_or_else(|| Md2ClipError::Internal("parsed document has no <html> element".into()))
}

fn document_body(dom: &RcDom) -> Result<Handle, Md2ClipError> {
    find_child_element(&document_element(dom)?, "body")
        .ok_or_else(|| Md2ClipError::Internal("parsed document has no <body> element".into()))
}

fn find_child_element(parent: &Handle, tag: &str) -> Option<Handle> {
    parent
        .children
        .borrow()
        .iter()
        .find(|n| is_element(n, tag))
        .cloned()
}

fn collect_code_blocks(node: &Handle, out: &mut Vec<Handle>) {
    let is_pre = is_element(node, "pre");
    for child in node.children.borrow().iter() {
        if is_pre && is_element(child, "code") {
            out.push(child.clone());
        }
        collect_code_blocks(child, out);
    }
}

fn push_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { ref contents } = node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        push_text(child, out);
    }
}

fn append_child(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

fn create_element(tag: &str, attrs: &[(&str, &str)]) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(*name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_simple_fragment() {
        let html = "<h1>Title</h1>\n<p>Body <em>text</em></p>\n";
        let frag = HtmlFragment::parse(html).unwrap();
        assert_eq!(frag.to_html().unwrap(), html);
    }

    #[test]
    fn finds_only_pre_code_blocks() {
        let html = "<p><code>inline</code></p><pre><code class=\"language-rust\">a</code></pre>\
                    <div><pre><code>b</code></pre></div>";
        let frag = HtmlFragment::parse(html).unwrap();
        let blocks = frag.code_blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(text_content(&blocks[0]), "a");
        assert_eq!(attribute(&blocks[0], "class").as_deref(), Some("language-rust"));
        assert_eq!(text_content(&blocks[1]), "b");
        assert_eq!(attribute(&blocks[1], "class"), None);
    }

    #[test]
    fn text_content_decodes_entities() {
        let frag = HtmlFragment::parse("<pre><code>a &lt; b &amp;&amp; c</code></pre>").unwrap();
        let block = &frag.code_blocks()[0];
        assert_eq!(text_content(block), "a < b && c");
    }

    #[test]
    fn add_class_appends_once() {
        let frag = HtmlFragment::parse("<pre><code class=\"language-go\">x</code></pre>").unwrap();
        let block = &frag.code_blocks()[0];
        add_class(block, "hljs");
        add_class(block, "hljs");
        assert_eq!(attribute(block, "class").as_deref(), Some("language-go hljs"));
    }

    #[test]
    fn add_class_creates_attribute() {
        let frag = HtmlFragment::parse("<pre><code>x</code></pre>").unwrap();
        let block = &frag.code_blocks()[0];
        add_class(block, "hljs");
        assert_eq!(attribute(block, "class").as_deref(), Some("hljs"));
    }

    #[test]
    fn replace_children_parses_markup() {
        let frag = HtmlFragment::parse("<pre><code>old</code></pre>").unwrap();
        let block = &frag.code_blocks()[0];
        replace_children_with_html(block, "<span class=\"k\">let</span> x").unwrap();
        assert_eq!(
            frag.to_html().unwrap(),
            "<pre><code><span class=\"k\">let</span> x</code></pre>"
        );
    }

    #[test]
    fn prepended_style_comes_first_and_is_raw() {
        let frag = HtmlFragment::parse("<p>hi</p>").unwrap();
        frag.prepend_style("a>b{color:red}");
        let html = frag.to_html().unwrap();
        assert_eq!(html, "<style>a>b{color:red}</style><p>hi</p>");
    }

    #[test]
    fn head_content_is_kept_in_order() {
        let html = "<meta name=\"x\" content=\"y\">\n<p>after</p>";
        let frag = HtmlFragment::parse(html).unwrap();
        let out = frag.to_html().unwrap();
        let meta = out.find("<meta").unwrap();
        let para = out.find("<p>after</p>").unwrap();
        assert!(meta < para, "got: {out}");
    }

    #[test]
    fn leading_comment_is_kept() {
        let frag = HtmlFragment::parse("<!-- note --><p>x</p>").unwrap();
        assert!(frag.to_html().unwrap().starts_with("<!-- note -->"));
    }
}
