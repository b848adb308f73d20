//! Pipeline stages for Markdown-to-HTML conversion.
//!
//! Each submodule implements exactly one transformation step, so each can be
//! tested on its own.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ markdown ──▶ dom ──▶ highlight ──▶ stylesheet ──▶ dom
//! (file)    (comrak)    (parse)  (syntect)    (lightningcss)  (serialise)
//! ```
//!
//! 1. [`input`]: read the Markdown file as UTF-8
//! 2. [`markdown`]: CommonMark → HTML string
//! 3. [`dom`]: parse the HTML into a mutable tree and back
//! 4. [`highlight`]: replace every `pre > code` body with classed spans
//! 5. [`stylesheet`]: load and minify the CSS that is prepended as `<style>`

pub mod dom;
pub mod highlight;
pub mod input;
pub mod markdown;
pub mod stylesheet;
