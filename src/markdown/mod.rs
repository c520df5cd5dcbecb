//! Markdown subset used by post and doc bodies.
//!
//! ```text
//! &str ──► parse ──► Document ──► emit ──► Rendered { html, toc }
//! ```
//!
//! Supported: fenced code blocks, ATX headings, `-`/`*` lists, paragraphs,
//! inline code, `**strong**`, `*emphasis*` and `[links](href)`. Raw HTML is
//! escaped, never passed through.

pub mod ast;
mod emit;
pub mod parse;

pub use emit::{Rendered, TocEntry, language_display_name};

/// Parse and render markdown to HTML with a table of contents.
pub fn render(markdown: &str) -> Rendered {
    emit::emit(&parse::parse(markdown))
}
