//! Markdown syntax tree.

/// Top-level block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `#` to `######`
    Heading { level: u8, content: Vec<Inline> },
    Paragraph(Vec<Inline>),
    /// Fenced with three backticks; `code` is trimmed.
    CodeBlock { lang: Option<String>, code: String },
    /// Consecutive `- ` / `* ` lines.
    List(Vec<Vec<Inline>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Code(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Link { href: String, children: Vec<Inline> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// Text content with all markup removed.
pub fn plain_text(inlines: &[Inline]) -> String {
    fn walk(inlines: &[Inline], out: &mut String) {
        for inline in inlines {
            match inline {
                Inline::Text(text) | Inline::Code(text) => out.push_str(text),
                Inline::Strong(children)
                | Inline::Emphasis(children)
                | Inline::Link { children, .. } => walk(children, out),
            }
        }
    }

    let mut out = String::new();
    walk(inlines, &mut out);
    out
}
