//! [`Document`] to HTML.

use super::ast::{Block, Document, Inline, plain_text};
use crate::render::html::escape;

/// A heading in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub id: String,
    pub text: String,
    pub level: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// Every piece of a document the emitter visits.
enum Node<'a> {
    Block(&'a Block),
    Inline(&'a Inline),
}

pub fn emit(doc: &Document) -> Rendered {
    let mut rendered = Rendered::default();
    let mut html = String::new();
    for block in &doc.blocks {
        write(Node::Block(block), &mut html, &mut rendered.toc);
    }
    rendered.html = html;
    rendered
}

fn write(node: Node<'_>, out: &mut String, toc: &mut Vec<TocEntry>) {
    let children = |inlines: &[Inline], out: &mut String, toc: &mut Vec<TocEntry>| {
        for inline in inlines {
            write(Node::Inline(inline), out, toc);
        }
    };

    match node {
        Node::Block(Block::Heading { level, content }) => {
            let id = format!("heading-{}", toc.len());
            out.push_str(&format!("<h{level} id=\"{id}\">"));
            children(content, out, toc);
            out.push_str(&format!("</h{level}>"));
            toc.push(TocEntry {
                id,
                text: plain_text(content),
                level: *level,
            });
        }
        Node::Block(Block::Paragraph(content)) => {
            out.push_str("<p>");
            children(content, out, toc);
            out.push_str("</p>");
        }
        Node::Block(Block::List(items)) => {
            out.push_str("<ul>");
            for item in items {
                out.push_str("<li>");
                children(item, out, toc);
                out.push_str("</li>");
            }
            out.push_str("</ul>");
        }
        Node::Block(Block::CodeBlock { lang, code }) => {
            let lang = lang.as_deref().unwrap_or("text");
            out.push_str(&format!(
                "<pre class=\"line-numbers\"><div class=\"code-language-label\">{}</div>\
                 <code class=\"language-{}\">{}</code></pre>",
                escape(&language_display_name(lang)),
                escape(lang),
                escape(code)
            ));
        }
        Node::Inline(Inline::Text(text)) => out.push_str(&escape(text)),
        Node::Inline(Inline::Code(code)) => {
            out.push_str(&format!("<code class=\"inline-code\">{}</code>", escape(code)));
        }
        Node::Inline(Inline::Strong(content)) => {
            out.push_str("<strong>");
            children(content, out, toc);
            out.push_str("</strong>");
        }
        Node::Inline(Inline::Emphasis(content)) => {
            out.push_str("<em>");
            children(content, out, toc);
            out.push_str("</em>");
        }
        Node::Inline(Inline::Link { href, children: content }) if is_safe_href(href) => {
            out.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">",
                escape(href)
            ));
            children(content, out, toc);
            out.push_str("</a>");
        }
        // any other scheme keeps only the link text
        Node::Inline(Inline::Link { children: content, .. }) => children(content, out, toc),
    }
}

/// Relative links and `http`, `https`, `mailto`.
fn is_safe_href(href: &str) -> bool {
    let href: String = href
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();
    let scheme = href
        .split_once(':')
        .map(|(scheme, _)| scheme)
        .filter(|scheme| !scheme.contains(['/', '?', '#']));
    match scheme {
        None => true,
        Some(scheme) => matches!(
            scheme.to_ascii_lowercase().as_str(),
            "http" | "https" | "mailto"
        ),
    }
}

/// Human name of a code fence language tag.
pub fn language_display_name(lang: &str) -> String {
    let name = match lang.to_lowercase().as_str() {
        "javascript" | "js" => "JavaScript",
        "typescript" | "ts" => "TypeScript",
        "python" | "py" => "Python",
        "html" => "HTML",
        "css" => "CSS",
        "scss" => "SCSS",
        "sass" => "Sass",
        "php" => "PHP",
        "java" => "Java",
        "cpp" => "C++",
        "c" => "C",
        "csharp" => "C#",
        "go" => "Go",
        "rust" => "Rust",
        "swift" => "Swift",
        "kotlin" => "Kotlin",
        "ruby" => "Ruby",
        "bash" => "Bash",
        "shell" => "Shell",
        "json" => "JSON",
        "xml" => "XML",
        "yaml" | "yml" => "YAML",
        "sql" => "SQL",
        "markdown" | "md" => "Markdown",
        _ => return lang.to_uppercase(),
    };
    name.to_owned()
}
