//! Markdown to [`Document`].
//!
//! Two passes: lines are grouped into blocks, then block text is split into
//! inlines. Unclosed markers stay literal text.

use super::ast::{Block, Document, Inline};

const FENCE: &str = "```";

pub fn parse(input: &str) -> Document {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut lines = input.lines().peekable();

    while let Some(line) = lines.next() {
        let trimmed = line.trim();

        if let Some(info) = trimmed.strip_prefix(FENCE) {
            flush_paragraph(&mut paragraph, &mut blocks);
            let mut code = Vec::new();
            for line in lines.by_ref() {
                if line.trim_start().starts_with(FENCE) {
                    break;
                }
                code.push(line);
            }
            let lang = info.split_whitespace().next().map(str::to_owned);
            blocks.push(Block::CodeBlock {
                lang,
                code: code.join("\n").trim().to_owned(),
            });
        } else if trimmed.is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
        } else if let Some((level, text)) = heading(trimmed) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Heading {
                level,
                content: parse_inlines(text),
            });
        } else if let Some(item) = list_item(trimmed) {
            flush_paragraph(&mut paragraph, &mut blocks);
            let mut items = vec![parse_inlines(item)];
            while let Some(item) = lines.peek().copied().and_then(|next| list_item(next.trim())) {
                items.push(parse_inlines(item));
                lines.next();
            }
            blocks.push(Block::List(items));
        } else {
            paragraph.push(trimmed);
        }
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    Document { blocks }
}

fn flush_paragraph(lines: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if !lines.is_empty() {
        blocks.push(Block::Paragraph(parse_inlines(&lines.join(" "))));
        lines.clear();
    }
}

/// `## Title` → `(2, "Title")`
fn heading(line: &str) -> Option<(u8, &str)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let text = line[level..].strip_prefix(' ')?.trim();
    Some((level as u8, text))
}

fn list_item(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .map(str::trim)
}

// ============================================================================
// Inlines
// ============================================================================

pub fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        let span = match c {
            '`' => code_span(rest),
            '*' => emphasis(rest),
            '[' => link(rest),
            _ => None,
        };
        match span {
            Some((inline, tail)) => {
                if !buf.is_empty() {
                    out.push(Inline::Text(std::mem::take(&mut buf)));
                }
                out.push(inline);
                rest = tail;
            }
            None => {
                buf.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    if !buf.is_empty() {
        out.push(Inline::Text(buf));
    }
    out
}

fn code_span(s: &str) -> Option<(Inline, &str)> {
    let body = &s[1..];
    let end = body.find('`').filter(|&end| end > 0)?;
    Some((Inline::Code(body[..end].to_owned()), &body[end + 1..]))
}

fn emphasis(s: &str) -> Option<(Inline, &str)> {
    if let Some(body) = s.strip_prefix("**") {
        let end = body.find("**").filter(|&end| end > 0)?;
        return Some((Inline::Strong(parse_inlines(&body[..end])), &body[end + 2..]));
    }
    let body = &s[1..];
    let end = body.find('*').filter(|&end| end > 0)?;
    Some((Inline::Emphasis(parse_inlines(&body[..end])), &body[end + 1..]))
}

/// `[label](href)`
fn link(s: &str) -> Option<(Inline, &str)> {
    let body = &s[1..];
    let close = body.find(']').filter(|&close| close > 0)?;
    let after = body[close + 1..].strip_prefix('(')?;
    let end = after.find(')').filter(|&end| end > 0)?;
    let inline = Inline::Link {
        href: after[..end].trim().to_owned(),
        children: parse_inlines(&body[..close]),
    };
    Some((inline, &after[end + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.into())
    }

    #[test]
    fn test_heading_and_paragraph() {
        let doc = parse("# Title\n\nSome **bold** text.");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading {
                    level: 1,
                    content: vec![text("Title")]
                },
                Block::Paragraph(vec![
                    text("Some "),
                    Inline::Strong(vec![text("bold")]),
                    text(" text."),
                ]),
            ]
        );
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(heading("### Kurulum"), Some((3, "Kurulum")));
        assert_eq!(heading("###### Six"), Some((6, "Six")));
        assert_eq!(heading("####### Seven"), None);
        assert_eq!(heading("#hashtag"), None);
    }

    #[test]
    fn test_fenced_code_block() {
        let doc = parse("Intro\n```rust\nfn main() {\n    println!(\"*not em*\");\n}\n```\nAfter");
        assert_eq!(doc.blocks.len(), 3);
        assert_eq!(
            doc.blocks[1],
            Block::CodeBlock {
                lang: Some("rust".into()),
                code: "fn main() {\n    println!(\"*not em*\");\n}".into(),
            }
        );
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let doc = parse("```\n  code\n");
        assert_eq!(
            doc.blocks,
            vec![Block::CodeBlock {
                lang: None,
                code: "code".into()
            }]
        );
    }

    #[test]
    fn test_consecutive_list_items() {
        let doc = parse("- one\n* two\n- `three`\n\n- four");
        assert_eq!(
            doc.blocks,
            vec![
                Block::List(vec![
                    vec![text("one")],
                    vec![text("two")],
                    vec![Inline::Code("three".into())],
                ]),
                Block::List(vec![vec![text("four")]]),
            ]
        );
    }

    #[test]
    fn test_paragraph_lines_join() {
        let doc = parse("first line\nsecond line");
        assert_eq!(doc.blocks, vec![Block::Paragraph(vec![text("first line second line")])]);
    }

    #[test]
    fn test_link_and_emphasis() {
        let inlines = parse_inlines("see [the *docs*](https://example.com) now");
        assert_eq!(
            inlines,
            vec![
                text("see "),
                Inline::Link {
                    href: "https://example.com".into(),
                    children: vec![text("the "), Inline::Emphasis(vec![text("docs")])],
                },
                text(" now"),
            ]
        );
    }

    #[test]
    fn test_unclosed_markers_are_text() {
        assert_eq!(parse_inlines("a ** b"), vec![text("a ** b")]);
        assert_eq!(parse_inlines("`open"), vec![text("`open")]);
        assert_eq!(parse_inlines("[label] (x)"), vec![text("[label] (x)")]);
        assert_eq!(parse_inlines("5 * 3"), vec![text("5 * 3")]);
    }

    #[test]
    fn test_non_ascii_text() {
        assert_eq!(
            parse_inlines("Türkçe **güçlü** metin"),
            vec![
                text("Türkçe "),
                Inline::Strong(vec![text("güçlü")]),
                text(" metin"),
            ]
        );
    }
}
