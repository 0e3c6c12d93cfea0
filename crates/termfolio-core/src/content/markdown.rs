//! Markdown to styled terminal lines
//!
//! Used for section bodies and blog posts. Only the constructs that show up in
//! portfolio prose are styled; anything else falls through as plain text.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const HEADING: Color = Color::Green;
const CODE: Color = Color::LightGreen;
const LINK: Color = Color::Cyan;
const RULE: Color = Color::DarkGray;

/// Render markdown into owned lines
pub fn render(text: &str) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut lines: Vec<Vec<Span<'static>>> = vec![Vec::new()];
    let mut style_stack: Vec<Style> = vec![Style::default()];
    // `Some(n)` for ordered lists (next number), `None` for bullets
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut in_code_block = false;
    let mut link_url: Option<String> = None;

    let current = |stack: &[Style]| *stack.last().unwrap_or(&Style::default());

    for event in Parser::new_ext(text, options) {
        match event {
            Event::Start(tag) => match tag {
                Tag::Strong => style_stack.push(current(&style_stack).add_modifier(Modifier::BOLD)),
                Tag::Emphasis => {
                    style_stack.push(current(&style_stack).add_modifier(Modifier::ITALIC));
                }
                Tag::Strikethrough => {
                    style_stack.push(current(&style_stack).add_modifier(Modifier::CROSSED_OUT));
                }
                Tag::Heading { .. } => {
                    start_block(&mut lines);
                    style_stack.push(current(&style_stack).fg(HEADING).add_modifier(Modifier::BOLD));
                }
                Tag::Link { dest_url, .. } => {
                    style_stack.push(current(&style_stack).fg(LINK).add_modifier(Modifier::UNDERLINED));
                    link_url = Some(dest_url.to_string());
                }
                Tag::CodeBlock(kind) => {
                    in_code_block = true;
                    start_block(&mut lines);
                    if let CodeBlockKind::Fenced(lang) = kind {
                        if !lang.is_empty() {
                            push(&mut lines, format!("[{lang}]"), Style::default().fg(RULE));
                            lines.push(Vec::new());
                        }
                    }
                }
                Tag::List(start) => {
                    if lists.is_empty() {
                        start_block(&mut lines);
                    }
                    lists.push(start);
                }
                Tag::Item => {
                    if !lines.last().map_or(true, Vec::is_empty) {
                        lines.push(Vec::new());
                    }
                    let depth = lists.len().saturating_sub(1);
                    let marker = match lists.last_mut() {
                        Some(Some(n)) => {
                            let marker = format!("{n}. ");
                            *n += 1;
                            marker
                        }
                        _ => "• ".to_string(),
                    };
                    push(&mut lines, format!("{}{marker}", "  ".repeat(depth)), Style::default().fg(HEADING));
                }
                Tag::Paragraph => {
                    if lists.is_empty() {
                        start_block(&mut lines);
                    }
                }
                _ => {}
            },
            Event::End(tag_end) => match tag_end {
                TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough | TagEnd::Heading(_) => {
                    style_stack.pop();
                }
                TagEnd::Link => {
                    style_stack.pop();
                    if let Some(url) = link_url.take() {
                        push(&mut lines, format!(" <{url}>"), Style::default().fg(RULE));
                    }
                }
                TagEnd::CodeBlock => {
                    in_code_block = false;
                    lines.push(Vec::new());
                }
                TagEnd::List(_) => {
                    lists.pop();
                }
                _ => {}
            },
            Event::Text(text) => {
                let style = if in_code_block {
                    Style::default().fg(CODE)
                } else {
                    current(&style_stack)
                };
                for (i, part) in text.split('\n').enumerate() {
                    if i > 0 {
                        lines.push(Vec::new());
                    }
                    if !part.is_empty() {
                        let indent = if in_code_block { "  " } else { "" };
                        push(&mut lines, format!("{indent}{part}"), style);
                    }
                }
            }
            Event::Code(code) => {
                push(&mut lines, format!("`{code}`"), Style::default().fg(CODE));
            }
            Event::SoftBreak => push(&mut lines, " ".to_string(), Style::default()),
            Event::HardBreak => lines.push(Vec::new()),
            Event::Rule => {
                start_block(&mut lines);
                push(&mut lines, "─".repeat(40), Style::default().fg(RULE));
                lines.push(Vec::new());
            }
            _ => {}
        }
    }

    while lines.last().is_some_and(Vec::is_empty) {
        lines.pop();
    }

    lines.into_iter().map(Line::from).collect()
}

/// Separate a new block from prior content with one blank line
fn start_block(lines: &mut Vec<Vec<Span<'static>>>) {
    let has_content = lines.iter().any(|l| !l.is_empty());
    if !has_content {
        return;
    }
    if !lines.last().map_or(true, Vec::is_empty) {
        lines.push(Vec::new());
    }
    let len = lines.len();
    if len < 2 || !lines[len - 2].is_empty() {
        lines.push(Vec::new());
    }
}

fn push(lines: &mut Vec<Vec<Span<'static>>>, text: String, style: Style) {
    if let Some(line) = lines.last_mut() {
        line.push(Span::styled(text, style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_plain_paragraph() {
        let lines = render("Hello world");
        assert_eq!(lines.len(), 1);
        assert_eq!(text_of(&lines[0]), "Hello world");
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        let lines = render("first\n\nsecond");
        let texts: Vec<String> = lines.iter().map(text_of).collect();
        assert_eq!(texts, vec!["first", "", "second"]);
    }

    #[test]
    fn test_heading_is_bold() {
        let lines = render("# Title\n\nbody");
        assert_eq!(text_of(&lines[0]), "Title");
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(text_of(lines.last().unwrap()), "body");
    }

    #[test]
    fn test_bullets_and_numbers() {
        let lines = render("- one\n- two\n\n1. first\n2. second");
        let texts: Vec<String> = lines.iter().map(text_of).collect();
        assert!(texts.contains(&"• one".to_string()));
        assert!(texts.contains(&"• two".to_string()));
        assert!(texts.contains(&"1. first".to_string()));
        assert!(texts.contains(&"2. second".to_string()));
    }

    #[test]
    fn test_link_shows_target() {
        let lines = render("see [Cantina](https://cantina.xyz/)");
        assert_eq!(text_of(&lines[0]), "see Cantina <https://cantina.xyz/>");
    }

    #[test]
    fn test_code_block_lines() {
        let lines = render("```solidity\nuint x;\n```");
        let texts: Vec<String> = lines.iter().map(text_of).collect();
        assert_eq!(texts, vec!["[solidity]", "  uint x;"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(render("").is_empty());
        assert!(render("   \n\n").is_empty());
    }
}
