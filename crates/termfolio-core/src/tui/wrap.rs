//! Word wrapping for styled lines
//!
//! Rows are computed before rendering so the renderer and the scroll limits
//! agree on how many rows a body takes.

use ratatui::{
    style::Style,
    text::{Line, Span},
};

/// Wrap every line to `width` columns
pub fn wrap_lines(lines: &[Line<'_>], width: u16) -> Vec<Line<'static>> {
    lines.iter().flat_map(|line| wrap_line(line, width)).collect()
}

/// Break one line at spaces so no row is wider than `width`.
///
/// The space a row breaks on is dropped; other whitespace, indentation
/// included, is kept. A word longer than a row is split.
pub fn wrap_line(line: &Line<'_>, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));
    let cells: Vec<(char, Style)> = line
        .spans
        .iter()
        .flat_map(|span| {
            let style = line.style.patch(span.style);
            span.content.chars().map(move |c| (c, style))
        })
        .collect();

    let mut rows = Vec::new();
    let mut start = 0;
    while cells.len() - start > width {
        let window = &cells[start..start + width];
        let (end, next) = if cells[start + width].0 == ' ' {
            (start + width, start + width + 1)
        } else {
            let space = window
                .iter()
                .rposition(|(c, _)| *c == ' ')
                .filter(|&i| window[..i].iter().any(|(c, _)| *c != ' '));
            match space {
                Some(i) => (start + i, start + i + 1),
                None => (start + width, start + width),
            }
        };
        rows.push(build_row(&cells[start..end]));
        start = next;
    }
    rows.push(build_row(&cells[start..]));
    rows
}

/// Merge runs of equally styled characters back into spans
fn build_row(cells: &[(char, Style)]) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current: Option<(String, Style)> = None;

    for &(c, style) in cells {
        if let Some((text, run_style)) = current.as_mut() {
            if *run_style == style {
                text.push(c);
                continue;
            }
        }
        if let Some((text, run_style)) = current.take() {
            spans.push(Span::styled(text, run_style));
        }
        current = Some((c.to_string(), style));
    }
    if let Some((text, style)) = current {
        spans.push(Span::styled(text, style));
    }
    Line::from(spans)
}
