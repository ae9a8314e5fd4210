//! A tiny frame buffer: lines of styled spans, fixed-size blocks, borders
//! and joins. Panes render into blocks; the presenter paints the composed
//! frame through crossterm.

use std::fmt;

use unicode_width::UnicodeWidthStr;

use super::shared::truncate_width;

/// Semantic styling, mapped onto terminal colors by the presenter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Dim,
    Title,
    Accent,
    Selected,
    Good,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

impl Span {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self { text: text.into(), tone }
    }

    /// Terminal columns, so wide characters count double.
    fn width(&self) -> usize {
        self.text.width()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Tone::Plain)
    }

    pub fn styled(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            spans: vec![Span::new(text, tone)],
        }
    }

    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn push(&mut self, text: impl Into<String>, tone: Tone) {
        self.spans.push(Span::new(text, tone));
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    /// Cut or pad to exactly `width` columns. Padding inherits the tone
    /// of the last span so highlighted rows stay highlighted to the edge.
    pub fn fit(mut self, width: usize) -> Line {
        let mut remaining = width;
        let mut spans = Vec::with_capacity(self.spans.len() + 1);
        for span in self.spans.drain(..) {
            if remaining == 0 {
                break;
            }
            let w = span.width();
            if w <= remaining {
                remaining -= w;
                spans.push(span);
            } else {
                let cut = truncate_width(&span.text, remaining);
                remaining -= cut.width();
                spans.push(Span::new(cut, span.tone));
                break;
            }
        }
        if remaining > 0 {
            let tone = match spans.last() {
                Some(s) if s.tone == Tone::Selected => Tone::Selected,
                _ => Tone::Plain,
            };
            spans.push(Span::new(" ".repeat(remaining), tone));
        }
        Line { spans }
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A rectangle of exactly `height` lines, each exactly `width` columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    width: usize,
    lines: Vec<Line>,
}

impl Block {
    pub fn new(width: usize, height: usize, content: Vec<Line>) -> Self {
        let mut lines: Vec<Line> = content
            .into_iter()
            .take(height)
            .map(|l| l.fit(width))
            .collect();
        while lines.len() < height {
            lines.push(Line::default().fit(width));
        }
        Self { width, lines }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line.text())?;
        }
        Ok(())
    }
}

/// Draw a rounded border around `inner`, with `title` set into the top edge.
/// The border is accented when `focused`.
pub fn bordered(title: &str, inner: Vec<Line>, width: usize, height: usize, focused: bool) -> Block {
    if width < 2 || height < 2 {
        return Block::new(width, height, Vec::new());
    }
    let tone = if focused { Tone::Accent } else { Tone::Dim };
    let inner_width = width - 2;
    let inner_height = height - 2;

    let title = truncate_width(title, inner_width.saturating_sub(3));
    let mut top = Line::styled("╭", tone);
    if title.is_empty() {
        top.push("─".repeat(inner_width), tone);
    } else {
        let title_width = title.width() + 3;
        top.push("─", tone);
        top.push(format!(" {} ", title), Tone::Title);
        top.push("─".repeat(inner_width.saturating_sub(title_width)), tone);
    }
    top.push("╮", tone);

    let body = Block::new(inner_width, inner_height, inner);
    let mut lines = Vec::with_capacity(height);
    lines.push(top);
    for line in body.lines {
        let mut row = Line::styled("│", tone);
        row.spans.extend(line.spans);
        row.push("│", tone);
        lines.push(row);
    }
    let mut bottom = Line::styled("╰", tone);
    bottom.push("─".repeat(inner_width), tone);
    bottom.push("╯", tone);
    lines.push(bottom);

    Block::new(width, height, lines)
}

/// Place blocks side by side. The result is as tall as the tallest block.
pub fn join_horizontal(blocks: Vec<Block>) -> Block {
    let height = blocks.iter().map(Block::height).max().unwrap_or(0);
    let width = blocks.iter().map(Block::width).sum();
    let mut lines = vec![Line::default(); height];
    for block in blocks {
        let block = Block::new(block.width, height, block.lines);
        for (row, line) in lines.iter_mut().zip(block.lines) {
            row.spans.extend(line.spans);
        }
    }
    Block::new(width, height, lines)
}

/// Stack blocks top to bottom. The result is as wide as the widest block.
pub fn join_vertical(blocks: Vec<Block>) -> Block {
    let width = blocks.iter().map(Block::width).max().unwrap_or(0);
    let lines: Vec<Line> = blocks.into_iter().flat_map(|b| b.lines).collect();
    let height = lines.len();
    Block::new(width, height, lines)
}

/// A single message centered in an otherwise empty block.
pub fn centered(message: &str, tone: Tone, width: usize, height: usize) -> Block {
    let message = truncate_width(message, width);
    let pad = width.saturating_sub(message.width()) / 2;
    let mut lines = vec![Line::default(); height / 2];
    lines.push(Line::from_spans(vec![
        Span::new(" ".repeat(pad), Tone::Plain),
        Span::new(message, tone),
    ]));
    Block::new(width, height, lines)
}
