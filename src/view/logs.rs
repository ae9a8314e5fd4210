use crate::layout::Size;
use crate::pane::{LogBuffer, LogPane, LogState, Modal};

use super::surface::{Block, Line, Tone, bordered};

pub fn render_pane(pane: &LogPane, focused: bool) -> Block {
    let title = match pane.buffer().title() {
        Some(name) => format!("Logs: {}", name),
        None => "Logs".to_string(),
    };
    log_block(&title, pane.buffer(), pane.size(), focused)
}

pub fn render_modal(modal: &Modal) -> Block {
    let title = format!("Logs: {} (Esc to close)", modal.buffer().title().unwrap_or(""));
    log_block(&title, modal.buffer(), modal.size(), true)
}

fn log_block(title: &str, buffer: &LogBuffer, size: Size, focused: bool) -> Block {
    let text_rows = size.height.saturating_sub(3);
    let viewport = buffer.viewport();

    let mut lines = Vec::with_capacity(text_rows + 1);
    match buffer.state() {
        LogState::Empty => {
            lines.push(Line::styled(" Select a container and press l to view logs.", Tone::Dim));
        }
        LogState::Loading if viewport.is_empty() => {
            lines.push(Line::styled(" Loading logs...", Tone::Dim));
        }
        LogState::Ready if viewport.is_empty() => {
            lines.push(Line::styled(" (no log output)", Tone::Dim));
        }
        LogState::Errored(msg) => {
            lines.push(Line::styled(format!(" ✗ {}", msg), Tone::Error));
        }
        _ => {}
    }
    for text in viewport.visible() {
        if lines.len() >= text_rows {
            break;
        }
        lines.push(Line::plain(text.clone()));
    }
    while lines.len() < text_rows {
        lines.push(Line::default());
    }
    lines.push(position(buffer));

    bordered(title, lines, size.width, size.height, focused)
}

fn position(buffer: &LogBuffer) -> Line {
    let viewport = buffer.viewport();
    let total = viewport.lines().len();
    if total == 0 {
        return Line::default();
    }
    let first = viewport.offset() + 1;
    let last = viewport.offset() + viewport.visible().len();
    Line::styled(
        format!(" lines {}-{} of {}  {}%", first, last, total, viewport.scroll_percent()),
        Tone::Dim,
    )
}
