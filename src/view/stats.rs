use crate::layout::Size;
use crate::metrics::format_bytes;
use crate::model::ResourceSample;
use crate::pane::{StatsPane, StatsState};

use super::shared::progress_bar;
use super::surface::{Block, Line, Span, Tone, bordered};

const LABEL_WIDTH: usize = 9;

pub fn render(stats: &StatsPane, name: Option<&str>) -> Block {
    let Size { width, height } = stats.size();
    let lines = match stats.state() {
        StatsState::Empty => vec![Line::styled(" No container selected.", Tone::Dim)],
        StatsState::Loading => vec![Line::styled(" Loading stats...", Tone::Dim)],
        StatsState::Errored(msg) => vec![
            Line::styled(format!(" ✗ {}", msg), Tone::Error),
            Line::styled(" Press r to retry", Tone::Dim),
        ],
        StatsState::Ready { sample, fetched_at } => {
            let mut lines = sample_lines(sample, width.saturating_sub(2));
            lines.push(Line::default());
            lines.push(Line::styled(
                format!(" updated {}", fetched_at.format("%H:%M:%S")),
                Tone::Dim,
            ));
            lines
        }
    };
    let title = match name {
        Some(name) => format!("Stats: {}", name),
        None => "Stats".to_string(),
    };
    bordered(&title, lines, width, height, false)
}

fn sample_lines(sample: &ResourceSample, width: usize) -> Vec<Line> {
    // Leaves room for the brackets, the percentage and "  used / limit".
    let bar_width = width.saturating_sub(LABEL_WIDTH + 30).clamp(5, 30);
    let memory = format!(
        "{} / {}",
        format_bytes(sample.memory_used_bytes),
        format_bytes(sample.memory_limit_bytes)
    );
    vec![
        gauge("CPU", sample.cpu_percent, bar_width, None),
        gauge("Memory", sample.memory_percent, bar_width, Some(memory)),
        labelled(
            "Net",
            format!(
                "↓ {}  ↑ {}",
                format_bytes(sample.network_rx_bytes),
                format_bytes(sample.network_tx_bytes)
            ),
        ),
        labelled(
            "Block",
            format!(
                "read {}  write {}",
                format_bytes(sample.block_read_bytes),
                format_bytes(sample.block_write_bytes)
            ),
        ),
        labelled("PIDs", sample.process_count.to_string()),
    ]
}

fn usage_tone(pct: f64) -> Tone {
    if pct > 80.0 {
        Tone::Error
    } else if pct > 50.0 {
        Tone::Warning
    } else {
        Tone::Good
    }
}

fn label(text: &str) -> Span {
    Span::new(format!(" {:<w$}", text, w = LABEL_WIDTH - 1), Tone::Title)
}

fn gauge(name: &str, pct: f64, bar_width: usize, detail: Option<String>) -> Line {
    let mut line = Line::from_spans(vec![label(name)]);
    line.push(progress_bar(pct, bar_width), usage_tone(pct));
    line.push(format!(" {:>5.1}%", pct), Tone::Plain);
    if let Some(detail) = detail {
        line.push(format!("  {}", detail), Tone::Dim);
    }
    line
}

fn labelled(name: &str, value: String) -> Line {
    let mut line = Line::from_spans(vec![label(name)]);
    line.push(value, Tone::Plain);
    line
}
