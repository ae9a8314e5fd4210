use crate::layout::Size;
use crate::pane::{FetchState, ListPane, StatusLine};

use super::shared::column;
use super::surface::{Block, Line, Span, Tone, bordered};

const ID_WIDTH: usize = 12;
const NAME_WIDTH: usize = 18;
const STATUS_WIDTH: usize = 10;

pub fn render(list: &ListPane, focused: bool) -> Block {
    let Size { width, height } = list.size();
    let inner_height = height.saturating_sub(2);

    let mut lines = Vec::new();

    if let FetchState::Errored(msg) = list.state() {
        lines.push(Line::styled(format!(" ✗ {}", msg), Tone::Error));
        lines.push(Line::styled(" Press r to refresh", Tone::Dim));
    }

    let workloads = list.workloads();
    if workloads.is_empty() {
        match list.state() {
            FetchState::Fetching => lines.push(Line::styled(" Loading containers...", Tone::Dim)),
            FetchState::Idle => lines.push(Line::styled(" No containers found.", Tone::Dim)),
            FetchState::Errored(_) => {}
        }
    } else {
        let header = format!(
            "  {} {} {} {}",
            column("ID", ID_WIDTH),
            column("NAME", NAME_WIDTH),
            column("STATUS", STATUS_WIDTH),
            "IMAGE"
        );
        lines.push(Line::styled(header, Tone::Title));

        let status_rows = usize::from(list.status().is_some());
        let room = inner_height.saturating_sub(lines.len() + status_rows).max(1);
        let selected = list.selected_index();
        let first = selected.map_or(0, |i| (i + 1).saturating_sub(room));

        for (idx, w) in workloads.iter().enumerate().skip(first).take(room) {
            if Some(idx) == selected {
                let row = format!(
                    "▸ {} {} {} {}",
                    column(w.short_id(), ID_WIDTH),
                    column(&w.display_name, NAME_WIDTH),
                    column(&w.status, STATUS_WIDTH),
                    w.image
                );
                lines.push(Line::styled(row, Tone::Selected));
            } else {
                let status_tone = if w.is_running() { Tone::Good } else { Tone::Dim };
                lines.push(Line::from_spans(vec![
                    Span::new(format!("  {} ", column(w.short_id(), ID_WIDTH)), Tone::Dim),
                    Span::new(format!("{} ", column(&w.display_name, NAME_WIDTH)), Tone::Plain),
                    Span::new(format!("{} ", column(&w.status, STATUS_WIDTH)), status_tone),
                    Span::new(w.image.clone(), Tone::Dim),
                ]));
            }
        }
    }

    if let Some(status) = list.status() {
        while lines.len() + 1 < inner_height {
            lines.push(Line::default());
        }
        lines.push(match status {
            StatusLine::Info(msg) => Line::styled(format!(" {}", msg), Tone::Accent),
            StatusLine::Error(msg) => Line::styled(format!(" {}", msg), Tone::Error),
        });
    }

    let mut title = format!("Containers ({})", workloads.len());
    if list.state() == &FetchState::Fetching && !workloads.is_empty() {
        title.push_str(" refreshing");
    }
    bordered(&title, lines, width, height, focused)
}
