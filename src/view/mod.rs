mod containers;
mod footer;
mod logs;
mod shared;
mod stats;
mod surface;

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
};

use crate::console::Console;
use crate::layout::{MIN_COLS, MIN_ROWS};
use crate::model::PaneId;

pub use shared::{column, progress_bar, truncate_width};
pub use surface::{Block, Line, Span, Tone, bordered, centered, join_horizontal, join_vertical};

/// Compose the whole frame for the console's current state.
pub fn compose(console: &Console) -> Block {
    let layout = console.layout();
    let screen = layout.screen;
    if layout.is_too_small() {
        let msg = format!(
            "Terminal too small ({}x{}). Resize to at least {}x{}.",
            screen.width, screen.height, MIN_COLS, MIN_ROWS
        );
        return centered(&msg, Tone::Warning, screen.width, screen.height);
    }

    let body = match console.modal() {
        Some(modal) => logs::render_modal(modal),
        None => {
            let focus = console.focus().pane();
            let name = console.list().selected().map(|w| w.display_name.as_str());
            let left = join_vertical(vec![
                containers::render(console.list(), focus == PaneId::List),
                stats::render(console.stats(), name),
            ]);
            join_horizontal(vec![left, logs::render_pane(console.logs(), focus == PaneId::Logs)])
        }
    };
    join_vertical(vec![body, footer::render(console, screen.width)])
}

pub struct Presenter;

impl Presenter {
    /// Paint a composed frame at the top-left corner of `out`.
    pub fn paint(out: &mut impl Write, frame: &Block) -> io::Result<()> {
        for (row, line) in frame.lines().iter().enumerate() {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            for span in &line.spans {
                apply_tone(out, span.tone)?;
                queue!(out, Print(&span.text))?;
                queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
            }
        }
        out.flush()
    }
}

fn apply_tone(out: &mut impl Write, tone: Tone) -> io::Result<()> {
    match tone {
        Tone::Plain => Ok(()),
        Tone::Dim => queue!(out, SetForegroundColor(Color::DarkGrey)),
        Tone::Title => queue!(out, SetAttribute(Attribute::Bold)),
        Tone::Accent => queue!(out, SetForegroundColor(Color::DarkCyan)),
        Tone::Selected => queue!(
            out,
            SetBackgroundColor(Color::DarkGrey),
            SetForegroundColor(Color::White)
        ),
        Tone::Good => queue!(out, SetForegroundColor(Color::Green)),
        Tone::Warning => queue!(out, SetForegroundColor(Color::Yellow)),
        Tone::Error => queue!(out, SetForegroundColor(Color::Red)),
    }
}
