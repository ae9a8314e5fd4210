use unicode_width::UnicodeWidthStr;

use crate::console::Console;
use crate::model::PaneId;

use super::surface::{Block, Line, Tone};

const LIST_HELP: &str = "↑/↓: Navigate | r: Refresh | s: Stop | t: Start | x: Restart | l/Enter: Logs | Tab: Switch | q: Quit";
const LOGS_HELP: &str = "↑/↓: Scroll | u/d: Half page | PgUp/PgDn: Page | g/G: Top/Bottom | Enter/z: Expand | Tab: Switch | q: Back";
const MODAL_HELP: &str = "↑/↓: Scroll | u/d: Half page | PgUp/PgDn: Page | g/G: Top/Bottom | Esc/Tab: Close | q: Back to list";

/// Key help for whatever holds focus, with the container count right-aligned.
pub fn render(console: &Console, width: usize) -> Block {
    let help = if console.modal().is_some() {
        MODAL_HELP
    } else {
        match console.focus().pane() {
            PaneId::List => LIST_HELP,
            PaneId::Logs => LOGS_HELP,
        }
    };
    let badge = format!("berth - {} containers ", console.list().workloads().len());

    let help = format!(" {}", help);
    let used = help.width() + badge.width();
    let mut line = Line::styled(help, Tone::Dim);
    if used < width {
        line.push(" ".repeat(width - used), Tone::Plain);
        line.push(badge, Tone::Dim);
    }
    Block::new(width, 1, vec![line])
}
