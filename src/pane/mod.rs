//! Per-pane state machines. Panes never talk to the runtime themselves: they
//! return effects, and the console turns those into dispatched operations.

mod list;
mod logs;
mod modal;
mod stats;

pub use list::{FetchState, ListPane, StatusLine};
pub use logs::{LogBuffer, LogPane, LogState};
pub use modal::Modal;
pub use stats::{StatsPane, StatsState};

use crate::console::{Chain, Key};
use crate::model::Viewport;

/// What a pane asks of the console after handling an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Dispatch an operation chain.
    Run(Chain),
    /// The list selection moved to another workload (or to none).
    SelectionChanged(Option<String>),
    /// Re-fetch stats for the current selection.
    RefreshStats,
    /// Open the log modal for a workload and fetch its logs.
    OpenLogs { id: String, title: String },
    /// Show the log pane's current buffer in the modal.
    ExpandLogs,
}

/// Shared scroll bindings for the log pane and the modal. Returns true if
/// the key was a scroll key.
pub(crate) fn scroll(viewport: &mut Viewport, key: Key) -> bool {
    match key {
        Key::Up | Key::Char('k') => viewport.line_up(),
        Key::Down | Key::Char('j') => viewport.line_down(),
        Key::Char('u') | Key::Ctrl('u') => viewport.half_page_up(),
        Key::Char('d') | Key::Ctrl('d') => viewport.half_page_down(),
        Key::PageUp | Key::Char('b') => viewport.page_up(),
        Key::PageDown | Key::Char('f') | Key::Char(' ') => viewport.page_down(),
        Key::Home | Key::Char('g') => viewport.goto_top(),
        Key::End | Key::Char('G') => viewport.goto_bottom(),
        _ => return false,
    }
    true
}
