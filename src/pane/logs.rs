use tracing::{debug, warn};

use crate::console::Key;
use crate::error::ConsoleError;
use crate::layout::Size;
use crate::model::Viewport;

use super::{Effect, scroll};

/// Rows of a log box not available to text: two borders and the position line.
const CHROME_ROWS: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogState {
    Empty,
    Loading,
    Ready,
    Errored(String),
}

/// Log text for one workload plus its scroll position. Used by both the
/// log pane and the modal.
#[derive(Clone, Debug)]
pub struct LogBuffer {
    workload: Option<(String, String)>, // (id, title)
    viewport: Viewport,
    state: LogState,
    applied_seq: u64,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LogBuffer {
    pub fn new() -> Self {
        Self {
            workload: None,
            viewport: Viewport::default(),
            state: LogState::Empty,
            applied_seq: 0,
        }
    }

    /// Point the buffer at a workload whose logs are being fetched.
    pub fn begin(&mut self, id: &str, title: &str) {
        let same = self.workload_id() == Some(id);
        self.workload = Some((id.to_string(), title.to_string()));
        if !same {
            self.viewport.clear();
        }
        self.state = LogState::Loading;
    }

    /// Apply fetched log text. Results for another workload, or older than
    /// the last applied one, are ignored.
    pub fn apply(&mut self, seq: u64, id: &str, result: &Result<String, ConsoleError>) -> bool {
        if self.workload_id() != Some(id) {
            return false;
        }
        if seq <= self.applied_seq {
            debug!(seq, applied = self.applied_seq, "discarding stale log result");
            return false;
        }
        self.applied_seq = seq;
        match result {
            Ok(text) => {
                self.viewport.set_content(text);
                self.state = LogState::Ready;
            }
            Err(e) => {
                warn!(error = %e, "log fetch failed");
                self.state = LogState::Errored(e.banner());
            }
        }
        true
    }

    pub fn workload_id(&self) -> Option<&str> {
        self.workload.as_ref().map(|(id, _)| id.as_str())
    }

    pub fn title(&self) -> Option<&str> {
        self.workload.as_ref().map(|(_, title)| title.as_str())
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn state(&self) -> &LogState {
        &self.state
    }

    /// Fit the viewport into a box of `size`.
    pub fn resize(&mut self, size: Size) {
        self.viewport.set_height(size.height.saturating_sub(CHROME_ROWS));
    }
}

/// The right-hand log viewer.
pub struct LogPane {
    buffer: LogBuffer,
    size: Size,
}

impl Default for LogPane {
    fn default() -> Self {
        Self::new()
    }
}

impl LogPane {
    pub fn new() -> Self {
        Self {
            buffer: LogBuffer::new(),
            size: Size::default(),
        }
    }

    pub fn buffer(&self) -> &LogBuffer {
        &self.buffer
    }

    pub fn begin(&mut self, id: &str, title: &str) {
        self.buffer.begin(id, title);
    }

    pub fn apply(&mut self, seq: u64, id: &str, result: &Result<String, ConsoleError>) -> bool {
        self.buffer.apply(seq, id, result)
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.buffer.resize(size);
    }

    pub fn handle_key(&mut self, key: Key) -> Vec<Effect> {
        match key {
            Key::Enter | Key::Char('z') if self.buffer.workload_id().is_some() => vec![Effect::ExpandLogs],
            _ => {
                scroll(self.buffer.viewport_mut(), key);
                Vec::new()
            }
        }
    }
}
