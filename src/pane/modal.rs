use crate::console::Key;
use crate::error::ConsoleError;
use crate::layout::Size;
use crate::model::PaneId;

use super::{LogBuffer, scroll};

/// Full-screen log viewer layered over the panes.
///
/// `parent` is a handle to the pane that spawned it, not a copy of that
/// pane; closing hands focus back to whatever that pane is by then.
pub struct Modal {
    parent: PaneId,
    buffer: LogBuffer,
    size: Size,
}

impl Modal {
    /// Open for a workload whose logs are about to be fetched.
    pub fn open(parent: PaneId, id: &str, title: &str, size: Size) -> Self {
        let mut buffer = LogBuffer::new();
        buffer.begin(id, title);
        Self::from_buffer(parent, buffer, size)
    }

    /// Open over text that is already loaded.
    pub fn from_buffer(parent: PaneId, mut buffer: LogBuffer, size: Size) -> Self {
        buffer.resize(size);
        Self { parent, buffer, size }
    }

    pub fn parent(&self) -> PaneId {
        self.parent
    }

    /// Dismiss the modal, yielding the pane that should regain focus.
    pub fn close(self) -> PaneId {
        self.parent
    }

    pub fn buffer(&self) -> &LogBuffer {
        &self.buffer
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

    pub fn handle_key(&mut self, key: Key) -> bool {
        scroll(self.buffer.viewport_mut(), key)
    }
}
