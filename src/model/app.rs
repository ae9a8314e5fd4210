/// Panes that can hold focus. Also used as the modal's handle back to the
/// pane that spawned it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaneId {
    List,
    Logs,
}

/// Which pane receives ordinary input. Reset to `List` at startup and only
/// changed by explicit focus toggles, quit back-outs and modal closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusState(PaneId);

impl FocusState {
    pub fn pane(self) -> PaneId {
        self.0
    }

    pub fn toggled(self) -> Self {
        match self.0 {
            PaneId::List => FocusState(PaneId::Logs),
            PaneId::Logs => FocusState(PaneId::List),
        }
    }

    pub fn on(pane: PaneId) -> Self {
        FocusState(pane)
    }
}

impl Default for FocusState {
    fn default() -> Self {
        FocusState(PaneId::List)
    }
}
