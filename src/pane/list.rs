use tracing::{debug, warn};

use crate::console::{Chain, Key, Mutation, Operation};
use crate::error::ConsoleError;
use crate::layout::Size;
use crate::model::WorkloadSummary;

use super::Effect;

/// Lifecycle of the list fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Fetching,
    /// Last fetch failed. The previous entries stay visible.
    Errored(String),
}

/// Feedback for the last start/stop/restart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusLine {
    Info(String),
    Error(String),
}

/// Owns the workload collection and the selection cursor.
pub struct ListPane {
    workloads: Vec<WorkloadSummary>,
    selection: Option<String>,
    state: FetchState,
    status: Option<StatusLine>,
    applied_seq: u64,
    size: Size,
}

impl Default for ListPane {
    fn default() -> Self {
        Self::new()
    }
}

impl ListPane {
    pub fn new() -> Self {
        Self {
            workloads: Vec::new(),
            selection: None,
            state: FetchState::Idle,
            status: None,
            applied_seq: 0,
            size: Size::default(),
        }
    }

    // --- Operations issued by this pane ---

    pub fn fetch_all(&self) -> Chain {
        Chain::single(Operation::ListWorkloads)
    }

    pub fn start(&self, id: &str) -> Chain {
        Self::mutate_then_refresh(Mutation::Start, id)
    }

    pub fn stop(&self, id: &str) -> Chain {
        Self::mutate_then_refresh(Mutation::Stop, id)
    }

    pub fn restart(&self, id: &str) -> Chain {
        Self::mutate_then_refresh(Mutation::Restart, id)
    }

    pub fn fetch_logs(&self, id: &str) -> Chain {
        Chain::single(Operation::FetchLogs(id.to_string()))
    }

    /// The refresh runs whether or not the mutation succeeds, so the list
    /// always shows what the runtime reports.
    fn mutate_then_refresh(mutation: Mutation, id: &str) -> Chain {
        Chain::single(Operation::Mutate(mutation, id.to_string())).then(Operation::ListWorkloads)
    }

    // --- Accessors ---

    pub fn workloads(&self) -> &[WorkloadSummary] {
        &self.workloads
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selection.as_deref()?;
        self.workloads.iter().position(|w| w.id == id)
    }

    pub fn selected(&self) -> Option<&WorkloadSummary> {
        self.selected_index().map(|i| &self.workloads[i])
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    // --- State transitions ---

    pub fn begin_fetch(&mut self) {
        self.state = FetchState::Fetching;
    }

    /// Apply a list result. A successful fetch replaces the entries
    /// wholesale; a failed one keeps them and records the error.
    pub fn apply_fetch(
        &mut self,
        seq: u64,
        result: Result<Vec<WorkloadSummary>, ConsoleError>,
    ) -> Vec<Effect> {
        if seq <= self.applied_seq {
            debug!(seq, applied = self.applied_seq, "discarding stale list result");
            return Vec::new();
        }
        self.applied_seq = seq;

        let workloads = match result {
            Ok(w) => w,
            Err(e) => {
                warn!(error = %e, "container list fetch failed");
                self.state = FetchState::Errored(e.banner());
                return Vec::new();
            }
        };

        self.workloads = workloads;
        self.state = FetchState::Idle;

        let previous = self.selection.take();
        self.selection = match &previous {
            Some(id) if self.workloads.iter().any(|w| &w.id == id) => previous.clone(),
            Some(_) => None,
            None => self.workloads.first().map(|w| w.id.clone()),
        };

        if self.selection != previous {
            vec![Effect::SelectionChanged(self.selection.clone())]
        } else {
            Vec::new()
        }
    }

    pub fn apply_mutation(&mut self, mutation: Mutation, id: &str, result: Result<(), ConsoleError>) {
        let name = self.name_for(id);
        self.status = Some(match result {
            Ok(()) => StatusLine::Info(format!("{} {}", mutation.past_tense(), name)),
            Err(e) => {
                warn!(error = %e, action = mutation.verb(), "container action failed");
                StatusLine::Error(format!("Failed to {} {}: {}", mutation.verb(), name, e.banner()))
            }
        });
    }

    pub fn handle_key(&mut self, key: Key) -> Vec<Effect> {
        match key {
            Key::Up | Key::Char('k') => self.move_by(-1),
            Key::Down | Key::Char('j') => self.move_by(1),
            Key::Home | Key::Char('g') => self.select_index(0),
            Key::End | Key::Char('G') => self.select_index(self.workloads.len().saturating_sub(1)),
            Key::Char('r') => {
                self.status = None;
                vec![Effect::Run(self.fetch_all()), Effect::RefreshStats]
            }
            Key::Char('s') => self.mutate(Mutation::Stop),
            Key::Char('t') => self.mutate(Mutation::Start),
            Key::Char('x') => self.mutate(Mutation::Restart),
            Key::Char('l') | Key::Enter => match self.selected_target() {
                Ok(w) => vec![Effect::OpenLogs {
                    id: w.id.clone(),
                    title: w.display_name.clone(),
                }],
                Err(e) => {
                    debug!(error = %e, "logs ignored");
                    Vec::new()
                }
            },
            _ => Vec::new(),
        }
    }

    // --- Internal helpers ---

    fn selected_target(&self) -> Result<&WorkloadSummary, ConsoleError> {
        self.selected().ok_or(ConsoleError::EmptySelection)
    }

    fn mutate(&mut self, mutation: Mutation) -> Vec<Effect> {
        let (id, name) = match self.selected_target() {
            Ok(w) => (w.id.clone(), w.display_name.clone()),
            Err(e) => {
                debug!(error = %e, action = mutation.verb(), "action ignored");
                return Vec::new();
            }
        };
        let chain = match mutation {
            Mutation::Start => self.start(&id),
            Mutation::Stop => self.stop(&id),
            Mutation::Restart => self.restart(&id),
        };
        let progress = match mutation {
            Mutation::Start => "Starting",
            Mutation::Stop => "Stopping",
            Mutation::Restart => "Restarting",
        };
        self.status = Some(StatusLine::Info(format!("{} {}...", progress, name)));
        vec![Effect::Run(chain)]
    }

    fn move_by(&mut self, delta: isize) -> Vec<Effect> {
        if self.workloads.is_empty() {
            return Vec::new();
        }
        let last = self.workloads.len() - 1;
        let next = match self.selected_index() {
            None => 0,
            Some(i) if delta < 0 => i.saturating_sub(delta.unsigned_abs()),
            Some(i) => (i + delta as usize).min(last),
        };
        self.select_index(next)
    }

    fn select_index(&mut self, idx: usize) -> Vec<Effect> {
        let Some(w) = self.workloads.get(idx) else { return Vec::new() };
        if self.selection.as_deref() == Some(w.id.as_str()) {
            return Vec::new();
        }
        self.selection = Some(w.id.clone());
        self.status = None;
        vec![Effect::SelectionChanged(self.selection.clone())]
    }

    fn name_for(&self, id: &str) -> String {
        self.workloads
            .iter()
            .find(|w| w.id == id)
            .map(|w| w.display_name.clone())
            .unwrap_or_else(|| id.chars().take(12).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> Vec<WorkloadSummary> {
        vec![
            WorkloadSummary::new("a", "A", "running"),
            WorkloadSummary::new("b", "B", "exited"),
            WorkloadSummary::new("c", "C", "running"),
        ]
    }

    fn loaded(workloads: Vec<WorkloadSummary>) -> ListPane {
        let mut pane = ListPane::new();
        pane.apply_fetch(1, Ok(workloads));
        pane
    }

    #[test]
    fn fetch_replaces_entries_exactly() {
        let mut pane = loaded(three());
        let next = vec![WorkloadSummary::new("z", "Z", "created")];
        pane.apply_fetch(2, Ok(next.clone()));
        assert_eq!(pane.workloads(), next.as_slice());
    }

    #[test]
    fn first_fetch_selects_first_entry() {
        let mut pane = ListPane::new();
        let effects = pane.apply_fetch(1, Ok(three()));
        assert_eq!(pane.selection(), Some("a"));
        assert_eq!(effects, vec![Effect::SelectionChanged(Some("a".into()))]);
    }

    #[test]
    fn refresh_keeps_selection_when_still_present() {
        let mut pane = loaded(three());
        pane.handle_key(Key::Down);
        let mut reordered = three();
        reordered.reverse();
        let effects = pane.apply_fetch(2, Ok(reordered));
        assert_eq!(pane.selection(), Some("b"));
        assert_eq!(pane.selected_index(), Some(1));
        assert!(effects.is_empty());
    }

    #[test]
    fn refresh_clears_selection_when_gone() {
        let mut pane = loaded(three());
        pane.handle_key(Key::Down);
        let effects = pane.apply_fetch(2, Ok(vec![WorkloadSummary::new("a", "A", "running")]));
        assert_eq!(pane.selection(), None);
        assert_eq!(effects, vec![Effect::SelectionChanged(None)]);
    }

    #[test]
    fn failed_fetch_keeps_prior_entries() {
        let mut pane = loaded(three());
        pane.begin_fetch();
        assert_eq!(pane.state(), &FetchState::Fetching);
        let err = ConsoleError::operation_failed("list", "containers", "connection reset");
        assert!(pane.apply_fetch(2, Err(err)).is_empty());
        assert_eq!(pane.workloads().len(), 3);
        assert_eq!(pane.state(), &FetchState::Errored("connection reset".into()));

        pane.apply_fetch(3, Ok(three()));
        assert_eq!(pane.state(), &FetchState::Idle);
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut pane = ListPane::new();
        pane.apply_fetch(5, Ok(three()));
        pane.apply_fetch(4, Ok(vec![]));
        assert_eq!(pane.workloads().len(), 3);
    }

    #[test]
    fn navigation_moves_and_clamps() {
        let mut pane = loaded(three());
        assert_eq!(pane.handle_key(Key::Char('j')), vec![Effect::SelectionChanged(Some("b".into()))]);
        pane.handle_key(Key::Down);
        assert!(pane.handle_key(Key::Down).is_empty());
        assert_eq!(pane.selection(), Some("c"));
        pane.handle_key(Key::Home);
        assert_eq!(pane.selection(), Some("a"));
        assert!(pane.handle_key(Key::Up).is_empty());
        pane.handle_key(Key::Char('G'));
        assert_eq!(pane.selection(), Some("c"));
    }

    #[test]
    fn mutations_chain_a_refresh() {
        let mut pane = loaded(three());
        pane.handle_key(Key::Down);
        let cases = [
            ('s', Mutation::Stop),
            ('t', Mutation::Start),
            ('x', Mutation::Restart),
        ];
        for (c, mutation) in cases {
            let effects = pane.handle_key(Key::Char(c));
            let expected = Chain::single(Operation::Mutate(mutation, "b".into())).then(Operation::ListWorkloads);
            assert_eq!(effects, vec![Effect::Run(expected)]);
        }
        assert!(matches!(pane.status(), Some(StatusLine::Info(m)) if m == "Restarting B..."));
    }

    #[test]
    fn actions_without_selection_are_ignored() {
        let mut pane = ListPane::new();
        for c in ['s', 't', 'x', 'l'] {
            assert!(pane.handle_key(Key::Char(c)).is_empty());
        }
        assert!(pane.status().is_none());
    }

    #[test]
    fn mutation_result_sets_status_line() {
        let mut pane = loaded(three());
        pane.apply_mutation(Mutation::Stop, "a", Ok(()));
        assert_eq!(pane.status(), Some(&StatusLine::Info("Stopped A".into())));

        let err = ConsoleError::operation_failed("stop", "a", "permission denied");
        pane.apply_mutation(Mutation::Stop, "a", Err(err));
        assert_eq!(
            pane.status(),
            Some(&StatusLine::Error("Failed to stop A: permission denied".into()))
        );
    }

    #[test]
    fn logs_action_names_selected_workload() {
        let mut pane = loaded(three());
        pane.handle_key(Key::Down);
        assert_eq!(
            pane.handle_key(Key::Char('l')),
            vec![Effect::OpenLogs { id: "b".into(), title: "B".into() }]
        );
    }

    #[test]
    fn refresh_key_fetches_list_and_stats() {
        let mut pane = loaded(three());
        assert_eq!(
            pane.handle_key(Key::Char('r')),
            vec![Effect::Run(pane.fetch_all()), Effect::RefreshStats]
        );
    }
}
