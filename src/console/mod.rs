//! Root coordinator. Owns every pane, tracks focus, routes input and merges
//! result-events back into pane state. `update` is the only place console
//! state changes; everything it wants done asynchronously comes back out as
//! `PendingOperation`s for the dispatcher.

mod message;

pub use message::*;

use tracing::{debug, info};

use crate::layout::PaneLayout;
use crate::model::{FocusState, PaneId};
use crate::pane::{Effect, ListPane, LogPane, Modal, StatsPane};
use crate::view;

pub struct Console {
    list: ListPane,
    logs: LogPane,
    stats: StatsPane,
    modal: Option<Modal>,
    focus: FocusState,
    layout: PaneLayout,
    next_seq: u64,
    quit: bool,
}

impl Console {
    pub fn new(width: u16, height: u16) -> Self {
        let mut console = Self {
            list: ListPane::new(),
            logs: LogPane::new(),
            stats: StatsPane::new(),
            modal: None,
            focus: FocusState::default(),
            layout: PaneLayout::default(),
            next_seq: 0,
            quit: false,
        };
        console.resize(width, height);
        console
    }

    /// Operations to run at startup: the first list fetch.
    pub fn init(&mut self) -> Vec<PendingOperation> {
        let chain = self.list.fetch_all();
        vec![self.issue(chain)]
    }

    pub fn update(&mut self, event: Event) -> Vec<PendingOperation> {
        match event {
            Event::Key(key) => self.on_key(key),
            Event::Resize { width, height } => {
                self.resize(width, height);
                Vec::new()
            }
            Event::Tick => match self.stats.refresh() {
                Some(chain) => vec![self.issue(chain)],
                None => Vec::new(),
            },
            Event::Completed(result) => self.on_result(result),
        }
    }

    /// The composed frame as plain text.
    pub fn render(&self) -> String {
        view::compose(self).to_string()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn list(&self) -> &ListPane {
        &self.list
    }

    pub fn logs(&self) -> &LogPane {
        &self.logs
    }

    pub fn stats(&self) -> &StatsPane {
        &self.stats
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn focus(&self) -> FocusState {
        self.focus
    }

    pub fn layout(&self) -> &PaneLayout {
        &self.layout
    }

    // --- Input ---

    fn on_key(&mut self, key: Key) -> Vec<PendingOperation> {
        if key == Key::Ctrl('c') {
            info!("interrupt received, quitting");
            self.quit = true;
            return Vec::new();
        }

        if self.modal.is_some() {
            self.on_modal_key(key);
            return Vec::new();
        }

        match key {
            Key::Tab | Key::BackTab => {
                self.focus = self.focus.toggled();
                Vec::new()
            }
            Key::Char('q') => {
                match self.focus.pane() {
                    PaneId::List => {
                        info!("quit requested");
                        self.quit = true;
                    }
                    PaneId::Logs => self.focus = FocusState::on(PaneId::List),
                }
                Vec::new()
            }
            _ => {
                let effects = match self.focus.pane() {
                    PaneId::List => self.list.handle_key(key),
                    PaneId::Logs => self.logs.handle_key(key),
                };
                self.apply_effects(effects)
            }
        }
    }

    fn on_modal_key(&mut self, key: Key) {
        match key {
            Key::Esc | Key::Tab | Key::BackTab => {
                if let Some(modal) = self.modal.take() {
                    self.focus = FocusState::on(modal.close());
                }
            }
            Key::Char('q') => {
                self.modal = None;
                self.focus = FocusState::on(PaneId::List);
            }
            _ => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.handle_key(key);
                }
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.layout = PaneLayout::split(width, height);
        self.list.resize(self.layout.list);
        self.stats.resize(self.layout.stats);
        self.logs.resize(self.layout.logs);
        if let Some(modal) = self.modal.as_mut() {
            modal.resize(self.layout.modal);
        }
    }

    // --- Effects and results ---

    fn apply_effects(&mut self, effects: Vec<Effect>) -> Vec<PendingOperation> {
        let mut pending = Vec::new();
        for effect in effects {
            match effect {
                Effect::Run(chain) => pending.push(self.issue(chain)),
                Effect::SelectionChanged(id) => {
                    if let Some(chain) = self.stats.set_selection(id.as_deref()) {
                        pending.push(self.issue(chain));
                    }
                }
                Effect::RefreshStats => {
                    if let Some(chain) = self.stats.retry() {
                        pending.push(self.issue(chain));
                    }
                }
                Effect::OpenLogs { id, title } => {
                    self.logs.begin(&id, &title);
                    self.modal = Some(Modal::open(self.focus.pane(), &id, &title, self.layout.modal));
                    let chain = self.list.fetch_logs(&id);
                    pending.push(self.issue(chain));
                }
                Effect::ExpandLogs => {
                    let buffer = self.logs.buffer().clone();
                    self.modal = Some(Modal::from_buffer(PaneId::Logs, buffer, self.layout.modal));
                }
            }
        }
        pending
    }

    fn on_result(&mut self, event: ResultEvent) -> Vec<PendingOperation> {
        let ResultEvent {
            seq,
            outcome,
            mut then,
            received_at,
        } = event;
        debug!(seq, remaining = then.len(), "applying result");

        let mut pending = match outcome {
            Outcome::Workloads(result) => {
                let effects = self.list.apply_fetch(seq, result);
                self.apply_effects(effects)
            }
            Outcome::Mutated { mutation, id, result } => {
                self.list.apply_mutation(mutation, &id, result);
                Vec::new()
            }
            Outcome::Logs { id, result } => {
                self.logs.apply(seq, &id, &result);
                if let Some(modal) = self.modal.as_mut() {
                    modal.apply(seq, &id, &result);
                }
                Vec::new()
            }
            Outcome::Stats { id, result } => {
                self.stats.apply(seq, &id, result, received_at);
                Vec::new()
            }
        };

        // The next chain step goes out only now that this one has been applied,
        // whatever its outcome.
        if let Some(next) = then.pop_front() {
            pending.push(self.issue(Chain { first: next, then }));
        }
        pending
    }

    /// Stamp a chain's first step with the next sequence number and mark the
    /// receiving pane busy.
    fn issue(&mut self, chain: Chain) -> PendingOperation {
        self.next_seq += 1;
        let seq = self.next_seq;
        match &chain.first {
            Operation::ListWorkloads => self.list.begin_fetch(),
            Operation::FetchStats(_) => self.stats.begin_fetch(seq),
            Operation::Mutate(..) | Operation::FetchLogs(_) => {}
        }
        debug!(seq, operation = %chain.first, "issuing");
        PendingOperation {
            seq,
            operation: chain.first,
            then: chain.then,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::error::ConsoleError;
    use crate::gateway::RawStats;
    use crate::model::WorkloadSummary;
    use crate::pane::{FetchState, StatsState};

    fn three() -> Vec<WorkloadSummary> {
        vec![
            WorkloadSummary::new("a", "A", "running"),
            WorkloadSummary::new("b", "B", "exited"),
            WorkloadSummary::new("c", "C", "running"),
        ]
    }

    fn reply(pending: &PendingOperation, outcome: Outcome) -> Event {
        Event::Completed(ResultEvent::for_pending(pending, outcome))
    }

    /// A console whose first list fetch returned A, B and C.
    fn loaded() -> Console {
        let mut console = Console::new(120, 40);
        let init = console.init();
        console.update(reply(&init[0], Outcome::Workloads(Ok(three()))));
        console
    }

    fn key(console: &mut Console, key: Key) -> Vec<PendingOperation> {
        console.update(Event::Key(key))
    }

    #[test]
    fn init_fetches_the_list() {
        let mut console = Console::new(120, 40);
        let pending = console.init();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].operation, Operation::ListWorkloads);
        assert_eq!(console.list().state(), &FetchState::Fetching);
    }

    #[test]
    fn first_list_selects_and_fetches_stats() {
        let mut console = Console::new(120, 40);
        let init = console.init();
        let pending = console.update(reply(&init[0], Outcome::Workloads(Ok(three()))));
        assert_eq!(console.list().selection(), Some("a"));
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].operation, Operation::FetchStats("a".into()));
        assert!(pending[0].seq > init[0].seq);
    }

    #[test]
    fn focus_toggle_is_its_own_inverse() {
        let mut console = loaded();
        assert_eq!(console.focus().pane(), PaneId::List);
        key(&mut console, Key::Tab);
        assert_eq!(console.focus().pane(), PaneId::Logs);
        key(&mut console, Key::Tab);
        assert_eq!(console.focus().pane(), PaneId::List);
        key(&mut console, Key::BackTab);
        key(&mut console, Key::BackTab);
        assert_eq!(console.focus().pane(), PaneId::List);
    }

    #[test]
    fn quit_backs_out_before_terminating() {
        let mut console = loaded();
        key(&mut console, Key::Tab);
        key(&mut console, Key::Char('q'));
        assert!(!console.should_quit());
        assert_eq!(console.focus().pane(), PaneId::List);
        key(&mut console, Key::Char('q'));
        assert!(console.should_quit());
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut console = loaded();
        key(&mut console, Key::Char('l'));
        assert!(console.modal().is_some());
        key(&mut console, Key::Ctrl('c'));
        assert!(console.should_quit());
    }

    #[test]
    fn logs_modal_then_quit_returns_to_list_with_selection() {
        let mut console = loaded();
        key(&mut console, Key::Down);
        assert_eq!(console.list().selected().map(|w| w.status.as_str()), Some("exited"));

        let pending = key(&mut console, Key::Char('l'));
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].operation, Operation::FetchLogs("b".into()));
        assert!(console.modal().is_some());

        key(&mut console, Key::Char('q'));
        assert!(console.modal().is_none());
        assert!(!console.should_quit());
        assert_eq!(console.focus().pane(), PaneId::List);
        assert_eq!(console.list().selection(), Some("b"));
    }

    #[test]
    fn log_text_fills_pane_and_modal() {
        let mut console = loaded();
        let pending = key(&mut console, Key::Char('l'));
        console.update(reply(
            &pending[0],
            Outcome::Logs { id: "a".into(), result: Ok("one\ntwo\nthree".into()) },
        ));
        assert_eq!(console.logs().buffer().viewport().lines().len(), 3);
        let modal_lines = console.modal().map(|m| m.buffer().viewport().lines().len());
        assert_eq!(modal_lines, Some(3));
    }

    #[test]
    fn modal_esc_restores_spawning_pane() {
        let mut console = loaded();
        let pending = key(&mut console, Key::Char('l'));
        console.update(reply(&pending[0], Outcome::Logs { id: "a".into(), result: Ok("x".into()) }));
        key(&mut console, Key::Esc);
        assert_eq!(console.focus().pane(), PaneId::List);

        key(&mut console, Key::Tab);
        key(&mut console, Key::Enter);
        assert_eq!(console.modal().map(Modal::parent), Some(PaneId::Logs));
        key(&mut console, Key::Tab);
        assert!(console.modal().is_none());
        assert_eq!(console.focus().pane(), PaneId::Logs);
    }

    #[test]
    fn unfocused_panes_ignore_input() {
        let mut console = loaded();
        key(&mut console, Key::Tab);
        key(&mut console, Key::Char('j'));
        assert_eq!(console.list().selection(), Some("a"));
        assert!(key(&mut console, Key::Char('s')).is_empty());
    }

    #[test]
    fn stop_chains_exactly_one_list_refresh() {
        for result in [Ok(()), Err(ConsoleError::operation_failed("stop", "a", "denied"))] {
            let mut console = loaded();
            let stop = key(&mut console, Key::Char('s'));
            assert_eq!(stop.len(), 1);
            assert_eq!(stop[0].operation, Operation::Mutate(Mutation::Stop, "a".into()));
            assert_eq!(stop[0].then, VecDeque::from([Operation::ListWorkloads]));

            let next = console.update(reply(
                &stop[0],
                Outcome::Mutated { mutation: Mutation::Stop, id: "a".into(), result },
            ));
            let lists: Vec<_> = next
                .iter()
                .filter(|p| p.operation == Operation::ListWorkloads)
                .collect();
            assert_eq!(lists.len(), 1);
            assert!(lists[0].then.is_empty());
        }
    }

    #[test]
    fn stale_list_result_is_discarded() {
        let mut console = loaded();
        let older = key(&mut console, Key::Char('r'));
        let newer = key(&mut console, Key::Char('r'));
        let only_c = vec![WorkloadSummary::new("c", "C", "running")];
        console.update(reply(&newer[0], Outcome::Workloads(Ok(only_c.clone()))));
        console.update(reply(&older[0], Outcome::Workloads(Ok(three()))));
        assert_eq!(console.list().workloads(), only_c.as_slice());
    }

    #[test]
    fn stats_for_previous_selection_are_dropped() {
        let mut console = Console::new(120, 40);
        let init = console.init();
        let first = console.update(reply(&init[0], Outcome::Workloads(Ok(three()))));
        let second = key(&mut console, Key::Down);
        assert_eq!(second[0].operation, Operation::FetchStats("b".into()));

        let raw = RawStats { pids: 4, ..Default::default() };
        console.update(reply(&first[0], Outcome::Stats { id: "a".into(), result: Ok(raw.clone()) }));
        assert_eq!(console.stats().state(), &StatsState::Loading);
        console.update(reply(&second[0], Outcome::Stats { id: "b".into(), result: Ok(raw) }));
        assert_eq!(console.stats().sample().map(|s| s.process_count), Some(4));
    }

    #[test]
    fn tick_refreshes_only_healthy_stats() {
        let mut console = Console::new(120, 40);
        let init = console.init();
        let stats = console.update(reply(&init[0], Outcome::Workloads(Ok(three()))));
        assert!(console.update(Event::Tick).is_empty());

        console.update(reply(
            &stats[0],
            Outcome::Stats { id: "a".into(), result: Ok(RawStats::default()) },
        ));
        let tick = console.update(Event::Tick);
        assert_eq!(tick.len(), 1);

        let err = ConsoleError::operation_failed("stats", "a", "gone");
        console.update(reply(&tick[0], Outcome::Stats { id: "a".into(), result: Err(err) }));
        assert!(console.update(Event::Tick).is_empty());
    }

    #[test]
    fn resize_reaches_every_pane() {
        let mut console = loaded();
        key(&mut console, Key::Char('l'));
        console.update(Event::Resize { width: 100, height: 31 });
        let layout = *console.layout();
        assert_eq!(console.list().size(), layout.list);
        assert_eq!(console.stats().size(), layout.stats);
        assert_eq!(console.logs().size(), layout.logs);
        assert_eq!(console.modal().map(Modal::size), Some(layout.modal));
    }

    #[test]
    fn list_error_keeps_entries_and_shows_banner() {
        let mut console = loaded();
        let refresh = key(&mut console, Key::Char('r'));
        let err = ConsoleError::operation_failed("list", "containers", "connection refused");
        console.update(reply(&refresh[0], Outcome::Workloads(Err(err))));
        assert_eq!(console.list().workloads().len(), 3);
        let frame = console.render();
        assert!(frame.contains("connection refused"));
        assert!(frame.contains("Press r to refresh"));
    }
}
