//! Closed message types flowing through the console: input events in,
//! pending operations out, result-events back in.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Local};

use crate::error::ConsoleError;
use crate::gateway::RawStats;
use crate::model::WorkloadSummary;

/// Symbolic key identity, independent of the terminal backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Tab,
    BackTab,
    Enter,
    Esc,
    Char(char),
    Ctrl(char),
}

/// Everything that can enter the update loop.
#[derive(Debug)]
pub enum Event {
    Key(Key),
    Resize { width: u16, height: u16 },
    Tick,
    Completed(ResultEvent),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    Start,
    Stop,
    Restart,
}

impl Mutation {
    pub fn verb(self) -> &'static str {
        match self {
            Mutation::Start => "start",
            Mutation::Stop => "stop",
            Mutation::Restart => "restart",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            Mutation::Start => "Started",
            Mutation::Stop => "Stopped",
            Mutation::Restart => "Restarted",
        }
    }
}

/// One call against the runtime gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    ListWorkloads,
    Mutate(Mutation, String),
    FetchLogs(String),
    FetchStats(String),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::ListWorkloads => write!(f, "list"),
            Operation::Mutate(m, id) => write!(f, "{} {}", m.verb(), id),
            Operation::FetchLogs(id) => write!(f, "logs {}", id),
            Operation::FetchStats(id) => write!(f, "stats {}", id),
        }
    }
}

/// An ordered sequence of operations. Step N+1 is only dispatched after the
/// result of step N has been applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
    pub first: Operation,
    pub then: VecDeque<Operation>,
}

impl Chain {
    pub fn single(first: Operation) -> Self {
        Self {
            first,
            then: VecDeque::new(),
        }
    }

    pub fn then(mut self, next: Operation) -> Self {
        self.then.push_back(next);
        self
    }
}

/// An operation stamped with its dispatch sequence number, carrying the
/// rest of its chain along so the result can continue it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingOperation {
    pub seq: u64,
    pub operation: Operation,
    pub then: VecDeque<Operation>,
}

/// Outcome of a finished operation, re-entering the loop.
#[derive(Debug)]
pub struct ResultEvent {
    pub seq: u64,
    pub outcome: Outcome,
    pub then: VecDeque<Operation>,
    pub received_at: DateTime<Local>,
}

#[derive(Debug)]
pub enum Outcome {
    Workloads(Result<Vec<WorkloadSummary>, ConsoleError>),
    Mutated {
        mutation: Mutation,
        id: String,
        result: Result<(), ConsoleError>,
    },
    Logs {
        id: String,
        result: Result<String, ConsoleError>,
    },
    Stats {
        id: String,
        result: Result<RawStats, ConsoleError>,
    },
}

impl ResultEvent {
    /// Result for `pending`, continuing its chain.
    pub fn for_pending(pending: &PendingOperation, outcome: Outcome) -> Self {
        Self {
            seq: pending.seq,
            outcome,
            then: pending.then.clone(),
            received_at: Local::now(),
        }
    }
}
