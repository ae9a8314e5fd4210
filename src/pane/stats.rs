use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::console::{Chain, Operation};
use crate::error::ConsoleError;
use crate::gateway::RawStats;
use crate::layout::Size;
use crate::metrics;
use crate::model::ResourceSample;

#[derive(Clone, Debug, PartialEq)]
pub enum StatsState {
    /// Nothing selected.
    Empty,
    Loading,
    Ready {
        sample: ResourceSample,
        fetched_at: DateTime<Local>,
    },
    Errored(String),
}

/// Holds the latest resource sample for the selected workload.
pub struct StatsPane {
    selection: Option<String>,
    state: StatsState,
    applied_seq: u64,
    in_flight: Option<u64>,
    size: Size,
}

impl Default for StatsPane {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsPane {
    pub fn new() -> Self {
        Self {
            selection: None,
            state: StatsState::Empty,
            applied_seq: 0,
            in_flight: None,
            size: Size::default(),
        }
    }

    /// Follow a new selection. Clears the sample when `id` is none or empty,
    /// otherwise returns the fetch for the new workload. Any outstanding
    /// fetch belongs to the old selection and no longer holds refreshes back.
    pub fn set_selection(&mut self, id: Option<&str>) -> Option<Chain> {
        self.in_flight = None;
        match id.filter(|id| !id.is_empty()) {
            None => {
                self.selection = None;
                self.state = StatsState::Empty;
                None
            }
            Some(id) => {
                self.selection = Some(id.to_string());
                self.state = StatsState::Loading;
                Some(Chain::single(Operation::FetchStats(id.to_string())))
            }
        }
    }

    /// Periodic refresh. Only continues a healthy stream of samples: never
    /// after a failure and never while a fetch is outstanding.
    pub fn refresh(&self) -> Option<Chain> {
        if self.in_flight.is_some() || !matches!(self.state, StatsState::Ready { .. }) {
            return None;
        }
        self.fetch_current()
    }

    /// Operator-initiated re-fetch; also recovers from an error. Goes out even
    /// with a fetch outstanding, so a result that never arrives cannot wedge
    /// the pane.
    pub fn retry(&mut self) -> Option<Chain> {
        let chain = self.fetch_current()?;
        if matches!(self.state, StatsState::Errored(_)) {
            self.state = StatsState::Loading;
        }
        Some(chain)
    }

    fn fetch_current(&self) -> Option<Chain> {
        let id = self.selection.as_ref()?;
        Some(Chain::single(Operation::FetchStats(id.clone())))
    }

    pub fn begin_fetch(&mut self, seq: u64) {
        self.in_flight = Some(seq);
    }

    pub fn apply(
        &mut self,
        seq: u64,
        id: &str,
        result: Result<RawStats, ConsoleError>,
        fetched_at: DateTime<Local>,
    ) {
        if self.in_flight == Some(seq) {
            self.in_flight = None;
        }
        if self.selection.as_deref() != Some(id) || seq <= self.applied_seq {
            debug!(seq, id, "discarding stale stats result");
            return;
        }
        self.applied_seq = seq;
        self.state = match result {
            Ok(raw) => StatsState::Ready {
                sample: metrics::derive(&raw),
                fetched_at,
            },
            Err(e) => {
                warn!(error = %e, "stats fetch failed");
                StatsState::Errored(e.banner())
            }
        };
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn state(&self) -> &StatsState {
        &self.state
    }

    pub fn sample(&self) -> Option<&ResourceSample> {
        match &self.state {
            StatsState::Ready { sample, .. } => Some(sample),
            _ => None,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }
}
