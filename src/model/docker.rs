/// One runtime-managed container as shown in the list pane.
///
/// A list fetch produces a fresh `Vec<WorkloadSummary>` that replaces the
/// previous one wholesale; entries are never patched in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkloadSummary {
    pub id: String,           // full runtime-assigned ID
    pub display_name: String, // runtime name without leading '/', or "Unnamed"
    pub status: String,       // raw state string, e.g. "running", "exited"
    pub image: String,
}

impl WorkloadSummary {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            status: status.into(),
            image: String::new(),
        }
    }

    /// First 12 characters of the ID, the way `docker ps` prints it.
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(12) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == "running"
    }
}

/// Operator-facing resource figures for a single workload, produced by
/// `metrics::derive` from one raw runtime sample.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceSample {
    pub cpu_percent: f64,
    pub memory_used_bytes: u64,
    pub memory_limit_bytes: u64,
    pub memory_percent: f64,
    pub network_rx_bytes: u64, // summed across interfaces
    pub network_tx_bytes: u64,
    pub block_read_bytes: u64,
    pub block_write_bytes: u64,
    pub process_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_takes_twelve_chars() {
        let w = WorkloadSummary::new("0123456789abcdef", "web", "running");
        assert_eq!(w.short_id(), "0123456789ab");
    }

    #[test]
    fn short_id_keeps_short_ids_whole() {
        let w = WorkloadSummary::new("abc", "web", "running");
        assert_eq!(w.short_id(), "abc");
    }

    #[test]
    fn resource_sample_default_is_zeroed() {
        let s = ResourceSample::default();
        assert_eq!(s.cpu_percent, 0.0);
        assert_eq!(s.memory_limit_bytes, 0);
        assert_eq!(s.process_count, 0);
    }
}
