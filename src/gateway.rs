//! The boundary between the console and the container runtime.

use async_trait::async_trait;

use crate::error::ConsoleError;
use crate::model::WorkloadSummary;

/// Control API of the container runtime as the console consumes it.
///
/// Every call may be slow and may fail; the console never retries on its
/// own. Implementations must tolerate several outstanding calls at once.
#[async_trait]
pub trait RuntimeGateway: Send + Sync {
    async fn list_workloads(&self) -> Result<Vec<WorkloadSummary>, ConsoleError>;
    async fn start(&self, id: &str) -> Result<(), ConsoleError>;
    async fn stop(&self, id: &str) -> Result<(), ConsoleError>;
    async fn restart(&self, id: &str) -> Result<(), ConsoleError>;
    async fn fetch_logs(&self, id: &str) -> Result<String, ConsoleError>;
    async fn fetch_stats(&self, id: &str) -> Result<RawStats, ConsoleError>;
}

/// Cumulative CPU counters at one point in time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CpuCounters {
    pub total_usage: u64,
    pub system_usage: u64,
    pub per_cpu_usage: Vec<u64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InterfaceCounters {
    pub name: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

/// One entry of the block-I/O service-bytes breakdown ("Read", "Write",
/// "Sync", ...), in the order the runtime reported it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlkioEntry {
    pub op: String,
    pub value: u64,
}

/// A raw stats sample as reported by the runtime, before any arithmetic.
/// `cpu` and `precpu` are the paired current/previous counters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawStats {
    pub cpu: CpuCounters,
    pub precpu: CpuCounters,
    pub memory_usage: u64,
    pub memory_cache: u64,
    pub memory_limit: u64,
    pub networks: Vec<InterfaceCounters>,
    pub blkio_service_bytes: Vec<BlkioEntry>,
    pub pids: u64,
}
