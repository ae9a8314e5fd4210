use async_trait::async_trait;
use bollard::container::{
    ListContainersOptions, LogOutput, LogsOptions, MemoryStatsStats, RestartContainerOptions,
    Stats, StatsOptions, StopContainerOptions,
};
use bollard::models::ContainerSummary;
use bollard::{API_DEFAULT_VERSION, Docker};
use futures_util::StreamExt;
use tracing::{debug, info};

use crate::config::GatewayConfig;
use crate::error::ConsoleError;
use crate::gateway::{BlkioEntry, CpuCounters, InterfaceCounters, RawStats, RuntimeGateway};
use crate::model::WorkloadSummary;

/// Seconds the daemon waits before killing a container on stop/restart.
const STOP_GRACE_SECS: i64 = 10;

/// Runtime gateway backed by bollard's Docker client.
pub struct DockerClient {
    client: Docker,
    include_stopped: bool,
    tail: Option<u64>,
    timestamps: bool,
}

impl DockerClient {
    /// Connect to the daemon and verify it answers a ping.
    pub async fn connect(config: &GatewayConfig) -> Result<Self, ConsoleError> {
        let timeout = config.timeout.as_secs();
        let client = match config.host.as_deref() {
            Some(host) if host.starts_with("unix://") => {
                Docker::connect_with_unix(host, timeout, API_DEFAULT_VERSION)
            }
            Some(host) => Docker::connect_with_http(host, timeout, API_DEFAULT_VERSION),
            None => Docker::connect_with_local_defaults(),
        }
        .map_err(|e| ConsoleError::GatewayUnavailable(e.to_string()))?
        .with_timeout(config.timeout);

        client
            .ping()
            .await
            .map_err(|e| ConsoleError::GatewayUnavailable(e.to_string()))?;

        let version = client
            .version()
            .await
            .ok()
            .and_then(|v| v.version)
            .unwrap_or_else(|| "unknown".to_string());
        info!(host = config.host.as_deref().unwrap_or("local"), %version, "connected to docker");

        Ok(Self {
            client,
            include_stopped: config.include_stopped,
            tail: config.tail,
            timestamps: config.timestamps,
        })
    }
}

#[async_trait]
impl RuntimeGateway for DockerClient {
    async fn list_workloads(&self) -> Result<Vec<WorkloadSummary>, ConsoleError> {
        let options: ListContainersOptions<String> = ListContainersOptions {
            all: self.include_stopped,
            ..Default::default()
        };
        let summaries = self
            .client
            .list_containers(Some(options))
            .await
            .map_err(|e| ConsoleError::operation_failed("list", "containers", e))?;
        debug!(count = summaries.len(), "listed containers");
        Ok(summaries.iter().map(summary_to_workload).collect())
    }

    async fn start(&self, id: &str) -> Result<(), ConsoleError> {
        self.client
            .start_container::<String>(id, None)
            .await
            .map_err(|e| ConsoleError::operation_failed("start", id, e))
    }

    async fn stop(&self, id: &str) -> Result<(), ConsoleError> {
        let options = StopContainerOptions { t: STOP_GRACE_SECS };
        self.client
            .stop_container(id, Some(options))
            .await
            .map_err(|e| ConsoleError::operation_failed("stop", id, e))
    }

    async fn restart(&self, id: &str) -> Result<(), ConsoleError> {
        let options = RestartContainerOptions { t: STOP_GRACE_SECS as isize };
        self.client
            .restart_container(id, Some(options))
            .await
            .map_err(|e| ConsoleError::operation_failed("restart", id, e))
    }

    async fn fetch_logs(&self, id: &str) -> Result<String, ConsoleError> {
        let options: LogsOptions<String> = LogsOptions {
            stdout: true,
            stderr: true,
            follow: false,
            timestamps: self.timestamps,
            tail: self.tail.map(|n| n.to_string()).unwrap_or_else(|| "all".to_string()),
            ..Default::default()
        };

        let mut stream = self.client.logs(id, Some(options));
        let mut text = String::new();
        while let Some(result) = stream.next().await {
            match result {
                Ok(LogOutput::StdOut { message })
                | Ok(LogOutput::StdErr { message })
                | Ok(LogOutput::Console { message }) => {
                    text.push_str(&String::from_utf8_lossy(&message));
                }
                Ok(LogOutput::StdIn { .. }) => continue,
                Err(e) => return Err(ConsoleError::operation_failed("logs", id, e)),
            }
        }
        Ok(text)
    }

    async fn fetch_stats(&self, id: &str) -> Result<RawStats, ConsoleError> {
        // one_shot would leave precpu empty and the CPU delta at zero.
        let options = StatsOptions {
            stream: false,
            one_shot: false,
        };
        let mut stream = self.client.stats(id, Some(options));
        match stream.next().await {
            Some(Ok(stats)) => Ok(stats_to_raw(&stats)),
            Some(Err(e)) => Err(ConsoleError::operation_failed("stats", id, e)),
            None => Err(ConsoleError::operation_failed("stats", id, "daemon returned no sample")),
        }
    }
}

// --- Free helper functions ---

fn summary_to_workload(s: &ContainerSummary) -> WorkloadSummary {
    let display_name = s
        .names
        .as_ref()
        .and_then(|n| n.first())
        .map(|n| n.trim_start_matches('/').to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Unnamed".to_string());

    WorkloadSummary {
        id: s.id.clone().unwrap_or_default(),
        display_name,
        status: s.state.clone().unwrap_or_default(),
        image: s.image.clone().unwrap_or_default(),
    }
}

fn stats_to_raw(stats: &Stats) -> RawStats {
    let counters = |cpu: &bollard::container::CPUStats| CpuCounters {
        total_usage: cpu.cpu_usage.total_usage,
        system_usage: cpu.system_cpu_usage.unwrap_or(0),
        per_cpu_usage: cpu.cpu_usage.percpu_usage.clone().unwrap_or_default(),
    };

    // cgroup v2 has no "cache" figure; "file" is the page cache there.
    let memory_cache = match &stats.memory_stats.stats {
        Some(MemoryStatsStats::V1(v1)) => v1.cache,
        Some(MemoryStatsStats::V2(v2)) => v2.file,
        None => 0,
    };

    let mut networks: Vec<InterfaceCounters> = stats
        .networks
        .as_ref()
        .map(|nets| {
            nets.iter()
                .map(|(name, n)| InterfaceCounters {
                    name: name.clone(),
                    rx_bytes: n.rx_bytes,
                    tx_bytes: n.tx_bytes,
                })
                .collect()
        })
        .unwrap_or_default();
    networks.sort_by(|a, b| a.name.cmp(&b.name));

    let blkio_service_bytes = stats
        .blkio_stats
        .io_service_bytes_recursive
        .as_ref()
        .map(|entries| {
            entries
                .iter()
                .map(|e| BlkioEntry { op: e.op.clone(), value: e.value })
                .collect()
        })
        .unwrap_or_default();

    RawStats {
        cpu: counters(&stats.cpu_stats),
        precpu: counters(&stats.precpu_stats),
        memory_usage: stats.memory_stats.usage.unwrap_or(0),
        memory_cache,
        memory_limit: stats.memory_stats.limit.unwrap_or(0),
        networks,
        blkio_service_bytes,
        pids: stats.pids_stats.current.unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_uses_first_name_without_slash() {
        let s = ContainerSummary {
            id: Some("abc123".into()),
            names: Some(vec!["/web".into(), "/alias".into()]),
            state: Some("running".into()),
            image: Some("nginx:1.27".into()),
            ..Default::default()
        };
        let w = summary_to_workload(&s);
        assert_eq!(w.id, "abc123");
        assert_eq!(w.display_name, "web");
        assert_eq!(w.status, "running");
        assert_eq!(w.image, "nginx:1.27");
    }

    #[test]
    fn summary_without_names_is_unnamed() {
        let s = ContainerSummary {
            id: Some("abc123".into()),
            names: None,
            state: Some("exited".into()),
            ..Default::default()
        };
        assert_eq!(summary_to_workload(&s).display_name, "Unnamed");

        let s = ContainerSummary {
            names: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(summary_to_workload(&s).display_name, "Unnamed");
    }
}
