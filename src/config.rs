use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Interactive terminal console for Docker workloads.
#[derive(Parser, Debug, Clone)]
#[command(name = "berth", version, about = "Inspect and control Docker containers from the terminal")]
pub struct Args {
    /// Docker daemon address (unix:///path/to/docker.sock or tcp://host:port).
    /// Defaults to DOCKER_HOST, then the local socket.
    #[arg(long, value_name = "ADDR")]
    pub host: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Only list running containers.
    #[arg(long)]
    pub running_only: bool,

    /// Number of log lines to fetch (default: all).
    #[arg(long, value_name = "N")]
    pub tail: Option<u64>,

    /// Prefix log lines with runtime timestamps.
    #[arg(long)]
    pub timestamps: bool,

    /// Seconds between stats refreshes for the selected container. 0 disables.
    #[arg(long, value_name = "SECS", default_value_t = 2)]
    pub stats_interval: u64,

    /// Write a daily rolling log file into this directory.
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log filter used when BERTH_LOG is not set.
    #[arg(long, value_name = "FILTER", default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: Option<String>,
    pub timeout: Duration,
    pub include_stopped: bool,
    pub tail: Option<u64>,
    pub timestamps: bool,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub dir: Option<PathBuf>,
    pub filter: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub stats_interval: Option<Duration>,
    pub logging: LogConfig,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            gateway: GatewayConfig {
                host: args.host.filter(|h| !h.is_empty()),
                timeout: Duration::from_secs(args.timeout.max(1)),
                include_stopped: !args.running_only,
                tail: args.tail,
                timestamps: args.timestamps,
            },
            stats_interval: (args.stats_interval > 0)
                .then(|| Duration::from_secs(args.stats_interval)),
            logging: LogConfig {
                dir: args.log_dir,
                filter: args.log_level,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Args::parse_from(["berth"]).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.gateway.host.is_none());
        assert!(config.gateway.include_stopped);
        assert_eq!(config.gateway.timeout, Duration::from_secs(30));
        assert_eq!(config.gateway.tail, None);
        assert_eq!(config.stats_interval, Some(Duration::from_secs(2)));
        assert_eq!(config.logging.filter, "info");
        assert!(config.logging.dir.is_none());
    }

    #[test]
    fn zero_stats_interval_disables_refresh() {
        let config: Config = Args::parse_from(["berth", "--stats-interval", "0"]).into();
        assert_eq!(config.stats_interval, None);
    }

    #[test]
    fn flags_map_onto_config() {
        let args = Args::parse_from([
            "berth",
            "--host",
            "tcp://10.0.0.5:2375",
            "--running-only",
            "--tail",
            "200",
            "--timestamps",
            "--timeout",
            "5",
            "--log-dir",
            "/tmp/berth",
        ]);
        let config: Config = args.into();
        assert_eq!(config.gateway.host.as_deref(), Some("tcp://10.0.0.5:2375"));
        assert!(!config.gateway.include_stopped);
        assert_eq!(config.gateway.tail, Some(200));
        assert!(config.gateway.timestamps);
        assert_eq!(config.gateway.timeout, Duration::from_secs(5));
        assert_eq!(config.logging.dir, Some(PathBuf::from("/tmp/berth")));
    }
}
