//! Tracing setup. The terminal belongs to the UI, so events either go to a
//! rolling file or nowhere.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;
use crate::error::ConsoleError;

/// Environment variable that overrides `--log-level`.
pub const LOG_ENV: &str = "BERTH_LOG";

/// Install the global subscriber. Keep the returned guard alive for the
/// whole session or buffered lines are lost on exit.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>, ConsoleError> {
    let filter = build_filter(&config.filter)?;

    let Some(dir) = &config.dir else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .try_init();
        return Ok(None);
    };

    std::fs::create_dir_all(dir)
        .map_err(|e| ConsoleError::Logging(format!("{}: {}", dir.display(), e)))?;
    let appender = tracing_appender::rolling::daily(dir, "berth.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(writer)
        .try_init()
        .map_err(|e| ConsoleError::Logging(e.to_string()))?;

    Ok(Some(guard))
}

fn build_filter(fallback: &str) -> Result<EnvFilter, ConsoleError> {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(fallback))
        .map_err(|e| ConsoleError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_fallback_filter_is_rejected() {
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        assert!(matches!(build_filter("berth=loudest"), Err(ConsoleError::Logging(_))));
        assert!(build_filter("berth=debug").is_ok());
    }
}
