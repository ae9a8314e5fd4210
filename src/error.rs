use std::io;

use thiserror::Error;

/// Everything that can go wrong inside the console.
///
/// `GatewayUnavailable` is fatal and only ever produced before the event loop
/// starts. `OperationFailed` travels inside result-events and is rendered by
/// the pane that issued the call. `EmptySelection` is swallowed by the list
/// pane and never shown to the operator.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("container runtime unavailable: {0}")]
    GatewayUnavailable(String),

    #[error("{operation} {target} failed: {message}")]
    OperationFailed {
        operation: &'static str,
        target: String,
        message: String,
    },

    #[error("no workload selected")]
    EmptySelection,

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("failed to start async runtime: {0}")]
    Runtime(io::Error),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

impl ConsoleError {
    pub fn operation_failed(
        operation: &'static str,
        target: impl Into<String>,
        err: impl std::fmt::Display,
    ) -> Self {
        ConsoleError::OperationFailed {
            operation,
            target: target.into(),
            message: err.to_string(),
        }
    }

    /// Short message for inline banners. Drops the operation prefix for
    /// `OperationFailed` since the pane already says what it was doing.
    pub fn banner(&self) -> String {
        match self {
            ConsoleError::OperationFailed { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
