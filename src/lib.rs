//! berth: an interactive terminal console for container workloads.
//!
//! This library exposes the core modules for use by the binary and by tests.

pub mod app;
pub mod config;
pub mod console;
pub mod docker;
pub mod error;
pub mod gateway;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod pane;
pub mod view;
