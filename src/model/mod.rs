// Re-export all model types from submodules.

pub use app::{FocusState, PaneId};
pub use docker::{ResourceSample, WorkloadSummary};
pub use viewport::Viewport;

mod app;
mod docker;
mod viewport;
