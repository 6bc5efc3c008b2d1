//! Dashboard loading: the load-cycle orchestrator and the view it paints.

mod orchestrator;
mod view;

pub use orchestrator::{DashboardOrchestrator, LoadCycleReport, LoaderConfig};
pub use view::{BannerId, DashboardView, NoOpView};

#[cfg(test)]
mod orchestrator_tests;
