//! Fundboard Connect - gateway access and load orchestration for the dashboard.
//!
//! This crate talks to the dashboard's read-only HTTP endpoints and drives
//! the load sequence that fills the page's three sections.

pub mod client;
pub mod gateway;
pub mod loader;

// Re-export commonly used types
pub use client::{DashboardApiClient, DEFAULT_API_BASE_URL};
pub use gateway::{ApiEnvelope, DashboardGateway, GatewayError, GatewayResult};
pub use loader::{
    BannerId, DashboardOrchestrator, DashboardView, LoadCycleReport, LoaderConfig, NoOpView,
};
