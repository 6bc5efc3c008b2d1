//! Fundboard Core - dashboard domain entities and formatting.
//!
//! This crate holds the transport-agnostic side of the investor dashboard:
//! the date range a load cycle runs over, the payloads of the three
//! sections, their per-section outcome and the derived total profit.

pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod utils;

pub use dashboard::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
