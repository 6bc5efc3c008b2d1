//! Dashboard domain: date range, section payloads and load outcomes.

mod dashboard_model;
mod date_range;
mod section;

pub use dashboard_model::*;
pub use date_range::DateRange;
pub use section::{Section, SectionError, SectionResult};
