//! Fundboard Render - HTML view for the dashboard loader.
//!
//! Paints skeleton, populated and error fragments into the page's render
//! targets and assembles the complete document.

mod html_dashboard;
mod page;
pub mod target;
pub mod templates;

pub use html_dashboard::HtmlDashboard;
pub use target::RenderTarget;
