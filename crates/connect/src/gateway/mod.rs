mod error;
mod models;
mod traits;

pub use error::{GatewayError, GatewayResult};
pub use models::ApiEnvelope;
pub use traits::DashboardGateway;
