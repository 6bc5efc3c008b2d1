//! Contract for the remote data gateway.

use async_trait::async_trait;

use fundboard_core::{BalancePayload, CryptoPayload, DateRange, TransactionsPayload};

use super::error::GatewayResult;
use super::models::ApiEnvelope;

/// Read-only access to the three dashboard endpoints.
///
/// Implementations report transport problems as [`GatewayError`](super::GatewayError)
/// and hand declared application failures back inside the envelope. Timeouts
/// are enforced by the caller.
#[async_trait]
pub trait DashboardGateway: Send + Sync {
    /// `GET /dashboard/api/balance`
    async fn fetch_balance(&self, range: &DateRange) -> GatewayResult<ApiEnvelope<BalancePayload>>;

    /// `GET /dashboard/api/transactions`
    async fn fetch_transactions(
        &self,
        range: &DateRange,
    ) -> GatewayResult<ApiEnvelope<TransactionsPayload>>;

    /// `GET /dashboard/api/crypto-variation`
    async fn fetch_crypto_variation(
        &self,
        range: &DateRange,
    ) -> GatewayResult<ApiEnvelope<CryptoPayload>>;
}
