//! HTTP client for the dashboard gateway.
//!
//! Talks to the three read-only `/dashboard/api/*` endpoints and hands their
//! JSON envelopes back to the loader untouched.

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

use fundboard_core::constants::DEFAULT_REQUEST_TIMEOUT_MS;
use fundboard_core::errors::{Error, Result};
use fundboard_core::{BalancePayload, CryptoPayload, DateRange, TransactionsPayload};

use crate::gateway::{ApiEnvelope, DashboardGateway, GatewayError, GatewayResult};

/// Default base URL of a locally running dashboard server.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

const BALANCE_PATH: &str = "/dashboard/api/balance";
const TRANSACTIONS_PATH: &str = "/dashboard/api/transactions";
const CRYPTO_VARIATION_PATH: &str = "/dashboard/api/crypto-variation";

/// reqwest-backed [`DashboardGateway`].
///
/// # Example
///
/// ```ignore
/// let client = DashboardApiClient::new("http://127.0.0.1:5000", Duration::from_secs(30))?
///     .with_session_cookie("session=abc")?;
/// let balance = client.fetch_balance(&range).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DashboardApiClient {
    client: reqwest::Client,
    base_url: String,
    session_cookie: Option<HeaderValue>,
}

impl DashboardApiClient {
    /// Create a client for the gateway at `base_url`.
    ///
    /// `timeout` is applied at the HTTP layer as a backstop; the loader runs
    /// its own per-fetch timeout on top.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie: None,
        })
    }

    /// Client with the default 30 second budget.
    pub fn with_default_timeout(base_url: &str) -> Result<Self> {
        Self::new(base_url, Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS))
    }

    /// Forward a session cookie; the dashboard routes sit behind a login.
    pub fn with_session_cookie(mut self, cookie: &str) -> Result<Self> {
        let value = HeaderValue::from_str(cookie)
            .map_err(|e| Error::InvalidConfigValue(format!("Invalid session cookie: {}", e)))?;
        self.session_cookie = Some(value);
        Ok(self)
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(cookie) = &self.session_cookie {
            headers.insert(COOKIE, cookie.clone());
        }
        headers
    }

    fn endpoint_url(&self, path: &str, range: &DateRange) -> String {
        format!("{}{}?{}", self.base_url, path, range.to_query())
    }

    /// GET an endpoint and decode its envelope.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        range: &DateRange,
    ) -> GatewayResult<ApiEnvelope<T>> {
        let url = self.endpoint_url(path, range);
        debug!("[DashboardApi] GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Http {
                status: status.as_u16(),
                status_text: status_text(status),
            });
        }

        let body = response.text().await?;
        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(&body)?;
        envelope.decode()
    }
}

/// Reason phrase for `status`, with a fallback for codes the registry lacks.
fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unknown Status")
        .to_string()
}

#[async_trait]
impl DashboardGateway for DashboardApiClient {
    async fn fetch_balance(&self, range: &DateRange) -> GatewayResult<ApiEnvelope<BalancePayload>> {
        self.get(BALANCE_PATH, range).await
    }

    async fn fetch_transactions(
        &self,
        range: &DateRange,
    ) -> GatewayResult<ApiEnvelope<TransactionsPayload>> {
        self.get(TRANSACTIONS_PATH, range).await
    }

    async fn fetch_crypto_variation(
        &self,
        range: &DateRange,
    ) -> GatewayResult<ApiEnvelope<CryptoPayload>> {
        self.get(CRYPTO_VARIATION_PATH, range).await
    }
}
