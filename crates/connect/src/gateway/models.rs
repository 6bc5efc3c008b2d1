//! Wire envelope shared by every dashboard endpoint.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use fundboard_core::{Section, SectionError, SectionResult};

use super::error::GatewayResult;

/// `{success, data?, error?}` wrapper returned by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Unwrap the envelope into the outcome of `section`.
    ///
    /// A declared failure uses the gateway's message, falling back to the
    /// section's generic one when the gateway gave none.
    pub fn into_section_result(self, section: Section) -> SectionResult<T> {
        if !self.success {
            let message = self
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| section.default_failure_message().to_string());
            return Err(SectionError::Application(message));
        }

        self.data.ok_or_else(|| {
            SectionError::Unexpected(format!("Gateway returned no {} data", section.key()))
        })
    }
}

impl ApiEnvelope<serde_json::Value> {
    /// Decode the untyped `data` member into `T`.
    ///
    /// Declared failures are passed through without touching `data`, so a
    /// failing response with an odd payload still surfaces its own message.
    pub fn decode<T: DeserializeOwned>(self) -> GatewayResult<ApiEnvelope<T>> {
        let data = match (self.success, self.data) {
            (true, Some(value)) => Some(serde_json::from_value(value)?),
            _ => None,
        };
        Ok(ApiEnvelope {
            success: self.success,
            data,
            error: self.error,
        })
    }
}
