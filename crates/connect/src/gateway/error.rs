//! Errors raised while talking to the dashboard gateway.

use fundboard_core::SectionError;
use thiserror::Error;

/// Result alias for gateway calls.
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Transport-level failure of a gateway request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The gateway answered with a non-2xx status.
    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },

    /// The HTTP client gave up waiting for the gateway.
    #[error("Request timed out")]
    Timeout,

    /// The response body was not the expected JSON.
    #[error("{0}")]
    Decode(String),

    /// The request could not be sent or the body could not be read.
    #[error("{0}")]
    Request(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

impl From<GatewayError> for SectionError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Http {
                status,
                status_text,
            } => SectionError::Http {
                status,
                status_text,
            },
            GatewayError::Timeout => SectionError::Timeout,
            GatewayError::Decode(message) | GatewayError::Request(message) => {
                SectionError::Unexpected(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_keeps_status() {
        let err: SectionError = GatewayError::Http {
            status: 503,
            status_text: "Service Unavailable".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    }

    #[test]
    fn test_decode_error_is_unexpected() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: GatewayError = json_err.into();
        let message = err.to_string();
        let section_err: SectionError = err.into();
        assert_eq!(section_err, SectionError::Unexpected(message));
    }

    #[test]
    fn test_client_timeout_maps_to_section_timeout() {
        let err: SectionError = GatewayError::Timeout.into();
        assert_eq!(err, SectionError::Timeout);
    }
}
