//! Response handling shared by the HTTP providers.

use crate::mt::error::{MtError, MtResult};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Build the HTTP client used by every provider.
///
/// No timeout is configured: requests run until the transport gives up.
pub(crate) fn build_client() -> MtResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("koen-translator/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))
}

/// Strip trailing slashes so paths can be appended verbatim
pub(crate) fn normalize_base_url(base_url: &str) -> MtResult<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(MtError::ConfigError("Base URL cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Turn a non-success response into a `StatusError`.
pub(crate) async fn check_status(response: reqwest::Response) -> MtResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), body = %body, "endpoint returned an error status");

    Err(MtError::StatusError {
        status: status.as_u16(),
        message: status.canonical_reason().unwrap_or("Unknown error").to_string(),
    })
}

/// Check the status, then decode the body as `T`.
pub(crate) async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> MtResult<T> {
    let response = check_status(response).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| MtError::DecodeError(format!("Failed to parse API response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:8000/").unwrap(),
            "http://localhost:8000"
        );
        assert_eq!(
            normalize_base_url(" http://example.test ").unwrap(),
            "http://example.test"
        );
        assert!(matches!(
            normalize_base_url("  "),
            Err(MtError::ConfigError(_))
        ));
    }
}
