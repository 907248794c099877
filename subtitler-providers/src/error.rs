//! Client error type and response body helpers
//!
//! Every upstream call goes through [`check_response`] and then one of the
//! bounded readers, so a misbehaving upstream cannot hand us an unbounded body.

use thiserror::Error;

/// Upper bound on any buffered upstream body (16 MiB).
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ProviderClientError {
    /// Transport failure (DNS, connect, TLS, timeout, reset)
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status} for {url}")]
    Http { status: reqwest::StatusCode, url: String },

    /// Body did not decode into the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Decoded fine but a value the protocol depends on is absent or empty
    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Subdivx kept answering with a zero echo marker
    #[error("Stale session: search rejected after {attempts} attempt(s)")]
    StaleSession { attempts: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Response body exceeds {limit} bytes")]
    ResponseTooLarge { limit: usize },
}

impl From<reqwest::Error> for ProviderClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ProviderClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for ProviderClientError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

/// Reject 4xx and 5xx responses, passing everything else through.
pub fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ProviderClientError> {
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(ProviderClientError::Http {
            status,
            url: response.url().to_string(),
        });
    }
    Ok(response)
}

/// Buffer at most [`MAX_BODY_BYTES`] and decode the body as JSON.
pub async fn json_with_limit<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ProviderClientError> {
    let body = read_limited(response, MAX_BODY_BYTES).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Buffer at most [`MAX_BODY_BYTES`] and decode the body as lossy UTF-8.
pub async fn text_with_limit(response: reqwest::Response) -> Result<String, ProviderClientError> {
    let body = read_limited(response, MAX_BODY_BYTES).await?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Read chunk by chunk, failing as soon as the running total passes `limit`.
///
/// A declared `Content-Length` over the limit fails before reading anything.
async fn read_limited(mut response: reqwest::Response, limit: usize) -> Result<Vec<u8>, ProviderClientError> {
    let declared = response.content_length().unwrap_or(0);
    if declared > limit as u64 {
        return Err(ProviderClientError::ResponseTooLarge { limit });
    }

    let mut body = Vec::with_capacity(usize::try_from(declared).unwrap_or(0));
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > limit {
            return Err(ProviderClientError::ResponseTooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
