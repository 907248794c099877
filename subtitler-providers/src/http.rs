//! HTTP client construction and response metadata helpers shared by all clients.

use std::time::{Duration, Instant};

use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder, Response};
use tracing::debug;

use crate::error::ProviderClientError;

/// Per-client HTTP settings.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Sent as `User-Agent` on every request when non-empty
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Log request/response details at debug level
    pub debug: bool,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            debug: false,
        }
    }
}

impl HttpOptions {
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Build a `reqwest` client from options.
///
/// No retry policy is attached here; retries belong to the individual call
/// sites that need them.
pub fn build_client(options: &HttpOptions) -> Result<Client, ProviderClientError> {
    let mut builder = Client::builder()
        .connect_timeout(options.connect_timeout)
        .timeout(options.request_timeout)
        .pool_max_idle_per_host(10);

    if !options.user_agent.is_empty() {
        builder = builder.user_agent(options.user_agent.clone());
    }

    builder
        .build()
        .map_err(|e| ProviderClientError::InvalidConfig(format!("failed to build HTTP client: {e}")))
}

/// Send a request.
///
/// With `debug` set, every exchange logs method, URL, status and the declared
/// body size at debug level.
pub async fn send(request: RequestBuilder, debug: bool) -> Result<Response, ProviderClientError> {
    if !debug {
        return Ok(request.send().await?);
    }

    let (client, request) = request.build_split();
    let request = request?;
    let method = request.method().clone();
    let url = request.url().clone();
    let started = Instant::now();

    match client.execute(request).await {
        Ok(response) => {
            debug!(
                %method,
                %url,
                status = response.status().as_u16(),
                body_bytes = response.content_length(),
                elapsed = ?started.elapsed(),
                "upstream response"
            );
            Ok(response)
        }
        Err(e) => {
            debug!(%method, %url, error = %e, elapsed = ?started.elapsed(), "upstream request failed");
            Err(e.into())
        }
    }
}

/// Join a base URL and a relative path with exactly one `/` between them.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// `Content-Type` header of a response, or an empty string.
#[must_use]
pub fn content_type_of(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn media_type(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or_default().trim()
}

/// File extension taken from the media subtype (`application/zip` -> `zip`).
#[must_use]
pub fn subtype_extension(content_type: &str) -> String {
    media_type(content_type)
        .split_once('/')
        .map(|(_, subtype)| subtype.trim())
        .filter(|subtype| !subtype.is_empty())
        .unwrap_or("bin")
        .to_string()
}

/// File extension taken from the primary media type, with `text` mapped to `srt`.
#[must_use]
pub fn primary_type_extension(content_type: &str) -> String {
    let primary = media_type(content_type)
        .split('/')
        .next()
        .unwrap_or_default()
        .trim();

    match primary {
        "" => "bin".to_string(),
        "text" => "srt".to_string(),
        other => other.to_string(),
    }
}
