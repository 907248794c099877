//! Subdivx HTTP Client

use std::sync::LazyLock;
use std::time::Duration;

use backon::{BackoffBuilder, ConstantBuilder};
use regex::Regex;
use reqwest::{
    header::{CONNECTION, COOKIE, REFERER},
    Client,
};
use tracing::{debug, warn};

use super::types::{SessionToken, SubdivxComment, SubdivxItem, SubdivxResponse};
use crate::error::{check_response, json_with_limit, text_with_limit, ProviderClientError};
use crate::http::{build_client, join_url, send, HttpOptions};

/// Version marker embedded in the landing page (`<div id="vs">v3.2.1</div>`)
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div[^>]*id="vs"[^>]*>([^<]+)</div>"#).expect("valid version regex")
});

/// Extract the normalized site version from landing page HTML.
///
/// The leading `v` is dropped and only alphanumerics are kept, so
/// `"v3.2.1\n"` becomes `"321"`.
pub fn parse_version(html: &str) -> Result<String, ProviderClientError> {
    let raw = VERSION_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .ok_or_else(|| ProviderClientError::MissingField("site version marker".to_string()))?;

    let version: String = raw
        .trim_start_matches(['v', 'V'])
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();

    if version.is_empty() {
        return Err(ProviderClientError::MissingField("site version".to_string()));
    }
    Ok(version)
}

/// Stale-session retry policy for searches.
#[derive(Debug, Clone, Copy)]
pub struct SearchRetry {
    /// Total number of submissions, including the first one
    pub attempts: usize,
    /// Fixed wait between submissions
    pub delay: Duration,
}

impl Default for SearchRetry {
    fn default() -> Self {
        Self {
            attempts: 6,
            delay: Duration::from_secs(5),
        }
    }
}

/// Subdivx HTTP Client
#[derive(Debug, Clone)]
pub struct SubdivxClient {
    base_url: String,
    search_path: String,
    debug: bool,
    retry: SearchRetry,
    client: Client,
}

impl SubdivxClient {
    pub fn new(
        base_url: impl Into<String>,
        search_path: impl Into<String>,
        options: &HttpOptions,
    ) -> Result<Self, ProviderClientError> {
        let base_url = base_url.into();
        url::Url::parse(&base_url)
            .map_err(|e| ProviderClientError::InvalidConfig(format!("invalid base url {base_url}: {e}")))?;

        Ok(Self {
            base_url,
            search_path: search_path.into(),
            debug: options.debug,
            retry: SearchRetry::default(),
            client: build_client(options)?,
        })
    }

    #[must_use]
    pub const fn with_retry(mut self, retry: SearchRetry) -> Self {
        self.retry = retry;
        self
    }

    /// Fetch the landing page and read the current site version.
    pub async fn version(&self) -> Result<String, ProviderClientError> {
        let url = join_url(&self.base_url, "/");
        let response = check_response(send(self.client.get(&url), self.debug).await?)?;
        let html = text_with_limit(response).await?;
        let version = parse_version(&html)?;
        if self.debug {
            debug!(version = %version, "subdivx site version");
        }
        Ok(version)
    }

    /// Acquire a fresh anti-bot session token.
    pub async fn token(&self) -> Result<SessionToken, ProviderClientError> {
        let url = join_url(&self.base_url, "inc/gt.php");
        let request = self
            .client
            .get(&url)
            .query(&[("gt", "1")]);
        let response = send(request, self.debug).await?;
        let session: SessionToken = json_with_limit(check_response(response)?).await?;

        if session.token.is_empty() {
            return Err(ProviderClientError::MissingField("token".to_string()));
        }
        Ok(session)
    }

    /// Submit the search form, resubmitting while the site reports a stale session.
    ///
    /// Returns [`ProviderClientError::StaleSession`] once every attempt came
    /// back with a zero echo.
    pub async fn search(
        &self,
        version: &str,
        session: &SessionToken,
        query: &str,
    ) -> Result<Vec<SubdivxItem>, ProviderClientError> {
        let url = join_url(&self.base_url, &self.search_path);
        let search_field = format!("buscar{version}");
        let form = [
            ("tabla", "resultados"),
            ("filtros", ""),
            (search_field.as_str(), query),
            ("token", session.token.as_str()),
        ];

        let attempts = self.retry.attempts.max(1);
        let backoff = ConstantBuilder::default()
            .with_delay(self.retry.delay)
            .with_max_times(attempts - 1)
            .build();

        for (attempt, delay) in std::iter::once(Duration::ZERO).chain(backoff).enumerate() {
            if delay > Duration::ZERO {
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.post(&url).form(&form);
            if !session.cookie.is_empty() {
                request = request.header(COOKIE, session.cookie.as_str());
            }
            let response = check_response(send(request, self.debug).await?)?;
            let body: SubdivxResponse<SubdivxItem> = json_with_limit(response).await?;

            if !body.is_stale() {
                if self.debug {
                    debug!(query, attempt = attempt + 1, results = body.data.len(), "subdivx search accepted");
                }
                return Ok(body.data);
            }

            warn!(
                query,
                attempt = attempt + 1,
                max_attempts = attempts,
                "subdivx rejected search session"
            );
        }

        Err(ProviderClientError::StaleSession { attempts })
    }

    /// Fetch the comments attached to a result row.
    pub async fn comments(&self, id: u64) -> Result<Vec<SubdivxComment>, ProviderClientError> {
        let url = join_url(&self.base_url, &self.search_path);
        let id = id.to_string();
        let request = self
            .client
            .post(&url)
            .form(&[("getComentarios", id.as_str())]);
        let response = send(request, self.debug).await?;
        let body: SubdivxResponse<SubdivxComment> = json_with_limit(check_response(response)?).await?;
        Ok(body.data)
    }

    /// Open the download for a subtitle; the body is left unread.
    pub async fn download(&self, id: &str) -> Result<reqwest::Response, ProviderClientError> {
        let url = join_url(&self.base_url, "descargar.php");
        let request = self
            .client
            .get(&url)
            .query(&[("id", id)])
            .header(REFERER, url.as_str())
            .header(CONNECTION, "keep-alive");
        let response = send(request, self.debug).await?;
        check_response(response)
    }
}
