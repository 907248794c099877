//! OpenSubtitles HTTP Client

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client,
};
use tracing::debug;

use super::types::{DownloadRequest, DownloadResponse, LoginRequest, LoginResponse, SearchResponse, SubtitleItem};
use crate::error::{check_response, json_with_limit, ProviderClientError};
use crate::http::{build_client, join_url, send, HttpOptions};

const API_KEY_HEADER: &str = "Api-Key";

/// OpenSubtitles HTTP Client
#[derive(Debug, Clone)]
pub struct OpenSubtitlesClient {
    base_url: String,
    search_path: String,
    api_key: String,
    debug: bool,
    client: Client,
}

impl OpenSubtitlesClient {
    pub fn new(
        base_url: impl Into<String>,
        search_path: impl Into<String>,
        api_key: impl Into<String>,
        options: &HttpOptions,
    ) -> Result<Self, ProviderClientError> {
        let base_url = base_url.into();
        url::Url::parse(&base_url)
            .map_err(|e| ProviderClientError::InvalidConfig(format!("invalid base url {base_url}: {e}")))?;

        Ok(Self {
            base_url,
            search_path: search_path.into(),
            api_key: api_key.into(),
            debug: options.debug,
            client: build_client(options)?,
        })
    }

    fn build_headers(&self, bearer: Option<&str>) -> Result<HeaderMap, ProviderClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_str(&self.api_key)?);
        if let Some(token) = bearer {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
        }
        Ok(headers)
    }

    /// Search movie subtitles in Spanish and English, AI translations included.
    pub async fn search(&self, query: &str) -> Result<Vec<SubtitleItem>, ProviderClientError> {
        let url = join_url(&self.base_url, &self.search_path);
        let request = self
            .client
            .get(&url)
            .headers(self.build_headers(None)?)
            .query(&[
                ("type", "movie"),
                ("query", query),
                ("languages", "es,en"),
                ("ai_translated", "true"),
            ]);
        let response = send(request, self.debug).await?;

        let body: SearchResponse = json_with_limit(check_response(response)?).await?;
        if self.debug {
            debug!(query, total = body.total_count, returned = body.data.len(), "opensubtitles search");
        }
        Ok(body.data)
    }

    /// Exchange account credentials for a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ProviderClientError> {
        let url = join_url(&self.base_url, "api/v1/login");
        let request = self
            .client
            .post(&url)
            .headers(self.build_headers(None)?)
            .json(&LoginRequest { username, password });
        let response = send(request, self.debug).await?;

        let body: LoginResponse = json_with_limit(check_response(response)?).await?;
        if body.token.is_empty() {
            return Err(ProviderClientError::Auth("login returned an empty token".to_string()));
        }
        Ok(body.token)
    }

    /// Request a time-limited signed link for a file.
    pub async fn download_link(&self, token: &str, file_id: &str) -> Result<String, ProviderClientError> {
        let file_id: u64 = file_id
            .trim()
            .parse()
            .map_err(|_| ProviderClientError::Parse(format!("invalid file id: {file_id}")))?;

        let url = join_url(&self.base_url, "api/v1/download");
        let request = self
            .client
            .post(&url)
            .headers(self.build_headers(Some(token))?)
            .json(&DownloadRequest { file_id });
        let response = send(request, self.debug).await?;

        let body: DownloadResponse = json_with_limit(check_response(response)?).await?;
        if body.link.is_empty() {
            return Err(ProviderClientError::MissingField("link".to_string()));
        }
        if self.debug {
            debug!(file_id, "opensubtitles download link issued");
        }
        Ok(body.link)
    }

    /// GET a signed link; the body is left unread.
    pub async fn fetch(&self, link: &str) -> Result<reqwest::Response, ProviderClientError> {
        let response = send(self.client.get(link), self.debug).await?;
        check_response(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenSubtitlesClient {
        let options = HttpOptions::default().with_user_agent("subtitlerApi v1.0.0");
        OpenSubtitlesClient::new(server.uri(), "api/v1/subtitles", "key-123", &options).unwrap()
    }

    #[tokio::test]
    async fn test_search_sends_api_key_and_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/subtitles"))
            .and(header("Api-Key", "key-123"))
            .and(header("user-agent", "subtitlerApi v1.0.0"))
            .and(query_param("query", "dune"))
            .and(query_param("languages", "es,en"))
            .and(query_param("ai_translated", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_count": 1,
                "data": [{"id": "1", "attributes": {"release": "Dune.2021.1080p", "files": [{"file_id": 42}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let items = client_for(&server).search("dune").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].file_id(), Some(42));
    }

    #[tokio::test]
    async fn test_search_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&server).search("dune").await.unwrap_err();
        assert!(matches!(err, ProviderClientError::Http { .. }));
    }

    #[tokio::test]
    async fn test_login_empty_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/login"))
            .and(body_json(serde_json::json!({"username": "u", "password": "p"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": ""})))
            .mount(&server)
            .await;

        let err = client_for(&server).login("u", "p").await.unwrap_err();
        assert!(matches!(err, ProviderClientError::Auth(_)));
    }

    #[tokio::test]
    async fn test_download_link_uses_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/download"))
            .and(header("authorization", "Bearer tok"))
            .and(body_json(serde_json::json!({"file_id": 42})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"link": "https://dl.example.com/f/42"})),
            )
            .mount(&server)
            .await;

        let link = client_for(&server).download_link("tok", "42").await.unwrap();
        assert_eq!(link, "https://dl.example.com/f/42");
    }

    #[tokio::test]
    async fn test_download_link_missing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/download"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"remaining": 5})))
            .mount(&server)
            .await;

        let err = client_for(&server).download_link("tok", "42").await.unwrap_err();
        assert!(matches!(err, ProviderClientError::MissingField(_)));
    }

    #[tokio::test]
    async fn test_download_link_rejects_non_numeric_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server).download_link("tok", "abc").await.unwrap_err();
        assert!(matches!(err, ProviderClientError::Parse(_)));
    }
}
