//! SubX HTTP Client

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_DISPOSITION},
    Client,
};
use tracing::debug;

use super::types::{SearchResponse, SubxItem};
use crate::error::{check_response, json_with_limit, ProviderClientError};
use crate::http::{build_client, join_url, send, HttpOptions};

/// SubX HTTP Client
#[derive(Debug, Clone)]
pub struct SubxClient {
    base_url: String,
    search_path: String,
    api_key: String,
    debug: bool,
    client: Client,
}

impl SubxClient {
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

    fn build_headers(&self) -> Result<HeaderMap, ProviderClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", self.api_key))?);
        Ok(headers)
    }

    /// Search subtitles by title.
    pub async fn search(&self, title: &str) -> Result<Vec<SubxItem>, ProviderClientError> {
        let url = join_url(&self.base_url, &self.search_path);
        let request = self
            .client
            .get(&url)
            .headers(self.build_headers()?)
            .query(&[("title", title)]);
        let response = send(request, self.debug).await?;

        let body: SearchResponse = json_with_limit(check_response(response)?).await?;
        if self.debug {
            debug!(title, returned = body.items.len(), "subx search");
        }
        Ok(body.items)
    }

    /// `{base}/subtitles/{id}/download`, with the id encoded as a single path segment.
    fn download_url(&self, external_id: &str) -> Result<url::Url, ProviderClientError> {
        let mut url = url::Url::parse(&self.base_url)
            .map_err(|e| ProviderClientError::InvalidConfig(format!("invalid base url {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| ProviderClientError::InvalidConfig(format!("base url cannot hold a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["subtitles", external_id, "download"]);
        Ok(url)
    }

    /// Open the download for an item by its wire id; the body is left unread.
    pub async fn download(&self, external_id: &str) -> Result<reqwest::Response, ProviderClientError> {
        let request = self
            .client
            .get(self.download_url(external_id)?)
            .headers(self.build_headers()?)
            .header(CONTENT_DISPOSITION, "attachment");
        check_response(send(request, self.debug).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> SubxClient {
        let base = format!("{}/api", server.uri());
        SubxClient::new(base, "subtitles/search", "secret", &HttpOptions::default()).unwrap()
    }

    #[tokio::test]
    async fn test_search_bearer_and_title() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/subtitles/search"))
            .and(header("authorization", "Bearer secret"))
            .and(query_param("title", "the boys"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{"id": "abc123", "title": "The Boys S04E01", "description": "WEB-DL"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let items = client_for(&server).search("the boys").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "abc123");
    }

    #[tokio::test]
    async fn test_search_decode_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).search("x").await.unwrap_err();
        assert!(matches!(err, ProviderClientError::Parse(_)));
    }

    #[tokio::test]
    async fn test_download_addresses_external_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/subtitles/abc123/download"))
            .and(header("content-disposition", "attachment"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/zip")
                    .set_body_bytes(b"PK".to_vec()),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server).download("abc123").await.unwrap();
        assert_eq!(response.bytes().await.unwrap().as_ref(), b"PK");
    }

    #[test]
    fn test_download_url_encodes_id_as_one_segment() {
        let client = SubxClient::new("https://subx.example/api/", "subtitles/search", "k", &HttpOptions::default()).unwrap();
        assert_eq!(
            client.download_url("a b/c?d").unwrap().as_str(),
            "https://subx.example/api/subtitles/a%20b%2Fc%3Fd/download"
        );
        assert_eq!(
            client.download_url("abc123").unwrap().as_str(),
            "https://subx.example/api/subtitles/abc123/download"
        );
    }

    #[tokio::test]
    async fn test_download_id_with_space() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/subtitles/a%20b/download"))
            .respond_with(ResponseTemplate::new(200).set_body_string("1\n00:00:01,000 --> 00:00:02,000\nHola\n"))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server).download("a b").await.unwrap();
        assert!(response.status().is_success());
    }

    #[tokio::test]
    async fn test_download_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).download("missing").await.unwrap_err();
        assert!(matches!(err, ProviderClientError::Http { status, .. } if status == reqwest::StatusCode::NOT_FOUND));
    }
}
