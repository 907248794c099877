//! SubX SubtitleProvider Adapter

use std::sync::Arc;

use async_trait::async_trait;
use subtitler_providers::{
    http::{content_type_of, primary_type_extension},
    subx::{SubxClient, SubxItem},
};
use tracing::{info, warn};

use super::{ProviderContext, ProviderError, ProviderSettings, SubtitleDownload, SubtitleProvider};
use crate::config::HttpConfig;
use crate::extract::{sanitize, PatternSet};
use crate::models::Subtitle;

pub const NAME: &str = "subx";

const LANGUAGE: &str = "es";

/// SubX SubtitleProvider
///
/// Wire ids are opaque strings, so results carry their batch position as
/// `id` and the wire id as `external_id`. Downloads take the external id.
pub struct SubxProvider {
    client: SubxClient,
    patterns: Arc<PatternSet>,
}

impl SubxProvider {
    pub fn new(
        settings: &ProviderSettings,
        http: &HttpConfig,
        debug: bool,
        patterns: Arc<PatternSet>,
    ) -> Result<Self, ProviderError> {
        let client = SubxClient::new(
            settings.base_url.clone(),
            settings.search_path.clone(),
            settings.api_key.clone(),
            &settings.http_options(http, debug),
        )?;
        Ok(Self::with_client(client, patterns))
    }

    #[must_use]
    pub const fn with_client(client: SubxClient, patterns: Arc<PatternSet>) -> Self {
        Self { client, patterns }
    }

    fn to_subtitle(&self, index: usize, item: &SubxItem) -> Subtitle {
        let title = sanitize(&item.title);
        let description = sanitize(&item.description);
        let title_info = self.patterns.title_info(&title);
        let release = self.patterns.release_info(&description);

        let mut subtitle = Subtitle {
            external_id: Some(item.id.clone()),
            title,
            description,
            language: LANGUAGE.to_string(),
            ..Subtitle::new(NAME, index as u64)
        }
        .with_title_info(&title_info);
        subtitle.merge_release(&release);
        subtitle
    }

    async fn try_search(&self, ctx: &ProviderContext, query: &str) -> Result<Vec<Subtitle>, ProviderError> {
        let items = ctx.run(self.client.search(query)).await?;
        Ok(items
            .iter()
            .enumerate()
            .map(|(index, item)| self.to_subtitle(index, item))
            .collect())
    }
}

#[async_trait]
impl SubtitleProvider for SubxProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn search(&self, ctx: &ProviderContext, query: &str) -> Vec<Subtitle> {
        match self.try_search(ctx, query).await {
            Ok(subtitles) => {
                info!(provider = NAME, query, count = subtitles.len(), "Search completed");
                subtitles
            }
            Err(e) => {
                warn!(provider = NAME, query, error = %e, "Search failed");
                Vec::new()
            }
        }
    }

    async fn download(&self, ctx: &ProviderContext, id: &str) -> Result<SubtitleDownload, ProviderError> {
        let response = ctx.run(self.client.download(id)).await?;
        let content_type = content_type_of(&response);
        let filename = format!("{id}.{}", primary_type_extension(&content_type));

        info!(provider = NAME, filename = %filename, "Downloading subtitle");
        Ok(SubtitleDownload::from_response(filename, content_type, response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentKind;
    use subtitler_providers::HttpOptions;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> SubxProvider {
        let client = SubxClient::new(format!("{}/api", server.uri()), "subtitles/search", "k", &HttpOptions::default())
            .unwrap();
        SubxProvider::with_client(client, Arc::new(PatternSet::builtin().unwrap()))
    }

    #[tokio::test]
    async fn test_search_assigns_sequential_ids() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/subtitles/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    {"id": "66f0a1", "title": "Shogun S01E03", "description": "<p>WEB-DL 1080p</p>\nde FLUX"},
                    {"id": "66f0a2", "title": "Oppenheimer (2023)", "description": "BluRay"}
                ]
            })))
            .mount(&server)
            .await;

        let results = provider_for(&server).search(&ProviderContext::new(), "x").await;
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].id, 0);
        assert_eq!(results[0].external_id.as_deref(), Some("66f0a1"));
        assert_eq!(results[0].kind, ContentKind::Serie);
        assert_eq!(results[0].description, "WEB-DL 1080p de FLUX");
        assert_eq!(results[0].group, vec!["FLUX".to_string()]);

        assert_eq!(results[1].id, 1);
        assert_eq!(results[1].external_id.as_deref(), Some("66f0a2"));
        assert_eq!(results[1].year, 2023);
        assert_eq!(results[1].language, "es");
    }

    #[tokio::test]
    async fn test_search_decode_failure_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        assert!(provider_for(&server).search(&ProviderContext::new(), "x").await.is_empty());
    }

    #[tokio::test]
    async fn test_download_by_external_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/subtitles/66f0a1/download"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/zip")
                    .set_body_bytes(b"PK".to_vec()),
            )
            .expect(1)
            .mount(&server)
            .await;

        let download = provider_for(&server).download(&ProviderContext::new(), "66f0a1").await.unwrap();
        assert_eq!(download.filename, "66f0a1.application");
        assert_eq!(download.content_type, "application/zip");
    }
}
