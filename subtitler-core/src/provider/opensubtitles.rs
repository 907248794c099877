//! OpenSubtitles SubtitleProvider Adapter
//!
//! Search maps API items through the extraction engine. Download is a strict
//! login, signed link, fetch chain where each step needs the previous one.

use std::sync::Arc;

use async_trait::async_trait;
use subtitler_providers::{
    http::{content_type_of, primary_type_extension},
    opensubtitles::{OpenSubtitlesClient, SubtitleItem},
};
use tracing::{debug, info, warn};

use super::{ProviderContext, ProviderError, ProviderSettings, SubtitleDownload, SubtitleProvider};
use crate::config::HttpConfig;
use crate::extract::{sanitize, PatternSet};
use crate::models::Subtitle;

pub const NAME: &str = "opensubtitles";

/// OpenSubtitles SubtitleProvider
pub struct OpenSubtitlesProvider {
    client: OpenSubtitlesClient,
    username: String,
    password: String,
    patterns: Arc<PatternSet>,
}

impl OpenSubtitlesProvider {
    pub fn new(
        settings: &ProviderSettings,
        http: &HttpConfig,
        debug: bool,
        patterns: Arc<PatternSet>,
    ) -> Result<Self, ProviderError> {
        let client = OpenSubtitlesClient::new(
            settings.base_url.clone(),
            settings.search_path.clone(),
            settings.api_key.clone(),
            &settings.http_options(http, debug),
        )?;

        Ok(Self::with_client(
            client,
            settings.username.clone(),
            settings.password.clone(),
            patterns,
        ))
    }

    #[must_use]
    pub fn with_client(
        client: OpenSubtitlesClient,
        username: impl Into<String>,
        password: impl Into<String>,
        patterns: Arc<PatternSet>,
    ) -> Self {
        Self {
            client,
            username: username.into(),
            password: password.into(),
            patterns,
        }
    }

    fn to_subtitle(&self, item: &SubtitleItem) -> Subtitle {
        let attributes = &item.attributes;
        let title = sanitize(attributes.feature_details.title.as_deref().unwrap_or_default());
        let description = sanitize(attributes.release.as_deref().unwrap_or_default());
        let title_info = self.patterns.title_info(&title);
        let release = self.patterns.release_info(&description);

        let mut subtitle = Subtitle {
            title,
            description,
            language: attributes.language.clone().unwrap_or_default(),
            ..Subtitle::new(NAME, item.file_id().unwrap_or_default())
        }
        .with_title_info(&title_info);

        if let Some(year) = attributes.feature_details.year.filter(|y| *y > 0) {
            subtitle.year = year;
        }
        subtitle.merge_release(&release);
        subtitle
    }

    async fn try_search(&self, ctx: &ProviderContext, query: &str) -> Result<Vec<Subtitle>, ProviderError> {
        let items = ctx.run(self.client.search(query)).await?;
        Ok(items.iter().map(|item| self.to_subtitle(item)).collect())
    }
}

#[async_trait]
impl SubtitleProvider for OpenSubtitlesProvider {
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
        let token = ctx.run(self.client.login(&self.username, &self.password)).await?;
        debug!(provider = NAME, "Login succeeded");

        let link = ctx.run(self.client.download_link(&token, id)).await?;
        let response = ctx.run(self.client.fetch(&link)).await?;

        let content_type = content_type_of(&response);
        let filename = format!("{id}.{}", primary_type_extension(&content_type));

        info!(provider = NAME, filename = %filename, "Downloading subtitle");
        Ok(SubtitleDownload::from_response(filename, content_type, response))
    }
}
