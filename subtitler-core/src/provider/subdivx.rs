//! Subdivx SubtitleProvider Adapter
//!
//! Runs the scraping protocol through SubdivxClient: version discovery,
//! token acquisition, search submission, then concurrent per-row comment
//! enrichment. All phases share one deadline.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use subtitler_providers::{
    http::{content_type_of, subtype_extension},
    subdivx::{SearchRetry, SubdivxClient, SubdivxItem},
};
use tracing::{info, warn};

use super::{ProviderContext, ProviderError, ProviderSettings, SubtitleDownload, SubtitleProvider};
use crate::config::{HttpConfig, SubdivxSearchConfig};
use crate::extract::{sanitize, PatternSet};
use crate::fanout::join_isolated;
use crate::models::Subtitle;

pub const NAME: &str = "subdivx";

const LANGUAGE: &str = "es";

/// Subdivx SubtitleProvider
pub struct SubdivxProvider {
    client: SubdivxClient,
    patterns: Arc<PatternSet>,
    deadline: Duration,
}

impl SubdivxProvider {
    pub fn new(
        settings: &ProviderSettings,
        search: &SubdivxSearchConfig,
        http: &HttpConfig,
        debug: bool,
        patterns: Arc<PatternSet>,
    ) -> Result<Self, ProviderError> {
        let client = SubdivxClient::new(
            settings.base_url.clone(),
            settings.search_path.clone(),
            &settings.http_options(http, debug),
        )?
        .with_retry(SearchRetry {
            attempts: search.attempts.max(1),
            delay: Duration::from_millis(search.retry_delay_ms),
        });

        Ok(Self::with_client(client, patterns, Duration::from_secs(search.deadline_seconds)))
    }

    #[must_use]
    pub fn with_client(client: SubdivxClient, patterns: Arc<PatternSet>, deadline: Duration) -> Self {
        Self {
            client,
            patterns,
            deadline,
        }
    }

    fn to_subtitle(&self, item: &SubdivxItem) -> Subtitle {
        let title = sanitize(&item.title);
        let description = sanitize(&item.description);
        let title_info = self.patterns.title_info(&title);
        let release = self.patterns.release_info(&description);

        let mut subtitle = Subtitle {
            title,
            description,
            language: LANGUAGE.to_string(),
            ..Subtitle::new(NAME, item.id)
        }
        .with_title_info(&title_info);
        subtitle.merge_release(&release);
        subtitle
    }

    async fn try_search(&self, ctx: &ProviderContext, query: &str) -> Result<Vec<Subtitle>, ProviderError> {
        let ctx = ctx.with_timeout(self.deadline);

        let version = ctx.run(self.client.version()).await?;
        let session = ctx.run(self.client.token()).await?;
        let items = ctx.run(self.client.search(&version, &session, query)).await?;

        let tasks: Vec<_> = items
            .iter()
            .map(|item| {
                let subtitle = self.to_subtitle(item);
                let client = self.client.clone();
                let patterns = Arc::clone(&self.patterns);
                let ctx = ctx.clone();
                enrich_with_comments(client, patterns, ctx, subtitle)
            })
            .collect();

        let subtitles: Vec<Subtitle> = join_isolated(tasks).await.into_iter().flatten().collect();

        // Rows finished after cancellation carry no comment data; drop the batch.
        ctx.check()?;
        Ok(subtitles)
    }
}

/// Union comment-derived release attributes into one row.
///
/// A failed comment fetch leaves the row as it was.
async fn enrich_with_comments(
    client: SubdivxClient,
    patterns: Arc<PatternSet>,
    ctx: ProviderContext,
    mut subtitle: Subtitle,
) -> Subtitle {
    match ctx.run(client.comments(subtitle.id)).await {
        Ok(comments) => {
            for comment in comments {
                let text = sanitize(&comment.comment);
                subtitle.merge_release(&patterns.release_info(&text));
            }
        }
        Err(e) => {
            warn!(provider = NAME, id = subtitle.id, error = %e, "Failed to fetch subtitle comments");
        }
    }
    subtitle
}

#[async_trait]
impl SubtitleProvider for SubdivxProvider {
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
        let filename = format!("{id}.{}", subtype_extension(&content_type));

        info!(provider = NAME, filename = %filename, "Downloading subtitle");
        Ok(SubtitleDownload::from_response(filename, content_type, response))
    }
}
