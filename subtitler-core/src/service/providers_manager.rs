//! Providers Manager
//!
//! Keyed registry of SubtitleProvider instances. Aggregate searches fan out
//! to every selected provider concurrently and merge in key order; downloads
//! dispatch to exactly one provider.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, field, info, info_span, warn, Instrument, Span};

use crate::config::Config;
use crate::extract::PatternSet;
use crate::fanout::join_isolated;
use crate::models::{PostFilters, Subtitle};
use crate::provider::{
    opensubtitles, subdivx, subx, OpenSubtitlesProvider, ProviderContext, ProviderError, SubdivxProvider,
    SubtitleDownload, SubtitleProvider, SubxProvider,
};

/// Registered provider plus its enabled flag
#[derive(Clone)]
pub struct ProviderHandler {
    pub enabled: bool,
    pub provider: Arc<dyn SubtitleProvider>,
}

/// Provider listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderStatus {
    pub name: String,
    pub enabled: bool,
}

/// Providers Manager
///
/// # Architecture
/// ```text
/// ProvidersManager
///   ├── "opensubtitles" → OpenSubtitlesProvider
///   ├── "subdivx"       → SubdivxProvider
///   └── "subx"          → SubxProvider
/// ```
#[derive(Clone, Default)]
pub struct ProvidersManager {
    handlers: BTreeMap<String, ProviderHandler>,
}

impl ProvidersManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the built-in providers from configuration.
    ///
    /// Disabled providers are still constructed so they can be listed.
    pub fn from_config(config: &Config, patterns: Arc<PatternSet>) -> Result<Self, ProviderError> {
        let providers = &config.providers;
        let mut manager = Self::new();

        manager.register(
            subdivx::NAME,
            providers.subdivx.enabled,
            Arc::new(SubdivxProvider::new(
                &providers.subdivx,
                &providers.subdivx_search,
                &config.http,
                config.debug,
                Arc::clone(&patterns),
            )?),
        );
        manager.register(
            opensubtitles::NAME,
            providers.opensubtitles.enabled,
            Arc::new(OpenSubtitlesProvider::new(
                &providers.opensubtitles,
                &config.http,
                config.debug,
                Arc::clone(&patterns),
            )?),
        );
        manager.register(
            subx::NAME,
            providers.subx.enabled,
            Arc::new(SubxProvider::new(&providers.subx, &config.http, config.debug, patterns)?),
        );

        Ok(manager)
    }

    /// Register (or replace) a provider under `key`.
    pub fn register(&mut self, key: impl Into<String>, enabled: bool, provider: Arc<dyn SubtitleProvider>) {
        let key = key.into();
        debug!(provider = %key, enabled, "Registered subtitle provider");
        self.handlers.insert(key, ProviderHandler { enabled, provider });
    }

    /// Every registered provider in key order.
    #[must_use]
    pub fn providers(&self) -> Vec<ProviderStatus> {
        self.handlers
            .iter()
            .map(|(name, handler)| ProviderStatus {
                name: name.clone(),
                enabled: handler.enabled,
            })
            .collect()
    }

    #[must_use]
    pub fn is_enabled(&self, key: &str) -> bool {
        self.handlers.get(key).is_some_and(|h| h.enabled)
    }

    fn selected(&self, provider_key: Option<&str>) -> Vec<(&str, Arc<dyn SubtitleProvider>)> {
        let key = provider_key.filter(|k| !k.is_empty());
        self.handlers
            .iter()
            .filter(|(name, handler)| handler.enabled && key.is_none_or(|k| k == name.as_str()))
            .map(|(name, handler)| (name.as_str(), Arc::clone(&handler.provider)))
            .collect()
    }

    /// Search one provider (`provider_key`) or every enabled provider.
    ///
    /// Never fails. An unknown or disabled key, a failing provider, and a
    /// cancelled context all contribute nothing to the result.
    #[tracing::instrument(
        name = "manager_search",
        skip_all,
        fields(provider = provider_key.unwrap_or_default(), query = %query, result_count = field::Empty)
    )]
    pub async fn search(
        &self,
        ctx: &ProviderContext,
        provider_key: Option<&str>,
        query: &str,
        filters: &PostFilters,
    ) -> Vec<Subtitle> {
        let selected = self.selected(provider_key);
        if selected.is_empty() {
            warn!(provider = provider_key.unwrap_or_default(), "No enabled provider selected for search");
            return Vec::new();
        }

        let tasks: Vec<_> = selected
            .into_iter()
            .map(|(name, provider)| {
                let span = info_span!("provider_search", provider = %name, result_count = field::Empty);
                let name = name.to_string();
                let ctx = ctx.clone();
                let query = query.to_string();
                async move {
                    let result = ctx
                        .run(async { Ok::<_, ProviderError>(provider.search(&ctx, &query).await) })
                        .await;
                    let subtitles = match result {
                        Ok(subtitles) => subtitles,
                        Err(e) => {
                            warn!(provider = %name, error = %e, "Provider search aborted");
                            Vec::new()
                        }
                    };
                    Span::current().record("result_count", subtitles.len());
                    subtitles
                }
                .instrument(span)
            })
            .collect();

        let merged: Vec<Subtitle> = join_isolated(tasks).await.into_iter().flatten().flatten().collect();
        let total = merged.len();

        let filter_span = info_span!("post_filter", input_count = total, result_count = field::Empty);
        let subtitles = filter_span.in_scope(|| filters.apply(merged));
        filter_span.record("result_count", subtitles.len());
        Span::current().record("result_count", subtitles.len());

        info!(total, retained = subtitles.len(), "Aggregate search completed");
        subtitles
    }

    /// Download `id` from exactly one provider.
    pub async fn download(
        &self,
        ctx: &ProviderContext,
        provider_key: &str,
        id: &str,
    ) -> Result<SubtitleDownload, ProviderError> {
        let handler = self
            .handlers
            .get(provider_key)
            .ok_or_else(|| ProviderError::UnknownProvider(provider_key.to_string()))?;
        if !handler.enabled {
            return Err(ProviderError::Disabled(provider_key.to_string()));
        }

        handler.provider.download(ctx, id).await
    }
}
