// Subtitle Provider Trait
//
// Uniform search/download capability implemented by every upstream adapter

use async_trait::async_trait;

use super::{ProviderContext, ProviderError, SubtitleDownload};
use crate::models::Subtitle;

/// Subtitle provider trait
///
/// Searches never fail: adapters log any failure and return an empty list so
/// one broken upstream cannot fail an aggregate search. Downloads target a
/// single provider and report every failure.
#[async_trait]
pub trait SubtitleProvider: Send + Sync {
    /// Provider key (e.g., "subdivx", "opensubtitles", "subx")
    fn name(&self) -> &'static str;

    /// Search subtitles matching free text.
    async fn search(&self, ctx: &ProviderContext, query: &str) -> Vec<Subtitle>;

    /// Open a subtitle file by the identifier the provider's search returned.
    async fn download(&self, ctx: &ProviderContext, id: &str) -> Result<SubtitleDownload, ProviderError>;
}
