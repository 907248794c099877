//! Normalized subtitle search result

use serde::{Deserialize, Serialize};

use crate::extract::{ReleaseInfo, TitleInfo};

/// Content classification derived from title markers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    Movie,
    Serie,
}

impl ContentKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Serie => "serie",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One subtitle found by a provider.
///
/// Built per request and never stored. `id` is only unique within one
/// provider's batch; `provider` disambiguates across providers. Zero in
/// `year`, `season` or `episode` means unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtitle {
    pub provider: String,
    pub id: u64,
    /// Native identifier for providers whose wire id is not numeric
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub title: String,
    pub description: String,
    pub language: String,
    pub group: Vec<String>,
    pub quality: Vec<String>,
    pub resolution: Vec<String>,
    pub duration: Vec<String>,
    pub year: u32,
    pub season: u32,
    pub episode: u32,
}

impl Subtitle {
    #[must_use]
    pub fn new(provider: impl Into<String>, id: u64) -> Self {
        Self {
            provider: provider.into(),
            id,
            ..Self::default()
        }
    }

    /// Copy type, year, season and episode from title extraction.
    #[must_use]
    pub fn with_title_info(mut self, info: &TitleInfo) -> Self {
        self.kind = info.kind;
        self.year = info.year;
        self.season = info.season;
        self.episode = info.episode;
        self
    }

    /// Union release attributes into the subtitle's collections.
    pub fn merge_release(&mut self, info: &ReleaseInfo) {
        let mut current = ReleaseInfo {
            group: std::mem::take(&mut self.group),
            quality: std::mem::take(&mut self.quality),
            resolution: std::mem::take(&mut self.resolution),
            duration: std::mem::take(&mut self.duration),
        };
        current.merge(info);
        self.group = current.group;
        self.quality = current.quality;
        self.resolution = current.resolution;
        self.duration = current.duration;
    }
}
