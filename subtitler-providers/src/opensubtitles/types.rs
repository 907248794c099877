//! OpenSubtitles API types

use serde::{Deserialize, Serialize};

/// Paged search envelope (`GET /api/v1/subtitles`).
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub data: Vec<SubtitleItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubtitleItem {
    pub id: String,
    #[serde(default)]
    pub attributes: SubtitleAttributes,
}

impl SubtitleItem {
    /// Identifier accepted by the download endpoint.
    ///
    /// The first attached file id when present, otherwise the numeric item id.
    #[must_use]
    pub fn file_id(&self) -> Option<u64> {
        self.attributes
            .files
            .first()
            .map(|f| f.file_id)
            .or_else(|| self.id.parse().ok())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubtitleAttributes {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub release: Option<String>,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default)]
    pub feature_details: FeatureDetails,
    #[serde(default)]
    pub files: Vec<SubtitleFile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureDetails {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubtitleFile {
    pub file_id: u64,
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct DownloadRequest {
    pub file_id: u64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DownloadResponse {
    #[serde(default)]
    pub link: String,
}
