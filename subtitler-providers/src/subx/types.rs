//! SubX API types

use serde::Deserialize;

/// Search envelope (`GET /subtitles/search`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SubxItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubxItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}
