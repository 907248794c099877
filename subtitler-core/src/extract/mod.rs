//! Metadata Extraction Engine
//!
//! Maps free-text titles and release descriptions to structured attributes
//! with an ordered table of regular expressions. Matching is
//! case-insensitive and values keep the casing found in the input.
//!
//! Extraction never sanitizes; callers pass text through [`sanitize`] first.

mod patterns;
mod sanitize;

pub use patterns::{Category, PatternSet};
pub use sanitize::sanitize;

use crate::models::ContentKind;

/// Scalar attributes read from a title. Zero means not found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TitleInfo {
    pub kind: ContentKind,
    pub year: u32,
    pub season: u32,
    pub episode: u32,
}

/// Set-valued release attributes, deduplicated case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub group: Vec<String>,
    pub quality: Vec<String>,
    pub resolution: Vec<String>,
    pub duration: Vec<String>,
}

impl ReleaseInfo {
    /// Union `other` into `self`, keeping existing entries first.
    pub fn merge(&mut self, other: &Self) {
        for (into, from) in [
            (&mut self.group, &other.group),
            (&mut self.quality, &other.quality),
            (&mut self.resolution, &other.resolution),
            (&mut self.duration, &other.duration),
        ] {
            for value in from {
                patterns::push_unique(into, value);
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.group.is_empty() && self.quality.is_empty() && self.resolution.is_empty() && self.duration.is_empty()
    }
}

impl PatternSet {
    /// Content type, year, season and episode of a title.
    ///
    /// Any season or episode marker classifies the text as a serie.
    #[must_use]
    pub fn title_info(&self, text: &str) -> TitleInfo {
        let season = self.find_number(Category::Season, text);
        let episode = self.find_number(Category::Episode, text);
        let kind = if season.is_some() || episode.is_some() {
            ContentKind::Serie
        } else {
            ContentKind::Movie
        };

        TitleInfo {
            kind,
            year: self.find_number(Category::Year, text).unwrap_or(0),
            season: season.unwrap_or(0),
            episode: episode.unwrap_or(0),
        }
    }

    /// Group, quality, resolution and duration hits in a release description.
    #[must_use]
    pub fn release_info(&self, text: &str) -> ReleaseInfo {
        ReleaseInfo {
            group: self.find_all(Category::Group, text),
            quality: self.find_all(Category::Quality, text),
            resolution: self.find_all(Category::Resolution, text),
            duration: self.find_all(Category::Duration, text),
        }
    }
}
