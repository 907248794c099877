//! Second-pass filtering of merged search results

use serde::{Deserialize, Serialize};

use super::Subtitle;

/// Optional constraints applied after all providers have answered.
///
/// A missing (or empty) filter passes everything. A term filter retains a
/// subtitle when the term contains one of the subtitle's stored values as a
/// substring, so `"BluRay 1080p"` keeps a subtitle whose quality is
/// `["BluRay"]`, while `"Blu"` does not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostFilters {
    pub year: Option<u32>,
    pub group: Option<String>,
    pub quality: Option<String>,
    pub resolution: Option<String>,
}

impl PostFilters {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.year.unwrap_or(0) == 0
            && active(self.group.as_deref()).is_none()
            && active(self.quality.as_deref()).is_none()
            && active(self.resolution.as_deref()).is_none()
    }

    #[must_use]
    pub fn matches(&self, subtitle: &Subtitle) -> bool {
        if let Some(year) = self.year.filter(|y| *y > 0) {
            if subtitle.year != year {
                return false;
            }
        }

        [
            (self.group.as_deref(), &subtitle.group),
            (self.quality.as_deref(), &subtitle.quality),
            (self.resolution.as_deref(), &subtitle.resolution),
        ]
        .into_iter()
        .all(|(term, values)| match active(term) {
            Some(term) => term_contains_any(term, values),
            None => true,
        })
    }

    /// Keep only subtitles accepted by [`Self::matches`], preserving order.
    #[must_use]
    pub fn apply(&self, subtitles: Vec<Subtitle>) -> Vec<Subtitle> {
        if self.is_empty() {
            return subtitles;
        }
        subtitles.into_iter().filter(|s| self.matches(s)).collect()
    }
}

fn active(term: Option<&str>) -> Option<&str> {
    term.filter(|t| !t.is_empty())
}

fn term_contains_any(term: &str, values: &[String]) -> bool {
    values.iter().any(|value| term.contains(value.as_str()))
}
