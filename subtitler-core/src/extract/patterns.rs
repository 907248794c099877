//! Ordered pattern table for release-name attributes

use std::collections::HashMap;

use regex::Regex;

/// Attribute extracted from free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Group,
    Quality,
    Resolution,
    Duration,
    Year,
    Season,
    Episode,
}

const KNOWN_GROUPS: &str = "fgt|evo|yts|yts?\\.mx|yts\\.am|yifi|yify|MkvCage|NoMeRcY|STRiFE|SiGMA|LucidTV|CHD|sujaidr|SAPHiRE|LEGI0N|hd4u|rarbg|ViSiON|ETRG|JYK|iFT|anoXmous|Ganool|TGx|klaxxon|icebane|greenbud1969|flawl3ss|metcon|proper|ntb|cm8|tbs|sva|avs|mtb|ion10|sauron|phoenix|minx|mvgroup|amiable|sadece|gooz|lite|killers|memento|done|ExKinoRay|acool|starz|convoy|playnow|RedBlade|ntg|cmrg|cm|2hd|fty|haggis|Joy|dimension|0tv|fxg|kat|artsubs|horizon-artsub|horizon|axxo|diamond|asteroids|rargb|unit3d|afg|xlf|pulsar|bamboozle|ebp|trump|bulit|pahe|lol|tjhd|DeeJayAhmed|DeeJahAhmed|galaxy|aoc|flux|roen|silence|CiNEFiLE|wrd|rico|huzzah|RiSEHD|Subs-Team|iExTV|ROLLiT|CONDITION|CinemaniaHD|FraMeSToR|CtrlHD|ION265|ion|tepes|gossip|COLLECTiVE|nate_666";

/// Built-in table. Within a category, patterns are tried in order; every
/// pattern's first capture group is the extracted value.
fn builtin_table() -> Vec<(Category, String)> {
    vec![
        (Category::Group, format!(r"(?i)\b({KNOWN_GROUPS})\b")),
        // Scene suffix after a codec or audio token: x264-GROUP
        (
            Category::Group,
            r"(?i)(?:x26[45]|h\.?26[45]|hevc|xvid|divx|aac|ac3|dts)-([a-z0-9]+)\b".to_string(),
        ),
        (Category::Duration, r"\b(\d{1,2}:\d{2}:\d{2})\b".to_string()),
        (
            Category::Quality,
            r"(?i)\b((?:PPV\.)?[HP]DTV|(?:HD)?CAM|B[DR]Rip|(?:HD-?)?TS|(?:PPV )?WEB-?DL(?: DVDRip)?|HDRip|DVDRip|CamRip|W[EB]BRip|BluRay|DvDScr|telesync|hvec)\b".to_string(),
        ),
        (Category::Resolution, r"(?i)\b(\d{3,4}p)\b".to_string()),
        (Category::Year, r"\((\d{4})\)".to_string()),
        (Category::Year, r"\b((?:19|20)\d{2})\b".to_string()),
        (Category::Season, r"(?i)\bs(\d{1,2})\s?e\d{1,3}".to_string()),
        (Category::Season, r"(?i)\b(\d{1,2})x\d{2,3}\b".to_string()),
        (Category::Season, r"(?i)\b(?:season|temporada)[\s._-]?(\d{1,2})\b".to_string()),
        (Category::Season, r"(?i)\bs(\d{1,2})\b".to_string()),
        (Category::Episode, r"(?i)\bs\d{1,2}\s?e(\d{1,3})".to_string()),
        (Category::Episode, r"(?i)\b\d{1,2}x(\d{2,3})\b".to_string()),
        (Category::Episode, r"(?i)\b(?:episode|episodio|ep)[\s._-]?(\d{1,3})\b".to_string()),
        (Category::Episode, r"(?i)\be(\d{1,3})\b".to_string()),
    ]
}

/// Immutable, precompiled pattern table.
///
/// Built once at startup and shared by reference between providers.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: HashMap<Category, Vec<Regex>>,
}

impl PatternSet {
    /// Compile a table of `(category, pattern)` rows, keeping row order per category.
    pub fn from_table<S: AsRef<str>>(table: &[(Category, S)]) -> Result<Self, regex::Error> {
        let mut patterns: HashMap<Category, Vec<Regex>> = HashMap::new();
        for (category, pattern) in table {
            patterns.entry(*category).or_default().push(Regex::new(pattern.as_ref())?);
        }
        Ok(Self { patterns })
    }

    /// The built-in table.
    pub fn builtin() -> Result<Self, regex::Error> {
        Self::from_table(&builtin_table())
    }

    /// The built-in table with additional literal release group names.
    pub fn with_extra_groups<S: AsRef<str>>(groups: &[S]) -> Result<Self, regex::Error> {
        let mut table = builtin_table();
        let names: Vec<String> = groups
            .iter()
            .map(|g| g.as_ref().trim())
            .filter(|g| !g.is_empty())
            .map(regex::escape)
            .collect();
        if !names.is_empty() {
            table.push((Category::Group, format!(r"(?i)\b({})\b", names.join("|"))));
        }
        Self::from_table(&table)
    }

    fn patterns(&self, category: Category) -> &[Regex] {
        self.patterns.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every match of every pattern in the category, deduplicated
    /// case-insensitively, original casing of the first occurrence kept.
    #[must_use]
    pub fn find_all(&self, category: Category, text: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for re in self.patterns(category) {
            for caps in re.captures_iter(text) {
                if let Some(m) = caps.get(1) {
                    push_unique(&mut found, m.as_str());
                }
            }
        }
        found
    }

    /// First capture of the first pattern in the category that matches.
    #[must_use]
    pub fn find_first<'t>(&self, category: Category, text: &'t str) -> Option<&'t str> {
        self.patterns(category)
            .iter()
            .find_map(|re| re.captures(text).and_then(|caps| caps.get(1)))
            .map(|m| m.as_str())
    }

    /// First match of a scalar category parsed as a number, digits only.
    #[must_use]
    pub fn find_number(&self, category: Category, text: &str) -> Option<u32> {
        let raw = self.find_first(category, text)?;
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        digits.parse().ok()
    }
}

/// Append `value` unless an ASCII case-insensitive equal entry exists.
pub(crate) fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v.eq_ignore_ascii_case(value)) {
        values.push(value.to_string());
    }
}
