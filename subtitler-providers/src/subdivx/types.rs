//! Subdivx wire types

use serde::{Deserialize, Deserializer};

/// Anti-bot session pair returned by `inc/gt.php`.
///
/// Fetched fresh for every search and dropped afterwards.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionToken {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub cookie: String,
}

/// DataTables-style envelope used by `inc/ajax.php`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubdivxResponse<T> {
    /// Echo status; `"0"` means the session was rejected
    #[serde(rename = "sEcho", default, deserialize_with = "echo_as_string")]
    pub echo: String,
    #[serde(rename = "aaData", default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> SubdivxResponse<T> {
    /// Whether the echo field parses to zero.
    ///
    /// Non-numeric echo values count as accepted.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.echo.trim().parse::<i64>() == Ok(0)
    }
}

/// One search result row.
#[derive(Debug, Clone, Deserialize)]
pub struct SubdivxItem {
    pub id: u64,
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(default)]
    pub cds: u32,
    #[serde(rename = "descargas", default)]
    pub downloads: u64,
    #[serde(rename = "comentarios", default)]
    pub comments: u64,
}

/// One comment attached to a search result row.
#[derive(Debug, Clone, Deserialize)]
pub struct SubdivxComment {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "comentario", default)]
    pub comment: String,
    #[serde(default)]
    pub nick: String,
    #[serde(rename = "fecha_creacion", default)]
    pub created_at: String,
}

fn echo_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Echo {
        Text(String),
        Number(i64),
    }

    Ok(match Option::<Echo>::deserialize(deserializer)? {
        Some(Echo::Text(s)) => s,
        Some(Echo::Number(n)) => n.to_string(),
        None => String::new(),
    })
}
