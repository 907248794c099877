//! Subdivx Provider Client
//!
//! Pure HTTP client for the Subdivx website. The site has no public API, so
//! every search walks a session protocol: version discovery on the landing
//! page, anti-bot token acquisition, then a form submission that is retried
//! while the site reports a stale session.
//!
//! # Example
//!
//! ```no_run
//! use subtitler_providers::{http::HttpOptions, subdivx::SubdivxClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SubdivxClient::new("https://subdivx.com/", "inc/ajax.php", &HttpOptions::default())?;
//! let version = client.version().await?;
//! let session = client.token().await?;
//! let results = client.search(&version, &session, "dune").await?;
//! # Ok(())
//! # }
//! ```

mod client;
pub mod types;

pub use client::{parse_version, SearchRetry, SubdivxClient};
pub use types::*;
