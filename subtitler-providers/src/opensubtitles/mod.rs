//! OpenSubtitles REST API Client
//!
//! Search is a single API-key authenticated GET. Downloads walk a three-step
//! chain: credential login for a bearer token, a signed link request for the
//! file id, then a plain GET of that link.

mod client;
pub mod types;

pub use client::OpenSubtitlesClient;
pub use types::*;
