//! SubX REST API Client
//!
//! Bearer-token API. Item ids are opaque strings and are used verbatim to
//! address downloads.

mod client;
pub mod types;

pub use client::SubxClient;
pub use types::*;
