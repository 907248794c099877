// Subtitler Provider Clients
//
// Pure HTTP clients for the upstream subtitle sources. These clients know
// nothing about the SubtitleProvider trait or the shared Subtitle model and
// can be used standalone.
//
// Architecture:
// - subtitler-providers: Pure HTTP clients (Subdivx, OpenSubtitles, SubX)
// - subtitler-core/provider: SubtitleProvider trait implementations (adapters calling these clients)
// - subtitler-core/service: ProvidersManager for fan-out search and download dispatch

// Shared error types
pub mod error;

// Client construction and response metadata helpers
pub mod http;

// HTTP clients
pub mod opensubtitles;
pub mod subdivx;
pub mod subx;

// Re-export client types for convenience
pub use error::ProviderClientError;
pub use http::HttpOptions;
pub use opensubtitles::OpenSubtitlesClient;
pub use subdivx::SubdivxClient;
pub use subx::SubxClient;
