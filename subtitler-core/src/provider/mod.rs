// Subtitle Provider System
//
// Three-tier architecture:
//
// Tier 1: subtitler-providers (Pure provider HTTP clients)
//   - subdivx::SubdivxClient, opensubtitles::OpenSubtitlesClient, subx::SubxClient
//   - Wire types and protocol steps only, no SubtitleProvider dependency
//
// Tier 2: subtitler-core/provider (SubtitleProvider adapters)
//   - SubdivxProvider, OpenSubtitlesProvider, SubxProvider
//   - Map wire items into Subtitle records through the extraction engine
//
// Tier 3: subtitler-core/service/providers_manager
//   - ProvidersManager - keyed registry, concurrent fan-out, post-filters

// Core traits and types
pub mod config;
pub mod context;
pub mod download;
pub mod error;
pub mod traits;

// SubtitleProvider implementations (adapters)
pub mod opensubtitles;
pub mod subdivx;
pub mod subx;

pub use config::ProviderSettings;
pub use context::ProviderContext;
pub use download::SubtitleDownload;
pub use error::ProviderError;
pub use traits::SubtitleProvider;

// Re-export providers
pub use opensubtitles::OpenSubtitlesProvider;
pub use subdivx::SubdivxProvider;
pub use subx::SubxProvider;
