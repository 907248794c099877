pub mod bootstrap;
pub mod config;
pub mod extract;
pub mod fanout;
pub mod logging;
pub mod models;
pub mod provider;
pub mod service;

pub use config::{Config, ConfigIssue};
pub use extract::PatternSet;
pub use models::{PostFilters, Subtitle};
pub use provider::{ProviderContext, ProviderError, SubtitleDownload};
pub use service::ProvidersManager;
