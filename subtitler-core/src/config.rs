use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::provider::ProviderSettings;

/// Problem reported by [`Config::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    /// An enabled provider lacks a credential it cannot work without
    #[error("providers.{provider}.{field} is required when enabled")]
    MissingCredential { provider: &'static str, field: &'static str },

    #[error("{0}")]
    Invalid(String),
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Verbose request/response logging in provider clients
    pub debug: bool,
    pub logging: LoggingConfig,
    pub http: HttpConfig,
    pub providers: ProvidersConfig,
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout_seconds: u64,
    pub request_timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: 10,
            request_timeout_seconds: 30,
        }
    }
}

impl HttpConfig {
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Upstream provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub subdivx: ProviderSettings,
    pub opensubtitles: ProviderSettings,
    pub subx: ProviderSettings,
    pub subdivx_search: SubdivxSearchConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            subdivx: ProviderSettings {
                enabled: false,
                base_url: "https://subdivx.com/".to_string(),
                search_path: "inc/ajax.php".to_string(),
                user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/129.0.0.0 Safari/537.36".to_string(),
                ..ProviderSettings::default()
            },
            opensubtitles: ProviderSettings {
                enabled: false,
                base_url: "https://api.opensubtitles.com/".to_string(),
                search_path: "api/v1/subtitles".to_string(),
                user_agent: "subtitlerApi v1.0.0".to_string(),
                ..ProviderSettings::default()
            },
            subx: ProviderSettings {
                enabled: true,
                base_url: "https://subx-api.duckdns.org/api".to_string(),
                search_path: "subtitles/search".to_string(),
                ..ProviderSettings::default()
            },
            subdivx_search: SubdivxSearchConfig::default(),
        }
    }
}

/// Subdivx session protocol tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubdivxSearchConfig {
    /// Deadline shared by all phases of one search
    pub deadline_seconds: u64,
    /// Total search submissions while the session is reported stale
    pub attempts: usize,
    pub retry_delay_ms: u64,
}

impl Default for SubdivxSearchConfig {
    fn default() -> Self {
        Self {
            deadline_seconds: 30,
            attempts: 6,
            retry_delay_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Release group names recognized in addition to the built-in list
    pub extra_groups: Vec<String>,
}

impl Config {
    /// Load configuration from multiple sources with priority:
    /// 1. Environment variables (highest priority)
    /// 2. Config file (if provided)
    /// 3. Defaults (lowest priority)
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        // Seed with serialized defaults so partially specified provider
        // sections keep their per-provider base URLs and paths.
        let mut builder = ConfigBuilder::builder().add_source(ConfigBuilder::try_from(&Self::default())?);

        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
            }
        }

        // Override with environment variables (SUBTITLER_PROVIDERS__SUBX__API_KEY, etc.)
        builder = builder.add_source(
            Environment::with_prefix("SUBTITLER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.providers.subdivx.trim_credentials();
        config.providers.opensubtitles.trim_credentials();
        config.providers.subx.trim_credentials();
        Ok(config)
    }

    /// Load from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from file path
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    /// Credentials missing from enabled providers.
    fn missing_credentials(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let os = &self.providers.opensubtitles;
        if os.enabled {
            for (field, value) in [("api_key", &os.api_key), ("username", &os.username), ("password", &os.password)] {
                if value.is_empty() {
                    issues.push(ConfigIssue::MissingCredential {
                        provider: "opensubtitles",
                        field,
                    });
                }
            }
        }
        if self.providers.subx.enabled && self.providers.subx.api_key.is_empty() {
            issues.push(ConfigIssue::MissingCredential {
                provider: "subx",
                field: "api_key",
            });
        }

        issues
    }

    /// Switch off every enabled provider that lacks a required credential.
    ///
    /// Returns the missing credentials so the caller can report them once
    /// logging is up.
    pub fn disable_incomplete_providers(&mut self) -> Vec<ConfigIssue> {
        let issues = self.missing_credentials();
        for issue in &issues {
            if let ConfigIssue::MissingCredential { provider, .. } = issue {
                match *provider {
                    "opensubtitles" => self.providers.opensubtitles.enabled = false,
                    "subx" => self.providers.subx.enabled = false,
                    _ => {}
                }
            }
        }
        issues
    }

    /// Check the loaded configuration, returning every problem found.
    pub fn validate(&self) -> Result<(), Vec<ConfigIssue>> {
        let mut errors = Vec::new();

        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            errors.push(ConfigIssue::Invalid(format!(
                "logging.format must be \"json\" or \"pretty\", got {:?}",
                self.logging.format
            )));
        }
        if self.http.request_timeout_seconds == 0 {
            errors.push(ConfigIssue::Invalid(
                "http.request_timeout_seconds must be greater than 0".to_string(),
            ));
        }

        let providers = &self.providers;
        for (key, settings) in [
            ("subdivx", &providers.subdivx),
            ("opensubtitles", &providers.opensubtitles),
            ("subx", &providers.subx),
        ] {
            if !settings.enabled {
                continue;
            }
            if url::Url::parse(&settings.base_url).is_err() {
                errors.push(ConfigIssue::Invalid(format!(
                    "providers.{key}.base_url is not a valid URL: {:?}",
                    settings.base_url
                )));
            }
        }

        errors.extend(self.missing_credentials());
        if providers.subdivx.enabled && providers.subdivx_search.attempts == 0 {
            errors.push(ConfigIssue::Invalid(
                "providers.subdivx_search.attempts must be at least 1".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
