// Provider Configuration Types

use serde::{Deserialize, Serialize};
use subtitler_providers::HttpOptions;

use crate::config::HttpConfig;

/// Per-provider settings, injected once at startup
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub enabled: bool,
    pub base_url: String,
    pub search_path: String,
    /// Empty means the HTTP client's default
    pub user_agent: String,
    pub api_key: String,
    pub username: String,
    pub password: String,
}

impl ProviderSettings {
    pub(crate) fn trim_credentials(&mut self) {
        for value in [&mut self.api_key, &mut self.username, &mut self.password] {
            let trimmed = value.trim();
            if trimmed.len() != value.len() {
                *value = trimmed.to_string();
            }
        }
    }

    /// HTTP client options for this provider.
    #[must_use]
    pub fn http_options(&self, http: &HttpConfig, debug: bool) -> HttpOptions {
        HttpOptions {
            user_agent: self.user_agent.clone(),
            connect_timeout: http.connect_timeout(),
            request_timeout: http.request_timeout(),
            debug,
        }
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const fn redact(value: &str) -> &'static str {
            if value.is_empty() {
                ""
            } else {
                "***"
            }
        }

        f.debug_struct("ProviderSettings")
            .field("enabled", &self.enabled)
            .field("base_url", &self.base_url)
            .field("search_path", &self.search_path)
            .field("user_agent", &self.user_agent)
            .field("api_key", &redact(&self.api_key))
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_trim_credentials() {
        let mut settings = ProviderSettings {
            api_key: " key\n".to_string(),
            username: "user".to_string(),
            password: "\tpass ".to_string(),
            ..ProviderSettings::default()
        };
        settings.trim_credentials();
        assert_eq!(settings.api_key, "key");
        assert_eq!(settings.username, "user");
        assert_eq!(settings.password, "pass");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let settings = ProviderSettings {
            api_key: "super-secret".to_string(),
            password: "hunter2".to_string(),
            ..ProviderSettings::default()
        };
        let debug = format!("{settings:?}");
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_http_options() {
        let settings = ProviderSettings {
            user_agent: "subtitlerApi v1.0.0".to_string(),
            ..ProviderSettings::default()
        };
        let options = settings.http_options(&HttpConfig::default(), true);
        assert_eq!(options.user_agent, "subtitlerApi v1.0.0");
        assert_eq!(options.request_timeout, Duration::from_secs(30));
        assert!(options.debug);
    }
}
