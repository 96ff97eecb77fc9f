use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub version: u32,
    pub backend: BackendConfig,
    pub search: SearchConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: Url,
    pub request_timeout_secs: u64,
    /// Retry a gateway-timeout response once before surfacing it.
    pub retry_gateway_timeout: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub results_per_page: u64,
    pub default_min_relevance: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub debounce_ms: u64,
    /// Keep session state (filters, original query) across restarts.
    pub persist_session: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            backend: BackendConfig {
                base_url: Url::parse("http://localhost:8000").expect("static url"),
                request_timeout_secs: 30,
                retry_gateway_timeout: true,
            },
            search: SearchConfig {
                results_per_page: 25,
                default_min_relevance: 10,
            },
            ui: UiConfig {
                debounce_ms: 300,
                persist_session: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_dashboard() {
        let config = AppConfig::default();
        assert_eq!(config.search.results_per_page, 25);
        assert_eq!(config.search.default_min_relevance, 10);
        assert_eq!(config.ui.debounce_ms, 300);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = AppConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.backend.base_url, config.backend.base_url);
        assert_eq!(parsed.search.results_per_page, 25);
    }
}
