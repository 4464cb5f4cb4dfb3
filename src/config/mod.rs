use serde::Deserialize;

pub mod loader;
pub mod validator;

pub use loader::{load_provider_config, CHART_URL_ENV, CONFIG_PATH_ENV, SEARCH_URL_ENV};
pub use validator::validate_provider_config;

const DEFAULT_CHART_BASE_URL: &str = "https://query1.finance.yahoo.com";
const DEFAULT_SEARCH_BASE_URL: &str = "https://query2.finance.yahoo.com";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_NEWS_COUNT: usize = 20;

/// Connection settings for the hosted market-data provider.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderConfig {
    pub chart_base_url: String,
    pub search_base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub news_count: usize,
}

impl ProviderConfig {
    pub fn builtin() -> Self {
        Self {
            chart_base_url: DEFAULT_CHART_BASE_URL.to_string(),
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            news_count: DEFAULT_NEWS_COUNT,
        }
    }

    /// Same settings pointed at a single base URL for both endpoints.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            chart_base_url: base_url.clone(),
            search_base_url: base_url,
            ..Self::builtin()
        }
    }

    /// Builtin settings, overlaid with the optional JSON file and env overrides.
    pub fn load() -> crate::error::Result<Self> {
        load_provider_config()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
