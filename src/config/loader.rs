use std::{env, fs, path::Path};

use log::debug;

use crate::error::{Context, Result};

use super::{validator, ProviderConfig};

/// Path to an optional JSON file overriding the builtin provider settings.
pub const CONFIG_PATH_ENV: &str = "MARKET_PULSE_CONFIG";
pub const CHART_URL_ENV: &str = "MARKET_PULSE_CHART_URL";
pub const SEARCH_URL_ENV: &str = "MARKET_PULSE_SEARCH_URL";

/// Resolve the provider configuration from builtin defaults, the optional
/// config file and per-endpoint environment overrides, then validate it.
pub fn load_provider_config() -> Result<ProviderConfig> {
    let mut config = match env::var_os(CONFIG_PATH_ENV) {
        Some(path) => load_config_file(Path::new(&path))?,
        None => ProviderConfig::builtin(),
    };

    apply_env_overrides(&mut config, |key| env::var(key).ok());
    validator::validate_provider_config(&config)?;

    Ok(config)
}

/// Read a JSON config file. Missing keys fall back to the builtin values.
pub fn load_config_file(path: &Path) -> Result<ProviderConfig> {
    debug!("loading provider config from {}", path.display());

    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read provider config at {}", path.display()))?;

    let config: ProviderConfig = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse provider config at {}", path.display()))?;

    Ok(config)
}

fn apply_env_overrides<F>(config: &mut ProviderConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(CHART_URL_ENV).filter(|value| !value.trim().is_empty()) {
        config.chart_base_url = url.trim().to_string();
    }
    if let Some(url) = lookup(SEARCH_URL_ENV).filter(|value| !value.trim().is_empty()) {
        config.search_base_url = url.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn partial_file_keeps_builtin_defaults() {
        let path = env::temp_dir().join(format!("market-pulse-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "timeoutSecs": 3, "newsCount": 8 }"#).unwrap();

        let config = load_config_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.news_count, 8);
        assert_eq!(config.chart_base_url, ProviderConfig::builtin().chart_base_url);
    }

    #[test]
    fn rejects_malformed_file() {
        let path = env::temp_dir().join(format!("market-pulse-bad-{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();

        let err = load_config_file(&path).expect_err("malformed config should fail");
        fs::remove_file(&path).ok();

        assert!(err.to_string().contains("failed to parse provider config"));
    }

    #[test]
    fn env_overrides_replace_base_urls() {
        let vars = HashMap::from([
            (CHART_URL_ENV, " http://127.0.0.1:9000 ".to_string()),
            (SEARCH_URL_ENV, String::new()),
        ]);
        let mut config = ProviderConfig::builtin();

        apply_env_overrides(&mut config, |key| vars.get(key).cloned());

        assert_eq!(config.chart_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.search_base_url, ProviderConfig::builtin().search_base_url);
    }
}
