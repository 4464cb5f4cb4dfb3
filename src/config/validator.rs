use crate::error::{AppError, Result};

use super::ProviderConfig;

/// Validate provider settings and surface every problem in a single error.
pub fn validate_provider_config(config: &ProviderConfig) -> Result<()> {
    let mut issues = Vec::new();

    validate_url("chartBaseUrl", &config.chart_base_url, &mut issues);
    validate_url("searchBaseUrl", &config.search_base_url, &mut issues);

    if config.timeout_secs == 0 {
        issues.push("timeoutSecs must be greater than zero".to_string());
    }
    if config.news_count == 0 {
        issues.push("newsCount must be greater than zero".to_string());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::message(format!(
            "provider config invalid:\n  - {}",
            issues.join("\n  - ")
        )))
    }
}

fn validate_url(field: &str, value: &str, issues: &mut Vec<String>) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        issues.push(format!("{field} must not be empty"));
    } else if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        issues.push(format!("{field} must be an http(s) URL, got `{trimmed}`"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_config_is_valid() {
        validate_provider_config(&ProviderConfig::builtin()).expect("builtin should be valid");
    }

    #[test]
    fn aggregates_all_issues() {
        let config = ProviderConfig {
            chart_base_url: String::new(),
            search_base_url: "ftp://example.com".to_string(),
            timeout_secs: 0,
            ..ProviderConfig::builtin()
        };

        let message = validate_provider_config(&config)
            .expect_err("validation should fail")
            .to_string();

        assert!(message.contains("chartBaseUrl must not be empty"), "{message}");
        assert!(message.contains("searchBaseUrl must be an http(s) URL"), "{message}");
        assert!(message.contains("timeoutSecs"), "{message}");
        assert!(!message.contains("newsCount"), "{message}");
    }
}
