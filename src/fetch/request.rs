use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;

use crate::config::ProviderConfig;
use crate::error::Context;

use super::{FetchResult, HistoryRequest, HistorySpan};

const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub url: String,
    pub query: Vec<(&'static str, String)>,
}

pub fn build_client(config: &ProviderConfig) -> FetchResult<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.user_agent)
            .with_context(|| format!("Invalid user agent: {}", config.user_agent))?,
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .default_headers(headers)
        .build()
        .context("Failed to construct provider HTTP client")?;

    Ok(client)
}

pub fn chart_request(
    config: &ProviderConfig,
    symbol: &str,
    request: &HistoryRequest,
) -> PreparedRequest {
    let mut query = vec![("interval", request.interval.to_string())];

    match request.span {
        HistorySpan::Period(period) => query.push(("range", period.to_string())),
        HistorySpan::Window(window) => {
            query.push(("period1", window.start.timestamp().to_string()));
            query.push(("period2", window.end.timestamp().to_string()));
        }
    }
    query.push(("includePrePost", "false".to_string()));

    PreparedRequest {
        url: join_url(&config.chart_base_url, &format!("v8/finance/chart/{symbol}")),
        query,
    }
}

pub fn search_request(config: &ProviderConfig, symbol: &str) -> PreparedRequest {
    PreparedRequest {
        url: join_url(&config.search_base_url, "v1/finance/search"),
        query: vec![
            ("q", symbol.to_string()),
            ("quotesCount", "5".to_string()),
            ("newsCount", config.news_count.to_string()),
        ],
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}
