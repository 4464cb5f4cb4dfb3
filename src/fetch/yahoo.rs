use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::config::ProviderConfig;
use crate::error::{AppError, Context};

use super::decode::{parse_chart, parse_chart_error, parse_search, ChartData};
use super::request::{build_client, chart_request, search_request, PreparedRequest};
use super::{Candle, FetchResult, HistoryRequest, MarketDataSource, NewsFeed};

/// Yahoo Finance chart and search endpoints.
pub struct YahooClient {
    config: ProviderConfig,
    client: Client,
}

impl YahooClient {
    pub fn new(config: ProviderConfig) -> FetchResult<Self> {
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn fetch_chart(&self, symbol: &str, request: &HistoryRequest) -> FetchResult<ChartData> {
        let prepared = chart_request(&self.config, symbol, request);
        let body = self.get_text(&prepared, symbol).await?;
        parse_chart(&body, symbol)
    }

    async fn get_text(&self, prepared: &PreparedRequest, symbol: &str) -> FetchResult<String> {
        debug!("GET {} {:?}", prepared.url, prepared.query);

        let response = self
            .client
            .get(&prepared.url)
            .query(&prepared.query)
            .send()
            .await
            .with_context(|| format!("Request failed for {}", symbol))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body for {}", symbol))?;

        if !status.is_success() {
            // The chart endpoint explains 4xx responses in its JSON body.
            return Err(match parse_chart_error(&body) {
                Some(description) => AppError::provider(description),
                None => AppError::provider(format!(
                    "request for {} returned status {}",
                    symbol, status
                )),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl MarketDataSource for YahooClient {
    async fn history(&self, symbol: &str, request: &HistoryRequest) -> FetchResult<Vec<Candle>> {
        let chart = self.fetch_chart(symbol, request).await?;
        debug!("{} bars received for {}", chart.candles.len(), symbol);
        Ok(chart.candles)
    }

    async fn last_price(&self, symbol: &str) -> FetchResult<Option<f64>> {
        let chart = self
            .fetch_chart(symbol, &HistoryRequest::LATEST_DAY)
            .await?;
        Ok(chart.regular_market_price.filter(|price| price.is_finite()))
    }

    async fn news(&self, symbol: &str) -> FetchResult<NewsFeed> {
        let prepared = search_request(&self.config, symbol);
        let body = self.get_text(&prepared, symbol).await?;
        parse_search(&body, symbol)
    }
}
