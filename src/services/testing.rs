//! In-memory provider used by the service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::error::AppError;
use crate::fetch::{
    Candle, FetchResult, HistoryRequest, MarketDataSource, NewsArticle, NewsFeed,
};

#[derive(Default)]
pub struct StubSource {
    pub candles: Vec<Candle>,
    pub last_price: Option<f64>,
    pub news: NewsFeed,
    pub fail_with: Option<String>,
    pub news_fail_with: Option<String>,
    pub requests: Mutex<Vec<HistoryRequest>>,
}

impl StubSource {
    /// Daily bars one day apart starting 2024-01-02, one per close.
    pub fn with_closes(closes: &[f64]) -> Self {
        let candles = closes
            .iter()
            .enumerate()
            .map(|(idx, &close)| daily_candle(idx as i64, close))
            .collect();

        Self {
            candles,
            ..Self::default()
        }
    }

    pub fn history_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<HistoryRequest> {
        self.requests.lock().unwrap().last().copied()
    }
}

pub fn daily_candle(day: i64, close: f64) -> Candle {
    let open_2024_01_02 = 1_704_205_800;
    Candle {
        time: open_2024_01_02 + day * 86_400,
        open: close - 0.5,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1_000_000 + day as u64,
    }
}

pub fn article(title: &str, summary: &str) -> NewsArticle {
    NewsArticle {
        title: title.to_string(),
        summary: summary.to_string(),
        published: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single(),
    }
}

#[async_trait]
impl MarketDataSource for StubSource {
    async fn history(&self, _symbol: &str, request: &HistoryRequest) -> FetchResult<Vec<Candle>> {
        self.requests.lock().unwrap().push(*request);
        match &self.fail_with {
            Some(message) => Err(AppError::provider(message.clone())),
            None => Ok(self.candles.clone()),
        }
    }

    async fn last_price(&self, _symbol: &str) -> FetchResult<Option<f64>> {
        match &self.fail_with {
            Some(message) => Err(AppError::provider(message.clone())),
            None => Ok(self.last_price),
        }
    }

    async fn news(&self, _symbol: &str) -> FetchResult<NewsFeed> {
        match &self.news_fail_with {
            Some(message) => Err(AppError::provider(message.clone())),
            None => Ok(self.news.clone()),
        }
    }
}
