use async_trait::async_trait;

use crate::error::Result;
use crate::market::{HistoryWindow, RangeCode, Timeframe};

pub mod decode;
pub mod history;
pub mod news;
pub mod request;
pub mod yahoo;

pub use history::{Candle, HistoryRequest, HistorySpan};
pub use news::{NewsArticle, NewsFeed};
pub use yahoo::YahooClient;

pub type FetchResult<T> = Result<T>;

/// Read-only view of the hosted market-data provider.
///
/// Every call is attempted exactly once; implementations must not retry.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// OHLCV bars ascending by time. An unknown symbol may yield an empty list.
    async fn history(&self, symbol: &str, request: &HistoryRequest) -> FetchResult<Vec<Candle>>;

    /// Real-time price field, `None` when the provider does not publish one.
    async fn last_price(&self, symbol: &str) -> FetchResult<Option<f64>>;

    /// Recent news items together with the company short name.
    async fn news(&self, symbol: &str) -> FetchResult<NewsFeed>;
}

impl HistoryRequest {
    /// Daily bars for the latest trading day.
    pub const LATEST_DAY: HistoryRequest = HistoryRequest {
        interval: "1d",
        span: HistorySpan::Period("1d"),
    };

    pub fn period(timeframe: Timeframe, range: RangeCode) -> Self {
        Self {
            interval: timeframe.provider_interval(),
            span: HistorySpan::Period(range.provider_period()),
        }
    }

    pub fn window(timeframe: Timeframe, window: HistoryWindow) -> Self {
        Self {
            interval: timeframe.provider_interval(),
            span: HistorySpan::Window(window),
        }
    }
}
