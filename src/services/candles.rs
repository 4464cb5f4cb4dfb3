use log::{debug, info};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::fetch::{Candle, HistoryRequest, MarketDataSource};
use crate::market::{HistoryWindow, RangeCode, Timeframe};

pub const MAX_CANDLE_LIMIT: usize = 2000;
pub const DEFAULT_CANDLE_LIMIT: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandleQuery {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub range: RangeCode,
    pub limit: usize,
    /// Pivot timestamp; when set only bars strictly older than it are returned.
    pub to: Option<i64>,
}

impl CandleQuery {
    /// Validate raw CLI codes; fails before any provider call is made.
    pub fn parse(
        symbol: &str,
        tf: &str,
        range: &str,
        limit: usize,
        to: Option<i64>,
    ) -> Result<Self> {
        let timeframe: Timeframe = tf.parse()?;
        let range: RangeCode = range.parse()?;

        if limit == 0 {
            return Err(AppError::message("limit must be at least 1"));
        }

        Ok(Self {
            symbol: symbol.to_string(),
            timeframe,
            range,
            limit: limit.min(MAX_CANDLE_LIMIT),
            to,
        })
    }

    fn history_request(&self) -> Result<HistoryRequest> {
        let request = match self.to {
            Some(pivot) => {
                let window = HistoryWindow::ending_at(pivot, self.range)?;
                HistoryRequest::window(self.timeframe, window)
            }
            None => HistoryRequest::period(self.timeframe, self.range),
        };
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandlePage {
    pub symbol: String,
    pub tf: String,
    pub candles: Vec<Candle>,
    /// Pass back as `to` to fetch the next older page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_to: Option<i64>,
}

pub async fn fetch_candles<S>(source: &S, query: &CandleQuery) -> Result<CandlePage>
where
    S: MarketDataSource + ?Sized,
{
    let request = query.history_request()?;
    debug!("candle request for {}: {:?}", query.symbol, request);

    let mut candles = source
        .history(&query.symbol, &request)
        .await
        .map_err(|err| {
            AppError::message(format!("Candle fetch failed for {}: {}", query.symbol, err))
        })?;

    if let Some(pivot) = query.to {
        candles.retain(|candle| candle.time < pivot);
    }

    if candles.is_empty() {
        return Err(AppError::message(format!(
            "No candle data returned for {} tf={} range={}",
            query.symbol, query.timeframe, query.range
        )));
    }

    if candles.len() > query.limit {
        let excess = candles.len() - query.limit;
        candles.drain(..excess);
    }

    let candles: Vec<Candle> = candles.iter().map(Candle::rounded).collect();
    let next_to = candles.first().map(|candle| candle.time);
    info!("{} candles for {} ({})", candles.len(), query.symbol, query.timeframe);

    Ok(CandlePage {
        symbol: query.symbol.clone(),
        tf: query.timeframe.to_string(),
        candles,
        next_to,
    })
}
