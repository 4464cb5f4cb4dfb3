use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::fetch::history::round4;
use crate::fetch::{HistoryRequest, MarketDataSource};
use crate::utils::format_utc_iso;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub timestamp_utc: String,
}

/// Latest traded price: the provider's real-time field first, the most recent
/// daily close otherwise.
pub async fn fetch_quote<S>(source: &S, symbol: &str, now: DateTime<Utc>) -> Result<Quote>
where
    S: MarketDataSource + ?Sized,
{
    let price = resolve_price(source, symbol)
        .await
        .map_err(|err| {
            AppError::message(format!("Quote fetch failed for {}: {}", symbol, err))
        })?
        .ok_or_else(|| AppError::message(format!("No quote data found for {}", symbol)))?;

    Ok(Quote {
        symbol: symbol.to_string(),
        price: round4(price),
        timestamp_utc: format_utc_iso(now),
    })
}

async fn resolve_price<S>(source: &S, symbol: &str) -> Result<Option<f64>>
where
    S: MarketDataSource + ?Sized,
{
    if let Some(price) = source.last_price(symbol).await? {
        debug!("real-time price for {}: {}", symbol, price);
        return Ok(Some(price));
    }

    info!("no real-time price for {}, falling back to daily close", symbol);
    let candles = source.history(symbol, &HistoryRequest::LATEST_DAY).await?;

    Ok(candles.last().map(|candle| candle.close))
}
