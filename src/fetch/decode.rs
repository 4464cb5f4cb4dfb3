use chrono::{TimeZone, Utc};
use serde::Deserialize;

use crate::error::{AppError, Context};

use super::{Candle, FetchResult, NewsArticle, NewsFeed};

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ProviderErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Decoded chart payload: the fast price field plus every complete bar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub regular_market_price: Option<f64>,
    pub candles: Vec<Candle>,
}

pub fn parse_chart(body: &str, symbol: &str) -> FetchResult<ChartData> {
    let envelope: ChartEnvelope = serde_json::from_str(body)
        .with_context(|| format!("Failed to parse chart JSON for {}", symbol))?;

    if let Some(error) = envelope.chart.error {
        return Err(AppError::provider(describe_error(error)));
    }

    let Some(result) = envelope.chart.result.and_then(|results| results.into_iter().next())
    else {
        return Ok(ChartData::default());
    };

    let series = result.indicators.quote.into_iter().next().unwrap_or_default();
    let mut candles = Vec::with_capacity(result.timestamp.len());

    for (idx, &time) in result.timestamp.iter().enumerate() {
        // Rows with a missing price are padding the provider emits for halted sessions.
        let (Some(open), Some(high), Some(low), Some(close)) = (
            at(&series.open, idx),
            at(&series.high, idx),
            at(&series.low, idx),
            at(&series.close, idx),
        ) else {
            continue;
        };

        let volume = at(&series.volume, idx)
            .filter(|v| v.is_finite() && *v > 0.0)
            .map(|v| v as u64)
            .unwrap_or(0);

        candles.push(Candle {
            time,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    candles.sort_by_key(|candle| candle.time);

    Ok(ChartData {
        regular_market_price: result.meta.regular_market_price,
        candles,
    })
}

fn at(column: &[Option<f64>], idx: usize) -> Option<f64> {
    column.get(idx).copied().flatten()
}

/// Extract a provider error description from a non-success body, if it has one.
pub fn parse_chart_error(body: &str) -> Option<String> {
    let envelope: ChartEnvelope = serde_json::from_str(body).ok()?;
    envelope.chart.error.map(describe_error)
}

fn describe_error(error: ProviderErrorBody) -> String {
    match (error.code, error.description) {
        (Some(code), Some(description)) => format!("{code}: {description}"),
        (None, Some(description)) => description,
        (Some(code), None) => code,
        (None, None) => "unknown provider error".to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    quotes: Vec<SearchQuote>,
    #[serde(default)]
    news: Vec<SearchNews>,
}

#[derive(Debug, Deserialize)]
struct SearchQuote {
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    shortname: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchNews {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    provider_publish_time: Option<i64>,
}

pub fn parse_search(body: &str, symbol: &str) -> FetchResult<NewsFeed> {
    let envelope: SearchEnvelope = serde_json::from_str(body)
        .with_context(|| format!("Failed to parse news JSON for {}", symbol))?;

    let short_name = envelope
        .quotes
        .iter()
        .find(|quote| quote.symbol.eq_ignore_ascii_case(symbol))
        .and_then(|quote| quote.shortname.clone())
        .filter(|name| !name.trim().is_empty());

    let articles = envelope
        .news
        .into_iter()
        .map(|item| NewsArticle {
            title: item.title.unwrap_or_else(|| "No Title".to_string()),
            summary: item.summary.unwrap_or_default(),
            published: item
                .provider_publish_time
                .and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
        })
        .collect();

    Ok(NewsFeed {
        short_name,
        articles,
    })
}
