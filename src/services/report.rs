use std::fmt;
use std::sync::Arc;

use futures::future;
use log::{debug, warn};

use crate::analysis::{
    latest_rsi, polarity, MarketMood, RsiStatus, SentimentLabel, RSI_NO_DATA, RSI_PERIOD,
};
use crate::error::Result;
use crate::fetch::{HistoryRequest, MarketDataSource, NewsArticle};
use crate::market::{RangeCode, Timeframe};

pub const MAX_HEADLINES: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Headline {
    pub date: String,
    pub title: String,
    pub score: f64,
    pub label: SentimentLabel,
}

impl fmt::Display for Headline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- [{}] {} [{}]", self.date, self.title, self.label)
    }
}

/// Outcome of the news worker. Failures are carried as text so the report
/// can always be printed.
#[derive(Debug, Clone, PartialEq)]
pub enum NewsDigest {
    Headlines { items: Vec<Headline>, sentiment: f64 },
    NoneFound,
    Failed(String),
}

impl NewsDigest {
    pub fn sentiment(&self) -> f64 {
        match self {
            NewsDigest::Headlines { sentiment, .. } => *sentiment,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TechnicalReport {
    pub symbol: String,
    pub rsi: f64,
    pub news: NewsDigest,
}

impl TechnicalReport {
    pub fn rsi_status(&self) -> RsiStatus {
        RsiStatus::classify(self.rsi)
    }

    pub fn mood(&self) -> MarketMood {
        MarketMood::classify(self.news.sentiment())
    }
}

impl fmt::Display for TechnicalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- TECHNICAL REPORT ({}) ---", self.symbol)?;
        writeln!(f, "RSI (14-day): {:.2} [{}]", self.rsi, self.rsi_status())?;
        writeln!(f, "SENTIMENT:    {:.2} [{}]", self.news.sentiment(), self.mood())?;
        writeln!(f, "{}", "-".repeat(30))?;
        writeln!(f, "TOP NEWS HEADLINES:")?;

        match &self.news {
            NewsDigest::Headlines { items, .. } => {
                for item in items {
                    writeln!(f, "{item}")?;
                }
                Ok(())
            }
            NewsDigest::NoneFound => writeln!(f, "No specific news found for {}.", self.symbol),
            NewsDigest::Failed(cause) => writeln!(f, "Error: {cause}"),
        }
    }
}

/// Run the RSI and news workers concurrently and combine their results once
/// both have finished. Each task owns its result; nothing is shared.
pub async fn build_report<S>(source: Arc<S>, symbol: &str) -> TechnicalReport
where
    S: MarketDataSource + 'static,
{
    let rsi_task = tokio::spawn({
        let source = Arc::clone(&source);
        let symbol = symbol.to_string();
        async move { rsi_worker(source.as_ref(), &symbol).await }
    });
    let news_task = tokio::spawn({
        let source = Arc::clone(&source);
        let symbol = symbol.to_string();
        async move { news_worker(source.as_ref(), &symbol).await }
    });

    let (rsi, news) = future::join(rsi_task, news_task).await;

    let rsi = rsi.unwrap_or_else(|err| {
        warn!("RSI worker for {} did not complete: {}", symbol, err);
        RSI_NO_DATA
    });
    let news = news.unwrap_or_else(|err| NewsDigest::Failed(err.to_string()));

    TechnicalReport {
        symbol: symbol.to_string(),
        rsi,
        news,
    }
}

/// 14-period RSI over one month of daily closes, or the no-data sentinel.
pub async fn rsi_worker<S>(source: &S, symbol: &str) -> f64
where
    S: MarketDataSource + ?Sized,
{
    match compute_rsi(source, symbol).await {
        Ok(Some(rsi)) => rsi,
        Ok(None) => {
            debug!("not enough history for RSI on {}", symbol);
            RSI_NO_DATA
        }
        Err(err) => {
            warn!("RSI fetch failed for {}: {}", symbol, err);
            RSI_NO_DATA
        }
    }
}

async fn compute_rsi<S>(source: &S, symbol: &str) -> Result<Option<f64>>
where
    S: MarketDataSource + ?Sized,
{
    let request = HistoryRequest::period(Timeframe::Day1, RangeCode::Days30);
    let candles = source.history(symbol, &request).await?;
    let closes: Vec<f64> = candles.iter().map(|candle| candle.close).collect();
    Ok(latest_rsi(&closes, RSI_PERIOD))
}

pub async fn news_worker<S>(source: &S, symbol: &str) -> NewsDigest
where
    S: MarketDataSource + ?Sized,
{
    let feed = match source.news(symbol).await {
        Ok(feed) => feed,
        Err(err) => {
            warn!("news fetch failed for {}: {}", symbol, err);
            return NewsDigest::Failed(err.to_string());
        }
    };

    let keywords = relevance_keywords(symbol, feed.short_name.as_deref());
    debug!("news keywords for {}: {:?}", symbol, keywords);

    let items: Vec<Headline> = feed
        .articles
        .iter()
        .filter(|article| is_relevant(article, &keywords))
        .take(MAX_HEADLINES)
        .map(|article| {
            let score = polarity(&article.title);
            Headline {
                date: article.publish_date(),
                title: article.title.clone(),
                score,
                label: SentimentLabel::classify(score),
            }
        })
        .collect();

    if items.is_empty() {
        return NewsDigest::NoneFound;
    }

    let sentiment = items.iter().map(|item| item.score).sum::<f64>() / items.len() as f64;
    NewsDigest::Headlines { items, sentiment }
}

/// Upper-cased ticker plus the first word of the company short name.
fn relevance_keywords(symbol: &str, short_name: Option<&str>) -> Vec<String> {
    let mut keywords = vec![symbol.to_uppercase()];
    if let Some(first) = short_name.and_then(|name| name.split_whitespace().next()) {
        let first = first.to_uppercase();
        if !keywords.contains(&first) {
            keywords.push(first);
        }
    }
    keywords
}

fn is_relevant(article: &NewsArticle, keywords: &[String]) -> bool {
    let text = format!("{} {}", article.title, article.summary).to_uppercase();
    keywords.iter().any(|keyword| text.contains(keyword.as_str()))
}
