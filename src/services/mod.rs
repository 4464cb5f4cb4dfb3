pub mod candles;
pub mod quotes;
pub mod report;

#[cfg(test)]
pub(crate) mod testing;

pub use candles::{
    fetch_candles, CandlePage, CandleQuery, DEFAULT_CANDLE_LIMIT, MAX_CANDLE_LIMIT,
};
pub use quotes::{fetch_quote, Quote};
pub use report::{build_report, news_worker, rsi_worker, NewsDigest, TechnicalReport};
