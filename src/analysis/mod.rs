pub mod rsi;
pub mod sentiment;

pub use rsi::{latest_rsi, RsiStatus, RSI_NO_DATA, RSI_PERIOD};
pub use sentiment::{polarity, MarketMood, SentimentLabel};
