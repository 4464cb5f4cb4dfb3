use serde::Serialize;

use crate::market::HistoryWindow;

/// One OHLCV bar; `time` is the bar's open in unix seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Candle {
    /// Copy with price fields rounded to 4 decimal places.
    pub fn rounded(&self) -> Self {
        Self {
            open: round4(self.open),
            high: round4(self.high),
            low: round4(self.low),
            close: round4(self.close),
            ..self.clone()
        }
    }
}

pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistorySpan {
    /// Provider-native period such as `1mo` or `6mo`, ending now.
    Period(&'static str),
    Window(HistoryWindow),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryRequest {
    pub interval: &'static str,
    pub span: HistorySpan,
}
