use clap::{Parser, Subcommand};

use crate::services::DEFAULT_CANDLE_LIMIT;

/// Arguments of the `market-data` tool.
#[derive(Debug, Parser)]
#[command(name = "market-data")]
#[command(about = "Fetch quotes and OHLCV candles as JSON")]
#[command(version)]
pub struct MarketDataCli {
    #[command(subcommand)]
    pub command: MarketCommand,
}

#[derive(Debug, Subcommand)]
pub enum MarketCommand {
    /// Latest traded price for a symbol
    Quote {
        #[arg(long)]
        symbol: String,
    },

    /// OHLCV history, newest bars first trimmed to `--limit`
    Candles {
        #[arg(long)]
        symbol: String,

        /// Timeframe code: 1m, 5m, 15m, 1h, 1d, 1w, 1mo
        #[arg(long)]
        tf: String,

        /// Range code: 7d, 30d, 90d, 180d, 1y, 2y
        #[arg(long)]
        range: String,

        /// Maximum number of bars (capped at 2000)
        #[arg(long, default_value_t = DEFAULT_CANDLE_LIMIT)]
        limit: usize,

        /// Unix timestamp; returns the page of bars ending before it
        #[arg(long, allow_negative_numbers = true)]
        to: Option<String>,
    },
}

/// Arguments of the `tech-report` tool.
#[derive(Debug, Parser)]
#[command(name = "tech-report")]
#[command(about = "Print an RSI and news sentiment report for a ticker")]
#[command(version)]
pub struct ReportCli {
    /// Ticker symbol, e.g. AMD
    pub symbol: String,

    /// Anything after the symbol is accepted and ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub rest: Vec<String>,
}
