use std::ffi::OsString;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::error::ErrorKind;
use clap::Parser;
use log::error;

use crate::cli::{MarketCommand, MarketDataCli};
use crate::error::Result;
use crate::fetch::MarketDataSource;
use crate::market::parse_pivot;
use crate::output::{failure_json, success_json};
use crate::services::{fetch_candles, fetch_quote, CandleQuery};
use crate::utils::normalize_symbol;

use super::bootstrap;

/// Parse arguments, run one command and print exactly one JSON document.
pub async fn run<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let (code, document) = respond(args, bootstrap::provider, Utc::now()).await;
    println!("{document}");
    code
}

/// Exit code and the single stdout document for one invocation.
async fn respond<I, T, S, F>(args: I, connect: F, now: DateTime<Utc>) -> (ExitCode, String)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    S: MarketDataSource,
    F: FnOnce() -> Result<S>,
{
    let cli = match MarketDataCli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => return failure(&clap_message(&err)),
    };

    let outcome = match connect() {
        Ok(source) => execute(cli.command, &source, now).await,
        Err(err) => Err(err),
    };

    match outcome {
        Ok(json) => (ExitCode::SUCCESS, json),
        Err(err) => failure(&err.to_string()),
    }
}

/// Execute a parsed command and render the success envelope.
pub async fn execute<S>(command: MarketCommand, source: &S, now: DateTime<Utc>) -> Result<String>
where
    S: MarketDataSource + ?Sized,
{
    match command {
        MarketCommand::Quote { symbol } => {
            let symbol = normalize_symbol(&symbol)?;
            let quote = fetch_quote(source, &symbol, now).await?;
            success_json(&quote)
        }
        MarketCommand::Candles {
            symbol,
            tf,
            range,
            limit,
            to,
        } => {
            let symbol = normalize_symbol(&symbol)?;
            let to = to.as_deref().map(parse_pivot).transpose()?;
            let query = CandleQuery::parse(&symbol, &tf, &range, limit, to)?;
            let page = fetch_candles(source, &query).await?;
            success_json(&page)
        }
    }
}

fn failure(message: &str) -> (ExitCode, String) {
    error!("{message}");
    (ExitCode::FAILURE, failure_json(message))
}

/// First paragraph of a clap error, without the usage block, on one line.
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .lines()
        .map(str::trim)
        .take_while(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim_start_matches("error: ")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::StubSource;
    use chrono::TimeZone;
    use serde_json::Value;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 5).unwrap()
    }

    fn candles_command(tf: &str, range: &str, limit: usize, to: Option<&str>) -> MarketCommand {
        MarketCommand::Candles {
            symbol: "amd".to_string(),
            tf: tf.to_string(),
            range: range.to_string(),
            limit,
            to: to.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn quote_command_renders_envelope() {
        let source = StubSource {
            last_price: Some(99.5),
            ..StubSource::default()
        };
        let command = MarketCommand::Quote {
            symbol: " amd".to_string(),
        };

        let json = execute(command, &source, now()).await.unwrap();

        assert_eq!(
            json,
            r#"{"ok":true,"symbol":"AMD","price":99.5,"timestampUtc":"2024-05-01T14:30:05Z"}"#
        );
    }

    #[tokio::test]
    async fn candles_command_renders_page() {
        let closes: Vec<f64> = (0..8).map(|i| 10.0 + i as f64).collect();
        let source = StubSource::with_closes(&closes);

        let json = execute(candles_command("1d", "30d", 3, None), &source, now())
            .await
            .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["ok"], true);
        assert_eq!(value["symbol"], "AMD");
        assert_eq!(value["tf"], "1d");
        let candles = value["candles"].as_array().unwrap();
        assert_eq!(candles.len(), 3);
        assert_eq!(value["nextTo"], candles[0]["time"]);
        assert_eq!(candles[2]["close"], 17.0);
        assert!(candles[0]["volume"].is_u64());
    }

    #[tokio::test]
    async fn invalid_codes_fail_without_calling_provider() {
        let source = StubSource::with_closes(&[1.0, 2.0]);

        let err = execute(candles_command("3m", "30d", 10, None), &source, now())
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Invalid timeframe '3m'. Allowed: 1m, 5m, 15m, 1h, 1d, 1w, 1mo"
        );
        assert_eq!(source.history_calls(), 0);
    }

    #[tokio::test]
    async fn rejects_malformed_pivot() {
        let source = StubSource::with_closes(&[1.0, 2.0]);

        let err = execute(candles_command("1d", "30d", 10, Some("soon")), &source, now())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Invalid 'to' timestamp 'soon'"));
    }

    async fn respond_with(args: &[&str], source: StubSource) -> (ExitCode, Value) {
        let (code, document) = respond(args.iter().copied(), || Ok(source), now()).await;
        assert!(!document.contains('\n'), "{document}");
        (code, serde_json::from_str(&document).unwrap())
    }

    #[tokio::test]
    async fn invalid_timeframe_exits_with_failure_envelope() {
        let args = [
            "market-data", "candles", "--symbol", "AMD", "--tf", "4h", "--range", "30d",
        ];

        let (code, value) = respond_with(&args, StubSource::with_closes(&[1.0, 2.0])).await;

        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(value["ok"], false);
        assert_eq!(
            value["error"],
            "Invalid timeframe '4h'. Allowed: 1m, 5m, 15m, 1h, 1d, 1w, 1mo"
        );
    }

    #[tokio::test]
    async fn argument_errors_exit_with_failure_envelope() {
        let (code, value) = respond_with(&["market-data", "quote"], StubSource::default()).await;

        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(value["ok"], false);
        assert!(value["error"].as_str().unwrap().contains("--symbol"), "{value}");
    }

    #[tokio::test]
    async fn out_of_range_pivot_exits_with_failure_envelope() {
        let args = [
            "market-data", "candles", "--symbol", "AMD", "--tf", "1d", "--range", "7d",
            "--to", "-8334601228800",
        ];

        let (code, value) = respond_with(&args, StubSource::with_closes(&[1.0, 2.0])).await;

        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(value["ok"], false);
    }

    #[tokio::test]
    async fn successful_quote_exits_cleanly() {
        let source = StubSource {
            last_price: Some(12.5),
            ..StubSource::default()
        };

        let (code, value) =
            respond_with(&["market-data", "quote", "--symbol", "amd"], source).await;

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(value["ok"], true);
        assert_eq!(value["price"], 12.5);
    }

    #[test]
    fn clap_errors_collapse_to_one_line() {
        let err = MarketDataCli::try_parse_from(["market-data", "quote"]).unwrap_err();
        let message = clap_message(&err);

        assert!(!message.contains('\n'));
        assert!(!message.starts_with("error:"));
        assert!(message.contains("--symbol"), "{message}");
    }
}
