use std::ffi::OsString;
use std::process::ExitCode;
use std::sync::Arc;

use clap::error::ErrorKind;
use clap::Parser;
use log::info;

use crate::cli::ReportCli;
use crate::services::build_report;
use crate::utils::normalize_symbol;

use super::bootstrap;

/// Parse the ticker, run both workers and print the text report.
pub async fn run<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match ReportCli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::MissingRequiredArgument => {
            println!("Error: No symbol provided.");
            return ExitCode::FAILURE;
        }
        Err(err) => err.exit(),
    };

    let symbol = match normalize_symbol(&cli.symbol) {
        Ok(symbol) => symbol,
        Err(err) => {
            println!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let source = match bootstrap::provider() {
        Ok(source) => Arc::new(source),
        Err(err) => {
            println!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!("building technical report for {}", symbol);
    let report = build_report(source, &symbol).await;
    print!("{report}");

    ExitCode::SUCCESS
}
