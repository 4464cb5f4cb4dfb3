use std::process::ExitCode;

use market_pulse::app::{init_logging, tech_report};

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    tech_report::run(std::env::args_os()).await
}
