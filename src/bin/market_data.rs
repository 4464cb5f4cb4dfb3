use std::process::ExitCode;

use market_pulse::app::{init_logging, market_data};

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    market_data::run(std::env::args_os()).await
}
