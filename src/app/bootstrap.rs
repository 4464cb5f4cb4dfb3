use env_logger::Env;

use crate::config::ProviderConfig;
use crate::error::Result;
use crate::fetch::YahooClient;

/// Install the stderr logger. `RUST_LOG` overrides the default `warn` level.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .try_init();
}

/// Provider client built from the resolved configuration.
pub fn provider() -> Result<YahooClient> {
    let config = ProviderConfig::load()?;
    YahooClient::new(config)
}
