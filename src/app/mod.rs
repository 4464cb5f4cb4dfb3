pub mod bootstrap;
pub mod market_data;
pub mod tech_report;

pub use bootstrap::init_logging;
