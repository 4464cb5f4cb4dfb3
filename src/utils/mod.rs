pub mod text;
pub mod time;

pub use text::normalize_symbol;
pub use time::format_utc_iso;
