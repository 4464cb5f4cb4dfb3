use crate::error::{AppError, Result};

/// Trim and upper-case a ticker supplied on the command line.
pub fn normalize_symbol(raw: &str) -> Result<String> {
    let symbol = raw.trim().to_uppercase();

    if symbol.is_empty() {
        return Err(AppError::message("symbol must not be empty"));
    }
    if symbol.chars().any(char::is_whitespace) {
        return Err(AppError::message(format!(
            "symbol must not contain whitespace: '{}'",
            raw.trim()
        )));
    }

    Ok(symbol)
}
