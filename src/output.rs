//! JSON envelopes written to stdout by the market data tool.

use serde::Serialize;
use serde_json::json;

use crate::error::Result;

#[derive(Serialize)]
struct Success<'a, T> {
    ok: bool,
    #[serde(flatten)]
    body: &'a T,
}

/// `{"ok":true, ...body fields}` as a single line.
pub fn success_json<T: Serialize>(body: &T) -> Result<String> {
    Ok(serde_json::to_string(&Success { ok: true, body })?)
}

/// `{"ok":false,"error":"..."}` as a single line.
pub fn failure_json(message: &str) -> String {
    json!({ "ok": false, "error": message }).to_string()
}
