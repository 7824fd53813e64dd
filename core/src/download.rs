//! Locating the download URL in a download-token response.
//!
//! The token endpoint answers with the usual `{code, message, data}`
//! envelope, but nothing about it is enforced. The lookup is lenient: use
//! `data` when it holds something, otherwise the payload itself, and accept
//! only a non-empty string `downloadUrl`. Anything else ends the chain
//! without an error.

use serde_json::Value;

pub fn extract_download_url(payload: &Value) -> Option<&str> {
    let envelope = payload.as_object()?;
    let scope = match envelope.get("data") {
        Some(data) if is_truthy(data) => data,
        _ => payload,
    };
    scope
        .as_object()?
        .get("downloadUrl")?
        .as_str()
        .filter(|url| !url.is_empty())
}

/// The download URL appended to `base_url` verbatim, whatever its shape.
pub fn download_target(base_url: &str, download_url: &str) -> String {
    format!("{base_url}{download_url}")
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
