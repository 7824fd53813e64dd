//! Turning response bodies into report text.
//!
//! JSON goes through `serde_json`'s pretty printer (2-space indent, UTF-8
//! kept literal). Anything else is shown as a character-bounded preview.

use serde_json::Value;

use crate::http::HttpResponse;

/// Maximum number of characters of a non-JSON body shown in the report.
pub const TEXT_PREVIEW_LIMIT: usize = 1000;

/// Appended to a preview that was cut short.
pub const ELLIPSIS: &str = "...";

pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// First `limit` characters of `text`, with `ELLIPSIS` appended when
/// anything was dropped.
pub fn preview_text(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

pub fn parse_json_body(body: &[u8]) -> Option<Value> {
    serde_json::from_slice(body).ok()
}

/// Render a body for the report: pretty JSON when the server says JSON and
/// the body parses, a text preview otherwise.
pub fn render_body(response: &HttpResponse) -> String {
    if response.is_json() {
        if let Some(value) = parse_json_body(&response.body) {
            return pretty_json(&value);
        }
    }
    preview_text(&String::from_utf8_lossy(&response.body), TEXT_PREVIEW_LIMIT)
}
