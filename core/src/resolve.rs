//! Base-URL resolution.
//!
//! # Design
//! The algorithm is pure: the host supplies a `probe` closure that answers
//! "is this base reachable?" and the core decides which base to keep. A
//! failed resolution is not an error; the run proceeds against the primary
//! base and the individual calls report their own failures.

use std::time::Duration;

use crate::client::SWAGGER_PATH;
use crate::http::HttpRequest;

/// Lightweight endpoint used to test reachability.
pub const PROBE_PATH: &str = SWAGGER_PATH;
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Tried in order when the primary base does not answer.
pub const FALLBACK_BASE_URLS: [&str; 4] = [
    "http://localhost:4000",
    "http://127.0.0.1:4000",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
];

/// Outcome of resolving the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The primary base answered the probe.
    Reachable(String),
    /// The primary failed and this fallback answered.
    Detected(String),
    /// Nothing answered; the primary is kept anyway.
    Unreachable(String),
}

impl Resolution {
    pub fn base_url(&self) -> &str {
        match self {
            Resolution::Reachable(url) | Resolution::Detected(url) | Resolution::Unreachable(url) => url,
        }
    }
}

pub fn probe_request(base_url: &str) -> HttpRequest {
    HttpRequest::get(
        format!("{}{PROBE_PATH}", base_url.trim_end_matches('/')),
        PROBE_TIMEOUT,
    )
}

pub fn is_reachable(status: u16) -> bool {
    status == 200
}

/// Probe `primary`, then each candidate not textually equal to it, and keep
/// the first that answers.
pub fn resolve_base_url<F>(primary: &str, candidates: &[&str], mut probe: F) -> Resolution
where
    F: FnMut(&str) -> bool,
{
    let primary = primary.trim_end_matches('/');
    if probe(primary) {
        return Resolution::Reachable(primary.to_string());
    }
    candidates
        .iter()
        .map(|candidate| candidate.trim_end_matches('/'))
        .filter(|candidate| *candidate != primary)
        .find(|candidate| probe(candidate))
        .map(|candidate| Resolution::Detected(candidate.to_string()))
        .unwrap_or_else(|| Resolution::Unreachable(primary.to_string()))
}
