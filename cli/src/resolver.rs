//! Base-URL resolution over the live session.

use suiknit_core::resolve::{is_reachable, probe_request, resolve_base_url};
use suiknit_core::Resolution;
use tracing::debug;

use crate::session::Session;

/// True when `base_url` answers the swagger probe with 200. Transport
/// failures count as unreachable.
pub fn probe(session: &Session, base_url: &str) -> bool {
    match session.execute(&probe_request(base_url)) {
        Ok(resp) => {
            debug!(base_url, status = resp.status, "probe answered");
            is_reachable(resp.status)
        }
        Err(e) => {
            debug!(base_url, error = %e, "probe failed");
            false
        }
    }
}

pub fn resolve_from(session: &Session, primary: &str, candidates: &[&str]) -> Resolution {
    resolve_base_url(primary, candidates, |candidate| probe(session, candidate))
}
