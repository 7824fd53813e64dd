//! The fixed sequence of calls making up a probe run.
//!
//! # Design
//! The run is a flat list of independent calls; a failing call only ends
//! its own branch. The one chain is the file download: public metadata,
//! then a download token, then a ranged GET against the URL found in the
//! token response. A token response without a usable `downloadUrl` ends the
//! chain without further output.

use std::io::{self, Write};

use suiknit_core::client::LOG_TAIL;
use suiknit_core::resolve::FALLBACK_BASE_URLS;
use suiknit_core::{extract_download_url, Resolution, SuiknitClient};
use tracing::{info, warn};

use crate::resolver;
use crate::runner::Runner;
use crate::session::Session;

/// Inputs of one probe run.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub base_url: String,
    pub file_id: Option<String>,
    pub auto_detect: bool,
}

pub fn run<W: Write>(session: &Session, scenario: &Scenario, out: &mut W) -> io::Result<()> {
    run_with_candidates(session, scenario, &FALLBACK_BASE_URLS, out)
}

/// Like `run`, with an explicit fallback list for auto-detection.
pub fn run_with_candidates<W: Write>(
    session: &Session,
    scenario: &Scenario,
    candidates: &[&str],
    out: &mut W,
) -> io::Result<()> {
    let mut base_url = scenario.base_url.trim_end_matches('/').to_string();
    if scenario.auto_detect {
        match resolver::resolve_from(session, &base_url, candidates) {
            Resolution::Detected(detected) => {
                writeln!(out, "Auto-detected base URL: {detected}")?;
                base_url = detected;
            }
            Resolution::Unreachable(_) => warn!(%base_url, "no candidate base URL answered, keeping the given one"),
            Resolution::Reachable(_) => {}
        }
    }
    writeln!(out, "Base URL: {base_url}")?;
    info!(%base_url, file_id = ?scenario.file_id, "starting probe run");

    let client = SuiknitClient::new(&base_url);
    let mut runner = Runner::new(session, out);

    runner.section("Basic", true)?;
    runner.get(&client.build_root())?;
    runner.get(&client.build_swagger())?;

    runner.section("Auth", false)?;
    runner.get(&client.build_login_by_token())?;

    runner.section("Admin", false)?;
    runner.get(&client.build_admin_users())?;
    runner.get(&client.build_admin_log_files())?;
    runner.get(&client.build_admin_logs(LOG_TAIL))?;

    if let Some(file_id) = scenario.file_id.as_deref() {
        run_file_chain(&mut runner, &client, file_id)?;
    }

    runner.line("\nDone.")
}

fn run_file_chain<W: Write>(
    runner: &mut Runner<'_, W>,
    client: &SuiknitClient,
    file_id: &str,
) -> io::Result<()> {
    runner.section("File (public info)", false)?;
    runner.get(&client.build_file_public(file_id))?;

    runner.section("File (download token)", false)?;
    let req = match client.build_download_token(file_id) {
        Ok(req) => req,
        Err(e) => {
            warn!(file_id, error = %e, "cannot build download token request");
            return Ok(());
        }
    };
    let Some(payload) = runner.post(&req)? else {
        return Ok(());
    };
    let Some(download_url) = extract_download_url(&payload) else {
        info!(file_id, "token response has no downloadUrl, skipping download");
        return Ok(());
    };

    runner.section("File (download by token)", false)?;
    runner.fetch_first_chunk(&client.build_ranged_download(download_url))
}
