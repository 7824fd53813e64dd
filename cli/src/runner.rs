//! Executing one call and writing its outcome to the report.
//!
//! Each call produces exactly one status line or exactly one failure line.
//! Transport failures are written to the report and logged; they never
//! propagate. The only error a runner method returns is a failed write to
//! the report itself.

use std::io::{self, Write};

use serde_json::Value;
use suiknit_core::client::DOWNLOAD_CHUNK;
use suiknit_core::render::{parse_json_body, pretty_json, preview_text, render_body, TEXT_PREVIEW_LIMIT};
use suiknit_core::HttpRequest;
use tracing::warn;

use crate::session::Session;

pub struct Runner<'a, W: Write> {
    session: &'a Session,
    out: &'a mut W,
}

impl<'a, W: Write> Runner<'a, W> {
    pub fn new(session: &'a Session, out: &'a mut W) -> Self {
        Self { session, out }
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    /// Section header, preceded by a blank line unless it opens the report.
    pub fn section(&mut self, title: &str, first: bool) -> io::Result<()> {
        if first {
            writeln!(self.out, "== {title} ==")
        } else {
            writeln!(self.out, "\n== {title} ==")
        }
    }

    pub fn get(&mut self, req: &HttpRequest) -> io::Result<()> {
        match self.session.execute(req) {
            Ok(resp) => {
                writeln!(self.out, "GET {} -> {}", resp.url, resp.status)?;
                writeln!(self.out, "{}", render_body(&resp))
            }
            Err(e) => {
                warn!(url = %req.url, error = %e, "GET failed");
                writeln!(self.out, "GET {} failed: {e}", req.url)
            }
        }
    }

    /// POST `req`; the parsed JSON body is returned for chaining.
    pub fn post(&mut self, req: &HttpRequest) -> io::Result<Option<Value>> {
        match self.session.execute(req) {
            Ok(resp) => {
                writeln!(self.out, "POST {} -> {}", req.url, resp.status)?;
                match parse_json_body(&resp.body) {
                    Some(payload) => {
                        writeln!(self.out, "{}", pretty_json(&payload))?;
                        Ok(Some(payload))
                    }
                    None => {
                        // same preview as GET bodies, ellipsis included
                        let text = String::from_utf8_lossy(&resp.body);
                        writeln!(self.out, "{}", preview_text(&text, TEXT_PREVIEW_LIMIT))?;
                        Ok(None)
                    }
                }
            }
            Err(e) => {
                warn!(url = %req.url, error = %e, "POST failed");
                writeln!(self.out, "POST {} failed: {e}", req.url)?;
                Ok(None)
            }
        }
    }

    /// Open `req` as a stream and read only the first chunk of the body.
    pub fn fetch_first_chunk(&mut self, req: &HttpRequest) -> io::Result<()> {
        let mut stream = match self.session.open(req) {
            Ok(stream) => stream,
            Err(e) => {
                warn!(url = %req.url, error = %e, "download failed");
                return writeln!(self.out, "Download failed: {e}");
            }
        };
        writeln!(self.out, "GET {} -> {}", stream.url(), stream.status())?;
        match stream.read_chunk(DOWNLOAD_CHUNK) {
            Ok(chunk) => writeln!(self.out, "Read {} bytes", chunk.len()),
            Err(e) => {
                warn!(url = %req.url, error = %e, "download failed");
                writeln!(self.out, "Download failed: {e}")
            }
        }
    }
}
