//! The HTTP session every probe call goes through.
//!
//! # Design
//! A single `ureq` agent is built once per run and reused for every call.
//! Status codes are returned as data (`http_status_as_error(false)`), so the
//! only errors that surface here are transport failures. The session's
//! default headers are applied first, then the request's own headers, then
//! the per-request timeout.

use std::io::Read;

use suiknit_core::{HttpMethod, HttpRequest, HttpResponse, SessionConfig};
use thiserror::Error;
use tracing::debug;
use ureq::http::Response;
use ureq::{Agent, Body, BodyReader, RequestBuilder, ResponseExt};

/// A failure to complete an HTTP exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Http(#[from] ureq::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Reusable client carrying the bearer token and fixed headers.
pub struct Session {
    agent: Agent,
    config: SessionConfig,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent, config }
    }

    /// Execute `req` and receive the whole body, however large.
    pub fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut response = self.send(req)?;
        let status = response.status().as_u16();
        let url = response.get_uri().to_string();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()?;
        debug!(method = %req.method, %url, status, bytes = body.len(), "response received");
        Ok(HttpResponse {
            status,
            url,
            content_type,
            body,
        })
    }

    /// Execute `req` and hand back the still-open body behind a guard.
    pub fn open(&self, req: &HttpRequest) -> Result<StreamedResponse, TransportError> {
        let response = self.send(req)?;
        let status = response.status().as_u16();
        debug!(method = %req.method, url = %req.url, status, "streaming response opened");
        Ok(StreamedResponse {
            status,
            url: req.url.clone(),
            reader: response.into_body().into_reader(),
        })
    }

    fn send(&self, req: &HttpRequest) -> Result<Response<Body>, ureq::Error> {
        match req.method {
            HttpMethod::Get => self.prepare(self.agent.get(&req.url), req).call(),
            HttpMethod::Post => {
                let builder = self.prepare(self.agent.post(&req.url), req);
                match &req.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        }
    }

    fn prepare<B>(&self, mut builder: RequestBuilder<B>, req: &HttpRequest) -> RequestBuilder<B> {
        for (name, value) in self.config.default_headers().iter().chain(&req.headers) {
            builder = builder.header(name.as_str(), value.as_str());
        }
        for (key, value) in &req.query {
            builder = builder.query(key.as_str(), value.as_str());
        }
        builder.config().timeout_global(Some(req.timeout)).build()
    }
}

/// An open response body. The underlying connection is released when the
/// guard is dropped, whether or not the body was read.
pub struct StreamedResponse {
    status: u16,
    url: String,
    reader: BodyReader<'static>,
}

impl StreamedResponse {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Read at most `limit` bytes from the start of the body.
    pub fn read_chunk(&mut self, limit: usize) -> std::io::Result<Vec<u8>> {
        let mut chunk = Vec::with_capacity(limit);
        (&mut self.reader).take(limit as u64).read_to_end(&mut chunk)?;
        Ok(chunk)
    }
}

impl Drop for StreamedResponse {
    fn drop(&mut self) {
        debug!(url = %self.url, "closing streamed response");
    }
}
