//! I/O-free core of the Suiknit API probe.
//!
//! # Overview
//! Builds `HttpRequest` values for every endpoint a probe run touches and
//! turns `HttpResponse` values into report text, without touching the
//! network (host-does-IO pattern). The host executes the round-trips.
//!
//! # Design
//! - `SuiknitClient` is stateless, it holds only `base_url`.
//! - `SessionConfig` owns the bearer token and derives the default headers
//!   the host attaches to every request.
//! - Base-URL resolution and download-URL extraction are plain functions so
//!   the interesting decisions are testable without a server.

pub mod client;
pub mod download;
pub mod error;
pub mod http;
pub mod render;
pub mod resolve;
pub mod session;
pub mod types;

pub use client::SuiknitClient;
pub use download::{download_target, extract_download_url};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use resolve::{resolve_base_url, Resolution};
pub use session::{SessionConfig, USER_AGENT};
pub use types::DownloadTokenRequest;
