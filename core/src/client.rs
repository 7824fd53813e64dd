//! Request builders for the Suiknit endpoints exercised by a probe run.
//!
//! # Design
//! `SuiknitClient` holds only a `base_url` and carries no mutable state
//! between calls. Each endpoint gets a `build_*` method producing an
//! `HttpRequest`; the caller executes it and hands the `HttpResponse` to the
//! rendering helpers. Timeouts ride along on the request so the host never
//! has to know which endpoint class it is executing.

use std::time::Duration;

use crate::download::download_target;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::DownloadTokenRequest;

/// Timeout for plain GET calls.
pub const GET_TIMEOUT: Duration = Duration::from_secs(15);
/// Timeout for JSON POST calls.
pub const POST_TIMEOUT: Duration = Duration::from_secs(20);
/// Timeout for the ranged download, covering the first chunk read.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of trailing log lines requested from the admin log endpoint.
pub const LOG_TAIL: u32 = 100;
/// Size of the first chunk read from the download endpoint.
pub const DOWNLOAD_CHUNK: usize = 1024;

pub const SWAGGER_PATH: &str = "/api-docs/swagger.json";
pub const LOGIN_BY_TOKEN_PATH: &str = "/dev/auth/loginByToken";
pub const ADMIN_USERS_PATH: &str = "/dev/admin/users";
pub const ADMIN_LOG_FILES_PATH: &str = "/dev/admin/logs/files";
pub const ADMIN_LOGS_PATH: &str = "/dev/admin/logs";
pub const FILE_PUBLIC_PATH: &str = "/dev/file/public";
pub const DOWNLOAD_TOKEN_PATH: &str = "/dev/file/download/token";

/// Synchronous, stateless request builder for the Suiknit dev API.
#[derive(Debug, Clone)]
pub struct SuiknitClient {
    base_url: String,
}

impl SuiknitClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str) -> HttpRequest {
        HttpRequest::get(format!("{}{path}", self.base_url), GET_TIMEOUT)
    }

    pub fn build_root(&self) -> HttpRequest {
        self.get("/")
    }

    pub fn build_swagger(&self) -> HttpRequest {
        self.get(SWAGGER_PATH)
    }

    pub fn build_login_by_token(&self) -> HttpRequest {
        self.get(LOGIN_BY_TOKEN_PATH)
    }

    pub fn build_admin_users(&self) -> HttpRequest {
        self.get(ADMIN_USERS_PATH)
    }

    pub fn build_admin_log_files(&self) -> HttpRequest {
        self.get(ADMIN_LOG_FILES_PATH)
    }

    pub fn build_admin_logs(&self, tail: u32) -> HttpRequest {
        self.get(ADMIN_LOGS_PATH).with_query("tail", &tail.to_string())
    }

    /// Public metadata for a file. The id is passed through verbatim.
    pub fn build_file_public(&self, file_id: &str) -> HttpRequest {
        self.get(FILE_PUBLIC_PATH).with_query("fileId", file_id)
    }

    pub fn build_download_token(&self, file_id: &str) -> Result<HttpRequest, ApiError> {
        let input = DownloadTokenRequest {
            file_id: file_id.to_string(),
        };
        let body =
            serde_json::to_string(&input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{DOWNLOAD_TOKEN_PATH}", self.base_url),
            query: Vec::new(),
            headers: Vec::new(),
            body: Some(body),
            timeout: POST_TIMEOUT,
        })
    }

    /// Ranged GET for the first `DOWNLOAD_CHUNK` bytes of `download_url`.
    pub fn build_ranged_download(&self, download_url: &str) -> HttpRequest {
        let range = format!("bytes=0-{}", DOWNLOAD_CHUNK - 1);
        HttpRequest::get(download_target(&self.base_url, download_url), DOWNLOAD_TIMEOUT)
            .with_header("range", &range)
    }
}
