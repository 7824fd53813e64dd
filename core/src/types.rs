//! Request DTOs for the Suiknit dev API.
//!
//! Responses are deliberately left untyped (`serde_json::Value`): the probe
//! reports whatever the server sends and only digs out `downloadUrl`.

use serde::{Deserialize, Serialize};

/// Body of `POST /dev/file/download/token`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DownloadTokenRequest {
    #[serde(rename = "fileId")]
    pub file_id: String,
}
