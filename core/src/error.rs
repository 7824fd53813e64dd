//! Error types for the Suiknit request builders.
//!
//! Transport failures belong to the host; the core only fails when it cannot
//! produce a request at all.

use thiserror::Error;

/// Errors returned by `SuiknitClient` build methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
