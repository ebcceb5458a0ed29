//! Error types for the Clockify client.
//!
//! # Design
//! Every non-2xx response lands in `HttpRequest` with the raw status and
//! body, so a 404 is reported as a 404 rather than as a failed decode of the
//! error payload. Lookup misses get their own variants because callers
//! branch on them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClockifyError {
    /// The server answered with a status outside 200..300.
    #[error("HTTP {status}: {body}")]
    HttpRequest { status: u16, body: String },

    /// A verb the dispatcher does not know how to send.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("no user with email {email}")]
    UserNotFound { email: String },

    #[error("no client named {name:?}")]
    ClientNotFound { name: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("transport error: {0}")]
    Transport(String),

    #[error("CLOCKIFY_API_KEY is not set")]
    MissingApiKey,

    #[error("pagination did not terminate after {limit} pages")]
    PageLimitExceeded { limit: u32 },
}

impl ClockifyError {
    /// HTTP status of a rejected request, if this error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClockifyError::HttpRequest { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClockifyError>;
