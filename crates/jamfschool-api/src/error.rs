use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the `jamfschool-api` crate.
///
/// Covers every failure mode: client configuration, transport, and
/// remote API responses. Errors are surfaced as-is to the caller --
/// the client never retries or reinterprets them.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// CA certificate override points at a file that does not exist.
    /// Raised at construction time, before any network activity.
    #[error("CA certificate file not found: {}", path.display())]
    CaCertMissing { path: PathBuf },

    /// TLS setup failed (unreadable or invalid CA cert, client build).
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The concatenated request URL failed to parse.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Remote API ──────────────────────────────────────────────────
    /// Non-success HTTP status from the Jamf School API.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The HTTP status code, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
