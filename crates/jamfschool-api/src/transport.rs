// Transport configuration for building the underlying reqwest::Client.
//
// TLS trust is client-scoped in reqwest, so the CA override lives here
// rather than in the per-call options: a custom trust anchor applies to
// every request issued by the client built from this config.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Error;

/// Transport settings shared by every request of a client instance.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Optional PEM CA bundle used as the sole custom trust anchor.
    /// When absent the system certificate store is used.
    pub ca_cert: Option<PathBuf>,
    /// Request timeout applied to every call (overridable per call).
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            ca_cert: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Trust the CA certificate at `path` for outbound TLS verification.
    pub fn with_ca_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_cert = Some(path.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a `reqwest::Client` from this config.
    ///
    /// Fails with [`Error::CaCertMissing`] when the CA override points at
    /// a nonexistent file. No network I/O happens here.
    pub(crate) fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("jamfschool-api/", env!("CARGO_PKG_VERSION")));

        if let Some(path) = &self.ca_cert {
            if !path.is_file() {
                return Err(Error::CaCertMissing { path: path.clone() });
            }
            let pem = std::fs::read(path)
                .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
            let cert = reqwest::Certificate::from_pem(&pem)
                .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
            builder = builder.add_root_certificate(cert);
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}
