// Jamf School API HTTP client.
//
// Thin facade over `reqwest`: fixed base URL, Basic-auth defaults built
// from the Network ID and API key, per-call option overlay. Responses
// are handed back as whatever the caller asks serde to decode -- no
// envelope handling, no retries, no pagination.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::options::RequestOptions;
use crate::transport::TransportConfig;

/// Production endpoint for the Jamf School (Zuludesk) API.
pub const BASE_URL: &str = "https://apiv6.zuludesk.com";

// Error body shape the API returns on failure, e.g.
// `{ "message": "Device not found" }`. Anything else falls back to
// the raw body text.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

/// Async client for the Jamf School API.
///
/// Holds immutable credentials and transport configuration; every call
/// is a single HTTP round-trip against `BASE_URL + path`. An instance
/// is cheap to reuse across sequential calls, and concurrent use is as
/// safe as the wrapped `reqwest::Client` (which is `Send + Sync`).
pub struct JamfSchoolClient {
    http: reqwest::Client,
    base_url: String,
    network_id: String,
    defaults: RequestOptions,
}

impl JamfSchoolClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Create a client with default transport settings (system trust
    /// store, 30 s timeout).
    pub fn new(network_id: &str, api_key: &str) -> Result<Self, Error> {
        Self::with_transport(network_id, api_key, &TransportConfig::default())
    }

    /// Create a client with explicit transport settings (custom CA
    /// trust anchor, timeout).
    ///
    /// Fails before any network I/O if the configured CA certificate
    /// file does not exist.
    pub fn with_transport(
        network_id: &str,
        api_key: &str,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::assemble(BASE_URL.to_owned(), network_id, api_key, http))
    }

    /// Wrap a pre-built `reqwest::Client` against an alternate base URL.
    ///
    /// Intended for tests against a local mock server; production use
    /// should go through [`new`](Self::new) or
    /// [`with_transport`](Self::with_transport).
    pub fn from_reqwest(
        base_url: impl Into<String>,
        network_id: &str,
        api_key: &str,
        http: reqwest::Client,
    ) -> Self {
        Self::assemble(base_url.into(), network_id, api_key, http)
    }

    fn assemble(base_url: String, network_id: &str, api_key: &str, http: reqwest::Client) -> Self {
        let defaults = RequestOptions::new().basic_auth(network_id, api_key);
        Self {
            http,
            base_url,
            network_id: network_id.to_owned(),
            defaults,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The base URL every request path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The Network ID used as the Basic-auth username.
    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    // ── URL builder ──────────────────────────────────────────────────

    // Plain concatenation on purpose: paths are forwarded verbatim,
    // duplicate slashes included.
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ── Convenience endpoints ────────────────────────────────────────

    /// Fetch all apps (`GET /apps`).
    pub async fn list_apps<T: DeserializeOwned>(&self, options: &RequestOptions) -> Result<T, Error> {
        self.get("/apps", options).await
    }

    /// Fetch all devices (`GET /devices`).
    pub async fn list_devices<T: DeserializeOwned>(
        &self,
        options: &RequestOptions,
    ) -> Result<T, Error> {
        self.get("/devices", options).await
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    /// Send a GET request to `BASE_URL + path`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T, Error> {
        let url = Url::parse(&self.endpoint(path))?;
        debug!("GET {url}");

        let merged = options.merged_over(&self.defaults);
        let resp = merged.apply(self.http.get(url)).send().await?;
        Self::handle_response(resp).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T, Error> {
        let url = Url::parse(&self.endpoint(path))?;
        debug!("POST {url}");

        let merged = options.merged_over(&self.defaults);
        let resp = merged.apply(self.http.post(url).json(body)).send().await?;
        Self::handle_response(resp).await
    }

    /// Send a PUT request with a JSON body.
    pub async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T, Error> {
        let url = Url::parse(&self.endpoint(path))?;
        debug!("PUT {url}");

        let merged = options.merged_over(&self.defaults);
        let resp = merged.apply(self.http.put(url).json(body)).send().await?;
        Self::handle_response(resp).await
    }

    /// Send a DELETE request.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T, Error> {
        let url = Url::parse(&self.endpoint(path))?;
        debug!("DELETE {url}");

        let merged = options.merged_over(&self.defaults);
        let resp = merged.apply(self.http.delete(url)).send().await?;
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body: body.clone(),
                }
            })
        } else {
            Err(Self::remote_error(status, resp).await)
        }
    }

    async fn remote_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_plain_concatenation() {
        let client =
            JamfSchoolClient::from_reqwest(BASE_URL, "network", "key", reqwest::Client::new());

        assert_eq!(client.endpoint("/apps"), "https://apiv6.zuludesk.com/apps");
        assert_eq!(client.endpoint("/users/1"), "https://apiv6.zuludesk.com/users/1");
        // Duplicate slashes are forwarded as-is, not normalized.
        assert_eq!(
            client.endpoint("//devices"),
            "https://apiv6.zuludesk.com//devices"
        );
    }

    #[test]
    fn accessors_expose_construction_state() {
        let client =
            JamfSchoolClient::from_reqwest("http://localhost:1", "network", "key", reqwest::Client::new());

        assert_eq!(client.base_url(), "http://localhost:1");
        assert_eq!(client.network_id(), "network");
    }
}
