// Per-call transport options and their merge rule.
//
// The client holds a set of default options (Basic auth built from the
// credentials given at construction). Each call may pass extra options
// that are overlaid on the defaults key-by-key, caller's value winning
// on collision. The overlay is an explicit merge function so the
// precedence rules stay auditable.

use std::time::Duration;

use reqwest::RequestBuilder;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

/// Authentication directive for a request.
#[derive(Debug, Clone)]
pub enum Auth {
    /// HTTP Basic auth with the given username/password pair.
    Basic {
        username: String,
        password: SecretString,
    },
    /// Send no Authorization header at all (overrides the client default).
    Disabled,
}

/// Extra transport directives for a single request.
///
/// An empty `RequestOptions` leaves the client defaults untouched.
/// Setters follow the builder pattern:
///
/// ```
/// use jamfschool_api::RequestOptions;
///
/// let options = RequestOptions::new()
///     .query("page", "2")
///     .basic_auth("other-network", "other-key");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    headers: HeaderMap,
    query: Vec<(String, String)>,
    timeout: Option<Duration>,
    auth: Option<Auth>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, replacing any default value for the same name.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Append a query parameter. A key set here replaces every default
    /// entry with the same key.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Override the client-level timeout for this request only.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replace the default Basic-auth credentials for this request.
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(Auth::Basic {
            username: username.into(),
            password: SecretString::from(password.into()),
        });
        self
    }

    /// Suppress the Authorization header for this request.
    pub fn no_auth(mut self) -> Self {
        self.auth = Some(Auth::Disabled);
        self
    }

    /// Overlay `self` on top of `defaults`: headers and query parameters
    /// merge key-by-key with `self` winning, timeout and auth fall back
    /// to the default when unset.
    pub(crate) fn merged_over(&self, defaults: &Self) -> Self {
        let mut headers = defaults.headers.clone();
        for (name, value) in &self.headers {
            headers.insert(name.clone(), value.clone());
        }

        let mut query: Vec<(String, String)> = defaults
            .query
            .iter()
            .filter(|(key, _)| !self.query.iter().any(|(extra, _)| extra == key))
            .cloned()
            .collect();
        query.extend(self.query.iter().cloned());

        Self {
            headers,
            query,
            timeout: self.timeout.or(defaults.timeout),
            auth: self.auth.clone().or_else(|| defaults.auth.clone()),
        }
    }

    /// Attach the merged directives to an outgoing request.
    ///
    /// An explicit Authorization header takes precedence over the `auth`
    /// directive, so a caller-supplied header is never clobbered by the
    /// default credentials.
    pub(crate) fn apply(&self, mut req: RequestBuilder) -> RequestBuilder {
        if !self.headers.is_empty() {
            req = req.headers(self.headers.clone());
        }
        if !self.query.is_empty() {
            req = req.query(&self.query);
        }
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        if !self.headers.contains_key(AUTHORIZATION) {
            if let Some(Auth::Basic { username, password }) = &self.auth {
                req = req.basic_auth(username, Some(password.expose_secret()));
            }
        }
        req
    }
}
