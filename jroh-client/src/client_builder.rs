//! Client builder for configuring endpoint, transport, and id policy
//!
//! The `ClientBuilder` provides a fluent API for configuring client behavior
//! before the first call. It allows you to:
//! - Inject a preconfigured `reqwest::Client` (timeouts, proxies, TLS)
//! - Set custom headers and basic-auth credentials
//! - Relax strict response decoding
//! - Choose the starting request id and the autoincrement mode
//!
//! # Examples
//!
//! ```rust,no_run
//! use jroh_client::ClientBuilder;
//!
//! # fn example() -> jroh_core::Result<()> {
//! let client = ClientBuilder::new("https://api.example.com/rpc")
//!     .header("X-Api-Key", "s3cret")
//!     .basic_auth("alice", Some("secret"))
//!     .allow_unknown_fields(true)
//!     .first_id(1)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use jroh_core::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::id::IdAllocator;
use crate::transport::{BasicAuth, HttpTransport};
use crate::JrohClient;

/// Builder for configuring and creating a JrohClient
pub struct ClientBuilder {
    endpoint: String,
    http_client: Option<reqwest::Client>,
    headers: Vec<(String, String)>,
    basic_auth: Option<BasicAuth>,
    allow_unknown_fields: bool,
    first_id: i64,
    auto_increment: bool,
}

impl ClientBuilder {
    /// Create a new client builder
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http_client: None,
            headers: Vec::new(),
            basic_auth: None,
            allow_unknown_fields: false,
            first_id: 0,
            auto_increment: true,
        }
    }

    /// Use a preconfigured `reqwest::Client` instead of the default
    ///
    /// This is where reqwest-level policy lives: request timeouts,
    /// proxies, TLS options, connection pool sizing.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Add a custom header sent with every request
    ///
    /// Setting the same name twice keeps the later value. Headers are
    /// applied after the `Content-Type`/`Accept` defaults, so they can
    /// override those, and a `Host` header overrides the request authority.
    /// Name and value are validated in [`build`](Self::build).
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach basic-auth credentials to every request
    pub fn basic_auth(mut self, username: impl Into<String>, password: Option<&str>) -> Self {
        self.basic_auth = Some(BasicAuth {
            username: username.into(),
            password: password.map(str::to_string),
        });
        self
    }

    /// Tolerate unknown fields in response envelopes
    ///
    /// By default a response (or nested error object) carrying fields
    /// outside the JSON-RPC 2.0 shape fails to decode. Enable this when
    /// talking to servers that extend their envelopes.
    pub fn allow_unknown_fields(mut self, allow: bool) -> Self {
        self.allow_unknown_fields = allow;
        self
    }

    /// The id assigned to the first call (default 0)
    pub fn first_id(mut self, id: i64) -> Self {
        self.first_id = id;
        self
    }

    /// Whether ids advance after each call (default true)
    ///
    /// With autoincrement off, every call reuses the current id until
    /// [`JrohClient::set_next_id`] changes it.
    pub fn auto_increment(mut self, enabled: bool) -> Self {
        self.auto_increment = enabled;
        self
    }

    /// Validate the configuration and build the client
    ///
    /// Fails with [`Error::InvalidEndpoint`] when the endpoint is not an
    /// absolute http/https URL, and with [`Error::InvalidHeader`] when a
    /// configured header name or value is malformed.
    pub fn build(self) -> Result<JrohClient> {
        let endpoint = Url::parse(&self.endpoint)
            .map_err(|e| Error::InvalidEndpoint(format!("{}: {}", self.endpoint, e)))?;
        match endpoint.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(Error::InvalidEndpoint(format!(
                    "{}: unsupported scheme \"{}\"",
                    self.endpoint, scheme
                )))
            }
        }

        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::InvalidHeader(format!("{}: {}", name, e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| Error::InvalidHeader(format!("{}: {}", name, e)))?;
            headers.insert(header_name, header_value);
        }

        tracing::debug!(endpoint = %endpoint, "Building JSON-RPC client");

        let transport = HttpTransport::new(
            endpoint,
            self.http_client.unwrap_or_default(),
            headers,
            self.basic_auth,
            self.allow_unknown_fields,
        );
        let ids = IdAllocator::new(self.first_id, self.auto_increment);

        Ok(JrohClient::from_parts(transport, ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = ClientBuilder::new("http://localhost:8080/rpc");

        assert_eq!(builder.endpoint, "http://localhost:8080/rpc");
        assert!(builder.http_client.is_none());
        assert!(builder.headers.is_empty());
        assert!(builder.basic_auth.is_none());
        assert!(!builder.allow_unknown_fields);
        assert_eq!(builder.first_id, 0);
        assert!(builder.auto_increment);
    }

    #[test]
    fn test_builder_header_accumulation() {
        let builder = ClientBuilder::new("http://localhost:8080/rpc")
            .header("X-One", "1")
            .header("X-Two", "2");

        assert_eq!(builder.headers.len(), 2);
        assert_eq!(builder.headers[0], ("X-One".to_string(), "1".to_string()));
    }

    #[test]
    fn test_builder_basic_auth() {
        let builder = ClientBuilder::new("http://localhost:8080/rpc")
            .basic_auth("alice", Some("secret"));

        let auth = builder.basic_auth.unwrap();
        assert_eq!(auth.username, "alice");
        assert_eq!(auth.password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_builder_chaining() {
        let builder = ClientBuilder::new("http://localhost:8080/rpc")
            .http_client(reqwest::Client::new())
            .header("X-Api-Key", "k")
            .basic_auth("bob", None)
            .allow_unknown_fields(true)
            .first_id(10)
            .auto_increment(false);

        assert!(builder.http_client.is_some());
        assert_eq!(builder.headers.len(), 1);
        assert!(builder.basic_auth.is_some());
        assert!(builder.allow_unknown_fields);
        assert_eq!(builder.first_id, 10);
        assert!(!builder.auto_increment);
    }

    #[test]
    fn test_build_valid_endpoint() {
        let client = ClientBuilder::new("https://api.example.com/rpc")
            .first_id(5)
            .build()
            .unwrap();

        assert_eq!(client.endpoint().as_str(), "https://api.example.com/rpc");
        assert_eq!(client.next_request_id(), 5);
    }

    #[test]
    fn test_build_rejects_unparseable_endpoint() {
        let err = ClientBuilder::new("::not a url::").build().unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_build_rejects_non_http_scheme() {
        let err = ClientBuilder::new("ws://localhost:8080").build().unwrap_err();
        match err {
            Error::InvalidEndpoint(detail) => assert!(detail.contains("ws")),
            other => panic!("expected InvalidEndpoint, got {:?}", other),
        }
    }

    #[test]
    fn test_build_rejects_bad_header_name() {
        let err = ClientBuilder::new("http://localhost:8080/rpc")
            .header("bad header", "v")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
    }

    #[test]
    fn test_build_rejects_bad_header_value() {
        let err = ClientBuilder::new("http://localhost:8080/rpc")
            .header("X-Ok", "line\nbreak")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
    }
}
