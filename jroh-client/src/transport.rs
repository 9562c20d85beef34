//! HTTP transport for JSON-RPC envelopes
//!
//! A thin adapter over an injected [`reqwest::Client`]: serialize, POST,
//! classify. Every exchange is `POST` with `Content-Type: application/json`
//! and `Accept: application/json`; configured custom headers are applied
//! after those defaults so they can override them (including `Host`, which
//! rides the header map and overrides the request authority), and basic-auth
//! is applied last.
//!
//! # Failure Classification
//!
//! The interesting part is turning an HTTP exchange into exactly one of the
//! jroh error kinds:
//!
//! - send/read failures → [`Error::Transport`], or [`Error::Timeout`] when
//!   the client's deadline elapsed
//! - status >= 400 → [`Error::Http`], carrying the decoded envelope(s) when
//!   the error body parsed and the raw body when it did not
//! - empty or literal-`null` body on a 2xx → [`Error::EmptyResponse`]
//! - undecodable body on a 2xx → [`Error::Decode`]
//!
//! A 2xx with a decodable envelope is always `Ok`, even when that envelope
//! carries a protocol error; branching on `response.error` belongs to the
//! caller.
//!
//! Connection pooling, TLS, proxies, and timeouts are the injected client's
//! business, not this module's.

use jroh_core::{codec, Error, HttpError, JsonRpcResponse, Result};
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use tracing::{debug, warn};
use url::Url;

/// Basic-auth credentials applied to every outgoing request
#[derive(Debug, Clone)]
pub(crate) struct BasicAuth {
    pub(crate) username: String,
    pub(crate) password: Option<String>,
}

/// Owns the endpoint and everything needed to reach it
///
/// The HTTP client, header map, and credentials sit behind locks so a shared
/// client can be reconfigured between calls; the critical sections only
/// clone configuration and never span an await.
pub(crate) struct HttpTransport {
    endpoint: Url,
    http: RwLock<reqwest::Client>,
    headers: RwLock<HeaderMap>,
    basic_auth: RwLock<Option<BasicAuth>>,
    allow_unknown_fields: bool,
}

impl HttpTransport {
    pub(crate) fn new(
        endpoint: Url,
        http: reqwest::Client,
        headers: HeaderMap,
        basic_auth: Option<BasicAuth>,
        allow_unknown_fields: bool,
    ) -> Self {
        Self {
            endpoint,
            http: RwLock::new(http),
            headers: RwLock::new(headers),
            basic_auth: RwLock::new(basic_auth),
            allow_unknown_fields,
        }
    }

    pub(crate) fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Insert or overwrite a custom header, validating name and value
    pub(crate) fn set_header(&self, name: &str, value: &str) -> Result<()> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::InvalidHeader(format!("{}: {}", name, e)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| Error::InvalidHeader(format!("{}: {}", name, e)))?;
        self.headers.write().insert(header_name, header_value);
        Ok(())
    }

    pub(crate) fn set_basic_auth(&self, username: &str, password: Option<&str>) {
        *self.basic_auth.write() = Some(BasicAuth {
            username: username.to_string(),
            password: password.map(str::to_string),
        });
    }

    pub(crate) fn set_http_client(&self, client: reqwest::Client) {
        *self.http.write() = client;
    }

    /// Execute one POST and return `(status, body)`
    ///
    /// Only transport-level failures error here; status classification is
    /// the callers' job so single, batch, and notification paths can differ.
    async fn post(&self, payload: String) -> Result<(u16, String)> {
        debug!(
            url = %self.endpoint,
            bytes = payload.len(),
            "sending JSON-RPC payload"
        );

        // Build the request while holding the config locks, then release
        // them before the await.
        let request = {
            let mut builder = self
                .http
                .read()
                .post(self.endpoint.as_str())
                .header(CONTENT_TYPE, "application/json")
                .header(ACCEPT, "application/json")
                .headers(self.headers.read().clone());
            if let Some(auth) = self.basic_auth.read().as_ref() {
                builder = builder.basic_auth(&auth.username, auth.password.as_deref());
            }
            builder.body(payload)
        };

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        debug!(status, bytes = body.len(), "received HTTP response");
        if status >= 400 {
            warn!(status, "HTTP error status from server");
        }
        Ok((status, body))
    }

    /// Send a single request envelope and decode one response
    pub(crate) async fn post_single(&self, payload: String) -> Result<JsonRpcResponse> {
        let (status, body) = self.post(payload).await?;
        if body.trim().is_empty() {
            if status >= 400 {
                return Err(HttpError::new(status).into());
            }
            return Err(Error::EmptyResponse);
        }

        match codec::decode_response(&body, self.allow_unknown_fields) {
            Ok(Some(response)) => {
                if status >= 400 {
                    // The server reported an HTTP failure and still produced
                    // an envelope; hand the caller both facts.
                    Err(HttpError::new(status).with_response(response).into())
                } else {
                    Ok(response)
                }
            }
            Ok(None) => {
                if status >= 400 {
                    Err(HttpError::new(status).into())
                } else {
                    Err(Error::EmptyResponse)
                }
            }
            Err(decode_error) => {
                if status >= 400 {
                    Err(HttpError::new(status).with_body(body).into())
                } else {
                    Err(decode_error)
                }
            }
        }
    }

    /// Send a batch payload and decode the response array
    pub(crate) async fn post_batch(&self, payload: String) -> Result<Vec<JsonRpcResponse>> {
        let (status, body) = self.post(payload).await?;
        if body.trim().is_empty() {
            if status >= 400 {
                return Err(HttpError::new(status).into());
            }
            return Err(Error::EmptyResponse);
        }

        match codec::decode_batch(&body, self.allow_unknown_fields) {
            Ok(Some(responses)) => {
                if responses.is_empty() {
                    if status >= 400 {
                        return Err(HttpError::new(status).into());
                    }
                    return Err(Error::EmptyResponse);
                }
                if status >= 400 {
                    Err(HttpError::new(status).with_responses(responses).into())
                } else {
                    Ok(responses)
                }
            }
            Ok(None) => {
                if status >= 400 {
                    Err(HttpError::new(status).into())
                } else {
                    Err(Error::EmptyResponse)
                }
            }
            Err(decode_error) => {
                if status >= 400 {
                    Err(HttpError::new(status).with_body(body).into())
                } else {
                    Err(decode_error)
                }
            }
        }
    }

    /// Send a notification payload; the body is never decoded
    pub(crate) async fn post_notification(&self, payload: String) -> Result<()> {
        let (status, body) = self.post(payload).await?;
        if status >= 400 {
            let mut http = HttpError::new(status);
            if !body.trim().is_empty() {
                http = http.with_body(body);
            }
            return Err(http.into());
        }
        Ok(())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else {
        Error::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> HttpTransport {
        HttpTransport::new(
            Url::parse("http://127.0.0.1:9/rpc").unwrap(),
            reqwest::Client::new(),
            HeaderMap::new(),
            None,
            false,
        )
    }

    #[test]
    fn test_set_header_validates_name() {
        let t = transport();
        let err = t.set_header("bad header\n", "v").unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
    }

    #[test]
    fn test_set_header_validates_value() {
        let t = transport();
        let err = t.set_header("X-Token", "line\nbreak").unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
    }

    #[test]
    fn test_set_header_overwrites_previous_value() {
        let t = transport();
        t.set_header("X-Token", "one").unwrap();
        t.set_header("X-Token", "two").unwrap();
        assert_eq!(t.headers.read().get("X-Token").unwrap(), "two");
        assert_eq!(t.headers.read().len(), 1);
    }

    #[test]
    fn test_set_basic_auth_stores_credentials() {
        let t = transport();
        t.set_basic_auth("alice", Some("secret"));
        let guard = t.basic_auth.read();
        let auth = guard.as_ref().unwrap();
        assert_eq!(auth.username, "alice");
        assert_eq!(auth.password.as_deref(), Some("secret"));
    }
}
