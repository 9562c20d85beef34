//! Error types for JSON-RPC 2.0 over HTTP
//!
//! This module defines the error taxonomy used across the jroh crates. The
//! guiding rule is that a populated `error` field inside a decoded
//! [`JsonRpcResponse`] is a *successful* call outcome (the server answered,
//! it just answered with a protocol error), while everything in [`Error`]
//! describes a failure of the exchange itself (connection, HTTP status,
//! decoding, correlation).
//!
//! # Error Categories
//!
//! - **Protocol errors** ([`JsonRpcError`]): the `{code, message, data}`
//!   object carried inside a response envelope. Only surfaced as an `Err`
//!   where the API explicitly promises it (typed calls).
//! - **HTTP errors** ([`HttpError`]): non-2xx status codes. These carry the
//!   decoded response envelope when the error body parsed as one, so callers
//!   can inspect a protocol error even under an HTTP failure.
//! - **Transport errors**: connection refused, DNS failure, timeouts.
//!   No response envelope exists.
//! - **Decode errors**: the body arrived but is not valid (or, under strict
//!   mode, not conformant) JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::types::JsonRpcResponse;

/// Result type alias using the jroh error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for jroh operations
#[derive(Error, Debug)]
pub enum Error {
    /// JSON-RPC protocol error reported by the server.
    ///
    /// Returned only by the typed call path; plain calls return the envelope
    /// instead and leave the branch to the caller.
    #[error("JSON-RPC error: {0}")]
    JsonRpc(#[from] JsonRpcError),

    /// Non-2xx HTTP status, with the decoded envelope attached when the
    /// error body parsed as one
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Connection-level failure (refused, reset, DNS); no response exists
    #[error("Transport error: {0}")]
    Transport(String),

    /// The transport's deadline elapsed before a response arrived
    #[error("Request timeout")]
    Timeout,

    /// Response body present but not decodable (invalid JSON, or unknown
    /// fields under strict decoding)
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request envelope could not be serialized to JSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Response body was empty (or literal `null`) where an envelope was
    /// expected; distinct from a decoded envelope whose `result` is null
    #[error("Empty response body")]
    EmptyResponse,

    /// No response with the requested correlation id exists in the batch
    #[error("No response in batch for request id {0}")]
    ResponseNotFound(i64),

    /// A batch call was issued with zero envelopes; rejected before any
    /// network activity
    #[error("Batch contains no requests or notifications")]
    EmptyBatch,

    /// The endpoint URL could not be parsed or uses a non-HTTP scheme
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// A configured header name or value is not valid for HTTP
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// A typed result accessor was applied to a result of a different shape
    #[error("Result type mismatch: expected {expected}, found {actual}")]
    ResultType {
        /// The JSON shape the accessor wanted
        expected: &'static str,
        /// What the result actually held, rendered as JSON
        actual: String,
    },
}

impl Error {
    /// Borrow the decoded response envelope attached to this error, if any.
    ///
    /// Only [`Error::Http`] can carry one: an HTTP error status whose body
    /// still decoded as a JSON-RPC response. This is the hook for callers
    /// that need to read `error.code` out of, say, a 500 reply.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jroh_core::{Error, HttpError};
    ///
    /// let err = Error::Http(HttpError::new(503));
    /// assert!(err.response().is_none());
    /// ```
    pub fn response(&self) -> Option<&JsonRpcResponse> {
        match self {
            Error::Http(http) => http.response.as_ref(),
            _ => None,
        }
    }
}

/// JSON-RPC 2.0 error object: `{code, message, data}`
///
/// This is the wire-level error carried in a response envelope's `error`
/// field. It doubles as a Rust error value: `Display` renders it in the
/// conventional `"<code>: <message>"` form, and it implements
/// [`std::error::Error`] so it can be boxed and propagated like any other.
///
/// # Standard Error Codes
///
/// The JSON-RPC 2.0 specification reserves these codes:
///
/// | Code   | Meaning          |
/// |--------|------------------|
/// | -32700 | Parse error      |
/// | -32600 | Invalid request  |
/// | -32601 | Method not found |
/// | -32602 | Invalid params   |
/// | -32603 | Internal error   |
///
/// Servers are free to use application-defined codes outside the reserved
/// -32768..-32000 range.
///
/// # Examples
///
/// ```rust
/// use jroh_core::JsonRpcError;
///
/// let err = JsonRpcError::new(123, "something wrong");
/// assert_eq!(err.to_string(), "123: something wrong");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Numeric error code; defaults to 0 when a server omits it
    #[serde(default)]
    pub code: i64,
    /// Short human-readable description; defaults to "" when omitted
    #[serde(default)]
    pub message: String,
    /// Optional additional error information
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    /// Create an error object with a code and message
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Create an error object with additional data attached
    pub fn with_data(code: i64, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Standard parse error (-32700): invalid JSON was received
    pub fn parse_error() -> Self {
        Self::new(-32700, "Parse error")
    }

    /// Standard invalid request error (-32600)
    pub fn invalid_request() -> Self {
        Self::new(-32600, "Invalid Request")
    }

    /// Standard method not found error (-32601)
    pub fn method_not_found(method: &str) -> Self {
        Self::new(-32601, format!("Method not found: {}", method))
    }

    /// Standard invalid params error (-32602)
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(-32602, message)
    }

    /// Standard internal error (-32603)
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(-32603, message)
    }
}

impl fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for JsonRpcError {}

/// HTTP-level failure: a non-2xx status code
///
/// Some servers report JSON-RPC errors with an HTTP error status *and* a
/// perfectly decodable response envelope in the body. Callers need both
/// facts ("the transport exchange failed with status N" and "the server
/// said error code C"), so this type carries the status together with
/// whatever could be recovered from the body:
///
/// - [`response`](HttpError::response): the decoded envelope, when the body
///   parsed as a single JSON-RPC response
/// - [`responses`](HttpError::responses): the decoded envelopes, when the
///   body parsed as a batch response array
/// - [`body`](HttpError::body): the raw body text, when it did not decode
///
/// # Examples
///
/// ```rust
/// use jroh_core::{HttpError, JsonRpcError, JsonRpcResponse};
///
/// let envelope = JsonRpcResponse::error(JsonRpcError::new(123, "bad"), 0);
/// let err = HttpError::new(500).with_response(envelope);
///
/// assert_eq!(err.status, 500);
/// assert_eq!(err.rpc_error().unwrap().code, 123);
/// assert_eq!(err.to_string(), "status code 500: 123: bad");
/// ```
#[derive(Debug, Clone)]
pub struct HttpError {
    /// The HTTP status code (always >= 400 when produced by the client)
    pub status: u16,
    /// Decoded response envelope, when the error body parsed as one
    pub response: Option<JsonRpcResponse>,
    /// Decoded batch envelopes, when the error body parsed as a response array
    pub responses: Option<Vec<JsonRpcResponse>>,
    /// Raw body text, kept when the body did not decode as an envelope
    pub body: Option<String>,
}

impl HttpError {
    /// Create an HTTP error carrying only a status code
    pub fn new(status: u16) -> Self {
        Self {
            status,
            response: None,
            responses: None,
            body: None,
        }
    }

    /// Attach the decoded response envelope recovered from the error body
    pub fn with_response(mut self, response: JsonRpcResponse) -> Self {
        self.response = Some(response);
        self
    }

    /// Attach the decoded batch envelopes recovered from the error body
    pub fn with_responses(mut self, responses: Vec<JsonRpcResponse>) -> Self {
        self.responses = Some(responses);
        self
    }

    /// Attach the raw, undecodable body text
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// The protocol error inside the carried envelope, if there is one
    pub fn rpc_error(&self) -> Option<&JsonRpcError> {
        self.response.as_ref().and_then(|r| r.error.as_ref())
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status code {}", self.status)?;
        if let Some(rpc_error) = self.rpc_error() {
            write!(f, ": {}", rpc_error)?;
        } else if let Some(body) = &self.body {
            write!(f, ": {}", body)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_rpc_error_display() {
        let err = JsonRpcError::new(123, "something wrong");
        assert_eq!(err.to_string(), "123: something wrong");

        let err = JsonRpcError::new(-32601, "Method not found: frobnicate");
        assert_eq!(err.to_string(), "-32601: Method not found: frobnicate");
    }

    #[test]
    fn test_json_rpc_error_with_data() {
        let err = JsonRpcError::with_data(-32602, "bad params", json!({"field": "age"}));
        assert_eq!(err.code, -32602);
        assert_eq!(err.data, Some(json!({"field": "age"})));
    }

    #[test]
    fn test_standard_error_factories() {
        assert_eq!(JsonRpcError::parse_error().code, -32700);
        assert_eq!(JsonRpcError::invalid_request().code, -32600);
        assert_eq!(JsonRpcError::method_not_found("x").code, -32601);
        assert_eq!(JsonRpcError::invalid_params("p").code, -32602);
        assert_eq!(JsonRpcError::internal_error("i").code, -32603);
    }

    #[test]
    fn test_json_rpc_error_serialization_omits_null_data() {
        let err = JsonRpcError::new(1, "no data");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":1,"message":"no data"}"#);
    }

    #[test]
    fn test_json_rpc_error_deserialization() {
        let err: JsonRpcError =
            serde_json::from_str(r#"{"code":-32700,"message":"Parse error"}"#).unwrap();
        assert_eq!(err.code, -32700);
        assert_eq!(err.message, "Parse error");
        assert!(err.data.is_none());
    }

    #[test]
    fn test_http_error_display_plain() {
        let err = HttpError::new(503);
        assert_eq!(err.to_string(), "status code 503");
    }

    #[test]
    fn test_http_error_display_with_rpc_error() {
        let envelope = JsonRpcResponse::error(JsonRpcError::new(123, "something wrong"), 0);
        let err = HttpError::new(500).with_response(envelope);
        assert_eq!(err.to_string(), "status code 500: 123: something wrong");
    }

    #[test]
    fn test_http_error_display_with_raw_body() {
        let err = HttpError::new(500).with_body("Internal Server Error");
        assert_eq!(err.to_string(), "status code 500: Internal Server Error");
    }

    #[test]
    fn test_http_error_carries_envelope() {
        let envelope = JsonRpcResponse::error(JsonRpcError::new(123, "bad"), 7);
        let err = Error::Http(HttpError::new(500).with_response(envelope));

        let carried = err.response().expect("envelope should be attached");
        assert_eq!(carried.id, 7);
        assert_eq!(carried.error.as_ref().unwrap().code, 123);
    }

    #[test]
    fn test_error_from_json_rpc_error() {
        let err: Error = JsonRpcError::new(5, "boom").into();
        assert!(matches!(err, Error::JsonRpc(ref e) if e.code == 5));
        assert_eq!(err.to_string(), "JSON-RPC error: 5: boom");
    }

    #[test]
    fn test_result_type_error_display() {
        let err = Error::ResultType {
            expected: "integer",
            actual: "1.5".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Result type mismatch: expected integer, found 1.5"
        );
    }

    #[test]
    fn test_response_accessor_on_non_http_errors() {
        assert!(Error::Timeout.response().is_none());
        assert!(Error::EmptyResponse.response().is_none());
        assert!(Error::Transport("refused".into()).response().is_none());
    }
}
