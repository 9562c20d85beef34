//! JSON-RPC 2.0 envelope types for HTTP transport
//!
//! This module implements the three message shapes exchanged with a remote
//! JSON-RPC 2.0 service (https://www.jsonrpc.org/specification):
//!
//! 1. **Request**: a call that expects a response, correlated by `id`
//! 2. **Notification**: a call with no `id` and no response expected
//! 3. **Response**: the result of processing a request (success or error)
//!
//! # Request IDs
//!
//! Identifiers here are plain integers. The client allocates them
//! sequentially by default, and in batch mode they are the only way to match
//! a response back to its request, because servers may answer a batch in any
//! order.
//!
//! # Decoding Tolerance
//!
//! Response decoding is deliberately forgiving about *presence*: servers in
//! the wild omit `jsonrpc`, omit `id`, or send both `result` and `error` as
//! null, and the error reply to an unparseable request carries `"id": null`
//! per spec. All of those decode cleanly (missing or nulled fields default
//! to `""`, `0`, and `None`). Strictness about *unknown* fields is a
//! separate, configurable concern handled by [`crate::codec`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, JsonRpcError, Result};
use crate::params::Params;

/// JSON-RPC 2.0 request message
///
/// A request represents a call to a remote method that expects a response.
/// The response will carry a matching `id` field to correlate with this
/// request.
///
/// # Spec Compliance
///
/// Per the JSON-RPC 2.0 spec a request MUST contain `jsonrpc` (exactly
/// `"2.0"`), `method`, and `id`, and MAY contain `params`. When `params` is
/// present it must be an array or an object, never a bare scalar; the
/// [`Params`] type enforces that shape at construction.
///
/// # Mutability
///
/// All fields are public: `id` in particular stays mutable until the request
/// is sent, which is what makes retry flows possible (refresh the id, send
/// the same envelope again).
///
/// # Examples
///
/// ```rust
/// use jroh_core::{params, JsonRpcRequest};
///
/// let request = JsonRpcRequest::new("addNumbers", params![1, 2], 0);
/// assert_eq!(request.jsonrpc, "2.0");
/// assert_eq!(
///     serde_json::to_string(&request).unwrap(),
///     r#"{"jsonrpc":"2.0","method":"addNumbers","params":[1,2],"id":0}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version - always "2.0" for this specification
    pub jsonrpc: String,
    /// Name of the remote method to invoke
    pub method: String,
    /// Normalized parameters; skipped in JSON when None
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub params: Option<Value>,
    /// Correlation identifier for matching the response
    pub id: i64,
}

impl JsonRpcRequest {
    /// Create a new JSON-RPC 2.0 request
    ///
    /// The `jsonrpc` field is automatically set to "2.0" per the
    /// specification.
    ///
    /// # Arguments
    ///
    /// * `method` - The name of the method to invoke on the remote server
    /// * `params` - Normalized parameters (use `Params::none()` or `params![]`
    ///   if the method takes none)
    /// * `id` - Correlation identifier
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jroh_core::{JsonRpcRequest, Params};
    ///
    /// let request = JsonRpcRequest::new("ping", Params::none(), 1);
    /// assert_eq!(request.method, "ping");
    /// assert!(request.params.is_none());
    /// ```
    pub fn new(method: impl Into<String>, params: Params, id: i64) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.into(),
            params: params.into_value(),
            id,
        }
    }

    /// Replace the correlation id, consuming and returning the request
    ///
    /// Handy when resubmitting a prebuilt envelope through a raw-call path
    /// under an explicit id:
    ///
    /// ```rust
    /// use jroh_core::{params, JsonRpcRequest};
    ///
    /// let template = JsonRpcRequest::new("getPerson", params![4711], 0);
    /// let request = template.clone().with_id(7);
    /// assert_eq!(request.id, 7);
    /// assert_eq!(template.id, 0);
    /// ```
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }
}

/// JSON-RPC 2.0 notification message
///
/// A notification is like a request, but crucially **does not expect a
/// response**. This is signaled by the absence of an `id` field, absent
/// entirely from the serialized JSON rather than merely null. Per spec the
/// server must not reply, even with an error.
///
/// # Examples
///
/// ```rust
/// use jroh_core::{params, JsonRpcNotification};
///
/// let notification = JsonRpcNotification::new("logEvent", params!["user login"]);
/// let json = serde_json::to_string(&notification).unwrap();
/// assert_eq!(
///     json,
///     r#"{"jsonrpc":"2.0","method":"logEvent","params":["user login"]}"#
/// );
/// assert!(!json.contains("\"id\""));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    /// JSON-RPC version - always "2.0"
    pub jsonrpc: String,
    /// Name of the remote method to invoke
    pub method: String,
    /// Normalized parameters; skipped in JSON when None
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub params: Option<Value>,
}

impl JsonRpcNotification {
    /// Create a new JSON-RPC 2.0 notification
    pub fn new(method: impl Into<String>, params: Params) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.into(),
            params: params.into_value(),
        }
    }
}

/// JSON-RPC 2.0 response message
///
/// Logically `result` and `error` are mutually exclusive, but decoding never
/// rejects an envelope solely for violating that: some servers send both as
/// null, or omit `id` and `jsonrpc` entirely, and the reply to an
/// unparseable request carries `"id": null` by definition. Missing and
/// nulled fields decode to their defaults so such responses remain usable.
///
/// # Reading Results
///
/// The raw result is available as `response.result`; the typed accessors
/// ([`get_int`](Self::get_int), [`get_float`](Self::get_float),
/// [`get_bool`](Self::get_bool), [`get_string`](Self::get_string),
/// [`get_object`](Self::get_object)) extract it with shape checking. Wire
/// numbers keep their integer/float distinction until an accessor asks:
/// `42` satisfies both `get_int` and `get_float`, while `1.5` satisfies only
/// `get_float`.
///
/// # Examples
///
/// ```rust
/// use jroh_core::JsonRpcResponse;
/// use serde_json::json;
///
/// let response = JsonRpcResponse::success(json!(42), 1);
/// assert!(response.is_success());
/// assert_eq!(response.get_int().unwrap(), 42);
/// assert_eq!(response.get_float().unwrap(), 42.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version; defaults to "" when a server omits or nulls it
    #[serde(default, deserialize_with = "null_to_default")]
    pub jsonrpc: String,
    /// Successful result value; None when absent or null
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub result: Option<Value>,
    /// Protocol error reported by the server; None when absent or null
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<JsonRpcError>,
    /// Correlation identifier; defaults to 0 when a server omits or nulls it
    #[serde(default, deserialize_with = "null_to_default")]
    pub id: i64,
}

/// Deserialize a field treating an explicit JSON `null` as the default
///
/// `#[serde(default)]` alone only covers an *absent* key. The error reply
/// to an unparseable or invalid request is required to carry `"id": null`,
/// so `id` (and `jsonrpc`, which some servers null out too) must accept a
/// present-but-null value.
pub(crate) fn null_to_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl JsonRpcResponse {
    /// Create a successful response
    pub fn success(result: Value, id: i64) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Create an error response
    pub fn error(error: JsonRpcError, id: i64) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }

    /// Check if this response carries a result and no error
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Check if this response carries a protocol error
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The result value, with an absent result read as JSON null
    fn result_value(&self) -> &Value {
        self.result.as_ref().unwrap_or(&Value::Null)
    }

    /// Extract the result as an `i64`
    ///
    /// Fails when the result is absent, not a number, or a number with a
    /// fractional representation (`1.5` is not an integer, `42` is).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jroh_core::JsonRpcResponse;
    /// use serde_json::json;
    ///
    /// assert_eq!(JsonRpcResponse::success(json!(42), 0).get_int().unwrap(), 42);
    /// assert!(JsonRpcResponse::success(json!(1.5), 0).get_int().is_err());
    /// ```
    pub fn get_int(&self) -> Result<i64> {
        match self.result_value() {
            Value::Number(n) => n.as_i64().ok_or_else(|| Error::ResultType {
                expected: "integer",
                actual: n.to_string(),
            }),
            other => Err(Error::ResultType {
                expected: "integer",
                actual: other.to_string(),
            }),
        }
    }

    /// Extract the result as an `f64`
    ///
    /// Succeeds for both integer and floating-point wire values.
    pub fn get_float(&self) -> Result<f64> {
        match self.result_value() {
            Value::Number(n) => n.as_f64().ok_or_else(|| Error::ResultType {
                expected: "float",
                actual: n.to_string(),
            }),
            other => Err(Error::ResultType {
                expected: "float",
                actual: other.to_string(),
            }),
        }
    }

    /// Extract the result as a `bool`
    pub fn get_bool(&self) -> Result<bool> {
        match self.result_value() {
            Value::Bool(b) => Ok(*b),
            other => Err(Error::ResultType {
                expected: "boolean",
                actual: other.to_string(),
            }),
        }
    }

    /// Extract the result as a `String`
    pub fn get_string(&self) -> Result<String> {
        match self.result_value() {
            Value::String(s) => Ok(s.clone()),
            other => Err(Error::ResultType {
                expected: "string",
                actual: other.to_string(),
            }),
        }
    }

    /// Deserialize the result into an arbitrary target type
    ///
    /// An absent result deserializes as JSON `null`, so optional targets
    /// (`Option<T>`) decode to `None` instead of failing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jroh_core::JsonRpcResponse;
    /// use serde::Deserialize;
    /// use serde_json::json;
    ///
    /// #[derive(Deserialize)]
    /// struct Person {
    ///     name: String,
    ///     age: u32,
    /// }
    ///
    /// let response = JsonRpcResponse::success(json!({"name": "Alex", "age": 33}), 1);
    /// let person: Person = response.get_object().unwrap();
    /// assert_eq!(person.name, "Alex");
    /// assert_eq!(person.age, 33);
    /// ```
    pub fn get_object<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.result_value().clone())
            .map_err(|e| Error::Decode(format!("could not decode result: {}", e)))
    }
}
