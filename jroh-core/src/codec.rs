//! JSON codec for response envelopes with strict and relaxed decoding
//!
//! Encoding is plain serde. Decoding has one twist: unknown fields in a
//! response envelope are rejected by default, as a guard against talking to
//! something that is not actually a JSON-RPC 2.0 endpoint, but a client can
//! opt out for servers that decorate their responses with extra members.
//!
//! Rust's `#[serde(deny_unknown_fields)]` is a compile-time attribute, so
//! runtime-switchable strictness is implemented with a pair of decode paths:
//! the relaxed path deserializes straight into [`JsonRpcResponse`], the
//! strict path goes through private mirror structs carrying the attribute
//! (including the nested error object, which is checked just as strictly).
//!
//! # Null Bodies
//!
//! A body consisting of literal JSON `null` decodes to `Ok(None)` rather
//! than an error, letting the transport distinguish "the server sent
//! nothing usable" from "the server sent an envelope with a null result";
//! those are different failure classes.
//!
//! # Examples
//!
//! ```rust
//! use jroh_core::codec;
//!
//! let body = r#"{"jsonrpc":"2.0","result":42,"id":1}"#;
//! let response = codec::decode_response(body, false).unwrap().unwrap();
//! assert_eq!(response.get_int().unwrap(), 42);
//!
//! // Unknown fields fail closed by default...
//! let decorated = r#"{"jsonrpc":"2.0","result":42,"id":1,"vendor":"x"}"#;
//! assert!(codec::decode_response(decorated, false).is_err());
//! // ...and are tolerated on request.
//! assert!(codec::decode_response(decorated, true).is_ok());
//! ```

use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::JsonRpcResponse;

/// Encode a message (request, notification, batch array) to a JSON string
pub fn encode<T: Serialize + ?Sized>(message: &T) -> Result<String> {
    serde_json::to_string(message).map_err(|e| Error::Serialization(e.to_string()))
}

/// Decode a single response envelope from a JSON body
///
/// Returns `Ok(None)` when the body is literal `null`. With
/// `allow_unknown_fields` false (the default posture), any member outside
/// the envelope schema, at the top level or inside the error object, fails
/// the decode.
pub fn decode_response(data: &str, allow_unknown_fields: bool) -> Result<Option<JsonRpcResponse>> {
    if allow_unknown_fields {
        serde_json::from_str::<Option<JsonRpcResponse>>(data)
            .map_err(|e| Error::Decode(e.to_string()))
    } else {
        let response: Option<strict::Response> =
            serde_json::from_str(data).map_err(|e| Error::Decode(e.to_string()))?;
        Ok(response.map(JsonRpcResponse::from))
    }
}

/// Decode a batch response array from a JSON body
///
/// Returns `Ok(None)` for a literal `null` body. A single response object
/// where an array was expected is a decode error: a server that answers a
/// batch with a bare object is not speaking batch JSON-RPC.
pub fn decode_batch(
    data: &str,
    allow_unknown_fields: bool,
) -> Result<Option<Vec<JsonRpcResponse>>> {
    if allow_unknown_fields {
        serde_json::from_str::<Option<Vec<JsonRpcResponse>>>(data)
            .map_err(|e| Error::Decode(e.to_string()))
    } else {
        let responses: Option<Vec<strict::Response>> =
            serde_json::from_str(data).map_err(|e| Error::Decode(e.to_string()))?;
        Ok(responses.map(|list| list.into_iter().map(JsonRpcResponse::from).collect()))
    }
}

/// Mirror structs for the strict decode path.
///
/// Same fields and defaults as the public envelope, plus
/// `deny_unknown_fields`. Kept private so the public API has exactly one
/// response type.
mod strict {
    use serde::Deserialize;
    use serde_json::Value;

    use crate::error::JsonRpcError;
    use crate::types::JsonRpcResponse;

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    pub(super) struct Response {
        #[serde(default, deserialize_with = "crate::types::null_to_default")]
        pub jsonrpc: String,
        #[serde(default)]
        pub result: Option<Value>,
        #[serde(default)]
        pub error: Option<ErrorObject>,
        #[serde(default, deserialize_with = "crate::types::null_to_default")]
        pub id: i64,
    }

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    pub(super) struct ErrorObject {
        #[serde(default)]
        pub code: i64,
        #[serde(default)]
        pub message: String,
        #[serde(default)]
        pub data: Option<Value>,
    }

    impl From<Response> for JsonRpcResponse {
        fn from(r: Response) -> Self {
            JsonRpcResponse {
                jsonrpc: r.jsonrpc,
                result: r.result,
                error: r.error.map(JsonRpcError::from),
                id: r.id,
            }
        }
    }

    impl From<ErrorObject> for JsonRpcError {
        fn from(e: ErrorObject) -> Self {
            JsonRpcError {
                code: e.code,
                message: e.message,
                data: e.data,
            }
        }
    }
}
