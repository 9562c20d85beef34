//! Core JSON-RPC 2.0 building blocks for JROH
//!
//! This crate holds everything about the protocol that does not touch the
//! network: envelope types, the parameter normalization rules, the
//! strict/relaxed response codec, and the error taxonomy. The HTTP client
//! that drives these types lives in `jroh-client`.
//!
//! # Quick Start
//!
//! ```rust
//! use jroh_core::{params, JsonRpcRequest};
//!
//! // The params! macro applies the JSON-RPC wrapping rules: scalars are
//! // wrapped in an array, a single struct/map/vec passes through unwrapped,
//! // zero arguments omit params entirely.
//! let request = JsonRpcRequest::new("addNumbers", params![1, 2], 0);
//!
//! assert_eq!(
//!     serde_json::to_string(&request).unwrap(),
//!     r#"{"jsonrpc":"2.0","method":"addNumbers","params":[1,2],"id":0}"#
//! );
//! ```
//!
//! # Modules
//!
//! - [`types`]: request, notification, and response envelopes plus typed
//!   result accessors
//! - [`params`]: the argument-list-to-`params` normalization rules and the
//!   [`params!`] macro
//! - [`codec`]: JSON encoding and strict/relaxed response decoding
//! - [`error`]: the error taxonomy shared by all jroh crates

pub mod codec;
pub mod error;
pub mod params;
pub mod types;

// Re-export the primary types at the crate root
pub use error::{Error, HttpError, JsonRpcError, Result};
pub use params::Params;
pub use types::{JsonRpcNotification, JsonRpcRequest, JsonRpcResponse};

// Re-exported for the `params!` macro expansion, and handy for callers
// building raw params values.
pub use serde_json::json;
