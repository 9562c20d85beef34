//! JROH - JSON-RPC 2.0 Over HTTP
//!
//! This is the main convenience crate that re-exports all JROH sub-crates.
//! Use this crate if you want a single dependency that provides the client
//! and the underlying protocol types.
//!
//! # Architecture
//!
//! JROH is organized into modular crates:
//!
//! - **jroh-core**: Envelope types, parameter normalization, codec, errors
//! - **jroh-client**: HTTP JSON-RPC client with batching and id management
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use jroh::JrohClient;
//! use jroh::params;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JrohClient::new("http://localhost:8080/rpc")?;
//!
//!     let response = client.call("addNumbers", params![3, 4]).await?;
//!     println!("sum = {}", response.get_int()?);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Quick Start - Batch
//!
//! ```rust,no_run
//! use jroh::{BatchRequest, JrohClient};
//! use jroh::params;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JrohClient::new("http://localhost:8080/rpc")?;
//!
//!     let mut batch = BatchRequest::new()
//!         .request("addNumbers", params![1, 2])
//!         .request("getDate", params![]);
//!
//!     let responses = client.batch(&mut batch).await?;
//!     for request in batch.requests() {
//!         println!("{} -> {:?}", request.method, responses.response_for(request)?.result);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all public APIs from sub-crates
// This allows users to access everything through `jroh::` prefix
pub use jroh_client as client;
pub use jroh_core as core;

// Convenience re-exports of the most commonly used types
// This avoids needing to write `jroh::client::JrohClient`
pub use jroh_client::{BatchRequest, BatchResponse, JrohClient};
pub use jroh_core::{
    params, Error, HttpError, JsonRpcError, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
    Params, Result,
};
