//! JSON-RPC 2.0 client implementation over HTTP
//!
//! This crate provides a full-featured JSON-RPC 2.0 client that communicates
//! over HTTP POST. It builds conformant request envelopes from ordinary Rust
//! values, manages correlation ids, and exposes typed access to results.
//!
//! # Core Features
//!
//! - **HTTP Transport**: Async POST via a (swappable) `reqwest::Client`
//! - **Params Normalization**: The `params!` macro turns argument lists into
//!   spec-valid `params` values
//! - **Typed Results**: Decode results straight into your own types
//! - **Batch Requests**: Send multiple requests in one HTTP exchange and
//!   correlate the unordered responses by id
//! - **Id Management**: Automatic or frozen ids, with manual override and
//!   refresh for retries
//! - **Strict Decoding**: Unknown response fields rejected by default,
//!   relaxed per client on request
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use jroh_client::JrohClient;
//! use jroh_core::params;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JrohClient::new("http://localhost:8080/rpc")?;
//!
//!     // Single call; the response envelope carries result or error
//!     let response = client.call("addNumbers", params![1, 2]).await?;
//!     println!("sum = {}", response.get_int()?);
//!
//!     // Typed call; protocol errors surface as Err
//!     let date: String = client.call_typed("getDate", params![]).await?;
//!     println!("date = {}", date);
//!
//!     // Fire and forget
//!     client.notify("logEvent", params!["started"]).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Batches
//!
//! ```rust,no_run
//! use jroh_client::{BatchRequest, JrohClient};
//! use jroh_core::params;
//!
//! # async fn example() -> jroh_core::Result<()> {
//! let client = JrohClient::new("http://localhost:8080/rpc")?;
//!
//! let mut batch = BatchRequest::new()
//!     .request("addNumbers", params![1, 2])
//!     .notification("logEvent", params!["batched"])
//!     .request("getDate", params![]);
//!
//! let responses = client.batch(&mut batch).await?;
//! for request in batch.requests() {
//!     println!("{} -> {:?}", request.method, responses.response_for(request)?);
//! }
//! # Ok(())
//! # }
//! ```

mod batch;
mod client;
mod client_builder;
mod id;
mod transport;

pub use batch::{BatchEntry, BatchRequest, BatchResponse};
pub use client::JrohClient;
pub use client_builder::ClientBuilder;
pub use id::IdAllocator;
