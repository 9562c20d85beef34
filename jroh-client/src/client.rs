//! JSON-RPC client implementation over HTTP
//!
//! This module provides the main `JrohClient` type, which owns the endpoint
//! configuration and provides methods for making calls, sending
//! notifications, and dispatching batches.
//!
//! # Client Lifecycle
//!
//! 1. **Build**: Construct once via [`JrohClient::new`] or the builder
//! 2. **Use**: Make calls from any number of tasks
//! 3. **Reconfigure** (optional): Swap headers, credentials, or the HTTP
//!    client between calls
//! 4. **Drop**: No shutdown step; in-flight calls end when their futures do
//!
//! # Cloning
//!
//! `JrohClient` is cheaply cloneable using `Arc` internally. All clones
//! share the same configuration and id counter, so ids stay unique across
//! clones.
//!
//! # Thread Safety
//!
//! The client is fully thread-safe and can be shared across tasks without
//! additional synchronization.

use std::sync::Arc;

use jroh_core::{
    codec, Error, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, Params, Result,
};
use serde::de::DeserializeOwned;
use url::Url;

use crate::batch::{BatchEntry, BatchRequest, BatchResponse};
use crate::client_builder::ClientBuilder;
use crate::id::IdAllocator;
use crate::transport::HttpTransport;

/// JSON-RPC 2.0 client over HTTP
///
/// Every call POSTs one JSON body to the configured endpoint and decodes the
/// reply. The client holds no connection state of its own; pooling and
/// keep-alive live inside the underlying `reqwest::Client`.
#[derive(Clone)]
pub struct JrohClient {
    /// Endpoint, HTTP client, headers, and credentials
    transport: Arc<HttpTransport>,
    /// Correlation id counter shared by all clones
    ids: IdAllocator,
}

impl JrohClient {
    /// Create a client with default configuration
    ///
    /// Defaults: fresh `reqwest::Client`, no custom headers, no
    /// authentication, strict response decoding, ids starting at 0 with
    /// autoincrement on. Use [`JrohClient::builder`] to change any of these.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use jroh_client::JrohClient;
    /// use jroh_core::params;
    ///
    /// #[tokio::main]
    /// async fn main() -> jroh_core::Result<()> {
    ///     let client = JrohClient::new("http://localhost:8080/rpc")?;
    ///     let response = client.call("addNumbers", params![1, 2]).await?;
    ///     println!("sum = {}", response.get_int()?);
    ///     Ok(())
    /// }
    /// ```
    pub fn new(endpoint: &str) -> Result<Self> {
        ClientBuilder::new(endpoint).build()
    }

    /// Start building a client with custom configuration
    pub fn builder(endpoint: &str) -> ClientBuilder {
        ClientBuilder::new(endpoint)
    }

    pub(crate) fn from_parts(transport: HttpTransport, ids: IdAllocator) -> Self {
        Self {
            transport: Arc::new(transport),
            ids,
        }
    }

    /// The endpoint this client POSTs to
    pub fn endpoint(&self) -> &Url {
        self.transport.endpoint()
    }

    /// Send a JSON-RPC call and return the decoded response
    ///
    /// The request id comes from the client's allocator. A populated
    /// `error` field in the response is *not* an `Err` here; the envelope is
    /// returned for the caller to branch on (use [`call_typed`] to have
    /// protocol errors surfaced as errors instead).
    ///
    /// [`call_typed`]: Self::call_typed
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use jroh_client::JrohClient;
    /// # use jroh_core::params;
    /// # async fn example() -> jroh_core::Result<()> {
    /// # let client = JrohClient::new("http://localhost:8080/rpc")?;
    /// let response = client.call("getPerson", params![4711]).await?;
    /// if let Some(error) = &response.error {
    ///     eprintln!("server said no: {}", error);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip(self, params), fields(method = %method.as_ref()))]
    pub async fn call(
        &self,
        method: impl Into<String> + AsRef<str>,
        params: Params,
    ) -> Result<JsonRpcResponse> {
        let request = JsonRpcRequest::new(method, params, self.ids.allocate());
        let payload = codec::encode(&request)?;

        tracing::debug!(id = request.id, "Sending call");
        let response = self.transport.post_single(payload).await?;
        tracing::debug!(id = response.id, "Call completed");

        Ok(response)
    }

    /// Send a prebuilt request envelope exactly as given
    ///
    /// No id is allocated and nothing is normalized; the caller controls
    /// every field, including a nonstandard `jsonrpc` value. Pair with
    /// [`refresh_id`](Self::refresh_id) when resubmitting the same envelope.
    pub async fn call_raw(&self, request: &JsonRpcRequest) -> Result<JsonRpcResponse> {
        let payload = codec::encode(request)?;
        self.transport.post_single(payload).await
    }

    /// Send a call and deserialize its result into `T`
    ///
    /// A response carrying a protocol error becomes `Error::JsonRpc` rather
    /// than a decode failure, so the server's code and message survive.
    /// An absent result deserializes as JSON `null`; target `Option<T>` when
    /// the method may legitimately return nothing.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use jroh_client::JrohClient;
    /// # use jroh_core::params;
    /// # use serde::Deserialize;
    /// #[derive(Deserialize)]
    /// struct Person {
    ///     name: String,
    ///     age: u8,
    /// }
    ///
    /// # async fn example() -> jroh_core::Result<()> {
    /// # let client = JrohClient::new("http://localhost:8080/rpc")?;
    /// let person: Person = client.call_typed("getPerson", params![4711]).await?;
    /// println!("{} is {}", person.name, person.age);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call_typed<T>(
        &self,
        method: impl Into<String> + AsRef<str>,
        params: Params,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let method = method.into();
        let response = self.call(method.as_str(), params).await?;

        if let Some(error) = &response.error {
            tracing::error!(method = %method, error = %error, "Call failed with protocol error");
            return Err(Error::JsonRpc(error.clone()));
        }

        response.get_object()
    }

    /// Send a JSON-RPC notification (no response expected)
    ///
    /// The envelope carries no id and any response body the server sends is
    /// discarded undecoded. Transport failures and HTTP error statuses are
    /// still reported.
    pub async fn notify(&self, method: impl Into<String>, params: Params) -> Result<()> {
        let notification = JsonRpcNotification::new(method, params);
        let payload = codec::encode(&notification)?;
        self.transport.post_notification(payload).await
    }

    /// Send a batch, assigning each request an id equal to its position
    ///
    /// The batch is mutated in place: every request's id becomes its index
    /// in the entry list and its `jsonrpc` field is pinned to "2.0". Keep
    /// the batch around after sending; its envelopes are what
    /// [`BatchResponse::response_for`] correlates against.
    ///
    /// Fails with [`Error::EmptyBatch`] before any network traffic when the
    /// batch holds no envelopes.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use jroh_client::{BatchRequest, JrohClient};
    /// # use jroh_core::params;
    /// # async fn example() -> jroh_core::Result<()> {
    /// # let client = JrohClient::new("http://localhost:8080/rpc")?;
    /// let mut batch = BatchRequest::new()
    ///     .request("addNumbers", params![1, 2])
    ///     .request("getDate", params![]);
    ///
    /// let responses = client.batch(&mut batch).await?;
    /// for request in batch.requests() {
    ///     let response = responses.response_for(request)?;
    ///     println!("{} -> {:?}", request.method, response.result);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip(self, batch), fields(batch_size = batch.len()))]
    pub async fn batch(&self, batch: &mut BatchRequest) -> Result<BatchResponse> {
        if batch.is_empty() {
            return Err(Error::EmptyBatch);
        }
        batch.assign_ids();
        self.send_batch(batch.entries()).await
    }

    /// Send a batch exactly as built, without touching any ids
    ///
    /// The raw sibling of [`batch`](Self::batch): envelopes go out verbatim,
    /// so the caller is responsible for keeping request ids unique within
    /// the batch. An empty batch is rejected the same way.
    #[tracing::instrument(skip(self, batch), fields(batch_size = batch.len()))]
    pub async fn batch_raw(&self, batch: &BatchRequest) -> Result<BatchResponse> {
        if batch.is_empty() {
            return Err(Error::EmptyBatch);
        }
        self.send_batch(batch.entries()).await
    }

    async fn send_batch(&self, entries: &[BatchEntry]) -> Result<BatchResponse> {
        let payload = codec::encode(entries)?;
        let responses = self.transport.post_batch(payload).await?;
        tracing::debug!(response_count = responses.len(), "Batch completed");
        Ok(BatchResponse::new(responses))
    }

    /// Insert or overwrite a custom header sent with every request
    ///
    /// Later sets for the same name overwrite. Custom headers are applied
    /// after the `Content-Type`/`Accept` defaults and may override them;
    /// setting `Host` overrides the request authority.
    pub fn set_header(&self, name: &str, value: &str) -> Result<()> {
        self.transport.set_header(name, value)
    }

    /// Attach basic-auth credentials to every subsequent request
    pub fn set_basic_auth(&self, username: &str, password: Option<&str>) {
        self.transport.set_basic_auth(username, password);
    }

    /// Replace the underlying HTTP client
    ///
    /// The way to apply reqwest-level policy after construction: timeouts,
    /// proxies, TLS settings. Takes effect on the next call.
    pub fn set_http_client(&self, client: reqwest::Client) {
        self.transport.set_http_client(client);
    }

    /// Toggle automatic id advancement
    ///
    /// With autoincrement off, every subsequent call reuses the current
    /// counter value until [`set_next_id`](Self::set_next_id) or re-enabling.
    pub fn set_auto_increment(&self, enabled: bool) {
        self.ids.set_auto_increment(enabled);
    }

    /// Overwrite the id the next call will use
    pub fn set_next_id(&self, id: i64) {
        self.ids.set_next(id);
    }

    /// The id the next call would be assigned, without consuming it
    pub fn next_request_id(&self) -> i64 {
        self.ids.peek()
    }

    /// Assign a fresh id to an already-built request
    ///
    /// For retry flows around [`call_raw`](Self::call_raw): refresh before
    /// resubmitting so the retry is distinguishable from the original.
    pub fn refresh_id(&self, request: &mut JsonRpcRequest) {
        self.ids.refresh_id(request);
    }
}

impl std::fmt::Debug for JrohClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JrohClient")
            .field("endpoint", &self.transport.endpoint().as_str())
            .field("next_id", &self.ids.peek())
            .finish()
    }
}
