//! Batch request building and response correlation
//!
//! JSON-RPC 2.0 batches pack several requests and notifications into one
//! JSON array sent in a single HTTP exchange. The server replies with an
//! array of responses whose order is **not** guaranteed to match the request
//! order; the only reliable link is the correlation id. This module owns
//! both halves: [`BatchRequest`] assembles the outgoing array,
//! [`BatchResponse`] answers "which of these responses belongs to request
//! X?" afterwards.
//!
//! # Id Assignment
//!
//! [`JrohClient::batch`](crate::JrohClient::batch) rewrites each request's
//! id to its position in the entry list right before sending (notifications
//! occupy positions but never get an id). The raw variant
//! [`batch_raw`](crate::JrohClient::batch_raw) sends every envelope exactly
//! as built, useful when the caller manages ids, at the price of having to
//! keep them unique.

use std::collections::HashMap;
use std::ops::Index;

use jroh_core::{Error, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, Params, Result};
use serde::Serialize;

/// One element of an outgoing batch: a request or a notification
///
/// Serialized untagged, so the wire sees the plain envelope. The closed enum
/// is what makes "a batch element of an unrecognized kind" unrepresentable:
/// shape validation happens at compile time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    /// A call expecting a correlated response
    Request(JsonRpcRequest),
    /// A fire-and-forget call; serializes without an id
    Notification(JsonRpcNotification),
}

impl BatchEntry {
    /// Borrow the inner request, if this entry is one
    pub fn as_request(&self) -> Option<&JsonRpcRequest> {
        match self {
            BatchEntry::Request(request) => Some(request),
            BatchEntry::Notification(_) => None,
        }
    }
}

impl From<JsonRpcRequest> for BatchEntry {
    fn from(request: JsonRpcRequest) -> Self {
        BatchEntry::Request(request)
    }
}

impl From<JsonRpcNotification> for BatchEntry {
    fn from(notification: JsonRpcNotification) -> Self {
        BatchEntry::Notification(notification)
    }
}

/// Ordered collection of envelopes to send as one JSON array
///
/// Insertion order is wire order. Requests added through
/// [`request`](Self::request) carry a placeholder id of 0 until the client's
/// batch send assigns position-based ids; prebuilt envelopes (for
/// [`batch_raw`](crate::JrohClient::batch_raw)) enter through
/// [`push`](Self::push) with whatever the caller chose.
///
/// # Examples
///
/// ```rust
/// use jroh_client::BatchRequest;
/// use jroh_core::params;
///
/// let batch = BatchRequest::new()
///     .request("addNumbers", params![1, 2])
///     .notification("logEvent", params!["batched"])
///     .request("getDate", params![]);
///
/// assert_eq!(batch.len(), 3);
/// assert_eq!(batch.requests().count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchRequest {
    entries: Vec<BatchEntry>,
}

impl BatchRequest {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request; its id is assigned at send time
    pub fn request(mut self, method: &str, params: Params) -> Self {
        self.entries
            .push(BatchEntry::Request(JsonRpcRequest::new(method, params, 0)));
        self
    }

    /// Append a notification
    pub fn notification(mut self, method: &str, params: Params) -> Self {
        self.entries
            .push(BatchEntry::Notification(JsonRpcNotification::new(
                method, params,
            )));
        self
    }

    /// Append a prebuilt envelope
    pub fn push(mut self, entry: impl Into<BatchEntry>) -> Self {
        self.entries.push(entry.into());
        self
    }

    /// Number of envelopes in the batch
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the batch holds no envelopes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The envelopes in wire order
    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    /// Iterate over the request envelopes (skipping notifications)
    ///
    /// After [`JrohClient::batch`](crate::JrohClient::batch) has assigned
    /// ids, these are the envelopes to correlate responses against.
    pub fn requests(&self) -> impl Iterator<Item = &JsonRpcRequest> + '_ {
        self.entries.iter().filter_map(BatchEntry::as_request)
    }

    /// Assign position-based ids and pin the protocol version
    ///
    /// Each request's id becomes its index in the entry list; notifications
    /// keep their id-less shape but still occupy an index. Every request's
    /// `jsonrpc` field is reset to "2.0", so envelopes recycled from odd
    /// sources go out conformant.
    pub(crate) fn assign_ids(&mut self) {
        for (position, entry) in self.entries.iter_mut().enumerate() {
            if let BatchEntry::Request(request) = entry {
                request.id = position as i64;
                request.jsonrpc = "2.0".to_string();
            }
        }
    }
}

/// Responses to a batch, in arrival order, with id-based lookup
///
/// Servers may answer a batch in any order, so position means nothing;
/// correlation goes through the id. The arrival order is preserved for
/// callers that want to iterate or index anyway.
///
/// # Examples
///
/// ```rust
/// use jroh_client::BatchResponse;
/// use jroh_core::{JsonRpcRequest, JsonRpcResponse, Params};
/// use serde_json::json;
///
/// // Responses arrived reversed relative to the requests.
/// let batch = BatchResponse::new(vec![
///     JsonRpcResponse::success(json!("second"), 1),
///     JsonRpcResponse::success(json!("first"), 0),
/// ]);
///
/// let request = JsonRpcRequest::new("m", Params::none(), 0);
/// let response = batch.response_for(&request).unwrap();
/// assert_eq!(response.get_string().unwrap(), "first");
/// ```
#[derive(Debug, Clone)]
pub struct BatchResponse {
    responses: Vec<JsonRpcResponse>,
}

impl BatchResponse {
    /// Wrap a decoded response array
    pub fn new(responses: Vec<JsonRpcResponse>) -> Self {
        Self { responses }
    }

    /// The response correlated to the given request
    ///
    /// Linear search by `response.id == request.id`; fails with
    /// [`Error::ResponseNotFound`] when the server answered the batch
    /// without this id.
    pub fn response_for(&self, request: &JsonRpcRequest) -> Result<&JsonRpcResponse> {
        self.get(request.id)
            .ok_or(Error::ResponseNotFound(request.id))
    }

    /// The response with the given id, if present
    pub fn get(&self, id: i64) -> Option<&JsonRpcResponse> {
        self.responses.iter().find(|response| response.id == id)
    }

    /// Build an id-keyed lookup for repeated queries
    ///
    /// Keys are unique; if a misbehaving server sent duplicate ids, the last
    /// arrival wins.
    pub fn as_map(&self) -> HashMap<i64, &JsonRpcResponse> {
        self.responses
            .iter()
            .map(|response| (response.id, response))
            .collect()
    }

    /// True iff any response in the batch carries a protocol error
    pub fn has_error(&self) -> bool {
        self.responses.iter().any(|response| response.error.is_some())
    }

    /// Number of responses received
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// True when the server sent no responses
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Iterate in arrival order
    pub fn iter(&self) -> std::slice::Iter<'_, JsonRpcResponse> {
        self.responses.iter()
    }

    /// The responses in arrival order
    pub fn responses(&self) -> &[JsonRpcResponse] {
        &self.responses
    }
}

impl Index<usize> for BatchResponse {
    type Output = JsonRpcResponse;

    fn index(&self, index: usize) -> &JsonRpcResponse {
        &self.responses[index]
    }
}

impl IntoIterator for BatchResponse {
    type Item = JsonRpcResponse;
    type IntoIter = std::vec::IntoIter<JsonRpcResponse>;

    fn into_iter(self) -> Self::IntoIter {
        self.responses.into_iter()
    }
}

impl<'a> IntoIterator for &'a BatchResponse {
    type Item = &'a JsonRpcResponse;
    type IntoIter = std::slice::Iter<'a, JsonRpcResponse>;

    fn into_iter(self) -> Self::IntoIter {
        self.responses.iter()
    }
}
