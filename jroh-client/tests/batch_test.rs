//! Batch integration tests
//!
//! Tests for batch wire format, position-based id assignment, unordered
//! response correlation, and the raw passthrough variant.

mod common;

use common::MockHttpServer;
use jroh_client::{BatchRequest, JrohClient};
use jroh_core::{params, Error, JsonRpcRequest};

#[tokio::test]
async fn test_batch_wire_format_with_notification() {
    let mut server =
        MockHttpServer::respond_with(200, r#"[{"jsonrpc":"2.0","result":"r1","id":0}]"#).await;
    let client = JrohClient::new(&server.url()).unwrap();

    let mut batch = BatchRequest::new()
        .request("m1", params![])
        .notification("m2", params![]);
    let responses = client.batch(&mut batch).await.unwrap();

    let received = server.wait_for_request().await.unwrap();
    // One array, notification without id, request id = position 0.
    assert_eq!(
        received.body,
        r#"[{"jsonrpc":"2.0","method":"m1","id":0},{"jsonrpc":"2.0","method":"m2"}]"#
    );

    let request = batch.requests().next().unwrap();
    let response = responses.response_for(request).unwrap();
    assert_eq!(response.get_string().unwrap(), "r1");

    server.shutdown().await;
}

#[tokio::test]
async fn test_batch_position_ids_skip_notifications() {
    let mut server = MockHttpServer::respond_with(
        200,
        r#"[{"jsonrpc":"2.0","result":1,"id":0},{"jsonrpc":"2.0","result":2,"id":2}]"#,
    )
    .await;
    let client = JrohClient::new(&server.url()).unwrap();

    let mut batch = BatchRequest::new()
        .request("first", params![])
        .notification("between", params![])
        .request("second", params![]);
    client.batch(&mut batch).await.unwrap();

    let received = server.wait_for_request().await.unwrap();
    let entries: serde_json::Value = serde_json::from_str(&received.body).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["id"], 0);
    assert!(entries[1].get("id").is_none());
    assert_eq!(entries[2]["id"], 2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_batch_correlates_out_of_order_responses() {
    let body = concat!(
        r#"[{"jsonrpc":"2.0","result":"two","id":2},"#,
        r#"{"jsonrpc":"2.0","result":"zero","id":0},"#,
        r#"{"jsonrpc":"2.0","result":"one","id":1}]"#
    );
    let server = MockHttpServer::respond_with(200, body).await;
    let client = JrohClient::new(&server.url()).unwrap();

    let mut batch = BatchRequest::new()
        .request("a", params![])
        .request("b", params![])
        .request("c", params![]);
    let responses = client.batch(&mut batch).await.unwrap();

    // Arrival order differs from request order; the id does the matching.
    let expected = ["zero", "one", "two"];
    for (request, expected) in batch.requests().zip(expected) {
        let response = responses.response_for(request).unwrap();
        assert_eq!(response.get_string().unwrap(), expected);
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_batch_raw_sends_ids_verbatim() {
    let mut server = MockHttpServer::respond_with(
        200,
        r#"[{"jsonrpc":"2.0","result":"a","id":700},{"jsonrpc":"2.0","result":"b","id":800}]"#,
    )
    .await;
    let client = JrohClient::new(&server.url()).unwrap();

    // One prebuilt envelope sent twice; the caller-chosen ids are the only
    // thing telling the two calls apart.
    let template = JsonRpcRequest::new("m1", params![], 0);
    let batch = BatchRequest::new()
        .push(template.clone().with_id(700))
        .push(template.with_id(800));
    let responses = client.batch_raw(&batch).await.unwrap();

    let received = server.wait_for_request().await.unwrap();
    assert!(received.body.contains("\"id\":700"));
    assert!(received.body.contains("\"id\":800"));

    assert_eq!(responses.get(700).unwrap().get_string().unwrap(), "a");
    assert_eq!(responses.get(800).unwrap().get_string().unwrap(), "b");

    server.shutdown().await;
}

#[tokio::test]
async fn test_empty_batch_rejected_before_network() {
    let mut server = MockHttpServer::respond_with(200, "[]").await;
    let client = JrohClient::new(&server.url()).unwrap();

    let mut batch = BatchRequest::new();
    let err = client.batch(&mut batch).await.unwrap_err();
    assert!(matches!(err, Error::EmptyBatch));

    server.assert_no_request().await;
    server.shutdown().await;
}

#[tokio::test]
async fn test_batch_rejects_single_object_response() {
    // Some servers answer a batch with a lone object; that is a shape
    // violation, not a one-element batch.
    let server =
        MockHttpServer::respond_with(200, r#"{"jsonrpc":"2.0","result":1,"id":0}"#).await;
    let client = JrohClient::new(&server.url()).unwrap();

    let mut batch = BatchRequest::new().request("m", params![]);
    let err = client.batch(&mut batch).await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)));

    server.shutdown().await;
}

#[tokio::test]
async fn test_batch_with_error_entries() {
    let body = concat!(
        r#"[{"jsonrpc":"2.0","result":"fine","id":0},"#,
        r#"{"jsonrpc":"2.0","error":{"code":-32601,"message":"Method not found"},"id":1}]"#
    );
    let server = MockHttpServer::respond_with(200, body).await;
    let client = JrohClient::new(&server.url()).unwrap();

    let mut batch = BatchRequest::new()
        .request("good", params![])
        .request("bad", params![]);
    let responses = client.batch(&mut batch).await.unwrap();

    assert!(responses.has_error());
    let failed = responses.get(1).unwrap();
    assert!(failed.is_error());
    assert_eq!(failed.error.as_ref().unwrap().code, -32601);
    let ok = responses.get(0).unwrap();
    assert!(ok.is_success());

    server.shutdown().await;
}

#[tokio::test]
async fn test_batch_ids_restart_at_position_zero_per_batch() {
    let mut server = MockHttpServer::respond_with(
        200,
        r#"[{"jsonrpc":"2.0","result":1,"id":0}]"#,
    )
    .await;
    let client = JrohClient::new(&server.url()).unwrap();

    // Two batches in a row: position ids are per batch, independent of the
    // single-call allocator.
    for _ in 0..2 {
        let mut batch = BatchRequest::new().request("m", params![]);
        client.batch(&mut batch).await.unwrap();
        let received = server.wait_for_request().await.unwrap();
        assert!(received.body.contains("\"id\":0"));
    }
    assert_eq!(client.next_request_id(), 0);

    server.shutdown().await;
}
