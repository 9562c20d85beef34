//! Common test utilities for jroh-client integration tests
//!
//! This module provides a reusable mock HTTP server and helpers for testing
//! client behavior without a real JSON-RPC endpoint.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// One HTTP request as the mock server saw it
///
/// Header names are lowercased so tests can look them up without caring how
/// the client capitalized them.
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ReceivedRequest {
    /// Convenience lookup by (case-insensitive) header name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// What the mock server answers with
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
}

impl MockResponse {
    /// A 200 response with the given body
    pub fn ok(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }

    /// A response with an explicit status code
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
        }
    }

    /// Hold the response back for the given duration (timeout tests)
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Mock HTTP server for client testing
///
/// Accepts plain HTTP/1.1 POSTs, hands each parsed request to a handler for
/// the response, and forwards a copy to the test over a channel for
/// assertions on the wire format.
pub struct MockHttpServer {
    addr: SocketAddr,
    shutdown_tx: mpsc::Sender<()>,
    request_rx: Option<mpsc::Receiver<ReceivedRequest>>,
}

impl MockHttpServer {
    /// Start a server answering every request with the same status and body
    pub async fn respond_with(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::with_handler(move |_| MockResponse::status(status, body.clone())).await
    }

    /// Start a mock server with a custom request handler
    pub async fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&ReceivedRequest) -> MockResponse + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let (request_tx, request_rx) = mpsc::channel::<ReceivedRequest>(100);
        let handler: Arc<dyn Fn(&ReceivedRequest) -> MockResponse + Send + Sync> =
            Arc::new(handler);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                    accept_result = listener.accept() => {
                        if let Ok((stream, _)) = accept_result {
                            let request_tx = request_tx.clone();
                            let handler = Arc::clone(&handler);

                            tokio::spawn(async move {
                                if let Some((stream, request)) = read_http_request(stream).await {
                                    let response = handler(&request);
                                    let _ = request_tx.send(request).await;
                                    write_http_response(stream, response).await;
                                }
                            });
                        }
                    }
                }
            }
        });

        // Wait a bit for server to be ready
        tokio::time::sleep(Duration::from_millis(50)).await;

        Self {
            addr,
            shutdown_tx,
            request_rx: Some(request_rx),
        }
    }

    /// Get the HTTP URL for reaching this server
    pub fn url(&self) -> String {
        format!("http://{}/rpc", self.addr)
    }

    /// Get the bound socket address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Wait for the next request received by the server
    ///
    /// Returns None if the server is shut down or the timeout expires.
    pub async fn wait_for_request(&mut self) -> Option<ReceivedRequest> {
        if let Some(rx) = &mut self.request_rx {
            tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .ok()
                .flatten()
        } else {
            None
        }
    }

    /// Assert that no request reaches the server within a grace period
    pub async fn assert_no_request(&mut self) {
        if let Some(rx) = &mut self.request_rx {
            let outcome = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
            assert!(outcome.is_err(), "server unexpectedly received a request");
        }
    }

    /// Shutdown the mock server
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        // Give server time to clean up
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}

/// Read one HTTP/1.1 request off the stream
///
/// Returns the stream again so the response can be written after the request
/// has been handed to the test.
async fn read_http_request(
    stream: tokio::net::TcpStream,
) -> Option<(tokio::net::TcpStream, ReceivedRequest)> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await.ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).await.ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    let content_length = headers
        .get("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await.ok()?;
    let body = String::from_utf8_lossy(&body).into_owned();

    Some((
        reader.into_inner(),
        ReceivedRequest {
            method,
            path,
            headers,
            body,
        },
    ))
}

async fn write_http_response(mut stream: tokio::net::TcpStream, response: MockResponse) {
    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }

    let reason = match response.status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    };
    // Connection: close keeps reqwest from reusing the socket, so every call
    // in a test arrives as a fresh accept.
    let payload = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason,
        response.body.len(),
        response.body
    );
    let _ = stream.write_all(payload.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// Helper to create a mock JSON-RPC success response body
pub fn mock_response(id: i64, result: serde_json::Value) -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "result": result,
        "id": id
    })
    .to_string()
}

/// Helper to create a mock JSON-RPC error response body
pub fn mock_error_response(id: i64, code: i64, message: &str) -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "error": {
            "code": code,
            "message": message
        },
        "id": id
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_server_creation() {
        let server = MockHttpServer::respond_with(200, "{}").await;
        assert!(server.url().starts_with("http://127.0.0.1:"));
        assert!(server.url().ends_with("/rpc"));
        server.shutdown().await;
    }

    #[test]
    fn test_mock_response_format() {
        let response = mock_response(1, serde_json::json!({"value": 42}));
        assert!(response.contains("\"jsonrpc\":\"2.0\""));
        assert!(response.contains("\"id\":1"));
        assert!(response.contains("\"result\""));
    }

    #[test]
    fn test_mock_error_response_format() {
        let response = mock_error_response(1, -32601, "Method not found");
        assert!(response.contains("\"error\""));
        assert!(response.contains("-32601"));
        assert!(response.contains("Method not found"));
    }
}
