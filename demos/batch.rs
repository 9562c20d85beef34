//! Batched JSON-RPC calls in one HTTP exchange
//!
//! This example demonstrates:
//! - Building a batch of requests and notifications
//! - Position-based id assignment on send
//! - Correlating unordered responses back to their requests
//! - The raw variant with caller-managed ids
//!
//! Usage:
//! 1. Have any JSON-RPC 2.0 HTTP endpoint running (default http://127.0.0.1:8080/rpc)
//! 2. Optionally export JROH_ENDPOINT=<url>
//! 3. cargo run --example batch

use jroh::params;
use jroh::{BatchRequest, JrohClient, JsonRpcRequest, Params};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let endpoint = std::env::var("JROH_ENDPOINT")
        .unwrap_or_else(|_| "http://127.0.0.1:8080/rpc".to_string());

    let client = JrohClient::new(&endpoint)?;
    println!("✓ Client ready for {}\n", endpoint);

    // Three envelopes, one HTTP POST. The notification gets no id and no
    // response; the requests get ids 0 and 2 (their positions).
    let mut batch = BatchRequest::new()
        .request("addNumbers", params![1, 2])
        .notification("logEvent", params!["batch started"])
        .request("getDate", params![]);

    let responses = client.batch(&mut batch).await?;
    println!("→ {} responses for {} entries\n", responses.len(), batch.len());

    // response_for matches by id, so the server's response order is
    // irrelevant
    for request in batch.requests() {
        match responses.response_for(request) {
            Ok(response) if response.is_success() => {
                println!("{} (id {}) -> {:?}", request.method, request.id, response.result);
            }
            Ok(response) => {
                println!(
                    "{} (id {}) failed: {}",
                    request.method,
                    request.id,
                    response.error.as_ref().unwrap()
                );
            }
            Err(e) => println!("{} (id {}): {}", request.method, request.id, e),
        }
    }

    if responses.has_error() {
        println!("\nAt least one entry came back with a protocol error");
    }

    // The map form suits repeated lookups
    let by_id = responses.as_map();
    println!("\nids answered: {:?}", by_id.keys().collect::<Vec<_>>());

    // batch_raw sends envelopes untouched; ids are the caller's business.
    // Here one prebuilt envelope goes out twice, told apart only by id.
    let probe = JsonRpcRequest::new("getDate", Params::none(), 0);
    let raw = BatchRequest::new()
        .push(probe.clone().with_id(4711))
        .push(probe.with_id(4712));
    match client.batch_raw(&raw).await {
        Ok(responses) => {
            if let Some(response) = responses.get(4712) {
                println!("raw getDate -> {:?}", response.result);
            }
        }
        Err(e) => println!("raw batch failed: {}", e),
    }

    Ok(())
}
