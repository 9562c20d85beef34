//! Basic JSON-RPC calls over HTTP
//!
//! This example walks through the everyday client surface:
//! - Calls with and without parameters
//! - Typed results
//! - Branching on protocol errors vs transport errors
//! - Fire-and-forget notifications
//!
//! Usage:
//! 1. Have any JSON-RPC 2.0 HTTP endpoint running (default http://127.0.0.1:8080/rpc)
//! 2. Optionally export JROH_ENDPOINT=<url>
//! 3. cargo run --example quickstart

use jroh::params;
use jroh::{Error, JrohClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let endpoint = std::env::var("JROH_ENDPOINT")
        .unwrap_or_else(|_| "http://127.0.0.1:8080/rpc".to_string());

    let client = JrohClient::new(&endpoint)?;
    println!("✓ Client ready for {}\n", endpoint);

    // A call with no arguments: the request goes out without a params key
    match client.call("getDate", params![]).await {
        Ok(response) => println!("getDate -> {:?}", response.result),
        Err(e) => println!("getDate failed: {}", e),
    }

    // Positional scalar arguments become a JSON array
    let response = client.call("addNumbers", params![3, 4]).await?;
    if let Some(error) = &response.error {
        // Protocol errors ride inside the envelope for plain call
        println!("addNumbers rejected: {}", error);
    } else {
        println!("addNumbers -> {}", response.get_int()?);
    }

    // call_typed decodes the result and surfaces protocol errors as Err
    match client.call_typed::<String>("getDate", params![]).await {
        Ok(date) => println!("typed getDate -> {}", date),
        Err(Error::JsonRpc(rpc)) => println!("server error: {}", rpc),
        Err(other) => println!("call failed: {}", other),
    }

    // Notifications carry no id and expect no response body
    client.notify("logEvent", params!["quickstart ran"]).await?;
    println!("✓ Notification sent");

    // Each call consumed one id
    println!("\nNext request id would be {}", client.next_request_id());

    Ok(())
}
