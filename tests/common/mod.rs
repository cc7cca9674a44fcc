//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use bolt_runtime::{HandlerRegistry, HttpServer, RuntimeConfig};

/// Spawn a runtime server on an ephemeral port and return its address.
pub async fn spawn_runtime(entrypoint: &str, registry: HandlerRegistry) -> SocketAddr {
    let config = RuntimeConfig {
        port: 0,
        function: "test-function".to_string(),
        entrypoint: entrypoint.to_string(),
        log_dir: std::env::temp_dir(),
    };
    let server = HttpServer::new(config, Arc::new(registry));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    addr
}
