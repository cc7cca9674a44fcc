//! Runtime entry point: configuration, logging, registry, listener, serve.
//!
//! Startup order is fixed: config first, then the log sink (fatal when the
//! log directory is absent), then the registry, and the listener binds last
//! so traffic only arrives once everything is ready.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bolt_runtime::config;
use bolt_runtime::observability::LogSink;
use bolt_runtime::{HandlerRegistry, HttpServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::from_env()?;

    let sink = LogSink::open(&config.log_dir)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bolt_runtime=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(sink),
        )
        .init();

    tracing::info!(
        function = %config.function,
        entrypoint = %config.entrypoint,
        port = config.port,
        "bolt runtime starting"
    );

    let registry = Arc::new(HandlerRegistry::with_builtins());

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    let server = HttpServer::new(config, registry);
    server.run(listener).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
