//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router for the run and health routes
//! - Track accepted calls in the counters around each dispatch
//! - Hand requests to the invoker and return the envelope it produces
//!
//! # Design Decisions
//! - One execution context per request, supplied by tokio; the runtime adds
//!   no queueing or admission control of its own.
//! - No per-request error reaches the serving loop: rejections and handler
//!   failures alike come back as JSON 500 responses.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::RuntimeConfig;
use crate::health::Counters;
use crate::http::response;
use crate::invoke::invoker::Invoker;
use crate::invoke::registry::HandlerRegistry;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<HandlerRegistry>,
    pub counters: Arc<Counters>,
    pub entrypoint: String,
}

/// HTTP server for the invocation runtime.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new server dispatching to the given handler registry.
    pub fn new(config: RuntimeConfig, registry: Arc<HandlerRegistry>) -> Self {
        let state = AppState {
            registry,
            counters: Counters::new(),
            entrypoint: config.entrypoint,
        };
        Self {
            router: Self::build_router(state),
        }
    }

    fn build_router(state: AppState) -> Router {
        let run = get(run_handler)
            .post(run_handler)
            .put(run_handler)
            .delete(run_handler);
        Router::new()
            .route("/v1/run", run.clone())
            .route("/v1/run/{*path}", run)
            .route("/_healthy", get(health_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Run-route handler: count the call, collect the body, invoke.
async fn run_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    // Held until the response is built; releases concurrency on every path.
    let _in_flight = state.counters.track();

    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read request body");
            String::new()
        }
    };

    let invoker = Invoker::new(state.entrypoint.clone(), Arc::clone(&state.registry));
    response::respond(invoker.invoke(&parts, body))
}

/// Health-route handler: snapshot the counters without touching them.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.counters.snapshot())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install Ctrl+C handler");
    }
    tracing::info!("shutdown signal received");
}
