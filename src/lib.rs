//! Bolt function-invocation runtime.
//!
//! An HTTP server that receives a request, normalizes it into an
//! [`InvocationRequest`], dispatches it to a handler resolved by name from a
//! [`HandlerRegistry`], and converts the handler's result or failure into a
//! uniform JSON response envelope.
//!
//! # Architecture Overview
//!
//! ```text
//!   HTTP request
//!       │
//!       ▼
//!   ┌─────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────────┐
//!   │  http   │───▶│  normalizer  │───▶│   invoker    │───▶│ response │
//!   │ server  │    │ + payload    │    │ (registry    │    │ envelope │
//!   └─────────┘    │   parse      │    │  + timing)   │    └──────────┘
//!       │          └──────────────┘    └──────┬───────┘
//!       │                                     │
//!       │          ┌────────────────────────────────────────┐
//!       └─────────▶│  health counters (request_count,       │
//!                  │  concurrency) — GET /_healthy          │
//!                  └────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod invoke;

// Cross-cutting concerns
pub mod health;
pub mod observability;

pub use config::RuntimeConfig;
pub use health::Counters;
pub use http::request::InvocationRequest;
pub use http::server::HttpServer;
pub use invoke::registry::{Handler, HandlerRegistry};
