//! HTTP surface of the runtime.
//!
//! # Responsibilities
//! - Route `/v1/run` and `/v1/run/{*path}` (GET/POST/PUT/DELETE) to the
//!   invocation pipeline and `GET /_healthy` to the counters snapshot
//! - Normalize inbound requests into [`request::InvocationRequest`]
//! - Build the JSON response envelope with duration and id-echo headers

pub mod request;
pub mod response;
pub mod server;

pub use request::InvocationRequest;
pub use server::HttpServer;
