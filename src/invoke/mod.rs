//! Handler invocation subsystem.
//!
//! # Data Flow
//! ```text
//! raw request parts + body
//!     → invoker.rs (tracking-id precondition)
//!     → http::request (normalize)
//!     → payload.rs (strict JSON parse, failures degrade to None)
//!     → registry.rs (resolve entrypoint → handler)
//!     → timed, panic-guarded handler call
//!     → InvocationOutcome (success value or ExecutionFailure)
//! ```
//!
//! # Design Decisions
//! - The handler call is synchronous and untimed; the runtime imposes no
//!   timeout or cancellation.
//! - Resolution failures and execution failures produce the same envelope
//!   shape; callers are not expected to distinguish them.

pub mod error;
pub mod invoker;
pub mod payload;
pub mod registry;

pub use error::{ExecutionFailure, HandlerError};
pub use invoker::{InvocationOutcome, Invoker};
