//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → loader.rs (read & parse BOLT_PORT / BN_* variables)
//!     → RuntimeConfig (validated, immutable)
//!     → shared with the server at startup
//! ```
//!
//! # Design Decisions
//! - Configuration comes from environment variables only; there is no file
//!   loading and no reload. The runtime is configured once per process.
//! - Missing required variables are fatal before the listener binds.

pub mod loader;
pub mod schema;

pub use loader::{from_env, ConfigError};
pub use schema::RuntimeConfig;
