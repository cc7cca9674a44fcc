//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! tracing events (runtime + handler output)
//!     → logging.rs LogSink (wrap each line into a JSON record)
//!     → <log_dir>/std.log (append-only, newline-terminated)
//! ```
//!
//! # Design Decisions
//! - One log destination per process; records distinguish error output via
//!   the `isErr` field rather than separate files.
//! - Request-id correlation is best-effort through a task-local set around
//!   each invocation; records outside a request scope carry `"unknown"`.

pub mod logging;

pub use logging::LogSink;
