//! Error types for handler resolution and execution.

use std::any::Any;
use std::backtrace::Backtrace;

/// Error a handler returns to signal failure.
///
/// The backtrace is captured at construction so the error envelope carries a
/// trace from inside the handler, not from the invocation boundary.
#[derive(Debug)]
pub struct HandlerError {
    message: String,
    trace: Backtrace,
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for HandlerError {}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trace: Backtrace::force_capture(),
        }
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// A failed invocation, ready to serialize as the
/// `{"stackTrace","detailMessage"}` envelope.
///
/// Covers handler error returns, handler panics, and unresolvable handler
/// references alike.
#[derive(Debug)]
pub struct ExecutionFailure {
    pub detail_message: String,
    pub stack_trace: String,
}

impl ExecutionFailure {
    pub fn unresolved(entrypoint: &str) -> Self {
        Self {
            detail_message: format!("unresolvable handler reference: {entrypoint}"),
            stack_trace: Backtrace::force_capture().to_string(),
        }
    }

    /// Convert the payload recovered from a handler panic.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let detail = if let Some(message) = payload.downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "handler panicked".to_string()
        };
        Self {
            detail_message: detail,
            stack_trace: Backtrace::force_capture().to_string(),
        }
    }
}

impl From<HandlerError> for ExecutionFailure {
    fn from(err: HandlerError) -> Self {
        Self {
            detail_message: err.message,
            stack_trace: err.trace.to_string(),
        }
    }
}
