//! Handler registration and resolution.
//!
//! # Responsibilities
//! - Define the capability a user handler implements
//! - Map entrypoint reference strings to handler implementations
//!
//! # Design Decisions
//! - The registry is populated once at startup and immutable afterwards, so
//!   resolution is a plain map lookup with no locking.
//! - Resolution failure is not special-cased here; the invoker folds an
//!   unknown reference into the standard execution-error envelope.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::http::request::InvocationRequest;
use crate::invoke::error::HandlerError;

/// A user-defined function the runtime can dispatch to.
///
/// `payload` is the parsed JSON body, or `None` when the body was absent or
/// unparseable. Implementations may block; the runtime imposes no timeout.
pub trait Handler: Send + Sync {
    fn handle(
        &self,
        payload: Option<Value>,
        request: &InvocationRequest,
    ) -> Result<Value, HandlerError>;
}

impl<F> Handler for F
where
    F: Fn(Option<Value>, &InvocationRequest) -> Result<Value, HandlerError> + Send + Sync,
{
    fn handle(
        &self,
        payload: Option<Value>,
        request: &InvocationRequest,
    ) -> Result<Value, HandlerError> {
        self(payload, request)
    }
}

/// Mapping from entrypoint reference to handler implementation.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, reference: impl Into<String>, handler: Arc<dyn Handler>) {
        self.handlers.insert(reference.into(), handler);
    }

    pub fn resolve(&self, reference: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.get(reference).cloned()
    }

    /// Registry pre-loaded with the built-in handlers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("echo", Arc::new(EchoHandler));
        registry
    }
}

/// Built-in handler that returns the parsed payload unchanged (JSON `null`
/// when the body did not parse).
pub struct EchoHandler;

impl Handler for EchoHandler {
    fn handle(
        &self,
        payload: Option<Value>,
        _request: &InvocationRequest,
    ) -> Result<Value, HandlerError> {
        Ok(payload.unwrap_or(Value::Null))
    }
}
