//! The invocation pipeline.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use axum::http::request::Parts;
use serde_json::Value;

use crate::http::request::{InvocationRequest, REQUEST_ID_HEADER};
use crate::invoke::error::ExecutionFailure;
use crate::invoke::payload;
use crate::invoke::registry::HandlerRegistry;
use crate::observability::logging::CURRENT_REQUEST_ID;

/// Result of running the pipeline for one inbound call.
#[derive(Debug)]
pub enum InvocationOutcome {
    /// The tracking-id precondition failed; the handler was never resolved
    /// and nothing was timed.
    Rejected,
    /// The handler ran (or resolution failed, folded into `result`).
    Completed {
        request_id: String,
        duration_usecs: u64,
        result: Result<Value, ExecutionFailure>,
    },
}

/// Dispatches one normalized request to the configured entrypoint.
pub struct Invoker {
    entrypoint: String,
    registry: Arc<HandlerRegistry>,
}

impl Invoker {
    pub fn new(entrypoint: String, registry: Arc<HandlerRegistry>) -> Self {
        Self {
            entrypoint,
            registry,
        }
    }

    /// Run the pipeline: precondition, normalize, parse, resolve, invoke.
    ///
    /// Synchronous; blocks for the handler's full execution. Handler panics
    /// are caught and folded into the failure envelope, so no per-request
    /// error escapes to the serving loop.
    pub fn invoke(&self, parts: &Parts, body: String) -> InvocationOutcome {
        let id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        let Some(id) = id else {
            tracing::warn!(path = %parts.uri.path(), "rejected: missing tracking id");
            return InvocationOutcome::Rejected;
        };

        // Scope the id for log-record correlation during the handler call.
        CURRENT_REQUEST_ID.sync_scope(id.clone(), || self.dispatch(parts, body, id))
    }

    fn dispatch(&self, parts: &Parts, body: String, id: String) -> InvocationOutcome {
        let request = InvocationRequest::from_parts(parts, id.clone(), body);
        let parsed = payload::parse_body(&request.body);

        tracing::debug!(
            request_id = %id,
            method = %request.method,
            path = %request.path,
            entrypoint = %self.entrypoint,
            "dispatching invocation"
        );

        // Resolution is timed along with execution.
        let started = Instant::now();
        let result = match self.registry.resolve(&self.entrypoint) {
            Some(handler) => {
                match catch_unwind(AssertUnwindSafe(|| handler.handle(parsed, &request))) {
                    Ok(Ok(value)) => Ok(value),
                    Ok(Err(err)) => Err(ExecutionFailure::from(err)),
                    Err(panic) => Err(ExecutionFailure::from_panic(panic)),
                }
            }
            None => Err(ExecutionFailure::unresolved(&self.entrypoint)),
        };
        let duration_usecs = started.elapsed().as_micros() as u64;

        if let Err(failure) = &result {
            tracing::error!(
                request_id = %id,
                detail = %failure.detail_message,
                "invocation failed"
            );
        }

        InvocationOutcome::Completed {
            request_id: id,
            duration_usecs,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoke::error::HandlerError;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::json;

    fn parts(uri: &str, id: Option<&str>) -> Parts {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(id) = id {
            builder = builder.header(REQUEST_ID_HEADER, id);
        }
        let (parts, _) = builder.body(Body::empty()).unwrap().into_parts();
        parts
    }

    fn invoker_with(reference: &str, registry: HandlerRegistry) -> Invoker {
        Invoker::new(reference.to_string(), Arc::new(registry))
    }

    #[test]
    fn missing_id_rejects_before_resolution() {
        let invoker = invoker_with("echo", HandlerRegistry::with_builtins());
        let outcome = invoker.invoke(&parts("/v1/run", None), String::new());
        assert!(matches!(outcome, InvocationOutcome::Rejected));
    }

    #[test]
    fn empty_id_rejects_too() {
        let invoker = invoker_with("echo", HandlerRegistry::with_builtins());
        let outcome = invoker.invoke(&parts("/v1/run", Some("")), String::new());
        assert!(matches!(outcome, InvocationOutcome::Rejected));
    }

    #[test]
    fn success_carries_the_handler_value_and_a_duration() {
        let invoker = invoker_with("echo", HandlerRegistry::with_builtins());
        let outcome = invoker.invoke(&parts("/v1/run", Some("abc")), r#"{"x":1}"#.to_string());
        match outcome {
            InvocationOutcome::Completed {
                request_id, result, ..
            } => {
                assert_eq!(request_id, "abc");
                assert_eq!(result.unwrap(), json!({"x": 1}));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn handler_errors_become_failures() {
        let mut registry = HandlerRegistry::new();
        registry.register(
            "fail",
            Arc::new(
                |_: Option<Value>, _: &InvocationRequest| -> Result<Value, HandlerError> {
                    Err(HandlerError::new("boom"))
                },
            ),
        );
        let invoker = invoker_with("fail", registry);
        let outcome = invoker.invoke(&parts("/v1/run", Some("abc")), String::new());
        match outcome {
            InvocationOutcome::Completed { result, .. } => {
                let failure = result.unwrap_err();
                assert_eq!(failure.detail_message, "boom");
                assert!(!failure.stack_trace.is_empty());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn handler_panics_are_caught() {
        let mut registry = HandlerRegistry::new();
        registry.register(
            "panic",
            Arc::new(
                |_: Option<Value>, _: &InvocationRequest| -> Result<Value, HandlerError> {
                    panic!("kaboom")
                },
            ),
        );
        let invoker = invoker_with("panic", registry);
        let outcome = invoker.invoke(&parts("/v1/run", Some("abc")), String::new());
        match outcome {
            InvocationOutcome::Completed { result, .. } => {
                assert_eq!(result.unwrap_err().detail_message, "kaboom");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn unknown_entrypoint_folds_into_the_failure_path() {
        let invoker = invoker_with("nope", HandlerRegistry::new());
        let outcome = invoker.invoke(&parts("/v1/run", Some("abc")), String::new());
        match outcome {
            InvocationOutcome::Completed {
                request_id, result, ..
            } => {
                assert_eq!(request_id, "abc");
                assert!(result.unwrap_err().detail_message.contains("nope"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
