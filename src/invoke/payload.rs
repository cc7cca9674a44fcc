//! Request-body payload parsing.

use serde_json::Value;

/// Attempt a strict JSON parse of the raw request body.
///
/// Parse failures (including the empty string, which is not valid JSON)
/// yield `None` rather than an error: the handler contract allows a missing
/// or invalid body and `None` is the "no parsed body" marker, distinct from
/// `Some(Value::Null)` for a body of literal `null`.
pub fn parse_body(raw: &str) -> Option<Value> {
    serde_json::from_str(raw).ok()
}
