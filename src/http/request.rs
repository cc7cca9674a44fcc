//! Inbound request normalization.

use std::collections::HashMap;

use axum::http::request::Parts;
use serde::Serialize;

/// Header carrying the caller-supplied tracking id. Required on every
/// invocation; its absence rejects the call before dispatch.
pub const REQUEST_ID_HEADER: &str = "x-binaris-request-id";

/// Route prefix stripped from the path seen by handlers.
pub const RUN_PREFIX: &str = "/v1/run";

/// Normalized, immutable view of an inbound HTTP request, handed to the
/// resolved handler alongside the parsed payload.
#[derive(Debug, Clone, Serialize)]
pub struct InvocationRequest {
    /// Tracking id from [`REQUEST_ID_HEADER`]; always non-empty.
    pub id: String,
    /// Raw body text, possibly empty.
    pub body: String,
    /// HTTP verb.
    pub method: String,
    /// Request path with the leading [`RUN_PREFIX`] removed.
    pub path: String,
    /// Header name → value. Names are lowercased by the HTTP layer; when a
    /// header repeats, which value wins is not guaranteed (currently
    /// last-seen).
    pub headers: HashMap<String, String>,
    /// Query parameter → values, preserving the order in which values for a
    /// key appear in the query string.
    pub query: HashMap<String, Vec<String>>,
}

impl InvocationRequest {
    /// Build the normalized request from pre-split request parts.
    ///
    /// The tracking id is validated by the caller; this constructor only
    /// shapes data.
    pub fn from_parts(parts: &Parts, id: String, body: String) -> Self {
        let mut headers = HashMap::new();
        for (name, value) in parts.headers.iter() {
            headers.insert(
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }

        let mut query: HashMap<String, Vec<String>> = HashMap::new();
        if let Some(raw) = parts.uri.query() {
            for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
                query
                    .entry(key.into_owned())
                    .or_default()
                    .push(value.into_owned());
            }
        }

        Self {
            id,
            body,
            method: parts.method.as_str().to_string(),
            path: strip_run_prefix(parts.uri.path()).to_string(),
            headers,
            query,
        }
    }
}

/// Strip the run-route prefix from the start of the path, once.
///
/// Idempotent: a path that no longer carries the prefix passes through
/// unchanged, so stripping can never happen twice.
pub fn strip_run_prefix(path: &str) -> &str {
    path.strip_prefix(RUN_PREFIX).unwrap_or(path)
}
