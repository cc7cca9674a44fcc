//! Response envelope construction.
//!
//! A pure mapping from an [`InvocationOutcome`] to the wire response; it has
//! no error path of its own.

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::http::request::REQUEST_ID_HEADER;
use crate::invoke::invoker::InvocationOutcome;

/// Header reporting handler wall-clock time in microseconds.
pub const DURATION_HEADER: &str = "x-binaris-bolt-duration-usecs";

/// Body returned when the tracking-id precondition fails.
pub const ERR_NO_REQ_ID: &str = "ERR_NO_REQ_ID";

/// Wrap an invocation outcome into the final HTTP response.
///
/// Every completed invocation, success or failure, carries the duration
/// header and echoes the tracking id. Rejections carry neither; the id was
/// never accepted. Content-type is always `application/json`.
pub fn respond(outcome: InvocationOutcome) -> Response {
    match outcome {
        InvocationOutcome::Rejected => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "errorCode": ERR_NO_REQ_ID })),
        )
            .into_response(),
        InvocationOutcome::Completed {
            request_id,
            duration_usecs,
            result,
        } => {
            let mut response = match result {
                Ok(value) => (StatusCode::OK, Json(value)).into_response(),
                Err(failure) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "stackTrace": failure.stack_trace,
                        "detailMessage": failure.detail_message,
                    })),
                )
                    .into_response(),
            };
            let headers = response.headers_mut();
            if let Ok(value) = HeaderValue::from_str(&duration_usecs.to_string()) {
                headers.insert(DURATION_HEADER, value);
            }
            // The id arrived as a header value, so this conversion holds.
            if let Ok(value) = HeaderValue::from_str(&request_id) {
                headers.insert(REQUEST_ID_HEADER, value);
            }
            response
        }
    }
}
