//! Process-wide invocation counters.
//!
//! # Responsibilities
//! - Count every call accepted by the run route (`request_count`)
//! - Track in-flight invocations (`concurrency`)
//! - Serve wait-free snapshots for the `/_healthy` query
//!
//! # Design Decisions
//! - Plain atomics; no lock is ever held across a handler invocation, so a
//!   slow handler never serializes other requests.
//! - The in-flight decrement is tied to a guard's `Drop` so every exit path,
//!   including rejections and handler panics, releases exactly once.
//! - A snapshot is two relaxed loads; the two counters are not read
//!   atomically as a pair and may be momentarily inconsistent under load.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

/// Atomic request/concurrency counters, shared for the process lifetime.
#[derive(Debug, Default)]
pub struct Counters {
    request_count: AtomicU64,
    concurrency: AtomicU64,
}

/// Point-in-time projection of [`Counters`], serialized as the `/_healthy`
/// response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthSnapshot {
    pub concurrency: u64,
    pub request_count: u64,
}

impl Counters {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Accept a call: bump `request_count`, enter the in-flight window.
    ///
    /// The returned guard decrements `concurrency` when dropped.
    pub fn track(self: &Arc<Self>) -> InFlightGuard {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        self.concurrency.fetch_add(1, Ordering::Relaxed);
        InFlightGuard {
            counters: Arc::clone(self),
        }
    }

    pub fn snapshot(&self) -> HealthSnapshot {
        HealthSnapshot {
            concurrency: self.concurrency.load(Ordering::Relaxed),
            request_count: self.request_count.load(Ordering::Relaxed),
        }
    }
}

/// Scoped release for the concurrency counter.
#[must_use = "dropping the guard ends the in-flight window"]
pub struct InFlightGuard {
    counters: Arc<Counters>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.counters.concurrency.fetch_sub(1, Ordering::Relaxed);
    }
}
