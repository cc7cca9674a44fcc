//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the runtime.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuntimeConfig {
    /// Listen port (`BOLT_PORT`, default 80).
    pub port: u16,

    /// Logical function name (`BN_FUNCTION`). Informational only; surfaced
    /// in startup logs, never used for dispatch.
    pub function: String,

    /// Handler reference (`BN_ENTRYPOINT`) resolved against the registry on
    /// each invocation.
    pub entrypoint: String,

    /// Directory for structured log output (`BN_LOGDIR`, default `/logs`).
    pub log_dir: PathBuf,
}
