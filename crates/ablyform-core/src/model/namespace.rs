// ── Channel namespace domain type ──

use serde::Serialize;

/// Channel-prefix-scoped policy. `id` doubles as the prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Namespace {
    pub id: String,
    pub authenticated: bool,
    pub persisted: bool,
    pub persist_last: bool,
    pub push_enabled: bool,
    pub tls_only: bool,
    /// Present only when the API reports a batching setting.
    pub batching: Option<Batching>,
}

/// Server-side message batching for a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Batching {
    pub enabled: bool,
    /// Batch window in milliseconds.
    pub interval: Option<u64>,
    pub policy: Option<String>,
}
