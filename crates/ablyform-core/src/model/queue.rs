// ── Queue domain type ──

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Queue {
    pub id: String,
    pub name: String,
    /// Message TTL in minutes.
    pub ttl: u64,
    pub max_length: u64,
    pub region: String,
}
