// ── Application domain type ──

use serde::Serialize;

/// Root of a one-file-per-application partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Application {
    pub id: String,
    pub name: String,
    /// `"enabled"` or `"disabled"`; absent when the API omits it.
    pub status: Option<String>,
    pub tls_only: Option<bool>,
}

impl Application {
    /// Whether `selector` names this application by id or by exact name.
    pub fn matches(&self, selector: &str) -> bool {
        self.id == selector || self.name == selector
    }
}
