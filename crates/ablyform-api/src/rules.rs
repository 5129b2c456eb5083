// Integration rule endpoints
//
// Rules are returned with an untyped `target`; see `RuleResponse`.

use tracing::debug;

use crate::client::ControlClient;
use crate::error::Error;
use crate::models::RuleResponse;

impl ControlClient {
    /// List the integration rules of an application.
    ///
    /// `GET /apps/{app_id}/rules`
    pub async fn list_rules(&self, app_id: &str) -> Result<Vec<RuleResponse>, Error> {
        debug!(app_id, "listing rules");
        self.get(&format!("apps/{app_id}/rules")).await
    }
}
