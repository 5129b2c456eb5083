// Application endpoints

use tracing::debug;

use crate::client::ControlClient;
use crate::error::Error;
use crate::models::AppResponse;

impl ControlClient {
    /// List all applications in an account.
    ///
    /// `GET /accounts/{account_id}/apps`
    pub async fn list_apps(&self, account_id: &str) -> Result<Vec<AppResponse>, Error> {
        debug!(account_id, "listing apps");
        self.get(&format!("accounts/{account_id}/apps")).await
    }
}
