// API key endpoints

use tracing::debug;

use crate::client::ControlClient;
use crate::error::Error;
use crate::models::KeyResponse;

impl ControlClient {
    /// List the API keys of an application.
    ///
    /// `GET /apps/{app_id}/keys`
    pub async fn list_keys(&self, app_id: &str) -> Result<Vec<KeyResponse>, Error> {
        debug!(app_id, "listing keys");
        self.get(&format!("apps/{app_id}/keys")).await
    }
}
