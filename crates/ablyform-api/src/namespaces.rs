// Channel namespace endpoints
//
// The API calls these "namespaces"; the console calls them "channel rules".

use tracing::debug;

use crate::client::ControlClient;
use crate::error::Error;
use crate::models::NamespaceResponse;

impl ControlClient {
    /// List the channel namespaces of an application.
    ///
    /// `GET /apps/{app_id}/namespaces`
    pub async fn list_namespaces(&self, app_id: &str) -> Result<Vec<NamespaceResponse>, Error> {
        debug!(app_id, "listing namespaces");
        self.get(&format!("apps/{app_id}/namespaces")).await
    }
}
