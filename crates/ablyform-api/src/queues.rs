// Queue endpoints

use tracing::debug;

use crate::client::ControlClient;
use crate::error::Error;
use crate::models::QueueResponse;

impl ControlClient {
    /// List the queues of an application.
    ///
    /// `GET /apps/{app_id}/queues`
    pub async fn list_queues(&self, app_id: &str) -> Result<Vec<QueueResponse>, Error> {
        debug!(app_id, "listing queues");
        self.get(&format!("apps/{app_id}/queues")).await
    }
}
