// Account endpoint
//
// `/me` resolves the account that owns the access token. Every other
// listing hangs off that account id.

use tracing::debug;

use crate::client::ControlClient;
use crate::error::Error;
use crate::models::MeResponse;

impl ControlClient {
    /// Describe the token, its user, and its account.
    ///
    /// `GET /me`
    pub async fn me(&self) -> Result<MeResponse, Error> {
        debug!("resolving account for token");
        self.get("me").await
    }
}
