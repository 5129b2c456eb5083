// ── Resource source ──
//
// The aggregator and orchestrator fetch through `ResourceSource` rather
// than `ControlClient` directly, so the mapping pipeline can run against
// an in-memory fixture. `ControlSource` is the live implementation: it
// resolves the token's account once at construction and reuses that id
// for every application listing.

use std::future::Future;

use ablyform_api::models::{
    AppResponse, KeyResponse, NamespaceResponse, QueueResponse, RuleResponse,
};
use ablyform_api::{ControlClient, TransportConfig};
use tracing::info;

use crate::config::ControlConfig;
use crate::error::CoreError;

/// Listing operations the export pipeline depends on.
pub trait ResourceSource {
    fn list_applications(
        &self,
    ) -> impl Future<Output = Result<Vec<AppResponse>, CoreError>> + Send;

    fn list_keys(
        &self,
        app_id: &str,
    ) -> impl Future<Output = Result<Vec<KeyResponse>, CoreError>> + Send;

    fn list_namespaces(
        &self,
        app_id: &str,
    ) -> impl Future<Output = Result<Vec<NamespaceResponse>, CoreError>> + Send;

    fn list_queues(
        &self,
        app_id: &str,
    ) -> impl Future<Output = Result<Vec<QueueResponse>, CoreError>> + Send;

    fn list_rules(
        &self,
        app_id: &str,
    ) -> impl Future<Output = Result<Vec<RuleResponse>, CoreError>> + Send;
}

/// Live source backed by the Control API.
pub struct ControlSource {
    client: ControlClient,
    account_id: String,
    account_name: Option<String>,
}

impl ControlSource {
    /// Build a client from `config` and resolve the token's account.
    ///
    /// Fails if the token is rejected or `/me` is unreachable.
    pub async fn connect(config: &ControlConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client = ControlClient::new(config.api_url.as_str(), &config.token, &transport)?;
        Self::with_client(client).await
    }

    /// Resolve the account for an already-built client.
    pub async fn with_client(client: ControlClient) -> Result<Self, CoreError> {
        let me = client.me().await?;
        info!(
            account_id = %me.account.id,
            account_name = me.account.name.as_deref().unwrap_or("-"),
            "resolved account"
        );
        Ok(Self {
            client,
            account_id: me.account.id,
            account_name: me.account.name,
        })
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn account_name(&self) -> Option<&str> {
        self.account_name.as_deref()
    }
}

impl ResourceSource for ControlSource {
    async fn list_applications(&self) -> Result<Vec<AppResponse>, CoreError> {
        Ok(self.client.list_apps(&self.account_id).await?)
    }

    async fn list_keys(&self, app_id: &str) -> Result<Vec<KeyResponse>, CoreError> {
        Ok(self.client.list_keys(app_id).await?)
    }

    async fn list_namespaces(&self, app_id: &str) -> Result<Vec<NamespaceResponse>, CoreError> {
        Ok(self.client.list_namespaces(app_id).await?)
    }

    async fn list_queues(&self, app_id: &str) -> Result<Vec<QueueResponse>, CoreError> {
        Ok(self.client.list_queues(app_id).await?)
    }

    async fn list_rules(&self, app_id: &str) -> Result<Vec<RuleResponse>, CoreError> {
        Ok(self.client.list_rules(app_id).await?)
    }
}
