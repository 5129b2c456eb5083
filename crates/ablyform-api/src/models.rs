// Control API response types
//
// Wire-shaped records for the Control API. Field names follow the API's
// camelCase JSON; optional fields use `#[serde(default)]` because the API
// omits unset values. Rule targets stay untyped here -- the core resolves
// the variant from `ruleType`.

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};

// ── Account ──────────────────────────────────────────────────────────

/// Response of `GET /me`: identifies the account behind the access token.
#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    pub account: AccountInfo,
    #[serde(default)]
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub token: Option<TokenInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

// ── Application ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub account_id: Option<String>,
    /// `"enabled"` or `"disabled"`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tls_only: Option<bool>,
}

// ── Key ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyResponse {
    pub id: String,
    #[serde(default)]
    pub app_id: Option<String>,
    pub name: String,
    /// Full key material (`appId.keyId:secret`).
    #[serde(deserialize_with = "deserialize_secret")]
    pub key: SecretString,
    /// Channel pattern → permissions. Kept as raw JSON; the core decides
    /// how to treat values that are not string arrays.
    #[serde(default)]
    pub capability: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub status: Option<i64>,
}

fn deserialize_secret<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

// ── Namespace ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceResponse {
    /// The channel-namespace prefix, e.g. `"chat"`.
    pub id: String,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub persisted: bool,
    #[serde(default)]
    pub persist_last: bool,
    #[serde(default)]
    pub push_enabled: bool,
    #[serde(default)]
    pub tls_only: bool,
    #[serde(default)]
    pub batching_enabled: Option<bool>,
    #[serde(default)]
    pub batching_interval: Option<u64>,
    #[serde(default)]
    pub batching_policy: Option<String>,
}

// ── Queue ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueResponse {
    pub id: String,
    #[serde(default)]
    pub app_id: Option<String>,
    pub name: String,
    /// Message TTL in minutes.
    pub ttl: u64,
    pub max_length: u64,
    pub region: String,
    #[serde(default)]
    pub state: Option<String>,
}

// ── Rule ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResponse {
    pub id: String,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub request_mode: Option<String>,
    /// Discriminant for `target`, e.g. `"http"` or `"aws/kinesis"`.
    pub rule_type: String,
    pub source: RuleSourceResponse,
    /// Variant-shaped payload; its structure depends on `rule_type`.
    #[serde(default)]
    pub target: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSourceResponse {
    pub channel_filter: String,
    #[serde(rename = "type")]
    pub source_type: String,
}
