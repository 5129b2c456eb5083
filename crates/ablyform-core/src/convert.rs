// ── API-to-domain type conversions ──
//
// Bridges raw `ablyform_api` response types into `crate::model` domain
// types. Infallible for everything except rules, whose target payload is
// only typed once `ruleType` is known.

use ablyform_api::models::{
    AppResponse, KeyResponse, NamespaceResponse, QueueResponse, RuleResponse,
};

use crate::error::CoreError;
use crate::model::{
    Application, Batching, Capability, Key, Namespace, Queue, Rule, RuleKind, RuleSource,
    RuleTarget,
};

const DEFAULT_RULE_STATUS: &str = "enabled";
const DEFAULT_REQUEST_MODE: &str = "single";

impl From<AppResponse> for Application {
    fn from(app: AppResponse) -> Self {
        Self {
            id: app.id,
            name: app.name,
            status: app.status,
            tls_only: app.tls_only,
        }
    }
}

impl From<KeyResponse> for Key {
    fn from(key: KeyResponse) -> Self {
        Self {
            capability: Capability::from_json(&key.capability),
            id: key.id,
            name: key.name,
            secret: key.key,
        }
    }
}

impl From<NamespaceResponse> for Namespace {
    fn from(ns: NamespaceResponse) -> Self {
        let batching = ns.batching_enabled.map(|enabled| Batching {
            enabled,
            interval: ns.batching_interval,
            policy: ns.batching_policy,
        });
        Self {
            id: ns.id,
            authenticated: ns.authenticated,
            persisted: ns.persisted,
            persist_last: ns.persist_last,
            push_enabled: ns.push_enabled,
            tls_only: ns.tls_only,
            batching,
        }
    }
}

impl From<QueueResponse> for Queue {
    fn from(queue: QueueResponse) -> Self {
        Self {
            id: queue.id,
            name: queue.name,
            ttl: queue.ttl,
            max_length: queue.max_length,
            region: queue.region,
        }
    }
}

impl TryFrom<RuleResponse> for Rule {
    type Error = CoreError;

    fn try_from(rule: RuleResponse) -> Result<Self, Self::Error> {
        let Some(kind) = RuleKind::from_wire(&rule.rule_type) else {
            return Err(CoreError::UnknownRuleType {
                rule_id: rule.id,
                rule_type: rule.rule_type,
            });
        };

        let target = RuleTarget::from_json(kind, rule.target).map_err(|e| {
            CoreError::InvalidRuleTarget {
                rule_id: rule.id.clone(),
                rule_type: rule.rule_type.clone(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            id: rule.id,
            status: rule
                .status
                .unwrap_or_else(|| DEFAULT_RULE_STATUS.to_owned()),
            request_mode: rule
                .request_mode
                .unwrap_or_else(|| DEFAULT_REQUEST_MODE.to_owned()),
            source: RuleSource {
                channel_filter: rule.source.channel_filter,
                source_type: rule.source.source_type,
            },
            target,
        })
    }
}

#[cfg(test)]
mod tests {
    use ablyform_api::models::RuleSourceResponse;
    use secrecy::ExposeSecret;
    use serde_json::{Value, json};

    use super::*;

    fn rule_response(rule_type: &str, target: Value) -> RuleResponse {
        RuleResponse {
            id: "r1".into(),
            app_id: Some("a1".into()),
            status: None,
            request_mode: None,
            rule_type: rule_type.into(),
            source: RuleSourceResponse {
                channel_filter: "^orders".into(),
                source_type: "channel.message".into(),
            },
            target,
        }
    }

    #[test]
    fn namespace_without_batching_setting() {
        let ns: NamespaceResponse = serde_json::from_value(json!({ "id": "chat" }))
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(Namespace::from(ns).batching, None);
    }

    #[test]
    fn namespace_with_batching_setting() {
        let ns: NamespaceResponse = serde_json::from_value(json!({
            "id": "chat",
            "batchingEnabled": true,
            "batchingInterval": 50
        }))
        .unwrap_or_else(|e| panic!("{e}"));
        let batching = Namespace::from(ns).batching;
        assert_eq!(
            batching,
            Some(Batching {
                enabled: true,
                interval: Some(50),
                policy: None,
            })
        );
    }

    #[test]
    fn key_keeps_secret_and_capability() {
        let key: KeyResponse = serde_json::from_value(json!({
            "id": "k1",
            "name": "Prod Key",
            "key": "a1.k1:secret",
            "capability": { "chat:*": ["subscribe"] }
        }))
        .unwrap_or_else(|e| panic!("{e}"));
        let key = Key::from(key);
        assert_eq!(key.secret.expose_secret(), "a1.k1:secret");
        assert_eq!(key.capability.0["chat:*"], ["subscribe"]);
    }

    #[test]
    fn rule_defaults_status_and_request_mode() {
        let rule = Rule::try_from(rule_response(
            "http",
            json!({ "url": "https://example.com", "format": "json" }),
        ))
        .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(rule.status, "enabled");
        assert_eq!(rule.request_mode, "single");
        assert_eq!(rule.kind(), RuleKind::Http);
        assert_eq!(rule.source.channel_filter, "^orders");
    }

    #[test]
    fn unknown_rule_type_is_reported() {
        let err = Rule::try_from(rule_response("unknown/custom", json!({})))
            .map(|_| ())
            .unwrap_err();
        assert!(err.is_rule_scoped());
        assert!(
            matches!(err, CoreError::UnknownRuleType { ref rule_type, .. } if rule_type == "unknown/custom")
        );
    }

    #[test]
    fn malformed_target_is_reported() {
        let err = Rule::try_from(rule_response("kafka", json!({ "brokers": "not-a-list" })))
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidRuleTarget { .. }));
    }
}
