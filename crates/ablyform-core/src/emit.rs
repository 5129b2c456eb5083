//! Resource emitters.
//!
//! One pure function per resource kind. Each computes the block
//! identifier from the owning application's name, renders the entity's
//! own fields, and references the owning application through
//! `ably_app.<app>.id`. No I/O happens here.

use hcl::{Block, Body, Expression};
use tracing::debug;

use crate::error::CoreError;
use crate::model::{Application, Key, Namespace, Queue, Rule};
use crate::project::project;
use crate::sanitize::{block_ident, sanitize};
use crate::terraform::{self, data_object, id_reference, object, string_list};

pub const APP_BLOCK_TYPE: &str = "ably_app";
pub const KEY_BLOCK_TYPE: &str = "ably_api_key";
pub const NAMESPACE_BLOCK_TYPE: &str = "ably_namespace";
pub const QUEUE_BLOCK_TYPE: &str = "ably_queue";

/// Terraform registry source of the provider the emitted blocks target.
pub const PROVIDER_SOURCE: &str = "ably/ably";

const DEFAULT_APP_STATUS: &str = "enabled";

/// Reference expression for the owning application's id.
fn app_ref(app_name: &str) -> Expression {
    id_reference(APP_BLOCK_TYPE, &sanitize(app_name))
}

pub fn application(app: &Application) -> Block {
    let ident = sanitize(&app.name);
    debug!(block = %ident, "emitting application");
    terraform::resource(APP_BLOCK_TYPE, &ident)
        .add_attribute(("name", app.name.as_str()))
        .add_attribute((
            "status",
            app.status.as_deref().unwrap_or(DEFAULT_APP_STATUS),
        ))
        .add_attribute(("tls_only", app.tls_only.unwrap_or(false)))
        .build()
}

/// The key's secret material is never part of the block.
pub fn key(key: &Key, app_name: &str) -> Block {
    let ident = block_ident(app_name, &key.name);
    debug!(block = %ident, "emitting key");
    let capabilities = data_object(
        key.capability
            .iter()
            .map(|(pattern, ops)| (pattern, string_list(ops))),
    );
    terraform::resource(KEY_BLOCK_TYPE, &ident)
        .add_attribute(("app_id", app_ref(app_name)))
        .add_attribute(("name", key.name.as_str()))
        .add_attribute(("capabilities", capabilities))
        .build()
}

pub fn namespace(ns: &Namespace, app_name: &str) -> Block {
    let ident = block_ident(app_name, &ns.id);
    debug!(block = %ident, "emitting namespace");
    let mut block = terraform::resource(NAMESPACE_BLOCK_TYPE, &ident)
        .add_attribute(("app_id", app_ref(app_name)))
        .add_attribute(("namespace_id", ns.id.as_str()))
        .add_attribute(("authenticated", ns.authenticated))
        .add_attribute(("persisted", ns.persisted))
        .add_attribute(("persist_last", ns.persist_last))
        .add_attribute(("push_enabled", ns.push_enabled))
        .add_attribute(("tls_only", ns.tls_only));

    if let Some(batching) = &ns.batching {
        block = block.add_attribute(("batching_enabled", batching.enabled));
        if let Some(interval) = batching.interval {
            block = block.add_attribute(("batching_interval", interval));
        }
        if let Some(policy) = &batching.policy {
            block = block.add_attribute(("batching_policy", policy.as_str()));
        }
    }
    block.build()
}

pub fn queue(queue: &Queue, app_name: &str) -> Block {
    let ident = block_ident(app_name, &queue.name);
    debug!(block = %ident, "emitting queue");
    terraform::resource(QUEUE_BLOCK_TYPE, &ident)
        .add_attribute(("app_id", app_ref(app_name)))
        .add_attribute(("name", queue.name.as_str()))
        .add_attribute(("ttl", queue.ttl))
        .add_attribute(("max_length", queue.max_length))
        .add_attribute(("region", queue.region.as_str()))
        .build()
}

pub fn rule(rule: &Rule, app_name: &str) -> Block {
    let ident = block_ident(app_name, &rule.id);
    let kind = rule.kind();
    debug!(block = %ident, %kind, "emitting rule");
    terraform::resource(kind.block_type(), &ident)
        .add_attribute(("app_id", app_ref(app_name)))
        .add_attribute(("status", rule.status.as_str()))
        .add_attribute(("request_mode", rule.request_mode.as_str()))
        .add_attribute((
            "source",
            object([
                ("channel_filter", Expression::String(rule.source.channel_filter.clone())),
                ("type", Expression::String(rule.source.source_type.clone())),
            ]),
        ))
        .add_attribute(("target", project(&rule.target)))
        .build()
}

/// `terraform { required_providers { ... } }` plus an empty provider
/// block; the provider reads its token from `ABLY_ACCOUNT_TOKEN`.
pub fn provider_block() -> Result<String, CoreError> {
    let required = Block::builder("required_providers")
        .add_attribute(("ably", object([("source", Expression::from(PROVIDER_SOURCE))])))
        .build();
    let body = Body::builder()
        .add_block(Block::builder("terraform").add_block(required).build())
        .add_block(Block::builder("provider").add_label("ably").build())
        .build();
    terraform::render(&body)
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use secrecy::SecretString;
    use serde_json::json;

    use super::*;
    use crate::model::{Batching, Capability, RuleKind, RuleSource, RuleTarget};
    use crate::terraform::{address, attribute, render};

    fn rendered(block: &Block) -> String {
        render(block).unwrap_or_else(|e| panic!("render: {e}"))
    }

    fn app() -> Application {
        Application {
            id: "a1".into(),
            name: "My App".into(),
            status: None,
            tls_only: Some(true),
        }
    }

    fn prod_key() -> Key {
        let mut cap = IndexMap::new();
        cap.insert("chat:*".to_owned(), vec!["subscribe".to_owned()]);
        Key {
            id: "k1".into(),
            name: "Prod Key".into(),
            secret: SecretString::from("a1.k1:top-secret".to_owned()),
            capability: Capability(cap),
        }
    }

    #[test]
    fn application_block() {
        let expected = r#"resource "ably_app" "my_app" {
  name = "My App"
  status = "enabled"
  tls_only = true
}
"#;
        assert_eq!(rendered(&application(&app())), expected);
    }

    #[test]
    fn key_block_references_app_and_hides_secret() {
        let text = rendered(&key(&prod_key(), "My App"));
        let expected = r#"resource "ably_api_key" "my_app_prod_key" {
  app_id = ably_app.my_app.id
  name = "Prod Key"
  capabilities = {
    "chat:*" = ["subscribe"]
  }
}
"#;
        assert_eq!(text, expected);
        assert!(!text.contains("top-secret"));
    }

    #[test]
    fn keyword_channel_patterns_stay_quoted() {
        let mut k = prod_key();
        k.capability.0.insert("for".to_owned(), vec!["publish".to_owned()]);
        k.capability.0.insert("in".to_owned(), vec!["presence".to_owned()]);
        let text = rendered(&key(&k, "My App"));
        assert!(text.contains(r#""for" = ["publish"]"#), "{text}");
        let body = hcl::parse(&text).unwrap_or_else(|e| panic!("{e}\n{text}"));
        let block = body
            .blocks()
            .next()
            .unwrap_or_else(|| panic!("no block in {text}"));
        let Some(Expression::Object(caps)) = attribute(block, "capabilities") else {
            panic!("capabilities missing in {text}");
        };
        let patterns: Vec<String> = caps.keys().map(ToString::to_string).collect();
        assert_eq!(patterns, ["chat:*", "for", "in"]);
    }

    #[test]
    fn key_name_with_quote_is_escaped() {
        let mut k = prod_key();
        k.name = r#"The "Main" Key"#.into();
        let text = rendered(&key(&k, "My App"));
        assert!(text.contains(r#"name = "The \"Main\" Key""#));
        assert!(text.contains(r#""my_app_the__main__key""#));
    }

    #[test]
    fn namespace_block_omits_batching_when_unset() {
        let ns = Namespace {
            id: "chat".into(),
            authenticated: true,
            persisted: false,
            persist_last: false,
            push_enabled: false,
            tls_only: true,
            batching: None,
        };
        let block = namespace(&ns, "My App");
        assert_eq!(address(&block).as_deref(), Some("ably_namespace.my_app_chat"));
        assert!(attribute(&block, "batching_enabled").is_none());
        assert_eq!(attribute(&block, "authenticated"), Some(&Expression::Bool(true)));
    }

    #[test]
    fn namespace_block_with_batching() {
        let ns = Namespace {
            id: "events".into(),
            authenticated: false,
            persisted: true,
            persist_last: true,
            push_enabled: false,
            tls_only: false,
            batching: Some(Batching {
                enabled: true,
                interval: Some(100),
                policy: None,
            }),
        };
        let text = rendered(&namespace(&ns, "My App"));
        assert!(text.contains("batching_enabled = true\n"));
        assert!(text.contains("batching_interval = 100\n"));
        assert!(!text.contains("batching_policy"));
    }

    #[test]
    fn queue_block() {
        let q = Queue {
            id: "a1:us-east-1-a:orders".into(),
            name: "orders".into(),
            ttl: 60,
            max_length: 10_000,
            region: "us-east-1-a".into(),
        };
        let expected = r#"resource "ably_queue" "my_app_orders" {
  app_id = ably_app.my_app.id
  name = "orders"
  ttl = 60
  max_length = 10000
  region = "us-east-1-a"
}
"#;
        assert_eq!(rendered(&queue(&q, "My App")), expected);
    }

    #[test]
    fn rule_block_uses_kind_specific_type() {
        let r = Rule {
            id: "r1".into(),
            status: "enabled".into(),
            request_mode: "single".into(),
            source: RuleSource {
                channel_filter: "^orders".into(),
                source_type: "channel.message".into(),
            },
            target: RuleTarget::from_json(
                RuleKind::Zapier,
                json!({ "url": "https://hooks.zapier.com/x" }),
            )
            .unwrap_or_else(|e| panic!("{e}")),
        };
        let expected = r#"resource "ably_rule_zapier" "my_app_r1" {
  app_id = ably_app.my_app.id
  status = "enabled"
  request_mode = "single"
  source = {
    channel_filter = "^orders"
    type = "channel.message"
  }
  target = {
    url = "https://hooks.zapier.com/x"
    headers = []
    signing_key_id = ""
  }
}
"#;
        assert_eq!(rendered(&rule(&r, "My App")), expected);
    }

    #[test]
    fn emitting_twice_is_byte_identical() {
        let k = prod_key();
        assert_eq!(rendered(&key(&k, "My App")), rendered(&key(&k, "My App")));
        assert_eq!(rendered(&application(&app())), rendered(&application(&app())));
    }

    #[test]
    fn provider_header() {
        let expected = r#"terraform {
  required_providers {
    ably = {
      source = "ably/ably"
    }
  }
}

provider "ably" {}
"#;
        let header = provider_block().unwrap_or_else(|e| panic!("render: {e}"));
        assert_eq!(header, expected);
        assert!(hcl::parse(&header).is_ok());
    }
}
