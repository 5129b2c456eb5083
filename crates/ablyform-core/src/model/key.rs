// ── API key domain type ──

use indexmap::IndexMap;
use secrecy::SecretString;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// An application API key.
///
/// `secret` holds the full key material. Nothing in the crate renders it:
/// the generated block only declares the key's name and capability.
#[derive(Debug, Clone)]
pub struct Key {
    pub id: String,
    pub name: String,
    pub secret: SecretString,
    pub capability: Capability,
}

/// Channel pattern → permitted operations, in API order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Capability(pub IndexMap<String, Vec<String>>);

impl Capability {
    /// Build from the raw JSON object returned by the API.
    ///
    /// A bare string becomes a one-element list. Any other non-list value,
    /// or a non-string list element, is kept as its JSON text and logged.
    pub fn from_json(raw: &serde_json::Map<String, Value>) -> Self {
        let entries = raw
            .iter()
            .map(|(pattern, ops)| {
                let ops = match ops {
                    Value::Array(items) => items
                        .iter()
                        .map(|item| match item {
                            Value::String(s) => s.clone(),
                            other => {
                                warn!(pattern, value = %other, "non-string capability operation");
                                other.to_string()
                            }
                        })
                        .collect(),
                    Value::String(s) => vec![s.clone()],
                    other => {
                        warn!(pattern, value = %other, "unexpected capability shape");
                        vec![other.to_string()]
                    }
                };
                (pattern.clone(), ops)
            })
            .collect();
        Self(entries)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
