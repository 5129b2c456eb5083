// ── Integration rule domain types ──
//
// A rule routes channel events to an external system. The shape of its
// target depends entirely on the rule type, so the target is a tagged
// enum with one payload struct per kind. Payload structs deserialize
// straight from the API's camelCase JSON.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

// ── Rule kind ────────────────────────────────────────────────────────

/// The eleven rule types the exporter understands.
///
/// `Display` yields the canonical wire name; `FromStr` also accepts the
/// spellings the live API uses for the HTTP-based integrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum RuleKind {
    #[strum(to_string = "http")]
    Http,
    #[strum(to_string = "amqp")]
    Amqp,
    #[strum(to_string = "amqp/external")]
    AmqpExternal,
    #[strum(to_string = "aws/kinesis")]
    Kinesis,
    #[strum(to_string = "aws/lambda")]
    Lambda,
    #[strum(to_string = "aws/sqs")]
    Sqs,
    #[strum(to_string = "azure/function", serialize = "http/azure-function")]
    AzureFunction,
    #[strum(to_string = "google/function", serialize = "http/google-cloud-function")]
    GoogleFunction,
    #[strum(to_string = "kafka")]
    Kafka,
    #[strum(to_string = "pulsar")]
    Pulsar,
    #[strum(to_string = "zapier", serialize = "http/zapier")]
    Zapier,
}

impl RuleKind {
    /// Parse a `ruleType` string; `None` for unrecognized types.
    pub fn from_wire(rule_type: &str) -> Option<Self> {
        rule_type.parse().ok()
    }

    /// Terraform resource type for rules of this kind.
    pub fn block_type(self) -> &'static str {
        match self {
            Self::Http => "ably_rule_http",
            Self::Amqp => "ably_rule_amqp",
            Self::AmqpExternal => "ably_rule_amqp_external",
            Self::Kinesis => "ably_rule_kinesis",
            Self::Lambda => "ably_rule_lambda",
            Self::Sqs => "ably_rule_sqs",
            Self::AzureFunction => "ably_rule_azure_function",
            Self::GoogleFunction => "ably_rule_google_function",
            Self::Kafka => "ably_rule_kafka",
            Self::Pulsar => "ably_rule_pulsar",
            Self::Zapier => "ably_rule_zapier",
        }
    }
}

// ── Rule ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub id: String,
    /// `"enabled"` or `"disabled"`.
    pub status: String,
    /// `"single"` or `"batch"`.
    pub request_mode: String,
    pub source: RuleSource,
    pub target: RuleTarget,
}

impl Rule {
    pub fn kind(&self) -> RuleKind {
        self.target.kind()
    }
}

/// Which channel events feed the rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSource {
    /// Regular expression matched against channel names.
    pub channel_filter: String,
    /// Event type, e.g. `channel.message` or `channel.presence`.
    pub source_type: String,
}

// ── Target payloads ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// Credentials shared by the AWS targets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsAuthentication {
    /// `"credentials"` or `"assumeRole"`.
    pub authentication_mode: String,
    #[serde(default)]
    pub access_key_id: Option<String>,
    #[serde(default)]
    pub secret_access_key: Option<String>,
    #[serde(default)]
    pub assume_role_arn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KafkaAuth {
    pub sasl: Sasl,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Sasl {
    pub mechanism: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PulsarAuthentication {
    pub authentication_mode: String,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpTarget {
    pub url: String,
    pub format: String,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub signing_key_id: Option<String>,
    #[serde(default)]
    pub enveloped: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmqpTarget {
    pub queue_id: String,
    pub format: String,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub enveloped: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmqpExternalTarget {
    pub url: String,
    pub routing_key: String,
    pub mandatory_route: bool,
    pub persistent_messages: bool,
    pub format: String,
    #[serde(default)]
    pub headers: Vec<Header>,
    /// Per-message TTL in minutes.
    #[serde(default)]
    pub message_ttl: Option<u64>,
    #[serde(default)]
    pub enveloped: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinesisTarget {
    pub region: String,
    pub stream_name: String,
    pub partition_key: String,
    pub format: String,
    pub authentication: AwsAuthentication,
    #[serde(default)]
    pub enveloped: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LambdaTarget {
    pub region: String,
    pub function_name: String,
    /// The API does not always report a format for Lambda targets.
    #[serde(default = "default_format")]
    pub format: String,
    pub authentication: AwsAuthentication,
    #[serde(default)]
    pub enveloped: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqsTarget {
    pub region: String,
    pub aws_account_id: String,
    pub queue_name: String,
    pub format: String,
    pub authentication: AwsAuthentication,
    #[serde(default)]
    pub enveloped: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureFunctionTarget {
    pub azure_app_id: String,
    #[serde(alias = "azureFunctionName")]
    pub function_name: String,
    pub format: String,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub signing_key_id: Option<String>,
    #[serde(default)]
    pub enveloped: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleFunctionTarget {
    pub region: String,
    pub project_id: String,
    pub function_name: String,
    pub format: String,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub signing_key_id: Option<String>,
    #[serde(default)]
    pub enveloped: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaTarget {
    pub brokers: Vec<String>,
    pub routing_key: String,
    pub format: String,
    pub auth: KafkaAuth,
    #[serde(default)]
    pub enveloped: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PulsarTarget {
    pub routing_key: String,
    pub topic: String,
    pub service_url: String,
    #[serde(default)]
    pub tls_trust_certs: Vec<String>,
    pub format: String,
    pub authentication: PulsarAuthentication,
    #[serde(default)]
    pub enveloped: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZapierTarget {
    pub url: String,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub signing_key_id: Option<String>,
}

fn default_format() -> String {
    "json".into()
}

// ── Target ───────────────────────────────────────────────────────────

/// Where and how a rule delivers events. One variant per [`RuleKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleTarget {
    Http(HttpTarget),
    Amqp(AmqpTarget),
    AmqpExternal(AmqpExternalTarget),
    Kinesis(KinesisTarget),
    Lambda(LambdaTarget),
    Sqs(SqsTarget),
    AzureFunction(AzureFunctionTarget),
    GoogleFunction(GoogleFunctionTarget),
    Kafka(KafkaTarget),
    Pulsar(PulsarTarget),
    Zapier(ZapierTarget),
}

impl RuleTarget {
    /// Decode an untyped target payload as the variant for `kind`.
    pub fn from_json(kind: RuleKind, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            RuleKind::Http => Self::Http(serde_json::from_value(value)?),
            RuleKind::Amqp => Self::Amqp(serde_json::from_value(value)?),
            RuleKind::AmqpExternal => Self::AmqpExternal(serde_json::from_value(value)?),
            RuleKind::Kinesis => Self::Kinesis(serde_json::from_value(value)?),
            RuleKind::Lambda => Self::Lambda(serde_json::from_value(value)?),
            RuleKind::Sqs => Self::Sqs(serde_json::from_value(value)?),
            RuleKind::AzureFunction => Self::AzureFunction(serde_json::from_value(value)?),
            RuleKind::GoogleFunction => Self::GoogleFunction(serde_json::from_value(value)?),
            RuleKind::Kafka => Self::Kafka(serde_json::from_value(value)?),
            RuleKind::Pulsar => Self::Pulsar(serde_json::from_value(value)?),
            RuleKind::Zapier => Self::Zapier(serde_json::from_value(value)?),
        })
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Http(_) => RuleKind::Http,
            Self::Amqp(_) => RuleKind::Amqp,
            Self::AmqpExternal(_) => RuleKind::AmqpExternal,
            Self::Kinesis(_) => RuleKind::Kinesis,
            Self::Lambda(_) => RuleKind::Lambda,
            Self::Sqs(_) => RuleKind::Sqs,
            Self::AzureFunction(_) => RuleKind::AzureFunction,
            Self::GoogleFunction(_) => RuleKind::GoogleFunction,
            Self::Kafka(_) => RuleKind::Kafka,
            Self::Pulsar(_) => RuleKind::Pulsar,
            Self::Zapier(_) => RuleKind::Zapier,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn wire_names_parse_back() {
        for kind in RuleKind::iter() {
            assert_eq!(RuleKind::from_wire(&kind.to_string()), Some(kind));
        }
    }

    #[test]
    fn live_api_aliases_are_accepted() {
        assert_eq!(
            RuleKind::from_wire("http/azure-function"),
            Some(RuleKind::AzureFunction)
        );
        assert_eq!(
            RuleKind::from_wire("http/google-cloud-function"),
            Some(RuleKind::GoogleFunction)
        );
        assert_eq!(RuleKind::from_wire("http/zapier"), Some(RuleKind::Zapier));
        assert_eq!(RuleKind::Zapier.to_string(), "zapier");
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert_eq!(RuleKind::from_wire("unknown/custom"), None);
        assert_eq!(RuleKind::from_wire("HTTP"), None);
    }

    #[test]
    fn block_types_are_distinct() {
        let types: HashSet<&str> = RuleKind::iter().map(RuleKind::block_type).collect();
        assert_eq!(types.len(), 11);
    }

    #[test]
    fn lambda_format_defaults_to_json() {
        let target = RuleTarget::from_json(
            RuleKind::Lambda,
            json!({
                "region": "us-east-1",
                "functionName": "handler",
                "authentication": { "authenticationMode": "assumeRole", "assumeRoleArn": "arn:x" }
            }),
        )
        .unwrap_or_else(|e| panic!("lambda target should decode: {e}"));
        let RuleTarget::Lambda(lambda) = target else {
            panic!("expected lambda target");
        };
        assert_eq!(lambda.format, "json");
        assert_eq!(lambda.authentication.access_key_id, None);
    }

    #[test]
    fn azure_function_name_alias() {
        let target = RuleTarget::from_json(
            RuleKind::AzureFunction,
            json!({ "azureAppId": "app", "azureFunctionName": "fn", "format": "json" }),
        )
        .unwrap_or_else(|e| panic!("azure target should decode: {e}"));
        assert!(matches!(target, RuleTarget::AzureFunction(ref t) if t.function_name == "fn"));
        assert_eq!(target.kind(), RuleKind::AzureFunction);
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let err = RuleTarget::from_json(RuleKind::Http, json!({ "format": "json" }));
        assert!(err.is_err());
        assert!(RuleTarget::from_json(RuleKind::Amqp, serde_json::Value::Null).is_err());
    }
}
