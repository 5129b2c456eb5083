//! Field projection for rule targets.
//!
//! Each rule kind exposes a different subset of target fields. [`project`]
//! is an exhaustive match over [`RuleTarget`] that renders the relevant
//! subset as a `target = { ... }` object. Absent optional fields are
//! projected with a fixed default (`""`, `false`, `null`) so the block
//! shape for a given kind never varies.

use hcl::Expression;

use crate::model::{
    AmqpExternalTarget, AmqpTarget, AwsAuthentication, AzureFunctionTarget, GoogleFunctionTarget,
    Header, HttpTarget, KafkaTarget, KinesisTarget, LambdaTarget, PulsarTarget, RuleTarget,
    SqsTarget, ZapierTarget,
};
use crate::terraform::{number_or_null, object, string_list, string_or_empty};

/// Project `target` into the object assigned to a rule block's `target` attribute.
pub fn project(target: &RuleTarget) -> Expression {
    match target {
        RuleTarget::Http(t) => http(t),
        RuleTarget::Amqp(t) => amqp(t),
        RuleTarget::AmqpExternal(t) => amqp_external(t),
        RuleTarget::Kinesis(t) => kinesis(t),
        RuleTarget::Lambda(t) => lambda(t),
        RuleTarget::Sqs(t) => sqs(t),
        RuleTarget::AzureFunction(t) => azure_function(t),
        RuleTarget::GoogleFunction(t) => google_function(t),
        RuleTarget::Kafka(t) => kafka(t),
        RuleTarget::Pulsar(t) => pulsar(t),
        RuleTarget::Zapier(t) => zapier(t),
    }
}

// ── Shared pieces ────────────────────────────────────────────────────

fn headers(headers: &[Header]) -> Expression {
    Expression::Array(
        headers
            .iter()
            .map(|h| {
                object([
                    ("name", Expression::String(h.name.clone())),
                    ("value", Expression::String(h.value.clone())),
                ])
            })
            .collect(),
    )
}

fn signing_key_id(value: Option<&String>) -> Expression {
    string_or_empty(value.map(String::as_str))
}

fn enveloped(value: Option<bool>) -> Expression {
    Expression::Bool(value.unwrap_or(false))
}

/// Always carries every credential field, whichever mode is in use.
fn aws_authentication(auth: &AwsAuthentication) -> Expression {
    object([
        ("mode", Expression::String(auth.authentication_mode.clone())),
        (
            "access_key_id",
            string_or_empty(auth.access_key_id.as_deref()),
        ),
        (
            "secret_access_key",
            string_or_empty(auth.secret_access_key.as_deref()),
        ),
        (
            "role_arn",
            string_or_empty(auth.assume_role_arn.as_deref()),
        ),
    ])
}

// ── Per-kind projections ─────────────────────────────────────────────

fn http(t: &HttpTarget) -> Expression {
    object([
        ("url", Expression::String(t.url.clone())),
        ("headers", headers(&t.headers)),
        ("signing_key_id", signing_key_id(t.signing_key_id.as_ref())),
        ("enveloped", enveloped(t.enveloped)),
        ("format", Expression::String(t.format.clone())),
    ])
}

fn amqp(t: &AmqpTarget) -> Expression {
    object([
        ("queue_id", Expression::String(t.queue_id.clone())),
        ("headers", headers(&t.headers)),
        ("enveloped", enveloped(t.enveloped)),
        ("format", Expression::String(t.format.clone())),
    ])
}

fn amqp_external(t: &AmqpExternalTarget) -> Expression {
    object([
        ("url", Expression::String(t.url.clone())),
        ("routing_key", Expression::String(t.routing_key.clone())),
        ("mandatory_route", Expression::Bool(t.mandatory_route)),
        ("persistent_messages", Expression::Bool(t.persistent_messages)),
        ("message_ttl", number_or_null(t.message_ttl)),
        ("headers", headers(&t.headers)),
        ("enveloped", enveloped(t.enveloped)),
        ("format", Expression::String(t.format.clone())),
    ])
}

fn kinesis(t: &KinesisTarget) -> Expression {
    object([
        ("region", Expression::String(t.region.clone())),
        ("stream_name", Expression::String(t.stream_name.clone())),
        ("partition_key", Expression::String(t.partition_key.clone())),
        ("authentication", aws_authentication(&t.authentication)),
        ("enveloped", enveloped(t.enveloped)),
        ("format", Expression::String(t.format.clone())),
    ])
}

fn lambda(t: &LambdaTarget) -> Expression {
    object([
        ("region", Expression::String(t.region.clone())),
        ("function_name", Expression::String(t.function_name.clone())),
        ("authentication", aws_authentication(&t.authentication)),
        ("enveloped", enveloped(t.enveloped)),
        ("format", Expression::String(t.format.clone())),
    ])
}

fn sqs(t: &SqsTarget) -> Expression {
    object([
        ("region", Expression::String(t.region.clone())),
        ("aws_account_id", Expression::String(t.aws_account_id.clone())),
        ("queue_name", Expression::String(t.queue_name.clone())),
        ("authentication", aws_authentication(&t.authentication)),
        ("enveloped", enveloped(t.enveloped)),
        ("format", Expression::String(t.format.clone())),
    ])
}

fn azure_function(t: &AzureFunctionTarget) -> Expression {
    object([
        ("azure_app_id", Expression::String(t.azure_app_id.clone())),
        ("function_name", Expression::String(t.function_name.clone())),
        ("headers", headers(&t.headers)),
        ("signing_key_id", signing_key_id(t.signing_key_id.as_ref())),
        ("enveloped", enveloped(t.enveloped)),
        ("format", Expression::String(t.format.clone())),
    ])
}

fn google_function(t: &GoogleFunctionTarget) -> Expression {
    object([
        ("region", Expression::String(t.region.clone())),
        ("project_id", Expression::String(t.project_id.clone())),
        ("function_name", Expression::String(t.function_name.clone())),
        ("headers", headers(&t.headers)),
        ("signing_key_id", signing_key_id(t.signing_key_id.as_ref())),
        ("enveloped", enveloped(t.enveloped)),
        ("format", Expression::String(t.format.clone())),
    ])
}

fn kafka(t: &KafkaTarget) -> Expression {
    let sasl = &t.auth.sasl;
    object([
        ("routing_key", Expression::String(t.routing_key.clone())),
        ("brokers", string_list(&t.brokers)),
        (
            "auth",
            object([(
                "sasl",
                object([
                    ("mechanism", Expression::String(sasl.mechanism.clone())),
                    ("username", Expression::String(sasl.username.clone())),
                    ("password", Expression::String(sasl.password.clone())),
                ]),
            )]),
        ),
        ("enveloped", enveloped(t.enveloped)),
        ("format", Expression::String(t.format.clone())),
    ])
}

fn pulsar(t: &PulsarTarget) -> Expression {
    object([
        ("routing_key", Expression::String(t.routing_key.clone())),
        ("topic", Expression::String(t.topic.clone())),
        ("service_url", Expression::String(t.service_url.clone())),
        ("tls_trust_certs", string_list(&t.tls_trust_certs)),
        (
            "authentication",
            object([
                (
                    "mode",
                    Expression::String(t.authentication.authentication_mode.clone()),
                ),
                (
                    "token",
                    string_or_empty(t.authentication.token.as_deref()),
                ),
            ]),
        ),
        ("enveloped", enveloped(t.enveloped)),
        ("format", Expression::String(t.format.clone())),
    ])
}

fn zapier(t: &ZapierTarget) -> Expression {
    object([
        ("url", Expression::String(t.url.clone())),
        ("headers", headers(&t.headers)),
        ("signing_key_id", signing_key_id(t.signing_key_id.as_ref())),
    ])
}
