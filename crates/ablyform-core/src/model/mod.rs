// ── Domain model ──
//
// Read-only snapshots of one account's resources, materialized once per
// run. Conversion from wire types lives in `crate::convert`.

pub mod application;
pub mod key;
pub mod namespace;
pub mod queue;
pub mod rule;

pub use application::Application;
pub use key::{Capability, Key};
pub use namespace::{Batching, Namespace};
pub use queue::Queue;
pub use rule::{
    AmqpExternalTarget, AmqpTarget, AwsAuthentication, AzureFunctionTarget, GoogleFunctionTarget,
    Header, HttpTarget, KafkaAuth, KafkaTarget, KinesisTarget, LambdaTarget, PulsarAuthentication,
    PulsarTarget, Rule, RuleKind, RuleSource, RuleTarget, Sasl, SqsTarget, ZapierTarget,
};
