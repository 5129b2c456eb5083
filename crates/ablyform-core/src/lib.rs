//! Resource-to-Terraform mapping engine.
//!
//! Turns the resource graph of an Ably account, as returned by the
//! Control API, into Terraform configuration: one `.tf` file per
//! application.
//!
//! - **[`sanitize`](mod@sanitize)**: normalizes human-readable names into block identifiers.
//! - **[`terraform`]**: block and expression helpers over `hcl-rs`, plus rendering.
//! - **[`project`]**: per-rule-kind field projection of a [`RuleTarget`].
//! - **[`emit`]**: one emitter per resource kind, each a pure function.
//! - **[`AppAggregator`]**: fetches one application's children through a
//!   [`ResourceSource`] and concatenates their blocks in a fixed order.
//! - **[`Exporter`]**: drives a whole run: list, confirm, aggregate,
//!   write through an [`OutputSink`], and report.

pub mod aggregate;
pub mod config;
pub mod convert;
pub mod emit;
pub mod error;
pub mod export;
pub mod model;
pub mod project;
pub mod sanitize;
pub mod sink;
pub mod source;
pub mod terraform;

// ── Primary re-exports ──────────────────────────────────────────────
pub use aggregate::{AppAggregator, AppExport, SkippedRule};
pub use config::{ControlConfig, DEFAULT_API_URL};
pub use error::CoreError;
pub use export::{
    ExportEvent, ExportReport, Exporter, FailedApp, FailurePolicy, RunOutcome, WrittenFile,
};
pub use sanitize::{block_ident, sanitize};
pub use sink::{DirectoryWriter, OutputSink};
pub use source::{ControlSource, ResourceSource};

pub use model::{
    Application, Batching, Capability, Key, Namespace, Queue, Rule, RuleKind, RuleSource,
    RuleTarget,
};
