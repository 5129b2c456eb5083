// ── Per-application aggregation ──
//
// Fetches one application's children through a `ResourceSource`, emits
// their blocks, and concatenates them in a fixed order: application,
// keys, namespaces, queues, rules. Fetches run one after another; the
// first failing fetch aborts this application only.

use hcl::{Block, Body};
use serde::Serialize;
use tracing::{debug, warn};

use crate::emit;
use crate::error::CoreError;
use crate::model::{Application, Key, Namespace, Queue, Rule};
use crate::sanitize::sanitize;
use crate::source::ResourceSource;
use crate::terraform;

/// Extension of every generated file.
pub const FILE_EXTENSION: &str = "tf";

/// A rule that produced no block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRule {
    pub app_id: String,
    pub app_name: String,
    pub rule_id: String,
    pub reason: String,
}

/// Everything generated for one application.
#[derive(Debug, Clone)]
pub struct AppExport {
    pub application: Application,
    /// `sanitize(app.name)` plus extension.
    pub file_name: String,
    pub content: String,
    pub blocks: Vec<Block>,
    pub skipped_rules: Vec<SkippedRule>,
}

/// File name for an application's output.
pub fn file_name_for(app: &Application) -> String {
    format!("{}.{FILE_EXTENSION}", sanitize(&app.name))
}

/// Render blocks as one body, separated by one blank line.
pub fn render(blocks: &[Block]) -> Result<String, CoreError> {
    let body = Body::builder().add_blocks(blocks.iter().cloned()).build();
    terraform::render(&body)
}

/// Builds the full output of one application.
pub struct AppAggregator<'a, S> {
    source: &'a S,
}

impl<'a, S: ResourceSource> AppAggregator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    pub async fn aggregate(&self, app: &Application) -> Result<AppExport, CoreError> {
        let owner = app.name.as_str();
        let mut blocks = vec![emit::application(app)];

        let keys = self.source.list_keys(&app.id).await?;
        debug!(app = owner, count = keys.len(), "fetched keys");
        blocks.extend(keys.into_iter().map(Key::from).map(|k| emit::key(&k, owner)));

        let namespaces = self.source.list_namespaces(&app.id).await?;
        debug!(app = owner, count = namespaces.len(), "fetched namespaces");
        blocks.extend(
            namespaces
                .into_iter()
                .map(Namespace::from)
                .map(|ns| emit::namespace(&ns, owner)),
        );

        let queues = self.source.list_queues(&app.id).await?;
        debug!(app = owner, count = queues.len(), "fetched queues");
        blocks.extend(
            queues
                .into_iter()
                .map(Queue::from)
                .map(|q| emit::queue(&q, owner)),
        );

        let rules = self.source.list_rules(&app.id).await?;
        debug!(app = owner, count = rules.len(), "fetched rules");
        let mut skipped_rules = Vec::new();
        for raw in rules {
            let rule_id = raw.id.clone();
            // Conversion only fails for reasons local to the rule.
            match Rule::try_from(raw) {
                Ok(rule) => blocks.push(emit::rule(&rule, owner)),
                Err(err) => {
                    warn!(app = owner, rule_id = %rule_id, error = %err, "skipping rule");
                    skipped_rules.push(SkippedRule {
                        app_id: app.id.clone(),
                        app_name: app.name.clone(),
                        rule_id,
                        reason: err.to_string(),
                    });
                }
            }
        }

        Ok(AppExport {
            application: app.clone(),
            file_name: file_name_for(app),
            content: render(&blocks)?,
            blocks,
            skipped_rules,
        })
    }
}
