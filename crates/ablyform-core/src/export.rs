//! Run orchestration.
//!
//! [`Exporter`] drives one export run: list applications, ask for
//! confirmation, aggregate each application in listing order, and hand
//! each result to an [`OutputSink`]. Per-application failures are either
//! isolated (the default) or abort the run, depending on
//! [`FailurePolicy`]. Authentication failures always abort; write
//! failures are always isolated.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::aggregate::{AppAggregator, SkippedRule};
use crate::emit;
use crate::error::CoreError;
use crate::model::Application;
use crate::sink::OutputSink;
use crate::source::ResourceSource;

/// File name of the optional provider header.
pub const PROVIDER_FILE: &str = "providers.tf";

/// What to do when fetching one application's resources fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Record the failure and continue with the next application.
    #[default]
    Isolate,
    /// Stop the run at the first failing application.
    FailFast,
}

/// Progress notifications emitted during [`Exporter::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportEvent {
    Started { total: usize },
    AppStarted { index: usize, total: usize, app_name: String },
    AppWritten { app_name: String, path: PathBuf },
    AppFailed { app_name: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    pub app_id: String,
    pub app_name: String,
    pub path: PathBuf,
    pub blocks: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedApp {
    pub app_id: String,
    pub app_name: String,
    pub error: String,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub written: Vec<WrittenFile>,
    pub failed: Vec<FailedApp>,
    pub skipped_rules: Vec<SkippedRule>,
    pub provider_file: Option<PathBuf>,
}

impl ExportReport {
    /// `true` when every application was written.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// A later application whose file name sanitizes to the same path
    /// replaces the earlier file; the earlier application moves from
    /// `written` to `failed`.
    fn displace_previous_owner(&mut self, path: &Path, app: &Application) {
        let Some(pos) = self.written.iter().position(|w| w.path == path) else {
            return;
        };
        let previous = self.written.remove(pos);
        let err = CoreError::Overwritten {
            file: path.display().to_string(),
            by: app.name.clone(),
        };
        warn!(
            file = %path.display(),
            previous = %previous.app_name,
            app = %app.name,
            "file name collision, later application overwrites earlier one"
        );
        self.failed.push(FailedApp {
            app_id: previous.app_id,
            app_name: previous.app_name,
            error: err.to_string(),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The confirmation callback said no; nothing was fetched or written.
    Declined,
    Completed(ExportReport),
}

type Observer = Box<dyn Fn(&ExportEvent) + Send + Sync>;

/// Drives a full export run.
pub struct Exporter<S, W> {
    source: S,
    sink: W,
    policy: FailurePolicy,
    filter: Vec<String>,
    provider_header: bool,
    observer: Option<Observer>,
}

impl<S: ResourceSource, W: OutputSink> Exporter<S, W> {
    pub fn new(source: S, sink: W) -> Self {
        Self {
            source,
            sink,
            policy: FailurePolicy::default(),
            filter: Vec::new(),
            provider_header: false,
            observer: None,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Restrict the run to applications matching any selector (id or name).
    pub fn with_filter(mut self, selectors: Vec<String>) -> Self {
        self.filter = selectors;
        self
    }

    /// Also write `providers.tf` with the provider requirements.
    pub fn with_provider_header(mut self, enabled: bool) -> Self {
        self.provider_header = enabled;
        self
    }

    pub fn with_observer(mut self, observer: impl Fn(&ExportEvent) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn notify(&self, event: &ExportEvent) {
        if let Some(observer) = &self.observer {
            observer(event);
        }
    }

    /// List applications, applying the selector filter.
    ///
    /// A selector that matches nothing is an error.
    pub async fn applications(&self) -> Result<Vec<Application>, CoreError> {
        let apps: Vec<Application> = self
            .source
            .list_applications()
            .await?
            .into_iter()
            .map(Application::from)
            .collect();

        if self.filter.is_empty() {
            return Ok(apps);
        }

        if let Some(missing) = self
            .filter
            .iter()
            .find(|sel| !apps.iter().any(|app| app.matches(sel)))
        {
            return Err(CoreError::NotFound {
                entity_type: "application".into(),
                identifier: missing.clone(),
            });
        }

        Ok(apps
            .into_iter()
            .filter(|app| self.filter.iter().any(|sel| app.matches(sel)))
            .collect())
    }

    /// Run the export.
    ///
    /// `confirm` sees the applications about to be exported; returning
    /// `false` ends the run with [`RunOutcome::Declined`].
    pub async fn run<F>(&self, confirm: F) -> Result<RunOutcome, CoreError>
    where
        F: FnOnce(&[Application]) -> Result<bool, CoreError>,
    {
        let apps = self.applications().await?;
        if !confirm(&apps)? {
            info!("export declined");
            return Ok(RunOutcome::Declined);
        }

        let total = apps.len();
        self.notify(&ExportEvent::Started { total });
        info!(total, policy = ?self.policy, "starting export");

        let mut report = ExportReport::default();

        if self.provider_header {
            let header = emit::provider_block()?;
            report.provider_file = Some(self.sink.write(PROVIDER_FILE, &header)?);
        }

        let aggregator = AppAggregator::new(&self.source);

        for (index, app) in apps.iter().enumerate() {
            self.notify(&ExportEvent::AppStarted {
                index,
                total,
                app_name: app.name.clone(),
            });
            info!(app = %app.name, app_id = %app.id, "exporting application");

            let export = match aggregator.aggregate(app).await {
                Ok(export) => export,
                Err(err) if self.policy == FailurePolicy::FailFast || err.is_auth() => {
                    return Err(CoreError::AppExport {
                        app: app.name.clone(),
                        source: Box::new(err),
                    });
                }
                Err(err) => {
                    self.record_failure(&mut report, app, &err);
                    continue;
                }
            };

            report.skipped_rules.extend(export.skipped_rules);

            if self.provider_header && export.file_name == PROVIDER_FILE {
                let err = CoreError::ReservedFileName {
                    file: export.file_name,
                };
                self.record_failure(&mut report, app, &err);
                continue;
            }

            match self.sink.write(&export.file_name, &export.content) {
                Ok(path) => {
                    report.displace_previous_owner(&path, app);
                    self.notify(&ExportEvent::AppWritten {
                        app_name: app.name.clone(),
                        path: path.clone(),
                    });
                    report.written.push(WrittenFile {
                        app_id: app.id.clone(),
                        app_name: app.name.clone(),
                        path,
                        blocks: export.blocks.len(),
                    });
                }
                Err(err) => self.record_failure(&mut report, app, &err),
            }
        }

        info!(
            written = report.written.len(),
            failed = report.failed.len(),
            skipped_rules = report.skipped_rules.len(),
            "export finished"
        );
        Ok(RunOutcome::Completed(report))
    }

    fn record_failure(&self, report: &mut ExportReport, app: &Application, err: &CoreError) {
        warn!(app = %app.name, error = %err, "application export failed");
        self.notify(&ExportEvent::AppFailed {
            app_name: app.name.clone(),
            error: err.to_string(),
        });
        report.failed.push(FailedApp {
            app_id: app.id.clone(),
            app_name: app.name.clone(),
            error: err.to_string(),
        });
    }
}
