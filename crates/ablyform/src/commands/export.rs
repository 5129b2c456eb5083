//! `export` handler: fetch every application and write one Terraform file each.

use std::time::Duration;

use ablyform_core::{
    CoreError, DirectoryWriter, ExportEvent, ExportReport, Exporter, FailurePolicy, RunOutcome,
};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{ExportArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::util;

pub async fn handle(args: ExportArgs, global: &GlobalOpts) -> Result<(), CliError> {
    // Credentials first: a missing token must fail before any request.
    let (cfg, control) = util::connection_settings(global)?;
    util::require_interactive("export", global.yes)?;

    let dir = args.dir.unwrap_or_else(|| cfg.defaults.output_dir.clone());
    let policy = if args.fail_fast || cfg.defaults.fail_fast {
        FailurePolicy::FailFast
    } else {
        FailurePolicy::Isolate
    };

    let source = util::connect(&control).await?;
    let progress = progress_bar(global.quiet);
    let observer_bar = progress.clone();

    let exporter = Exporter::new(source, DirectoryWriter::new(&dir))
        .with_policy(policy)
        .with_filter(args.apps)
        .with_provider_header(args.with_provider)
        .with_observer(move |event| on_event(&observer_bar, event));

    let yes = global.yes;
    let target = dir.display().to_string();
    let mut prompt_error = None;
    let outcome = exporter
        .run(|apps| {
            let message = format!("Export {} application(s) to {target}?", apps.len());
            util::confirm(&message, yes).map_err(|e| stash(&mut prompt_error, e))
        })
        .await;
    progress.finish_and_clear();

    if let Some(err) = prompt_error {
        return Err(err);
    }

    match outcome? {
        RunOutcome::Declined => {
            if !global.quiet {
                eprintln!("Export cancelled; nothing was written.");
            }
            Ok(())
        }
        RunOutcome::Completed(report) => {
            let color = output::should_color(&global.color);
            let out = output::render_single(
                &global.output,
                &report,
                |r| summary(r, color),
                |r| {
                    r.written
                        .iter()
                        .map(|w| w.path.display().to_string())
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            );
            output::print_output(&out, global.quiet);

            if report.is_complete() {
                Ok(())
            } else {
                Err(CliError::PartialExport {
                    failed: report.failed.len(),
                    total: report.failed.len() + report.written.len(),
                })
            }
        }
    }
}

/// Keep a prompt failure for the caller and give the exporter an error
/// that stops the run.
fn stash(slot: &mut Option<CliError>, err: CliError) -> CoreError {
    let stop = CoreError::Internal(err.to_string());
    *slot = Some(err);
    stop
}

// ── Progress ────────────────────────────────────────────────────────

fn progress_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

fn on_event(bar: &ProgressBar, event: &ExportEvent) {
    match event {
        ExportEvent::Started { total } => {
            bar.set_length(u64::try_from(*total).unwrap_or(u64::MAX));
        }
        ExportEvent::AppStarted { app_name, .. } => bar.set_message(app_name.clone()),
        ExportEvent::AppWritten { .. } | ExportEvent::AppFailed { .. } => bar.inc(1),
    }
}

// ── Summary ─────────────────────────────────────────────────────────

fn summary(report: &ExportReport, color: bool) -> String {
    let mut lines = Vec::new();

    for file in &report.written {
        lines.push(format!(
            "{} {} {}",
            output::paint("wrote", Tone::Success, color),
            file.path.display(),
            output::paint(
                &format!("({}, {} blocks)", file.app_name, file.blocks),
                Tone::Muted,
                color
            ),
        ));
    }
    if let Some(path) = &report.provider_file {
        lines.push(format!(
            "{} {}",
            output::paint("wrote", Tone::Success, color),
            path.display()
        ));
    }
    for skipped in &report.skipped_rules {
        lines.push(format!(
            "{} rule {} in {}: {}",
            output::paint("skipped", Tone::Warning, color),
            skipped.rule_id,
            skipped.app_name,
            skipped.reason
        ));
    }
    for failed in &report.failed {
        lines.push(format!(
            "{} {}: {}",
            output::paint("failed", Tone::Failure, color),
            failed.app_name,
            failed.error
        ));
    }

    lines.push(format!(
        "{} file(s) written, {} application(s) failed, {} rule(s) skipped",
        report.written.len(),
        report.failed.len(),
        report.skipped_rules.len()
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use ablyform_core::{FailedApp, SkippedRule, WrittenFile};

    use super::*;
    use crate::error::exit_code;

    #[test]
    fn prompt_failure_keeps_usage_exit_code() {
        let mut slot = None;
        let stop = stash(&mut slot, util::prompt_err("not a terminal"));

        assert!(matches!(stop, CoreError::Internal(_)));
        let err = slot.unwrap_or_else(|| panic!("prompt error was dropped"));
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert!(err.to_string().contains("prompt failed: not a terminal"));
    }

    #[test]
    fn progress_length_follows_started_event() {
        let bar = ProgressBar::hidden();
        on_event(&bar, &ExportEvent::Started { total: 3 });
        assert_eq!(bar.length(), Some(3));
    }

    #[test]
    fn summary_lists_every_outcome() {
        let report = ExportReport {
            written: vec![WrittenFile {
                app_id: "a1".into(),
                app_name: "My App".into(),
                path: PathBuf::from("out/my_app.tf"),
                blocks: 4,
            }],
            failed: vec![FailedApp {
                app_id: "a2".into(),
                app_name: "Broken".into(),
                error: "API error: boom".into(),
            }],
            skipped_rules: vec![SkippedRule {
                app_id: "a1".into(),
                app_name: "My App".into(),
                rule_id: "r9".into(),
                reason: "unrecognized rule type 'carrier-pigeon'".into(),
            }],
            provider_file: None,
        };

        let text = summary(&report, false);
        assert!(text.contains("wrote out/my_app.tf (My App, 4 blocks)"));
        assert!(text.contains("skipped rule r9 in My App"));
        assert!(text.contains("failed Broken: API error: boom"));
        assert!(text.ends_with("1 file(s) written, 1 application(s) failed, 1 rule(s) skipped"));
    }
}
