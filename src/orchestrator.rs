//! Audit run orchestration
//!
//! A linear pipeline: pre-steps, runner invocation, report location,
//! summarization, artifact rendering, post-steps. The only deliberate
//! exception to fail-fast is the runner's own exit code: failing tests are an
//! expected, reportable outcome, so the pipeline keeps going to aggregate
//! them.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use chrono::{SecondsFormat, Utc};
use colored::Colorize;
use tokio::process::Command;
use tracing::{info, warn};

use crate::common::config::{AuditConfig, PlaywrightConfig};
use crate::common::{Error, Result};
use crate::report::{render_junit, render_markdown, Summary};
use crate::steps::run_steps;

/// File name the runner's JSON report is expected under
pub const REPORT_FILE: &str = "playwright-report.json";

/// Markdown artifact file name
pub const MARKDOWN_FILE: &str = "SUMMARY.md";

/// JUnit artifact file name
pub const JUNIT_FILE: &str = "junit.xml";

/// Execute the full audit pipeline and return the aggregated summary.
///
/// The caller decides the process exit code from `summary.failed`.
pub async fn run(config: &AuditConfig) -> Result<Summary> {
    std::fs::create_dir_all(&config.artifacts_dir)?;
    // Absolute so the report path survives the runner's working directory
    let artifacts = config.artifacts_dir.canonicalize()?;

    run_steps("pre-steps", &config.pre).await?;

    let report_path = artifacts.join(REPORT_FILE);
    invoke_runner(&config.playwright, &report_path).await?;

    let report_path = locate_report(&report_path, &config.playwright.cwd)?;
    let summary = Summary::from_file(&report_path)?;

    std::fs::write(artifacts.join(MARKDOWN_FILE), render_markdown(&summary))?;
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    std::fs::write(artifacts.join(JUNIT_FILE), render_junit(&summary, &timestamp))?;

    println!(
        "{} {}/{} passed, {} failed, {} skipped.",
        "==> Summary:".cyan(),
        summary.passed,
        summary.total,
        summary.failed,
        summary.skipped
    );
    println!("Artifacts in: {}", artifacts.display());

    run_steps("post-steps", &config.post).await?;

    Ok(summary)
}

/// Spawn the configured runner command in its working directory.
///
/// The command string is split into an argv list and spawned directly, never
/// through a shell. The JSON report destination is handed to the runner as an
/// explicit output-path parameter via `PLAYWRIGHT_JSON_OUTPUT_NAME`.
async fn invoke_runner(playwright: &PlaywrightConfig, report_path: &Path) -> Result<()> {
    let argv = shell_words::split(&playwright.cmd)
        .map_err(|e| Error::Config(format!("Invalid runner command '{}': {e}", playwright.cmd)))?;
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| Error::Config("Runner command is empty".to_string()))?;

    println!(
        "{} {} (cwd={})",
        "==> Running Playwright:".cyan(),
        playwright.cmd,
        playwright.cwd.display()
    );

    let status = Command::new(program)
        .args(args)
        .current_dir(&playwright.cwd)
        .env("PLAYWRIGHT_JSON_OUTPUT_NAME", report_path)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| Error::RunnerSpawn {
            command: playwright.cmd.clone(),
            message: e.to_string(),
        })?;

    if status.success() {
        info!("runner exited cleanly");
    } else {
        // Not fatal: a failing test run is exactly what we are here to report
        warn!(
            code = status.code(),
            "runner exited non-zero (tests may have failed), continuing to aggregate"
        );
    }

    Ok(())
}

/// Find the JSON report: the configured artifacts path first, then the
/// conventional location under the runner's working directory.
fn locate_report(expected: &Path, runner_cwd: &Path) -> Result<PathBuf> {
    if expected.exists() {
        return Ok(expected.to_path_buf());
    }
    let fallback = runner_cwd.join(REPORT_FILE);
    if fallback.exists() {
        return Ok(fallback);
    }
    Err(Error::ReportNotFound(expected.to_path_buf()))
}
