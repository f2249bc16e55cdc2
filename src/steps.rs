//! Pre/post step execution
//!
//! Steps are required setup/teardown, so execution is fail-fast: the first
//! non-zero exit aborts the run and its code becomes the process exit status.

use std::process::Stdio;

use colored::Colorize;
use tokio::process::Command;

use crate::common::{Error, Result};

/// Run an ordered list of shell commands, aborting on the first failure.
///
/// Each command runs under `sh -c` with inherited stdio so its output streams
/// straight to the caller's terminal. An empty list is a no-op.
pub async fn run_steps(label: &str, steps: &[String]) -> Result<()> {
    if steps.is_empty() {
        return Ok(());
    }

    println!("{}", format!("==> Running {label}…").cyan());

    for command in steps {
        println!("{} {}", "$".dimmed(), command);

        let status = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| Error::Config(format!("Step '{command}' failed to execute: {e}")))?;

        if !status.success() {
            return Err(Error::StepFailed {
                command: command.clone(),
                code: status.code().unwrap_or(1),
            });
        }
    }

    Ok(())
}
