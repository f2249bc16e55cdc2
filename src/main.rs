//! E2E Audit Orchestrator CLI
//!
//! Exit codes: 0 when no test failed, 1 when at least one test failed, 2 when
//! configuration is unusable or the runner report cannot be found. A failed
//! pre/post step propagates its own exit code.

use std::path::PathBuf;

use clap::Parser;
use e2e_audit::common::config::{AuditConfig, DEFAULT_CONFIG_FILE};
use e2e_audit::common::logging;
use e2e_audit::orchestrator;

#[derive(Parser)]
#[command(name = "e2e-audit", about = "Choices E2E audit orchestrator")]
#[command(version, long_about = None)]
struct Cli {
    /// Path to the audit YAML
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    logging::init();

    let cli = Cli::parse();

    let config = match AuditConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    };

    match orchestrator::run(&config).await {
        Ok(summary) => {
            if summary.failed > 0 {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
