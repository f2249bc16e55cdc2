//! Audit configuration file handling
//!
//! The audit YAML is optional: a missing file yields built-in defaults, and
//! every key defaults independently so a partial document only overrides what
//! it names.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::{Error, Result};

/// Default config file name looked up next to the invocation
pub const DEFAULT_CONFIG_FILE: &str = "choices_audit.yml";

/// Top-level audit configuration
#[derive(Debug, Deserialize)]
pub struct AuditConfig {
    /// Shell commands to run before the test runner (fail-fast)
    #[serde(default)]
    pub pre: Vec<String>,

    /// Test runner invocation settings
    #[serde(default)]
    pub playwright: PlaywrightConfig,

    /// Directory receiving SUMMARY.md, junit.xml and the JSON report
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,

    /// Shell commands to run after artifacts are written (fail-fast)
    #[serde(default)]
    pub post: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            pre: Vec::new(),
            playwright: PlaywrightConfig::default(),
            artifacts_dir: default_artifacts_dir(),
            post: Vec::new(),
        }
    }
}

/// Test runner invocation settings
#[derive(Debug, Deserialize)]
pub struct PlaywrightConfig {
    /// Runner command line, split into argv before spawning (no shell)
    #[serde(default = "default_runner_cmd")]
    pub cmd: String,

    /// Working directory the runner is spawned in
    #[serde(default = "default_runner_cwd")]
    pub cwd: PathBuf,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            cmd: default_runner_cmd(),
            cwd: default_runner_cwd(),
        }
    }
}

fn default_runner_cmd() -> String {
    "npx playwright test --reporter=json".to_string()
}

fn default_runner_cwd() -> PathBuf {
    PathBuf::from(".")
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("e2e-audit-artifacts")
}

impl AuditConfig {
    /// Load configuration from a YAML file
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
