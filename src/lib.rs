//! E2E Audit Orchestrator
//!
//! A thin layer around an external Playwright run: executes configured
//! pre-steps, invokes the runner, folds its JSON report into a summary,
//! writes Markdown and JUnit-XML artifacts, runs post-steps, and maps the
//! outcome to an exit code. A companion binary (`rls-smoke`) checks
//! row-level-security enforcement against a Supabase REST endpoint.

pub mod common;
pub mod orchestrator;
pub mod report;
pub mod rls;
pub mod steps;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use report::Summary;
