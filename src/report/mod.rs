//! Runner report aggregation and artifact rendering
//!
//! Consumes the Playwright JSON report, folds it into a [`Summary`], and
//! renders the two artifacts (Markdown digest, JUnit XML) from it. Rendering
//! is pure: the same summary always produces the same bytes.

mod junit;
mod markdown;
mod summary;

pub use junit::render_junit;
pub use markdown::render_markdown;
pub use summary::{
    Attachment, FailureRecord, RunnerReport, Spec, SpecRecord, Suite, Summary, TestCase,
    TestResult, TestStatus,
};
