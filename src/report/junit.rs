//! JUnit XML renderer
//!
//! Emits a single `<testsuite>` document CI systems can ingest. The caller
//! supplies the generation timestamp so rendering stays a pure function of
//! the summary.

use std::fmt::Write;

use super::{Summary, TestStatus};

/// Render the JUnit XML test report.
///
/// One `<testcase>` per spec record, with `time` in seconds at three decimal
/// places. Failed cases carry a `<failure>` whose message is looked up in the
/// failure records by title equality; the first match wins, so two specs
/// sharing a title share a message. Skipped cases carry an empty `<skipped>`.
pub fn render_junit(summary: &Summary, timestamp: &str) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<testsuite name=\"choices-e2e\" tests=\"{}\" failures=\"{}\" skipped=\"{}\" timestamp=\"{}\">",
        summary.total,
        summary.failed,
        summary.skipped,
        escape_attr(timestamp)
    );

    for spec in &summary.specs {
        let _ = write!(
            out,
            "<testcase name=\"{}\" time=\"{:.3}\"",
            escape_attr(&spec.title),
            spec.duration_ms as f64 / 1000.0
        );
        match spec.status {
            TestStatus::Failed => {
                let message = summary
                    .failures
                    .iter()
                    .find(|f| f.title == spec.title)
                    .and_then(|f| f.error.as_deref())
                    .unwrap_or("Test failed");
                let _ = write!(
                    out,
                    "><failure message=\"{}\">{}</failure></testcase>",
                    escape_attr(message),
                    escape_text(message)
                );
            }
            TestStatus::Skipped => out.push_str("><skipped /></testcase>"),
            _ => out.push_str(" />"),
        }
    }

    out.push_str("</testsuite>");
    out
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
