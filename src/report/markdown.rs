//! Markdown digest renderer

use super::Summary;

/// Render the human-readable audit digest.
///
/// Emits the four counters as a bullet list and, only when failures exist, a
/// "Failures" section with each failure's title, duration and error text as
/// an inline code span.
pub fn render_markdown(summary: &Summary) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("# E2E Audit Summary\n".to_string());
    lines.push(format!(
        "- **Total:** {}  \n- **Passed:** {}  \n- **Failed:** {}  \n- **Skipped:** {}\n",
        summary.total, summary.passed, summary.failed, summary.skipped
    ));

    if !summary.failures.is_empty() {
        lines.push("## Failures\n".to_string());
        for failure in &summary.failures {
            lines.push(format!(
                "- **{}** ({} ms)\n",
                failure.title, failure.duration_ms
            ));
            if let Some(error) = &failure.error {
                lines.push(format!("  - Error: `{}`\n", error));
            }
        }
    }

    lines.join("\n")
}
