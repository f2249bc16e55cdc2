//! Playwright report model and summarization
//!
//! The JSON report is a tree: suites contain specs and nested suites, specs
//! contain tests, tests contain one result per execution (retries yield
//! several). Summarization is a fold over that tree with an explicit
//! accumulator, depth-first in input order.

use std::path::Path;

use serde::Deserialize;

use crate::common::{Error, Result};

/// Root of the Playwright JSON report
///
/// A report without a `suites` key degenerates to a zero-valued summary;
/// only a structurally malformed document is a parse error.
#[derive(Debug, Deserialize, Default)]
pub struct RunnerReport {
    #[serde(default)]
    pub suites: Vec<Suite>,
}

/// A suite node: holds specs plus nested child suites
#[derive(Debug, Deserialize, Default)]
pub struct Suite {
    #[serde(default)]
    pub specs: Vec<Spec>,
    #[serde(default)]
    pub suites: Vec<Suite>,
}

/// A named test scenario
#[derive(Debug, Deserialize, Default)]
pub struct Spec {
    #[serde(default)]
    pub title: String,
    /// Path segments from the suite root down to this spec, when the
    /// reporter provides them
    #[serde(rename = "titlePath")]
    pub title_path: Option<Vec<String>>,
    #[serde(default)]
    pub tests: Vec<TestCase>,
}

/// One test under a spec; each execution (including retries) yields a result
#[derive(Debug, Deserialize, Default)]
pub struct TestCase {
    #[serde(default)]
    pub results: Vec<TestResult>,
}

/// A single execution outcome
#[derive(Debug, Deserialize, Default)]
pub struct TestResult {
    #[serde(default)]
    pub status: TestStatus,
    /// Duration in milliseconds
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Named diagnostic payload attached to a result
#[derive(Debug, Deserialize, Default)]
pub struct Attachment {
    #[serde(default)]
    pub name: String,
    pub body: Option<String>,
}

/// Runner-level outcome of a single execution
///
/// Absent or unrecognized statuses map to `Unknown`: counted in `total` but
/// in no pass/fail/skip bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
    TimedOut,
    Interrupted,
    #[default]
    #[serde(other)]
    Unknown,
}

impl TestStatus {
    /// Wire-format name, as recorded in spec records
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::Skipped => "skipped",
            TestStatus::TimedOut => "timedOut",
            TestStatus::Interrupted => "interrupted",
            TestStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-result status record, in tree order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRecord {
    pub title: String,
    pub duration_ms: u64,
    pub status: TestStatus,
}

/// Diagnostic record for a failed result, in tree order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub title: String,
    pub duration_ms: u64,
    /// Body of the first non-empty attachment named "error", if any
    pub error: Option<String>,
}

/// Aggregated view of a runner report, immutable once produced
///
/// `skipped` folds the three non-terminal runner outcomes (skipped, timedOut,
/// interrupted) into one bucket. Unknown statuses count only toward `total`,
/// so `passed + failed + skipped <= total`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub specs: Vec<SpecRecord>,
    pub failures: Vec<FailureRecord>,
}

impl Summary {
    /// Read and summarize a runner JSON report from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        let report: RunnerReport =
            serde_json::from_str(&content).map_err(|e| Error::report_parse(path, e))?;
        Ok(Self::from_report(&report))
    }

    /// Fold a parsed report into a summary
    pub fn from_report(report: &RunnerReport) -> Self {
        report
            .suites
            .iter()
            .fold(Summary::default(), Summary::fold_suite)
    }

    fn fold_suite(self, suite: &Suite) -> Self {
        let acc = suite.specs.iter().fold(self, Summary::fold_spec);
        suite.suites.iter().fold(acc, Summary::fold_suite)
    }

    fn fold_spec(self, spec: &Spec) -> Self {
        let title = spec.display_title();
        spec.tests
            .iter()
            .flat_map(|t| t.results.iter())
            .fold(self, |acc, result| acc.record(&title, result))
    }

    fn record(mut self, title: &str, result: &TestResult) -> Self {
        self.total += 1;
        match result.status {
            TestStatus::Passed => self.passed += 1,
            TestStatus::Failed => {
                self.failed += 1;
                self.failures.push(FailureRecord {
                    title: title.to_string(),
                    duration_ms: result.duration,
                    error: result.error_text().map(String::from),
                });
            }
            TestStatus::Skipped | TestStatus::TimedOut | TestStatus::Interrupted => {
                self.skipped += 1
            }
            TestStatus::Unknown => {}
        }
        self.specs.push(SpecRecord {
            title: title.to_string(),
            duration_ms: result.duration,
            status: result.status,
        });
        self
    }
}

impl Spec {
    /// Resolve the display title: space-joined path segments when a path is
    /// present, else the whitespace-normalized raw title; falls back to the
    /// raw title when either yields an empty string.
    pub fn display_title(&self) -> String {
        let joined = match &self.title_path {
            Some(segments) => segments.join(" "),
            None => self
                .title
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" "),
        };
        if joined.is_empty() {
            self.title.clone()
        } else {
            joined
        }
    }
}

impl TestResult {
    /// First non-empty "error" attachment body, if any
    fn error_text(&self) -> Option<&str> {
        self.attachments
            .iter()
            .filter(|a| a.name == "error")
            .find_map(|a| a.body.as_deref().filter(|b| !b.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(json: &str) -> RunnerReport {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_two_spec_report() {
        let report = parse(
            r#"{
                "suites": [{
                    "specs": [
                        {
                            "title": "Spec A",
                            "tests": [{"results": [{"status": "passed", "duration": 1200}]}]
                        },
                        {
                            "title": "Spec B",
                            "tests": [{"results": [{
                                "status": "failed",
                                "duration": 500,
                                "attachments": [{"name": "error", "body": "boom"}]
                            }]}]
                        }
                    ]
                }]
            }"#,
        );

        let summary = Summary::from_report(&report);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].title, "Spec B");
        assert_eq!(summary.failures[0].error.as_deref(), Some("boom"));
        assert_eq!(summary.specs.len(), 2);
        assert_eq!(summary.specs[0].status, TestStatus::Passed);
        assert_eq!(summary.specs[1].status, TestStatus::Failed);
    }

    #[test]
    fn test_total_counts_results_at_any_depth() {
        let report = parse(
            r#"{
                "suites": [{
                    "specs": [{"title": "top", "tests": [{"results": [{"status": "passed"}]}]}],
                    "suites": [{
                        "suites": [{
                            "specs": [{
                                "title": "deep",
                                "tests": [{"results": [
                                    {"status": "passed"},
                                    {"status": "failed"}
                                ]}]
                            }]
                        }]
                    }]
                }]
            }"#,
        );

        let summary = Summary::from_report(&report);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        // Tree order: outer spec first, then nested ones
        assert_eq!(summary.specs[0].title, "top");
        assert_eq!(summary.specs[1].title, "deep");
    }

    #[test]
    fn test_skipped_bucket_folds_three_statuses() {
        let report = parse(
            r#"{
                "suites": [{
                    "specs": [{"title": "s", "tests": [{"results": [
                        {"status": "skipped"},
                        {"status": "timedOut"},
                        {"status": "interrupted"}
                    ]}]}]
                }]
            }"#,
        );

        let summary = Summary::from_report(&report);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.passed + summary.failed, 0);
    }

    #[test]
    fn test_unknown_status_counts_only_toward_total() {
        let report = parse(
            r#"{
                "suites": [{
                    "specs": [{"title": "s", "tests": [{"results": [
                        {"duration": 10},
                        {"status": "flaky", "duration": 20},
                        {"status": "passed", "duration": 30}
                    ]}]}]
                }]
            }"#,
        );

        let summary = Summary::from_report(&report);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.skipped, 0);
        assert!(summary.passed + summary.failed + summary.skipped < summary.total);
        assert_eq!(summary.specs[0].status, TestStatus::Unknown);
        assert_eq!(summary.specs[1].status, TestStatus::Unknown);
    }

    #[test]
    fn test_every_failure_has_a_failed_spec_record() {
        let report = parse(
            r#"{
                "suites": [{
                    "specs": [
                        {"title": "a", "tests": [{"results": [{"status": "failed"}]}]},
                        {"title": "b", "tests": [{"results": [{"status": "passed"}]}]},
                        {"title": "c", "tests": [{"results": [{"status": "failed"}]}]}
                    ]
                }]
            }"#,
        );

        let summary = Summary::from_report(&report);
        let failed_specs: Vec<_> = summary
            .specs
            .iter()
            .filter(|s| s.status == TestStatus::Failed)
            .map(|s| s.title.as_str())
            .collect();
        let failure_titles: Vec<_> = summary.failures.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(failed_specs, failure_titles);
    }

    #[test]
    fn test_title_path_wins_over_raw_title() {
        let spec = Spec {
            title: "login works".into(),
            title_path: Some(vec!["auth".into(), "login".into(), "works".into()]),
            tests: Vec::new(),
        };
        assert_eq!(spec.display_title(), "auth login works");
    }

    #[test]
    fn test_raw_title_is_whitespace_normalized() {
        let spec = Spec {
            title: "  login\t works  ".into(),
            title_path: None,
            tests: Vec::new(),
        };
        assert_eq!(spec.display_title(), "login works");
    }

    #[test]
    fn test_error_attachment_first_nonempty_wins() {
        let result = TestResult {
            status: TestStatus::Failed,
            duration: 5,
            attachments: vec![
                Attachment {
                    name: "trace".into(),
                    body: Some("not this".into()),
                },
                Attachment {
                    name: "error".into(),
                    body: Some("".into()),
                },
                Attachment {
                    name: "error".into(),
                    body: Some("first real".into()),
                },
                Attachment {
                    name: "error".into(),
                    body: Some("second".into()),
                },
            ],
        };
        assert_eq!(result.error_text(), Some("first real"));
    }

    #[test]
    fn test_missing_suites_degenerates_to_zero_summary() {
        let summary = Summary::from_report(&parse("{}"));
        assert_eq!(summary, Summary::default());

        let summary = Summary::from_report(&parse(r#"{"suites": []}"#));
        assert_eq!(summary.total, 0);
        assert!(summary.specs.is_empty());
        assert!(summary.failures.is_empty());
    }

    #[test]
    fn test_malformed_report_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = Summary::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::ReportParse { .. }));
    }

    #[test]
    fn test_from_file_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"suites": [{{"specs": [{{"title": "ok", "tests": [{{"results": [{{"status": "passed", "duration": 42}}]}}]}}]}}]}}"#
        )
        .unwrap();

        let summary = Summary::from_file(file.path()).unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.specs[0].duration_ms, 42);
    }
}
