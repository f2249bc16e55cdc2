//! Smoke check configuration, fetching and verdict classification
//!
//! The two requests run sequentially, elevated first, so a broken baseline is
//! known before the restricted read is interpreted. Classification is a pure
//! function of the two fetch outcomes and carries no I/O, which keeps all the
//! policy logic testable without a live endpoint.

use std::time::Duration;

use serde_json::Value;

use crate::common::{Error, Result};

/// Per-request timeout; a timeout classifies like any other transport error
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Classification field the visibility heuristic inspects
const CLASSIFICATION_FIELD: &str = "privacy_level";

/// Most sensitive classification tier; must never be restricted-visible
const SENSITIVE_TIER: &str = "private";

/// Smoke check configuration, populated once at startup
#[derive(Debug, Clone)]
pub struct RlsConfig {
    /// Supabase project base URL
    pub url: String,
    /// Restricted (anon) API key
    pub anon_key: String,
    /// Elevated (service role) API key
    pub service_role_key: String,
    /// Table to read
    pub table: String,
    /// Column list for the REST `select` parameter
    pub select: String,
}

impl RlsConfig {
    /// Build the configuration from process environment variables.
    ///
    /// `SUPABASE_URL`, `SUPABASE_ANON_KEY` and `SUPABASE_SERVICE_ROLE_KEY`
    /// are required; `RLS_TABLE` and `RLS_SELECT` have defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let url = required("SUPABASE_URL");
        let anon_key = required("SUPABASE_ANON_KEY");
        let service_role_key = required("SUPABASE_SERVICE_ROLE_KEY");

        let missing: Vec<&str> = [
            ("SUPABASE_URL", &url),
            ("SUPABASE_ANON_KEY", &anon_key),
            ("SUPABASE_SERVICE_ROLE_KEY", &service_role_key),
        ]
        .iter()
        .filter(|(_, v)| v.is_none())
        .map(|(k, _)| *k)
        .collect();

        if !missing.is_empty() {
            return Err(Error::MissingEnv(missing.join(", ")));
        }

        Ok(Self {
            url: url.unwrap_or_default(),
            anon_key: anon_key.unwrap_or_default(),
            service_role_key: service_role_key.unwrap_or_default(),
            table: lookup("RLS_TABLE").unwrap_or_else(|| "polls".to_string()),
            select: lookup("RLS_SELECT").unwrap_or_else(|| "id,privacy_level".to_string()),
        })
    }

    /// REST endpoint for the configured table and column selection
    pub fn endpoint(&self) -> String {
        format!(
            "{}/rest/v1/{}?select={}",
            self.url.trim_end_matches('/'),
            self.table,
            self.select
        )
    }
}

/// Outcome of one authenticated read
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// 2xx with a JSON payload; a non-array payload counts as zero rows
    Rows(Vec<Value>),
    /// Non-success HTTP status
    Denied(u16),
    /// Network error, timeout, or unreadable body
    Transport(String),
}

/// Verdict of the visibility comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckVerdict {
    /// Both reads succeeded and the containment invariant holds
    Ok {
        elevated_rows: usize,
        restricted_rows: usize,
    },
    /// Restricted credential was denied outright (401/403): policy enforced
    RestrictedBlocked,
    /// Restricted credential failed some other way; benign but logged
    Warning(String),
    /// Elevated credential could not read at all
    BaselineFailed(String),
    /// Restricted view exposes more than it should
    Violation(String),
}

impl CheckVerdict {
    /// Process exit code for this verdict
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckVerdict::Ok { .. } | CheckVerdict::RestrictedBlocked | CheckVerdict::Warning(_) => 0,
            CheckVerdict::BaselineFailed(_) | CheckVerdict::Violation(_) => 1,
        }
    }
}

/// Issue one authenticated read against the endpoint
pub async fn fetch_rows(client: &reqwest::Client, endpoint: &str, key: &str) -> FetchOutcome {
    let response = client
        .get(endpoint)
        .header("apikey", key)
        .bearer_auth(key)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await;

    match response {
        Ok(r) if r.status().is_success() => match r.json::<Value>().await {
            Ok(Value::Array(rows)) => FetchOutcome::Rows(rows),
            Ok(_) => FetchOutcome::Rows(Vec::new()),
            Err(e) => FetchOutcome::Transport(e.to_string()),
        },
        Ok(r) => FetchOutcome::Denied(r.status().as_u16()),
        Err(e) => FetchOutcome::Transport(e.to_string()),
    }
}

/// Classify the two outcomes into a verdict. Pure; performs no I/O.
pub fn evaluate(elevated: &FetchOutcome, restricted: &FetchOutcome) -> CheckVerdict {
    // The elevated baseline must work before the restricted read means anything
    let elevated_rows = match elevated {
        FetchOutcome::Rows(rows) => rows,
        FetchOutcome::Denied(status) => {
            return CheckVerdict::BaselineFailed(format!(
                "service_role request failed: HTTP {status}"
            ))
        }
        FetchOutcome::Transport(e) => {
            return CheckVerdict::BaselineFailed(format!("service_role request failed: {e}"))
        }
    };

    let restricted_rows = match restricted {
        FetchOutcome::Denied(401) | FetchOutcome::Denied(403) => {
            return CheckVerdict::RestrictedBlocked
        }
        FetchOutcome::Denied(status) => {
            return CheckVerdict::Warning(format!("anon request unexpected error: HTTP {status}"))
        }
        FetchOutcome::Transport(e) => {
            return CheckVerdict::Warning(format!("anon request unexpected error: {e}"))
        }
        FetchOutcome::Rows(rows) => rows,
    };

    // A restricted view must never expose more rows than the elevated one
    if restricted_rows.len() > elevated_rows.len() {
        return CheckVerdict::Violation(format!(
            "anon sees more rows ({}) than service_role ({})",
            restricted_rows.len(),
            elevated_rows.len()
        ));
    }

    // When rows carry a classification field, the most sensitive tier must
    // not be restricted-visible
    let classified = restricted_rows
        .first()
        .is_some_and(|row| row.is_object() && row.get(CLASSIFICATION_FIELD).is_some());
    if classified {
        let exposed = restricted_rows
            .iter()
            .filter(|row| {
                row.get(CLASSIFICATION_FIELD).and_then(Value::as_str) == Some(SENSITIVE_TIER)
            })
            .count();
        if exposed > 0 {
            return CheckVerdict::Violation(format!("anon sees {SENSITIVE_TIER} rows: {exposed}"));
        }
    }

    CheckVerdict::Ok {
        elevated_rows: elevated_rows.len(),
        restricted_rows: restricted_rows.len(),
    }
}

/// Run the full check: elevated read, restricted read, classification
pub async fn run_check(config: &RlsConfig) -> Result<CheckVerdict> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    let endpoint = config.endpoint();

    let elevated = fetch_rows(&client, &endpoint, &config.service_role_key).await;
    let restricted = fetch_rows(&client, &endpoint, &config.anon_key).await;

    Ok(evaluate(&elevated, &restricted))
}
