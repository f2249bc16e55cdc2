//! Row-level-security smoke check
//!
//! Compares what a restricted (anon) credential can read against what an
//! elevated (service role) credential can read, to catch an RLS policy that
//! was left open.

mod check;

pub use check::{evaluate, fetch_rows, run_check, CheckVerdict, FetchOutcome, RlsConfig};
