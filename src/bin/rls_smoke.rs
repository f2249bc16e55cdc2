//! RLS smoke check for a Supabase REST endpoint
//!
//! Reads the same table under the service-role key and the anon key and
//! compares what each can see. Exits non-zero on suspected policy
//! misconfiguration.
//!
//! Env:
//!   SUPABASE_URL, SUPABASE_ANON_KEY, SUPABASE_SERVICE_ROLE_KEY (required)
//!   RLS_TABLE (default: polls)
//!   RLS_SELECT (default: id,privacy_level)
//!
//! Exit codes: 0 policy looks correct (or benign warning), 1 policy
//! violation or elevated-credential failure, 2 missing configuration.

use e2e_audit::common::logging;
use e2e_audit::rls::{run_check, CheckVerdict, RlsConfig};

#[tokio::main]
async fn main() {
    logging::init();

    // Resolve configuration before touching the network
    let config = match RlsConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(e.exit_code());
        }
    };

    let verdict = match run_check(&config).await {
        Ok(verdict) => verdict,
        Err(e) => {
            eprintln!("[FAIL] {e}");
            std::process::exit(e.exit_code());
        }
    };

    match &verdict {
        CheckVerdict::Ok {
            elevated_rows,
            restricted_rows,
        } => println!(
            "[OK] RLS smoke: anon_count={restricted_rows}, service_role_count={elevated_rows}"
        ),
        CheckVerdict::RestrictedBlocked => {
            println!("[OK] anon blocked by RLS; service_role succeeded.")
        }
        CheckVerdict::Warning(message) => eprintln!("[WARN] {message}"),
        CheckVerdict::BaselineFailed(message) | CheckVerdict::Violation(message) => {
            eprintln!("[FAIL] {message}")
        }
    }

    std::process::exit(verdict.exit_code());
}
