//! Common utilities shared across the orchestrator and the smoke check

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
