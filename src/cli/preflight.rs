//! Pre-flight checks before talking to external services.
//!
//! Validates that all required credentials are present before starting
//! operations that would otherwise fail midway. Startup fails loudly; no
//! credential is ever silently defaulted.

use crate::config::Credentials;
use crate::error::Result;

/// Verify that every required credential is configured.
pub fn check() -> Result<Credentials> {
    Credentials::from_env()
}
