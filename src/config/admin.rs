//! Admin credential loading from environment variables.
//!
//! The ledger has exactly one account. Its email and password are read from
//! `ADMIN_EMAIL` and `ADMIN_PASSWORD`, usually provided through `.env`.

use crate::errors::{Error, Result};
use std::fmt;

/// The single configured login.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    /// Login email
    pub email: String,
    /// Login password
    pub password: String,
}

// Keep the password out of logs
impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AdminCredentials {
    /// Builds credentials from explicit values.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Reads `ADMIN_EMAIL` and `ADMIN_PASSWORD` from the environment.
    ///
    /// # Errors
    /// `Error::EnvVar` when a variable is unset, `Error::Config` when it is blank.
    pub fn from_env() -> Result<Self> {
        let email = read_required("ADMIN_EMAIL")?;
        let password = read_required("ADMIN_PASSWORD")?;
        Ok(Self { email, password })
    }
}

fn read_required(key: &str) -> Result<String> {
    let value = std::env::var(key).inspect_err(|e| tracing::error!("{key} not found: {e}"))?;
    if value.trim().is_empty() {
        return Err(Error::Config {
            message: format!("{key} is set but empty"),
        });
    }
    Ok(value)
}
