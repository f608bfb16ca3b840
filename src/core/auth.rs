//! Admin session - one configured login, checked on demand.

use crate::{
    config::admin::AdminCredentials,
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};

/// Role of a signed-in user. The ledger only knows administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access
    Admin,
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
    /// Access role
    pub role: Role,
}

/// Login state for one process.
#[derive(Debug)]
pub struct Session {
    credentials: AdminCredentials,
    user: Option<User>,
}

impl Session {
    /// Creates a signed-out session that accepts `credentials`.
    #[must_use]
    pub const fn new(credentials: AdminCredentials) -> Self {
        Self {
            credentials,
            user: None,
        }
    }

    /// Signs in when `email` and `password` match the configured admin exactly.
    ///
    /// # Errors
    /// `MissingField` if either input is blank, `InvalidCredentials` if they do not match.
    pub fn login(&mut self, email: &str, password: &str) -> Result<&User> {
        if email.trim().is_empty() {
            return Err(Error::MissingField { field: "email" });
        }
        if password.is_empty() {
            return Err(Error::MissingField { field: "password" });
        }

        if email != self.credentials.email || password != self.credentials.password {
            tracing::warn!("Rejected login attempt for {email}");
            return Err(Error::InvalidCredentials);
        }

        tracing::info!("Admin {email} signed in");
        Ok(self.user.insert(User {
            email: self.credentials.email.clone(),
            name: "Admin".to_string(),
            role: Role::Admin,
        }))
    }

    /// Signs out. Harmless when nobody is signed in.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!("{} signed out", user.email);
        }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether someone is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
