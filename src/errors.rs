use thiserror::Error;

/// Every failure the ledger can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment could not be used
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable cause
        message: String,
    },

    /// Storage failure reported by `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A required environment variable was missing or not unicode
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// I/O failure while writing exports
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure while exporting a report
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required draft field was blank
    #[error("Please fill in required field: {field}")]
    MissingField {
        /// Name of the offending field
        field: &'static str,
    },

    /// An amount, weight or rate was negative, zero where forbidden, or not finite
    #[error("Invalid {field}: {amount}")]
    InvalidAmount {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        amount: f64,
    },

    /// A billing month did not parse as `YYYY-MM`
    #[error("Invalid billing month '{value}', expected YYYY-MM")]
    InvalidMonth {
        /// The rejected input
        value: String,
    },

    /// Login attempt did not match the configured admin
    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
