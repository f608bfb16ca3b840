/// Admin credential loading from environment variables
pub mod admin;

/// Database configuration and connection management
pub mod database;

/// Application settings loading from config.toml
pub mod settings;
