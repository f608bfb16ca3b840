//! Database configuration module for the ledger.
//!
//! The record store lives in a `SQLite` database managed through `SeaORM`. By default
//! the database is `sqlite::memory:`, so records last exactly as long as the process.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! keeping the schema in step with the Rust structs without hand-written SQL.

use crate::entities::{GoldRecord, Payment, Vehicle};
use crate::errors::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};

/// Database used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Gets the database URL from environment variable or returns the in-memory default.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to an in-memory `SQLite` database if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    tracing::debug!("Connecting to database at {database_url}");

    let mut options = ConnectOptions::new(database_url.as_str());
    // Every pooled connection to `:memory:` would open its own empty database
    if database_url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }
    options.sqlx_logging(false);

    Database::connect(options).await.map_err(Into::into)
}

/// Creates the vehicle, payment and gold record tables from the entity definitions.
///
/// Uses `IF NOT EXISTS` so a file-backed database can be reopened.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut vehicle_table = schema.create_table_from_entity(Vehicle);
    let mut payment_table = schema.create_table_from_entity(Payment);
    let mut gold_record_table = schema.create_table_from_entity(GoldRecord);

    vehicle_table.if_not_exists();
    payment_table.if_not_exists();
    gold_record_table.if_not_exists();

    db.execute(builder.build(&vehicle_table)).await?;
    db.execute(builder.build(&payment_table)).await?;
    db.execute(builder.build(&gold_record_table)).await?;

    Ok(())
}
