//! Shared test utilities for the ledger.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        gold::{self, GoldRecordDraft},
        payment::{self, PaymentDraft},
        vehicle::{self, VehicleDraft},
    },
    entities::{
        FlexType, GoldPurpose, GoldType, PaymentMode, PaymentStatus, VehicleType, gold_record,
        payment as payment_entity, vehicle as vehicle_entity,
    },
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

fn test_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default()
}

/// A valid vehicle draft.
///
/// # Defaults
/// * `vehicle_type`: Auto
/// * `owner_name`: "Test Owner"
/// * `mobile_number`: "9876543210"
/// * `flex_type`: Full Wrap
/// * `monthly_amount`: 1500.0
/// * `area`: "Hazratganj"
pub fn test_vehicle_draft(vehicle_number: &str) -> VehicleDraft {
    VehicleDraft {
        vehicle_type: VehicleType::Auto,
        vehicle_number: vehicle_number.to_string(),
        owner_name: "Test Owner".to_string(),
        mobile_number: "9876543210".to_string(),
        flex_type: FlexType::FullWrap,
        flex_start_date: Some(test_day()),
        monthly_amount: 1500.0,
        area: "Hazratganj".to_string(),
        remarks: String::new(),
    }
}

/// Creates a test vehicle from [`test_vehicle_draft`].
pub async fn create_test_vehicle(
    db: &DatabaseConnection,
    vehicle_number: &str,
) -> Result<vehicle_entity::Model> {
    vehicle::create_vehicle(db, test_vehicle_draft(vehicle_number)).await
}

/// Sets up a complete test environment with one vehicle.
/// Returns (db, vehicle) for payment-related tests.
pub async fn setup_with_vehicle() -> Result<(DatabaseConnection, vehicle_entity::Model)> {
    let db = setup_test_db().await?;
    let vehicle = create_test_vehicle(&db, "UP32 AB 1234").await?;
    Ok((db, vehicle))
}

/// A valid payment draft.
///
/// Paid drafts carry 1500.0 via UPI dated 2024-03-01; pending drafts carry 0.0
/// and no date.
pub fn test_payment_draft(vehicle_id: i64, month: &str, status: PaymentStatus) -> PaymentDraft {
    let paid = status == PaymentStatus::Paid;
    PaymentDraft {
        vehicle_id,
        month: month.to_string(),
        amount_paid: if paid { 1500.0 } else { 0.0 },
        payment_mode: PaymentMode::Upi,
        payment_date: paid.then(test_day),
        status,
    }
}

/// Creates a test payment from [`test_payment_draft`]. The vehicle need not exist.
pub async fn create_test_payment(
    db: &DatabaseConnection,
    vehicle_id: i64,
    month: &str,
    status: PaymentStatus,
) -> Result<payment_entity::Model> {
    payment::create_payment(db, test_payment_draft(vehicle_id, month, status)).await
}

/// A valid 22K gold draft for "Test Customer" dated 2024-03-01.
pub fn test_gold_draft(weight: f64, rate_per_gram: f64, purpose: GoldPurpose) -> GoldRecordDraft {
    GoldRecordDraft {
        customer_name: "Test Customer".to_string(),
        mobile_number: "9876543220".to_string(),
        gold_type: GoldType::K22,
        weight,
        rate_per_gram,
        purpose,
        date: test_day(),
        remarks: String::new(),
    }
}

/// Creates a test gold record from [`test_gold_draft`].
pub async fn create_test_gold_record(
    db: &DatabaseConnection,
    weight: f64,
    rate_per_gram: f64,
    purpose: GoldPurpose,
) -> Result<gold_record::Model> {
    gold::create_gold_record(db, test_gold_draft(weight, rate_per_gram, purpose)).await
}
