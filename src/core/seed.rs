//! Sample data loaded into an empty store at startup.
//!
//! Seeding only runs when all three tables are empty, so it never mixes with
//! existing records. Payment rows reference the ids the database assigned to the
//! seeded vehicles.

use crate::{
    entities::{
        FlexType, GoldPurpose, GoldRecord, GoldType, Payment, PaymentMode, PaymentStatus,
        Vehicle, VehicleType, gold_record, payment, vehicle,
    },
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{PaginatorTrait, Set, TransactionTrait, prelude::*};

struct SampleVehicle {
    vehicle_type: VehicleType,
    number: &'static str,
    owner: &'static str,
    mobile: &'static str,
    flex_type: FlexType,
    started: (i32, u32, u32),
    monthly_amount: f64,
    area: &'static str,
    remarks: &'static str,
}

struct SamplePayment {
    /// Index into `SAMPLE_VEHICLES`
    vehicle: usize,
    month: &'static str,
    amount: f64,
    mode: PaymentMode,
    paid_on: Option<(i32, u32, u32)>,
    status: PaymentStatus,
}

struct SampleGold {
    customer: &'static str,
    mobile: &'static str,
    gold_type: GoldType,
    weight: f64,
    rate: f64,
    purpose: GoldPurpose,
    date: (i32, u32, u32),
    remarks: &'static str,
}

const SAMPLE_VEHICLES: [SampleVehicle; 3] = [
    SampleVehicle {
        vehicle_type: VehicleType::Auto,
        number: "UP32 AB 1234",
        owner: "Rajesh Kumar",
        mobile: "9876543210",
        flex_type: FlexType::FullWrap,
        started: (2024, 1, 15),
        monthly_amount: 1500.0,
        area: "Hazratganj",
        remarks: "Premium location",
    },
    SampleVehicle {
        vehicle_type: VehicleType::ERickshaw,
        number: "UP32 CD 5678",
        owner: "Amit Singh",
        mobile: "9876543211",
        flex_type: FlexType::Back,
        started: (2024, 2, 1),
        monthly_amount: 800.0,
        area: "Aminabad",
        remarks: "",
    },
    SampleVehicle {
        vehicle_type: VehicleType::TwoWheeler,
        number: "UP32 EF 9012",
        owner: "Priya Sharma",
        mobile: "9876543212",
        flex_type: FlexType::Front,
        started: (2024, 2, 15),
        monthly_amount: 500.0,
        area: "Gomti Nagar",
        remarks: "Daily commuter route",
    },
];

const SAMPLE_PAYMENTS: [SamplePayment; 6] = [
    SamplePayment {
        vehicle: 0,
        month: "2024-01",
        amount: 1500.0,
        mode: PaymentMode::Upi,
        paid_on: Some((2024, 1, 20)),
        status: PaymentStatus::Paid,
    },
    SamplePayment {
        vehicle: 0,
        month: "2024-02",
        amount: 1500.0,
        mode: PaymentMode::Cash,
        paid_on: Some((2024, 2, 18)),
        status: PaymentStatus::Paid,
    },
    SamplePayment {
        vehicle: 1,
        month: "2024-02",
        amount: 800.0,
        mode: PaymentMode::Bank,
        paid_on: Some((2024, 2, 25)),
        status: PaymentStatus::Paid,
    },
    SamplePayment {
        vehicle: 0,
        month: "2024-03",
        amount: 0.0,
        mode: PaymentMode::Cash,
        paid_on: None,
        status: PaymentStatus::Pending,
    },
    SamplePayment {
        vehicle: 1,
        month: "2024-03",
        amount: 0.0,
        mode: PaymentMode::Upi,
        paid_on: None,
        status: PaymentStatus::Pending,
    },
    SamplePayment {
        vehicle: 2,
        month: "2024-02",
        amount: 500.0,
        mode: PaymentMode::Upi,
        paid_on: Some((2024, 2, 28)),
        status: PaymentStatus::Paid,
    },
];

const SAMPLE_GOLD: [SampleGold; 3] = [
    SampleGold {
        customer: "Sunita Devi",
        mobile: "9876543220",
        gold_type: GoldType::K22,
        weight: 10.5,
        rate: 5800.0,
        purpose: GoldPurpose::Sell,
        date: (2024, 2, 20),
        remarks: "Wedding jewelry",
    },
    SampleGold {
        customer: "Ramesh Gupta",
        mobile: "9876543221",
        gold_type: GoldType::K24,
        weight: 5.0,
        rate: 6200.0,
        purpose: GoldPurpose::Buy,
        date: (2024, 2, 22),
        remarks: "Investment",
    },
    SampleGold {
        customer: "Meera Patel",
        mobile: "9876543222",
        gold_type: GoldType::K22,
        weight: 2.5,
        rate: 5800.0,
        purpose: GoldPurpose::Repair,
        date: (2024, 2, 25),
        remarks: "Chain repair",
    },
];

fn date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Whether vehicles, payments and gold records are all empty.
pub async fn is_store_empty(db: &DatabaseConnection) -> Result<bool> {
    Ok(Vehicle::find().count(db).await? == 0
        && Payment::find().count(db).await? == 0
        && GoldRecord::find().count(db).await? == 0)
}

/// Inserts the sample vehicles, payments and gold records into an empty store.
///
/// Returns `false` without writing anything when any table already has rows.
pub async fn seed_sample_data(db: &DatabaseConnection) -> Result<bool> {
    if !is_store_empty(db).await? {
        tracing::debug!("Store already has records, sample data skipped");
        return Ok(false);
    }

    let txn = db.begin().await?;

    let mut vehicle_ids = Vec::with_capacity(SAMPLE_VEHICLES.len());
    for sample in &SAMPLE_VEHICLES {
        let started = date(sample.started);
        let inserted = vehicle::ActiveModel {
            vehicle_type: Set(sample.vehicle_type),
            vehicle_number: Set(sample.number.to_string()),
            owner_name: Set(sample.owner.to_string()),
            mobile_number: Set(sample.mobile.to_string()),
            flex_type: Set(sample.flex_type),
            flex_start_date: Set(Some(started)),
            monthly_amount: Set(sample.monthly_amount),
            area: Set(sample.area.to_string()),
            remarks: Set(sample.remarks.to_string()),
            created_at: Set(started),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        vehicle_ids.push(inserted.id);
    }

    for (sample, vehicle_id) in SAMPLE_PAYMENTS
        .iter()
        .filter_map(|p| vehicle_ids.get(p.vehicle).map(|id| (p, *id)))
    {
        payment::ActiveModel {
            vehicle_id: Set(vehicle_id),
            month: Set(sample.month.to_string()),
            amount_paid: Set(sample.amount),
            payment_mode: Set(sample.mode),
            payment_date: Set(sample.paid_on.map(date)),
            status: Set(sample.status),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    for sample in &SAMPLE_GOLD {
        let day = date(sample.date);
        gold_record::ActiveModel {
            customer_name: Set(sample.customer.to_string()),
            mobile_number: Set(sample.mobile.to_string()),
            gold_type: Set(sample.gold_type),
            weight: Set(sample.weight),
            rate_per_gram: Set(sample.rate),
            total_value: Set(crate::core::gold::total_value(sample.weight, sample.rate)),
            purpose: Set(sample.purpose),
            date: Set(day),
            remarks: Set(sample.remarks.to_string()),
            created_at: Set(day),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    tracing::info!(
        "Seeded {} vehicles, {} payments and {} gold records",
        SAMPLE_VEHICLES.len(),
        SAMPLE_PAYMENTS.len(),
        SAMPLE_GOLD.len()
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        core::{gold::get_all_gold_records, payment::get_all_payments, vehicle::get_all_vehicles},
        test_utils::*,
    };

    #[tokio::test]
    async fn test_seed_empty_store() -> Result<()> {
        let db = setup_test_db().await?;

        assert!(seed_sample_data(&db).await?);

        let vehicles = get_all_vehicles(&db).await?;
        let payments = get_all_payments(&db).await?;
        let gold = get_all_gold_records(&db).await?;
        assert_eq!(vehicles.len(), 3);
        assert_eq!(payments.len(), 6);
        assert_eq!(gold.len(), 3);

        assert_eq!(vehicles[0].vehicle_number, "UP32 AB 1234");
        assert_eq!(gold[0].total_value, 60900.0);
        assert_eq!(gold[2].total_value, 14500.0);
        assert!(
            payments
                .iter()
                .all(|p| vehicles.iter().any(|v| v.id == p.vehicle_id))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_skips_non_empty_store() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_vehicle(&db, "UP32 ZZ 0001").await?;

        assert!(!seed_sample_data(&db).await?);
        assert_eq!(get_all_vehicles(&db).await?.len(), 1);
        assert!(get_all_payments(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_twice_is_noop() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(seed_sample_data(&db).await?);
        assert!(!seed_sample_data(&db).await?);
        assert_eq!(get_all_payments(&db).await?.len(), 6);
        Ok(())
    }
}
