//! Payment business logic - Handles monthly flex charges.
//!
//! This module records, updates and removes payments, and provides the two
//! shortcuts the payment screen uses: recording a paid month for a vehicle and
//! marking a pending month as paid. Payments never require their vehicle to exist;
//! when it is missing the charge falls back to zero.

use crate::{
    core::{
        month::BillingMonth,
        validation::non_negative,
        vehicle::get_vehicle_by_id,
    },
    entities::{Payment, PaymentMode, PaymentStatus, payment, vehicle},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::BTreeSet;

/// Fields of a new payment.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentDraft {
    /// Vehicle this payment settles; not checked for existence
    pub vehicle_id: i64,
    /// Billing month, must parse as `YYYY-MM`
    pub month: String,
    /// Amount received, must be zero or more
    pub amount_paid: f64,
    /// How the money was received
    pub payment_mode: PaymentMode,
    /// Day the money was received
    pub payment_date: Option<NaiveDate>,
    /// Paid or Pending
    pub status: PaymentStatus,
}

/// Partial update of a payment. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentUpdate {
    /// New vehicle reference
    pub vehicle_id: Option<i64>,
    /// New billing month (must parse as `YYYY-MM`)
    pub month: Option<String>,
    /// New amount (must be zero or more)
    pub amount_paid: Option<f64>,
    /// New payment mode
    pub payment_mode: Option<PaymentMode>,
    /// New payment date; `Some(None)` clears it
    pub payment_date: Option<Option<NaiveDate>>,
    /// New status
    pub status: Option<PaymentStatus>,
}

/// Normalises a billing month string through [`BillingMonth`].
fn normalise_month(value: &str) -> Result<String> {
    value.parse::<BillingMonth>().map(|m| m.to_string())
}

/// Inserts a payment exactly as drafted, after validation.
///
/// # Errors
/// `InvalidMonth` for a malformed month, `InvalidAmount` for a negative or non-finite amount.
pub async fn create_payment(db: &DatabaseConnection, draft: PaymentDraft) -> Result<payment::Model> {
    let month = normalise_month(&draft.month)?;
    let amount_paid = non_negative("amount_paid", draft.amount_paid)?;

    let model = payment::ActiveModel {
        vehicle_id: Set(draft.vehicle_id),
        month: Set(month),
        amount_paid: Set(amount_paid),
        payment_mode: Set(draft.payment_mode),
        payment_date: Set(draft.payment_date),
        status: Set(draft.status),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    tracing::info!(
        "Recorded {} payment {} for vehicle {} ({})",
        result.status.label(),
        result.id,
        result.vehicle_id,
        result.month
    );
    Ok(result)
}

/// Records a received payment for `vehicle_id` and `month`.
///
/// An absent or zero `amount` defaults to the vehicle's monthly charge, or 0 when the
/// vehicle is unknown. The new payment is always `Paid`.
pub async fn record_payment(
    db: &DatabaseConnection,
    vehicle_id: i64,
    month: &str,
    amount: Option<f64>,
    payment_mode: PaymentMode,
    payment_date: NaiveDate,
) -> Result<payment::Model> {
    let amount_paid = match amount.filter(|a| *a != 0.0) {
        Some(amount) => amount,
        None => monthly_charge(get_vehicle_by_id(db, vehicle_id).await?.as_ref()),
    };

    create_payment(
        db,
        PaymentDraft {
            vehicle_id,
            month: month.to_string(),
            amount_paid,
            payment_mode,
            payment_date: Some(payment_date),
            status: PaymentStatus::Paid,
        },
    )
    .await
}

/// The monthly charge of `vehicle`, or 0 when it does not exist.
fn monthly_charge(vehicle: Option<&vehicle::Model>) -> f64 {
    vehicle.map_or(0.0, |v| v.monthly_amount)
}

/// Retrieves every payment in insertion order.
pub async fn get_all_payments(db: &DatabaseConnection) -> Result<Vec<payment::Model>> {
    Payment::find()
        .order_by_asc(payment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a payment by id.
pub async fn get_payment_by_id(
    db: &DatabaseConnection,
    payment_id: i64,
) -> Result<Option<payment::Model>> {
    Payment::find_by_id(payment_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the payments recorded against one vehicle.
pub async fn get_payments_for_vehicle(
    db: &DatabaseConnection,
    vehicle_id: i64,
) -> Result<Vec<payment::Model>> {
    Payment::find()
        .filter(payment::Column::VehicleId.eq(vehicle_id))
        .order_by_asc(payment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Merges the supplied fields into an existing payment.
///
/// Returns `Ok(None)` when no payment has this id.
pub async fn update_payment(
    db: &DatabaseConnection,
    payment_id: i64,
    update: PaymentUpdate,
) -> Result<Option<payment::Model>> {
    let month = update.month.as_deref().map(normalise_month).transpose()?;
    let amount_paid = update
        .amount_paid
        .map(|a| non_negative("amount_paid", a))
        .transpose()?;

    let Some(existing) = get_payment_by_id(db, payment_id).await? else {
        tracing::debug!("Update skipped, no payment with id {payment_id}");
        return Ok(None);
    };

    let mut active: payment::ActiveModel = existing.clone().into();
    if let Some(vehicle_id) = update.vehicle_id {
        active.vehicle_id = Set(vehicle_id);
    }
    if let Some(month) = month {
        active.month = Set(month);
    }
    if let Some(amount_paid) = amount_paid {
        active.amount_paid = Set(amount_paid);
    }
    if let Some(payment_mode) = update.payment_mode {
        active.payment_mode = Set(payment_mode);
    }
    if let Some(payment_date) = update.payment_date {
        active.payment_date = Set(payment_date);
    }
    if let Some(status) = update.status {
        active.status = Set(status);
    }

    if !active.is_changed() {
        return Ok(Some(existing));
    }

    let updated = active.update(db).await?;
    tracing::info!("Updated payment {}", updated.id);
    Ok(Some(updated))
}

/// Settles a payment in cash on `paid_on`, charging the vehicle's monthly amount.
///
/// The amount becomes the vehicle's monthly charge, or 0 when the vehicle no longer
/// exists. Returns `Ok(None)` when no payment has this id.
pub async fn mark_payment_paid(
    db: &DatabaseConnection,
    payment_id: i64,
    paid_on: NaiveDate,
) -> Result<Option<payment::Model>> {
    let Some(existing) = get_payment_by_id(db, payment_id).await? else {
        return Ok(None);
    };
    let amount = monthly_charge(get_vehicle_by_id(db, existing.vehicle_id).await?.as_ref());

    update_payment(
        db,
        payment_id,
        PaymentUpdate {
            status: Some(PaymentStatus::Paid),
            amount_paid: Some(amount),
            payment_date: Some(Some(paid_on)),
            payment_mode: Some(PaymentMode::Cash),
            ..Default::default()
        },
    )
    .await
}

/// Removes a payment. Unknown ids are ignored.
pub async fn delete_payment(db: &DatabaseConnection, payment_id: i64) -> Result<()> {
    let result = Payment::delete_by_id(payment_id).exec(db).await?;
    tracing::info!(
        "Deleted payment {payment_id} ({} row)",
        result.rows_affected
    );
    Ok(())
}

/// Search and filter rules of the payment list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentFilter {
    /// Case-insensitive match on the vehicle's number or owner
    pub search: Option<String>,
    /// Only this status
    pub status: Option<PaymentStatus>,
    /// Only this exact billing month
    pub month: Option<String>,
}

impl PaymentFilter {
    /// Returns true when `payment` passes every set criterion.
    ///
    /// A blank search matches every payment. A non-blank search never matches a payment
    /// whose vehicle is missing from `vehicles`.
    #[must_use]
    pub fn matches(&self, payment: &payment::Model, vehicles: &[vehicle::Model]) -> bool {
        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(search) => {
                let needle = search.to_lowercase();
                vehicles
                    .iter()
                    .find(|v| v.id == payment.vehicle_id)
                    .is_some_and(|v| {
                        v.vehicle_number.to_lowercase().contains(&needle)
                            || v.owner_name.to_lowercase().contains(&needle)
                    })
            }
        };
        let status_ok = self.status.is_none_or(|s| payment.status == s);
        let month_ok = self.month.as_deref().is_none_or(|m| payment.month == m);

        search_ok && status_ok && month_ok
    }
}

/// Applies `filter` to `payments`, keeping their order.
#[must_use]
pub fn filter_payments<'a>(
    payments: &'a [payment::Model],
    vehicles: &[vehicle::Model],
    filter: &PaymentFilter,
) -> Vec<&'a payment::Model> {
    payments
        .iter()
        .filter(|p| filter.matches(p, vehicles))
        .collect()
}

/// Every distinct billing month, newest first.
#[must_use]
pub fn distinct_months(payments: &[payment::Model]) -> Vec<String> {
    payments
        .iter()
        .map(|p| p.month.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::VehicleType;
    use crate::errors::Error;
    use crate::test_utils::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_create_payment_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let bad_month = create_payment(
            &db,
            PaymentDraft {
                month: "March".to_string(),
                ..test_payment_draft(1, "2024-03", PaymentStatus::Pending)
            },
        )
        .await;
        assert!(matches!(bad_month, Err(Error::InvalidMonth { .. })));

        let negative = create_payment(
            &db,
            PaymentDraft {
                amount_paid: -1.0,
                ..test_payment_draft(1, "2024-03", PaymentStatus::Paid)
            },
        )
        .await;
        assert!(matches!(negative, Err(Error::InvalidAmount { .. })));

        assert!(get_all_payments(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_dangling_vehicle_reference_is_tolerated() -> Result<()> {
        let db = setup_test_db().await?;
        let payment = create_test_payment(&db, 404, "2024-03", PaymentStatus::Pending).await?;
        assert_eq!(payment.vehicle_id, 404);
        Ok(())
    }

    #[tokio::test]
    async fn test_record_payment_defaults_to_monthly_amount() -> Result<()> {
        let (db, vehicle) = setup_with_vehicle().await?;

        let defaulted =
            record_payment(&db, vehicle.id, "2024-03", None, PaymentMode::Upi, day(2024, 3, 5))
                .await?;
        assert_eq!(defaulted.amount_paid, vehicle.monthly_amount);
        assert_eq!(defaulted.status, PaymentStatus::Paid);
        assert_eq!(defaulted.payment_date, Some(day(2024, 3, 5)));

        let zero =
            record_payment(&db, vehicle.id, "2024-04", Some(0.0), PaymentMode::Upi, day(2024, 4, 5))
                .await?;
        assert_eq!(zero.amount_paid, vehicle.monthly_amount);

        let explicit =
            record_payment(&db, vehicle.id, "2024-05", Some(700.0), PaymentMode::Bank, day(2024, 5, 5))
                .await?;
        assert_eq!(explicit.amount_paid, 700.0);

        let unknown = record_payment(&db, 999, "2024-05", None, PaymentMode::Cash, day(2024, 5, 5))
            .await?;
        assert_eq!(unknown.amount_paid, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_mark_payment_paid() -> Result<()> {
        let (db, vehicle) = setup_with_vehicle().await?;
        let pending = create_test_payment(&db, vehicle.id, "2024-03", PaymentStatus::Pending).await?;
        assert_eq!(pending.payment_date, None);

        let paid = mark_payment_paid(&db, pending.id, day(2024, 3, 20))
            .await?
            .unwrap();

        assert_eq!(paid.status, PaymentStatus::Paid);
        assert_eq!(paid.amount_paid, vehicle.monthly_amount);
        assert_eq!(paid.payment_mode, PaymentMode::Cash);
        assert_eq!(paid.payment_date, Some(day(2024, 3, 20)));
        assert_eq!(paid.month, "2024-03");

        assert!(mark_payment_paid(&db, 999, day(2024, 3, 20)).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_mark_payment_paid_without_vehicle_charges_zero() -> Result<()> {
        let db = setup_test_db().await?;
        let pending = create_test_payment(&db, 404, "2024-03", PaymentStatus::Pending).await?;

        let paid = mark_payment_paid(&db, pending.id, day(2024, 3, 20))
            .await?
            .unwrap();

        assert_eq!(paid.vehicle_id, 404);
        assert_eq!(paid.status, PaymentStatus::Paid);
        assert_eq!(paid.amount_paid, 0.0);
        assert_eq!(paid.payment_date, Some(day(2024, 3, 20)));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_payment() -> Result<()> {
        let (db, vehicle) = setup_with_vehicle().await?;
        let payment = create_test_payment(&db, vehicle.id, "2024-03", PaymentStatus::Pending).await?;

        let updated = update_payment(
            &db,
            payment.id,
            PaymentUpdate {
                month: Some(" 2024-04 ".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();
        assert_eq!(updated.month, "2024-04");
        assert_eq!(updated.status, PaymentStatus::Pending);

        delete_payment(&db, payment.id).await?;
        assert!(get_payment_by_id(&db, payment.id).await?.is_none());
        assert!(update_payment(&db, payment.id, PaymentUpdate::default()).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_payments_for_vehicle() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_payment(&db, 1, "2024-01", PaymentStatus::Paid).await?;
        create_test_payment(&db, 2, "2024-01", PaymentStatus::Paid).await?;
        create_test_payment(&db, 1, "2024-02", PaymentStatus::Pending).await?;

        let for_one = get_payments_for_vehicle(&db, 1).await?;
        assert_eq!(for_one.len(), 2);
        assert!(for_one.iter().all(|p| p.vehicle_id == 1));
        Ok(())
    }

    fn vehicle_fixture(id: i64, number: &str, owner: &str) -> vehicle::Model {
        vehicle::Model {
            id,
            vehicle_type: VehicleType::Auto,
            vehicle_number: number.to_string(),
            owner_name: owner.to_string(),
            mobile_number: "9876543210".to_string(),
            flex_type: crate::entities::FlexType::Front,
            flex_start_date: None,
            monthly_amount: 500.0,
            area: String::new(),
            remarks: String::new(),
            created_at: day(2024, 1, 1),
        }
    }

    fn payment_fixture(id: i64, vehicle_id: i64, month: &str, status: PaymentStatus) -> payment::Model {
        payment::Model {
            id,
            vehicle_id,
            month: month.to_string(),
            amount_paid: 0.0,
            payment_mode: PaymentMode::Cash,
            payment_date: None,
            status,
        }
    }

    #[test]
    fn test_filter_payments() {
        let vehicles = vec![vehicle_fixture(1, "UP32 AB 1234", "Rajesh Kumar")];
        let payments = vec![
            payment_fixture(1, 1, "2024-01", PaymentStatus::Paid),
            payment_fixture(2, 1, "2024-02", PaymentStatus::Pending),
            payment_fixture(3, 9, "2024-02", PaymentStatus::Pending),
        ];

        let all = filter_payments(&payments, &vehicles, &PaymentFilter::default());
        assert_eq!(all.len(), 3);

        let blank = PaymentFilter {
            search: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_payments(&payments, &vehicles, &blank).len(), 3);

        let rajesh = PaymentFilter {
            search: Some("rajesh".to_string()),
            ..Default::default()
        };
        let ids: Vec<i64> = filter_payments(&payments, &vehicles, &rajesh)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);

        let pending_feb = PaymentFilter {
            status: Some(PaymentStatus::Pending),
            month: Some("2024-02".to_string()),
            ..Default::default()
        };
        let ids: Vec<i64> = filter_payments(&payments, &vehicles, &pending_feb)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_distinct_months_newest_first() {
        let payments = vec![
            payment_fixture(1, 1, "2024-01", PaymentStatus::Paid),
            payment_fixture(2, 1, "2024-03", PaymentStatus::Pending),
            payment_fixture(3, 2, "2024-01", PaymentStatus::Paid),
            payment_fixture(4, 2, "2023-12", PaymentStatus::Paid),
        ];
        assert_eq!(
            distinct_months(&payments),
            vec!["2024-03", "2024-01", "2023-12"]
        );
    }
}
