//! Vehicle business logic - Handles all flex vehicle operations.
//!
//! Provides functions for registering, retrieving, updating and removing vehicles,
//! plus the search and filter rules used by the vehicle list. Removing a vehicle
//! also removes every payment recorded against it.

use crate::{
    core::validation::{non_negative, required_text},
    entities::{FlexType, Payment, Vehicle, VehicleType, payment, vehicle},
    errors::Result,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::BTreeSet;

/// Fields needed to register a new vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleDraft {
    /// Kind of vehicle
    pub vehicle_type: VehicleType,
    /// Registration number, required
    pub vehicle_number: String,
    /// Owner's name, required
    pub owner_name: String,
    /// Owner's contact number, required
    pub mobile_number: String,
    /// Placement of the flex panel
    pub flex_type: FlexType,
    /// Day the advertisement started running
    pub flex_start_date: Option<NaiveDate>,
    /// Monthly charge, must be zero or more
    pub monthly_amount: f64,
    /// Service area
    pub area: String,
    /// Free-text remarks
    pub remarks: String,
}

impl Default for VehicleDraft {
    fn default() -> Self {
        Self {
            vehicle_type: VehicleType::Auto,
            vehicle_number: String::new(),
            owner_name: String::new(),
            mobile_number: String::new(),
            flex_type: FlexType::FullWrap,
            flex_start_date: None,
            monthly_amount: 0.0,
            area: String::new(),
            remarks: String::new(),
        }
    }
}

/// Partial update of a vehicle. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleUpdate {
    /// New kind of vehicle
    pub vehicle_type: Option<VehicleType>,
    /// New registration number (must not be blank)
    pub vehicle_number: Option<String>,
    /// New owner name (must not be blank)
    pub owner_name: Option<String>,
    /// New contact number (must not be blank)
    pub mobile_number: Option<String>,
    /// New panel placement
    pub flex_type: Option<FlexType>,
    /// New start date; `Some(None)` clears it
    pub flex_start_date: Option<Option<NaiveDate>>,
    /// New monthly charge (must be zero or more)
    pub monthly_amount: Option<f64>,
    /// New service area
    pub area: Option<String>,
    /// New remarks
    pub remarks: Option<String>,
}

/// Registers a new vehicle after validating the draft. `created_at` is today (UTC).
///
/// # Errors
/// `MissingField` when the number, owner or mobile is blank; `InvalidAmount` when the
/// monthly charge is negative or not finite.
pub async fn create_vehicle(db: &DatabaseConnection, draft: VehicleDraft) -> Result<vehicle::Model> {
    let vehicle_number = required_text("vehicle_number", &draft.vehicle_number)?;
    let owner_name = required_text("owner_name", &draft.owner_name)?;
    let mobile_number = required_text("mobile_number", &draft.mobile_number)?;
    let monthly_amount = non_negative("monthly_amount", draft.monthly_amount)?;

    let model = vehicle::ActiveModel {
        vehicle_type: Set(draft.vehicle_type),
        vehicle_number: Set(vehicle_number),
        owner_name: Set(owner_name),
        mobile_number: Set(mobile_number),
        flex_type: Set(draft.flex_type),
        flex_start_date: Set(draft.flex_start_date),
        monthly_amount: Set(monthly_amount),
        area: Set(draft.area.trim().to_string()),
        remarks: Set(draft.remarks.trim().to_string()),
        created_at: Set(Utc::now().date_naive()),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    tracing::info!(
        "Registered vehicle {} ({}) with id {}",
        result.vehicle_number,
        result.owner_name,
        result.id
    );
    Ok(result)
}

/// Retrieves every vehicle in registration order.
pub async fn get_all_vehicles(db: &DatabaseConnection) -> Result<Vec<vehicle::Model>> {
    Vehicle::find()
        .order_by_asc(vehicle::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a vehicle by id.
pub async fn get_vehicle_by_id(
    db: &DatabaseConnection,
    vehicle_id: i64,
) -> Result<Option<vehicle::Model>> {
    Vehicle::find_by_id(vehicle_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Merges the supplied fields into an existing vehicle.
///
/// The update is validated before the vehicle is looked up. Returns `Ok(None)` when
/// no vehicle has this id; nothing is written in that case.
pub async fn update_vehicle(
    db: &DatabaseConnection,
    vehicle_id: i64,
    update: VehicleUpdate,
) -> Result<Option<vehicle::Model>> {
    let vehicle_number = update
        .vehicle_number
        .as_deref()
        .map(|v| required_text("vehicle_number", v))
        .transpose()?;
    let owner_name = update
        .owner_name
        .as_deref()
        .map(|v| required_text("owner_name", v))
        .transpose()?;
    let mobile_number = update
        .mobile_number
        .as_deref()
        .map(|v| required_text("mobile_number", v))
        .transpose()?;
    let monthly_amount = update
        .monthly_amount
        .map(|v| non_negative("monthly_amount", v))
        .transpose()?;

    let Some(existing) = get_vehicle_by_id(db, vehicle_id).await? else {
        tracing::debug!("Update skipped, no vehicle with id {vehicle_id}");
        return Ok(None);
    };

    let mut active: vehicle::ActiveModel = existing.clone().into();
    if let Some(vehicle_type) = update.vehicle_type {
        active.vehicle_type = Set(vehicle_type);
    }
    if let Some(vehicle_number) = vehicle_number {
        active.vehicle_number = Set(vehicle_number);
    }
    if let Some(owner_name) = owner_name {
        active.owner_name = Set(owner_name);
    }
    if let Some(mobile_number) = mobile_number {
        active.mobile_number = Set(mobile_number);
    }
    if let Some(flex_type) = update.flex_type {
        active.flex_type = Set(flex_type);
    }
    if let Some(flex_start_date) = update.flex_start_date {
        active.flex_start_date = Set(flex_start_date);
    }
    if let Some(monthly_amount) = monthly_amount {
        active.monthly_amount = Set(monthly_amount);
    }
    if let Some(area) = update.area {
        active.area = Set(area.trim().to_string());
    }
    if let Some(remarks) = update.remarks {
        active.remarks = Set(remarks.trim().to_string());
    }

    if !active.is_changed() {
        return Ok(Some(existing));
    }

    let updated = active.update(db).await?;
    tracing::info!("Updated vehicle {}", updated.id);
    Ok(Some(updated))
}

/// Removes a vehicle and every payment whose `vehicle_id` matches, in one transaction.
///
/// Payments for other vehicles are untouched. Deleting an unknown id still clears any
/// dangling payments that reference it.
pub async fn delete_vehicle(db: &DatabaseConnection, vehicle_id: i64) -> Result<()> {
    // Use a transaction so the vehicle and its payments disappear together
    let txn = db.begin().await?;

    let payments = Payment::delete_many()
        .filter(payment::Column::VehicleId.eq(vehicle_id))
        .exec(&txn)
        .await?;
    let vehicles = Vehicle::delete_by_id(vehicle_id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        "Deleted vehicle {vehicle_id} ({} row) and {} payment(s)",
        vehicles.rows_affected,
        payments.rows_affected
    );
    Ok(())
}

/// Search and filter rules of the vehicle list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleFilter {
    /// Case-insensitive match on number or owner, substring match on mobile
    pub search: Option<String>,
    /// Only this kind of vehicle
    pub vehicle_type: Option<VehicleType>,
    /// Only this exact area
    pub area: Option<String>,
}

impl VehicleFilter {
    /// Returns true when `vehicle` passes every set criterion.
    #[must_use]
    pub fn matches(&self, vehicle: &vehicle::Model) -> bool {
        let search_ok = self.search.as_deref().map(str::trim).is_none_or(|search| {
            let needle = search.to_lowercase();
            vehicle.vehicle_number.to_lowercase().contains(&needle)
                || vehicle.owner_name.to_lowercase().contains(&needle)
                || vehicle.mobile_number.contains(search)
        });
        let type_ok = self.vehicle_type.is_none_or(|t| vehicle.vehicle_type == t);
        let area_ok = self.area.as_deref().is_none_or(|a| vehicle.area == a);

        search_ok && type_ok && area_ok
    }
}

/// Applies `filter` to `vehicles`, keeping their order.
#[must_use]
pub fn filter_vehicles<'a>(
    vehicles: &'a [vehicle::Model],
    filter: &VehicleFilter,
) -> Vec<&'a vehicle::Model> {
    vehicles.iter().filter(|v| filter.matches(v)).collect()
}

/// Every distinct non-empty service area, sorted.
#[must_use]
pub fn distinct_areas(vehicles: &[vehicle::Model]) -> Vec<String> {
    vehicles
        .iter()
        .map(|v| v.area.as_str())
        .filter(|a| !a.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
