//! Gold ledger business logic - Buy, sell and repair records.
//!
//! Every record stores `total_value = weight * rate_per_gram`. The value is computed
//! on insert and recomputed on update whenever the weight or the rate is supplied,
//! never otherwise.

use crate::{
    core::validation::{positive, required_text},
    entities::{GoldPurpose, GoldRecord, GoldType, gold_record},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Fields of a new gold record. `total_value` is derived, not supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct GoldRecordDraft {
    /// Customer's name, required
    pub customer_name: String,
    /// Customer's contact number
    pub mobile_number: String,
    /// Purity grade
    pub gold_type: GoldType,
    /// Weight in grams, must be above zero
    pub weight: f64,
    /// Rate per gram, must be above zero
    pub rate_per_gram: f64,
    /// Sell, Buy or Repair
    pub purpose: GoldPurpose,
    /// Day of the transaction
    pub date: NaiveDate,
    /// Free-text remarks
    pub remarks: String,
}

/// Partial update of a gold record. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoldRecordUpdate {
    /// New customer name (must not be blank)
    pub customer_name: Option<String>,
    /// New contact number
    pub mobile_number: Option<String>,
    /// New purity grade
    pub gold_type: Option<GoldType>,
    /// New weight (must be above zero)
    pub weight: Option<f64>,
    /// New rate per gram (must be above zero)
    pub rate_per_gram: Option<f64>,
    /// New purpose
    pub purpose: Option<GoldPurpose>,
    /// New transaction date
    pub date: Option<NaiveDate>,
    /// New remarks
    pub remarks: Option<String>,
}

/// Value of `weight` grams at `rate_per_gram`.
#[must_use]
pub fn total_value(weight: f64, rate_per_gram: f64) -> f64 {
    weight * rate_per_gram
}

/// [`total_value`], rejecting factors whose product overflows.
fn checked_total_value(weight: f64, rate_per_gram: f64) -> Result<f64> {
    let total = total_value(weight, rate_per_gram);
    if !total.is_finite() {
        return Err(Error::InvalidAmount {
            field: "total_value",
            amount: total,
        });
    }
    Ok(total)
}

/// Inserts a gold record, computing its total value. `created_at` is today (UTC).
///
/// # Errors
/// `MissingField` for a blank customer name; `InvalidAmount` when weight or rate is not
/// a finite number above zero, or when their product is not finite.
pub async fn create_gold_record(
    db: &DatabaseConnection,
    draft: GoldRecordDraft,
) -> Result<gold_record::Model> {
    let customer_name = required_text("customer_name", &draft.customer_name)?;
    let weight = positive("weight", draft.weight)?;
    let rate_per_gram = positive("rate_per_gram", draft.rate_per_gram)?;
    let total = checked_total_value(weight, rate_per_gram)?;

    let model = gold_record::ActiveModel {
        customer_name: Set(customer_name),
        mobile_number: Set(draft.mobile_number.trim().to_string()),
        gold_type: Set(draft.gold_type),
        weight: Set(weight),
        rate_per_gram: Set(rate_per_gram),
        total_value: Set(total),
        purpose: Set(draft.purpose),
        date: Set(draft.date),
        remarks: Set(draft.remarks.trim().to_string()),
        created_at: Set(Utc::now().date_naive()),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    tracing::info!(
        "Recorded gold {} of {}g {} for {} (value {})",
        result.purpose.label(),
        result.weight,
        result.gold_type.label(),
        result.customer_name,
        result.total_value
    );
    Ok(result)
}

/// Retrieves every gold record in insertion order.
pub async fn get_all_gold_records(db: &DatabaseConnection) -> Result<Vec<gold_record::Model>> {
    GoldRecord::find()
        .order_by_asc(gold_record::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a gold record by id.
pub async fn get_gold_record_by_id(
    db: &DatabaseConnection,
    record_id: i64,
) -> Result<Option<gold_record::Model>> {
    GoldRecord::find_by_id(record_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Merges the supplied fields into an existing record.
///
/// When `weight` or `rate_per_gram` is supplied, `total_value` is recomputed from the
/// merged factors; otherwise the stored value is kept. Returns `Ok(None)` when no
/// record has this id.
pub async fn update_gold_record(
    db: &DatabaseConnection,
    record_id: i64,
    update: GoldRecordUpdate,
) -> Result<Option<gold_record::Model>> {
    let customer_name = update
        .customer_name
        .as_deref()
        .map(|v| required_text("customer_name", v))
        .transpose()?;
    let weight = update.weight.map(|w| positive("weight", w)).transpose()?;
    let rate_per_gram = update
        .rate_per_gram
        .map(|r| positive("rate_per_gram", r))
        .transpose()?;

    let Some(existing) = get_gold_record_by_id(db, record_id).await? else {
        tracing::debug!("Update skipped, no gold record with id {record_id}");
        return Ok(None);
    };

    let mut active: gold_record::ActiveModel = existing.clone().into();
    if weight.is_some() || rate_per_gram.is_some() {
        // Recompute against the merged factors, not just the supplied one
        let merged_weight = weight.unwrap_or(existing.weight);
        let merged_rate = rate_per_gram.unwrap_or(existing.rate_per_gram);
        active.total_value = Set(checked_total_value(merged_weight, merged_rate)?);
        active.weight = Set(merged_weight);
        active.rate_per_gram = Set(merged_rate);
    }
    if let Some(customer_name) = customer_name {
        active.customer_name = Set(customer_name);
    }
    if let Some(mobile_number) = update.mobile_number {
        active.mobile_number = Set(mobile_number.trim().to_string());
    }
    if let Some(gold_type) = update.gold_type {
        active.gold_type = Set(gold_type);
    }
    if let Some(purpose) = update.purpose {
        active.purpose = Set(purpose);
    }
    if let Some(date) = update.date {
        active.date = Set(date);
    }
    if let Some(remarks) = update.remarks {
        active.remarks = Set(remarks.trim().to_string());
    }

    if !active.is_changed() {
        return Ok(Some(existing));
    }

    let updated = active.update(db).await?;
    tracing::info!(
        "Updated gold record {} (value {})",
        updated.id,
        updated.total_value
    );
    Ok(Some(updated))
}

/// Removes a gold record. Unknown ids are ignored.
pub async fn delete_gold_record(db: &DatabaseConnection, record_id: i64) -> Result<()> {
    let result = GoldRecord::delete_by_id(record_id).exec(db).await?;
    tracing::info!(
        "Deleted gold record {record_id} ({} row)",
        result.rows_affected
    );
    Ok(())
}

/// Search and filter rules of the gold ledger list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoldRecordFilter {
    /// Case-insensitive match on customer name, substring match on mobile
    pub search: Option<String>,
    /// Only this purity grade
    pub gold_type: Option<GoldType>,
    /// Only this purpose
    pub purpose: Option<GoldPurpose>,
}

impl GoldRecordFilter {
    /// Returns true when `record` passes every set criterion.
    #[must_use]
    pub fn matches(&self, record: &gold_record::Model) -> bool {
        let search_ok = self.search.as_deref().map(str::trim).is_none_or(|search| {
            record
                .customer_name
                .to_lowercase()
                .contains(&search.to_lowercase())
                || record.mobile_number.contains(search)
        });
        let type_ok = self.gold_type.is_none_or(|t| record.gold_type == t);
        let purpose_ok = self.purpose.is_none_or(|p| record.purpose == p);

        search_ok && type_ok && purpose_ok
    }
}

/// Applies `filter` to `records`, keeping their order.
#[must_use]
pub fn filter_gold_records<'a>(
    records: &'a [gold_record::Model],
    filter: &GoldRecordFilter,
) -> Vec<&'a gold_record::Model> {
    records.iter().filter(|r| filter.matches(r)).collect()
}
