//! Record store - the owned entry point for every ledger operation.
//!
//! `RecordStore` owns the database connection and the month-matching policy used by
//! the dashboard. Each mutator completes its write before returning, so the next read
//! observes it. Aggregations load the current collections and hand them to the pure
//! functions in [`crate::core::stats`] and [`crate::core::report`].

use crate::{
    config::database::{create_connection, create_tables},
    core::{
        gold::{self, GoldRecordDraft, GoldRecordUpdate},
        month::{BillingMonth, MonthMatch},
        payment::{self, PaymentDraft, PaymentUpdate},
        report::{self, Report, ReportExporter},
        stats::{self, DashboardStats, GoldStock, PaymentSummary},
        vehicle::{self, VehicleDraft, VehicleUpdate},
    },
    entities::{GoldRecordModel, PaymentMode, PaymentModel, VehicleModel},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::path::{Path, PathBuf};

/// The three collections of the ledger behind one owned handle.
#[derive(Debug, Clone)]
pub struct RecordStore {
    db: DatabaseConnection,
    month_match: MonthMatch,
}

impl RecordStore {
    /// Wraps an existing connection whose tables are already created.
    #[must_use]
    pub const fn new(db: DatabaseConnection, month_match: MonthMatch) -> Self {
        Self { db, month_match }
    }

    /// Connects to `DATABASE_URL` (in-memory by default) and creates the tables.
    pub async fn connect(month_match: MonthMatch) -> Result<Self> {
        let db = create_connection().await?;
        create_tables(&db).await?;
        Ok(Self::new(db, month_match))
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// The policy deciding which payments belong to the reference month.
    #[must_use]
    pub const fn month_match(&self) -> MonthMatch {
        self.month_match
    }

    /// Replaces the month-matching policy.
    pub const fn set_month_match(&mut self, month_match: MonthMatch) {
        self.month_match = month_match;
    }

    // Vehicles

    /// Registers a vehicle.
    pub async fn add_vehicle(&self, draft: VehicleDraft) -> Result<VehicleModel> {
        vehicle::create_vehicle(&self.db, draft).await
    }

    /// Applies a partial update. `Ok(None)` when the id is unknown.
    pub async fn update_vehicle(
        &self,
        vehicle_id: i64,
        update: VehicleUpdate,
    ) -> Result<Option<VehicleModel>> {
        vehicle::update_vehicle(&self.db, vehicle_id, update).await
    }

    /// Removes a vehicle together with all of its payments.
    pub async fn delete_vehicle(&self, vehicle_id: i64) -> Result<()> {
        vehicle::delete_vehicle(&self.db, vehicle_id).await
    }

    /// Every vehicle in insertion order.
    pub async fn vehicles(&self) -> Result<Vec<VehicleModel>> {
        vehicle::get_all_vehicles(&self.db).await
    }

    /// One vehicle by id.
    pub async fn vehicle(&self, vehicle_id: i64) -> Result<Option<VehicleModel>> {
        vehicle::get_vehicle_by_id(&self.db, vehicle_id).await
    }

    // Payments

    /// Inserts a payment as drafted.
    pub async fn add_payment(&self, draft: PaymentDraft) -> Result<PaymentModel> {
        payment::create_payment(&self.db, draft).await
    }

    /// Records a paid month, defaulting the amount to the vehicle's monthly charge.
    pub async fn record_payment(
        &self,
        vehicle_id: i64,
        month: &str,
        amount: Option<f64>,
        payment_mode: PaymentMode,
        payment_date: NaiveDate,
    ) -> Result<PaymentModel> {
        payment::record_payment(&self.db, vehicle_id, month, amount, payment_mode, payment_date)
            .await
    }

    /// Applies a partial update. `Ok(None)` when the id is unknown.
    pub async fn update_payment(
        &self,
        payment_id: i64,
        update: PaymentUpdate,
    ) -> Result<Option<PaymentModel>> {
        payment::update_payment(&self.db, payment_id, update).await
    }

    /// Settles a pending payment in cash on `paid_on`.
    pub async fn mark_payment_paid(
        &self,
        payment_id: i64,
        paid_on: NaiveDate,
    ) -> Result<Option<PaymentModel>> {
        payment::mark_payment_paid(&self.db, payment_id, paid_on).await
    }

    /// Removes one payment.
    pub async fn delete_payment(&self, payment_id: i64) -> Result<()> {
        payment::delete_payment(&self.db, payment_id).await
    }

    /// Every payment in insertion order.
    pub async fn payments(&self) -> Result<Vec<PaymentModel>> {
        payment::get_all_payments(&self.db).await
    }

    /// One payment by id.
    pub async fn payment(&self, payment_id: i64) -> Result<Option<PaymentModel>> {
        payment::get_payment_by_id(&self.db, payment_id).await
    }

    /// Payments referencing `vehicle_id`.
    pub async fn payments_for_vehicle(&self, vehicle_id: i64) -> Result<Vec<PaymentModel>> {
        payment::get_payments_for_vehicle(&self.db, vehicle_id).await
    }

    // Gold records

    /// Inserts a gold record, computing its total value.
    pub async fn add_gold_record(&self, draft: GoldRecordDraft) -> Result<GoldRecordModel> {
        gold::create_gold_record(&self.db, draft).await
    }

    /// Applies a partial update, recomputing the total when weight or rate changes.
    pub async fn update_gold_record(
        &self,
        record_id: i64,
        update: GoldRecordUpdate,
    ) -> Result<Option<GoldRecordModel>> {
        gold::update_gold_record(&self.db, record_id, update).await
    }

    /// Removes one gold record.
    pub async fn delete_gold_record(&self, record_id: i64) -> Result<()> {
        gold::delete_gold_record(&self.db, record_id).await
    }

    /// Every gold record in insertion order.
    pub async fn gold_records(&self) -> Result<Vec<GoldRecordModel>> {
        gold::get_all_gold_records(&self.db).await
    }

    /// One gold record by id.
    pub async fn gold_record(&self, record_id: i64) -> Result<Option<GoldRecordModel>> {
        gold::get_gold_record_by_id(&self.db, record_id).await
    }

    // Aggregations

    /// Dashboard numbers for the current calendar month (UTC).
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.dashboard_stats_for(BillingMonth::current()).await
    }

    /// Dashboard numbers with `reference` as "this month".
    pub async fn dashboard_stats_for(&self, reference: BillingMonth) -> Result<DashboardStats> {
        let vehicles = self.vehicles().await?;
        let payments = self.payments().await?;
        let gold_records = self.gold_records().await?;

        Ok(stats::compute_dashboard_stats(
            &vehicles,
            &payments,
            &gold_records,
            reference,
            self.month_match,
        ))
    }

    /// Net gold held per grade and the buy and sell totals.
    pub async fn gold_stock(&self) -> Result<GoldStock> {
        Ok(stats::gold_stock(&self.gold_records().await?))
    }

    /// Paid and pending counts over every payment.
    pub async fn payment_summary(&self) -> Result<PaymentSummary> {
        Ok(stats::payment_summary(&self.payments().await?))
    }

    /// Snapshots of the flex collection, pending payment and gold reports.
    pub async fn reports(&self) -> Result<Vec<Report>> {
        let vehicles = self.vehicles().await?;
        let payments = self.payments().await?;
        let gold_records = self.gold_records().await?;

        Ok(report::all_reports(&vehicles, &payments, &gold_records))
    }

    /// Writes every report into `directory` with `exporter`, creating the directory.
    ///
    /// Returns the paths written.
    pub async fn export_reports(
        &self,
        directory: &Path,
        exporter: &impl ReportExporter,
    ) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(directory)?;

        let mut written = Vec::new();
        for report in self.reports().await? {
            let path = directory.join(exporter.file_name(&report));
            std::fs::write(&path, exporter.export(&report)?)?;
            tracing::info!("Exported {} to {}", report.title(), path.display());
            written.push(path);
        }
        Ok(written)
    }
}
