//! Report generation business logic.
//!
//! This module builds the three downloadable reports (flex collection, pending
//! payments, gold transactions) as structured rows with totals, and hands them to a
//! [`ReportExporter`] that turns a report into bytes. Reports are snapshots: they
//! borrow nothing from the store and exporters only read them.

use crate::{
    core::stats::gold_stock,
    entities::{PaymentStatus, gold_record, payment, vehicle},
    errors::Result,
};
use chrono::NaiveDate;
use serde::Serialize;

/// Text shown in place of vehicle details when a payment's vehicle no longer exists.
pub const UNKNOWN_VEHICLE: &str = "Unknown";

/// One received payment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlexCollectionRow {
    /// Registration number
    pub vehicle_number: String,
    /// Owner's name
    pub owner_name: String,
    /// Billing month
    pub month: String,
    /// Amount received
    pub amount: f64,
    /// Payment mode label
    pub payment_mode: String,
    /// Day received
    pub payment_date: Option<NaiveDate>,
}

/// Every Paid payment and the total collected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlexCollectionReport {
    /// One row per Paid payment
    pub rows: Vec<FlexCollectionRow>,
    /// Sum of the row amounts
    pub total_collection: f64,
}

/// One outstanding billing month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingPaymentRow {
    /// Registration number
    pub vehicle_number: String,
    /// Owner's name
    pub owner_name: String,
    /// Owner's contact number
    pub mobile_number: String,
    /// Service area
    pub area: String,
    /// Billing month
    pub month: String,
    /// Vehicle's monthly charge, 0 if the vehicle is gone
    pub amount_due: f64,
}

/// Every Pending payment and the total due.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingPaymentsReport {
    /// One row per Pending payment
    pub rows: Vec<PendingPaymentRow>,
    /// Sum of the amounts due
    pub total_pending: f64,
}

/// One gold ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoldReportRow {
    /// Customer's name
    pub customer_name: String,
    /// Purity label
    pub gold_type: String,
    /// Weight in grams
    pub weight: f64,
    /// Rate per gram
    pub rate_per_gram: f64,
    /// Weight times rate
    pub total_value: f64,
    /// Purpose label
    pub purpose: String,
    /// Day of the transaction
    pub date: NaiveDate,
}

/// Every gold record with bought and sold totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoldReport {
    /// One row per record
    pub rows: Vec<GoldReportRow>,
    /// Total value of Buy records
    pub total_buy: f64,
    /// Total value of Sell records
    pub total_sell: f64,
}

/// Any of the three reports, as handed to an exporter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum Report {
    /// Monthly flex collection
    FlexCollection(FlexCollectionReport),
    /// Pending payment list
    PendingPayments(PendingPaymentsReport),
    /// Gold transaction report
    Gold(GoldReport),
}

impl Report {
    /// Heading of the report.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::FlexCollection(_) => "Monthly Flex Collection Report",
            Self::PendingPayments(_) => "Pending Payment List",
            Self::Gold(_) => "Gold Transaction Report",
        }
    }

    /// File name without extension.
    #[must_use]
    pub const fn file_stem(&self) -> &'static str {
        match self {
            Self::FlexCollection(_) => "flex-collection-report",
            Self::PendingPayments(_) => "pending-payments-report",
            Self::Gold(_) => "gold-transaction-report",
        }
    }
}

fn find_vehicle(vehicles: &[vehicle::Model], vehicle_id: i64) -> Option<&vehicle::Model> {
    vehicles.iter().find(|v| v.id == vehicle_id)
}

/// Builds the flex collection report from every Paid payment.
#[must_use]
pub fn flex_collection_report(
    payments: &[payment::Model],
    vehicles: &[vehicle::Model],
) -> FlexCollectionReport {
    let rows: Vec<FlexCollectionRow> = payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Paid)
        .map(|p| {
            let vehicle = find_vehicle(vehicles, p.vehicle_id);
            FlexCollectionRow {
                vehicle_number: vehicle
                    .map_or(UNKNOWN_VEHICLE, |v| v.vehicle_number.as_str())
                    .to_string(),
                owner_name: vehicle
                    .map_or(UNKNOWN_VEHICLE, |v| v.owner_name.as_str())
                    .to_string(),
                month: p.month.clone(),
                amount: p.amount_paid,
                payment_mode: p.payment_mode.label().to_string(),
                payment_date: p.payment_date,
            }
        })
        .collect();
    let total_collection = rows.iter().map(|r| r.amount).sum();

    FlexCollectionReport {
        rows,
        total_collection,
    }
}

/// Builds the pending payment list. The amount due is the vehicle's monthly charge.
#[must_use]
pub fn pending_payments_report(
    payments: &[payment::Model],
    vehicles: &[vehicle::Model],
) -> PendingPaymentsReport {
    let rows: Vec<PendingPaymentRow> = payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Pending)
        .map(|p| match find_vehicle(vehicles, p.vehicle_id) {
            Some(v) => PendingPaymentRow {
                vehicle_number: v.vehicle_number.clone(),
                owner_name: v.owner_name.clone(),
                mobile_number: v.mobile_number.clone(),
                area: v.area.clone(),
                month: p.month.clone(),
                amount_due: v.monthly_amount,
            },
            None => PendingPaymentRow {
                vehicle_number: UNKNOWN_VEHICLE.to_string(),
                owner_name: UNKNOWN_VEHICLE.to_string(),
                mobile_number: UNKNOWN_VEHICLE.to_string(),
                area: UNKNOWN_VEHICLE.to_string(),
                month: p.month.clone(),
                amount_due: 0.0,
            },
        })
        .collect();
    let total_pending = rows.iter().map(|r| r.amount_due).sum();

    PendingPaymentsReport {
        rows,
        total_pending,
    }
}

/// Builds the gold transaction report from every record.
#[must_use]
pub fn gold_report(records: &[gold_record::Model]) -> GoldReport {
    let stock = gold_stock(records);
    let rows = records
        .iter()
        .map(|r| GoldReportRow {
            customer_name: r.customer_name.clone(),
            gold_type: r.gold_type.label().to_string(),
            weight: r.weight,
            rate_per_gram: r.rate_per_gram,
            total_value: r.total_value,
            purpose: r.purpose.label().to_string(),
            date: r.date,
        })
        .collect();

    GoldReport {
        rows,
        total_buy: stock.total_buy_value,
        total_sell: stock.total_sell_value,
    }
}

/// Builds all three reports from the current collections.
#[must_use]
pub fn all_reports(
    vehicles: &[vehicle::Model],
    payments: &[payment::Model],
    gold_records: &[gold_record::Model],
) -> Vec<Report> {
    vec![
        Report::FlexCollection(flex_collection_report(payments, vehicles)),
        Report::PendingPayments(pending_payments_report(payments, vehicles)),
        Report::Gold(gold_report(gold_records)),
    ]
}

/// Turns a report into a downloadable artifact.
pub trait ReportExporter {
    /// Extension of produced files, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Serializes `report`. The report is never modified.
    fn export(&self, report: &Report) -> Result<Vec<u8>>;

    /// File name for `report` in this format.
    fn file_name(&self, report: &Report) -> String {
        format!("{}.{}", report.file_stem(), self.file_extension())
    }
}

/// Pretty-printed JSON, one object per report.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl ReportExporter for JsonExporter {
    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn export(&self, report: &Report) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(report)?)
    }
}

/// Plain text with one line per row and rupee amounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter;

impl ReportExporter for TextExporter {
    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn export(&self, report: &Report) -> Result<Vec<u8>> {
        Ok(render_text(report).into_bytes())
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

/// Renders a report as aligned plain text.
#[must_use]
pub fn render_text(report: &Report) -> String {
    let mut text = text_lines(report).join("\n");
    text.push('\n');
    text
}

fn text_lines(report: &Report) -> Vec<String> {
    let mut lines = vec![
        "Bharat Flex & Gold Manager".to_string(),
        report.title().to_string(),
        String::new(),
    ];

    match report {
        Report::FlexCollection(r) => {
            lines.push(format!(
                "{:<15} {:<20} {:<8} {:>12} {:<5} {:<10}",
                "Vehicle", "Owner", "Month", "Amount", "Mode", "Date"
            ));
            for row in &r.rows {
                lines.push(format!(
                    "{:<15} {:<20} {:<8} {:>12} {:<5} {:<10}",
                    row.vehicle_number,
                    row.owner_name,
                    row.month,
                    format_rupees(row.amount),
                    row.payment_mode,
                    format_date(row.payment_date)
                ));
            }
            lines.push(String::new());
            lines.push(format!("Total Collection: {}", format_rupees(r.total_collection)));
        }
        Report::PendingPayments(r) => {
            lines.push(format!(
                "{:<15} {:<20} {:<12} {:<15} {:<8} {:>12}",
                "Vehicle", "Owner", "Mobile", "Area", "Month", "Due"
            ));
            for row in &r.rows {
                lines.push(format!(
                    "{:<15} {:<20} {:<12} {:<15} {:<8} {:>12}",
                    row.vehicle_number,
                    row.owner_name,
                    row.mobile_number,
                    row.area,
                    row.month,
                    format_rupees(row.amount_due)
                ));
            }
            lines.push(String::new());
            lines.push(format!("Total Pending: {}", format_rupees(r.total_pending)));
        }
        Report::Gold(r) => {
            lines.push(format!(
                "{:<20} {:<4} {:>8} {:>10} {:>12} {:<7} {:<10}",
                "Customer", "Type", "Weight", "Rate/g", "Total", "Purpose", "Date"
            ));
            for row in &r.rows {
                lines.push(format!(
                    "{:<20} {:<4} {:>8} {:>10} {:>12} {:<7} {:<10}",
                    row.customer_name,
                    row.gold_type,
                    format!("{}g", row.weight),
                    format_rupees(row.rate_per_gram),
                    format_rupees(row.total_value),
                    row.purpose,
                    format_date(Some(row.date))
                ));
            }
            lines.push(String::new());
            lines.push(format!("Total Bought: {}", format_rupees(r.total_buy)));
            lines.push(format!("Total Sold: {}", format_rupees(r.total_sell)));
        }
    }
    lines
}

/// Formats a rupee amount with Indian digit grouping.
///
/// The last three digits form one group and every two digits above that form
/// another: `150000.0` becomes `"₹1,50,000"`. Fractions keep at most two decimals,
/// trailing zeros dropped.
#[must_use]
pub fn format_rupees(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let fraction = fraction.trim_end_matches('0');

    let digits: Vec<char> = whole.chars().collect();
    let mut grouped = String::new();
    let split = digits.len().saturating_sub(3);
    let (upper, lower) = digits.split_at(split);
    for (i, c) in upper.iter().enumerate() {
        if i > 0 && (upper.len() - i) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    if !upper.is_empty() {
        grouped.push(',');
    }
    grouped.extend(lower);

    if fraction.is_empty() {
        format!("{sign}₹{grouped}")
    } else {
        format!("{sign}₹{grouped}.{fraction}")
    }
}
