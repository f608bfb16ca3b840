//! Dashboard aggregation - counts, sums and stock balances.
//!
//! All functions here are pure: they take slices of the three collections and are
//! total over empty input, returning zero-valued aggregates. "This month" is decided
//! by a [`MonthMatch`] policy against a reference [`BillingMonth`].

use crate::{
    core::month::{BillingMonth, MonthMatch},
    entities::{GoldPurpose, GoldType, PaymentStatus, gold_record, payment, vehicle},
};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Headline numbers of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DashboardStats {
    /// Number of registered vehicles
    pub total_vehicles: usize,
    /// Distinct vehicles with a Paid payment in the reference month's bucket
    pub paid_vehicles: usize,
    /// Pending payments across all months
    pub pending_payments: usize,
    /// Sum paid in the reference month's bucket
    pub monthly_collection: f64,
    /// `|bought value - sold value|`
    pub gold_stock_value: f64,
    /// Alerts shown for pending payments; equals `pending_payments`
    pub pending_alerts: usize,
}

/// Net gold held, by weight and value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GoldStock {
    /// 22K grams bought minus grams sold
    pub net_weight_22k: f64,
    /// 24K grams bought minus grams sold
    pub net_weight_24k: f64,
    /// Total value of Buy records
    pub total_buy_value: f64,
    /// Total value of Sell records
    pub total_sell_value: f64,
}

impl GoldStock {
    /// Signed net value, bought minus sold.
    #[must_use]
    pub fn net_value(&self) -> f64 {
        self.total_buy_value - self.total_sell_value
    }
}

/// Counts and total of a list of payments.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PaymentSummary {
    /// Number of Paid payments
    pub paid_count: usize,
    /// Number of Pending payments
    pub pending_count: usize,
    /// Sum of `amount_paid` over Paid payments
    pub total_collection: f64,
}

/// Payments whose billing month falls in the bucket of `reference`.
pub fn payments_in_bucket<'a>(
    payments: &'a [payment::Model],
    reference: BillingMonth,
    policy: MonthMatch,
) -> impl Iterator<Item = &'a payment::Model> {
    payments
        .iter()
        .filter(move |p| policy.matches(&p.month, reference))
}

/// Computes the dashboard headline numbers.
#[must_use]
pub fn compute_dashboard_stats(
    vehicles: &[vehicle::Model],
    payments: &[payment::Model],
    gold_records: &[gold_record::Model],
    reference: BillingMonth,
    policy: MonthMatch,
) -> DashboardStats {
    let mut paid_vehicle_ids = HashSet::new();
    let mut monthly_collection = 0.0;
    for paid in payments_in_bucket(payments, reference, policy)
        .filter(|p| p.status == PaymentStatus::Paid)
    {
        paid_vehicle_ids.insert(paid.vehicle_id);
        monthly_collection += paid.amount_paid;
    }

    let pending_payments = payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Pending)
        .count();

    DashboardStats {
        total_vehicles: vehicles.len(),
        paid_vehicles: paid_vehicle_ids.len(),
        pending_payments,
        monthly_collection,
        gold_stock_value: gold_stock_value(gold_records),
        pending_alerts: pending_payments,
    }
}

/// Absolute difference between the value bought and the value sold.
#[must_use]
pub fn gold_stock_value(gold_records: &[gold_record::Model]) -> f64 {
    gold_stock(gold_records).net_value().abs()
}

/// Net weights per purity and total buy/sell values. Repair records are ignored.
#[must_use]
pub fn gold_stock(gold_records: &[gold_record::Model]) -> GoldStock {
    gold_records
        .iter()
        .fold(GoldStock::default(), |mut stock, record| {
            let signed_weight = match record.purpose {
                GoldPurpose::Buy => {
                    stock.total_buy_value += record.total_value;
                    record.weight
                }
                GoldPurpose::Sell => {
                    stock.total_sell_value += record.total_value;
                    -record.weight
                }
                GoldPurpose::Repair => 0.0,
            };
            match record.gold_type {
                GoldType::K22 => stock.net_weight_22k += signed_weight,
                GoldType::K24 => stock.net_weight_24k += signed_weight,
            }
            stock
        })
}

/// Number of vehicles of each kind. Kinds with no vehicles are absent.
#[must_use]
pub fn count_vehicles_by_type(vehicles: &[vehicle::Model]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for vehicle in vehicles {
        *counts.entry(vehicle.vehicle_type.label()).or_insert(0) += 1;
    }
    counts
}

/// Status shown next to a vehicle in the list.
///
/// Paid when the first payment for the vehicle in the reference bucket is Paid;
/// Pending otherwise, including when there is no payment at all.
#[must_use]
pub fn vehicle_payment_status(
    vehicle_id: i64,
    payments: &[payment::Model],
    reference: BillingMonth,
    policy: MonthMatch,
) -> PaymentStatus {
    payments_in_bucket(payments, reference, policy)
        .find(|p| p.vehicle_id == vehicle_id)
        .map_or(PaymentStatus::Pending, |p| p.status)
}

/// Paid and pending counts plus the total collected over `payments`.
#[must_use]
pub fn payment_summary<'a, I>(payments: I) -> PaymentSummary
where
    I: IntoIterator<Item = &'a payment::Model>,
{
    payments
        .into_iter()
        .fold(PaymentSummary::default(), |mut summary, p| {
            match p.status {
                PaymentStatus::Paid => {
                    summary.paid_count += 1;
                    summary.total_collection += p.amount_paid;
                }
                PaymentStatus::Pending => summary.pending_count += 1,
            }
            summary
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::{FlexType, PaymentMode, VehicleType};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 20).unwrap()
    }

    fn month(s: &str) -> BillingMonth {
        s.parse().unwrap()
    }

    fn vehicle(id: i64, vehicle_type: VehicleType, monthly_amount: f64) -> vehicle::Model {
        vehicle::Model {
            id,
            vehicle_type,
            vehicle_number: format!("UP32 AA {id:04}"),
            owner_name: format!("Owner {id}"),
            mobile_number: "9876543210".to_string(),
            flex_type: FlexType::FullWrap,
            flex_start_date: None,
            monthly_amount,
            area: String::new(),
            remarks: String::new(),
            created_at: day(),
        }
    }

    fn pay(id: i64, vehicle_id: i64, month: &str, amount: f64, status: PaymentStatus) -> payment::Model {
        payment::Model {
            id,
            vehicle_id,
            month: month.to_string(),
            amount_paid: amount,
            payment_mode: PaymentMode::Upi,
            payment_date: (status == PaymentStatus::Paid).then(day),
            status,
        }
    }

    fn gold(id: i64, gold_type: GoldType, weight: f64, rate: f64, purpose: GoldPurpose) -> gold_record::Model {
        gold_record::Model {
            id,
            customer_name: format!("Customer {id}"),
            mobile_number: String::new(),
            gold_type,
            weight,
            rate_per_gram: rate,
            total_value: weight * rate,
            purpose,
            date: day(),
            remarks: String::new(),
            created_at: day(),
        }
    }

    /// The three vehicles, six payments and three gold records seeded on start.
    fn sample() -> (Vec<vehicle::Model>, Vec<payment::Model>, Vec<gold_record::Model>) {
        let vehicles = vec![
            vehicle(1, VehicleType::Auto, 1500.0),
            vehicle(2, VehicleType::ERickshaw, 800.0),
            vehicle(3, VehicleType::TwoWheeler, 500.0),
        ];
        let payments = vec![
            pay(1, 1, "2024-01", 1500.0, PaymentStatus::Paid),
            pay(2, 1, "2024-02", 1500.0, PaymentStatus::Paid),
            pay(3, 2, "2024-02", 800.0, PaymentStatus::Paid),
            pay(4, 1, "2024-03", 0.0, PaymentStatus::Pending),
            pay(5, 2, "2024-03", 0.0, PaymentStatus::Pending),
            pay(6, 3, "2024-02", 500.0, PaymentStatus::Paid),
        ];
        let gold_records = vec![
            gold(1, GoldType::K22, 10.5, 5800.0, GoldPurpose::Sell),
            gold(2, GoldType::K24, 5.0, 6200.0, GoldPurpose::Buy),
            gold(3, GoldType::K22, 2.5, 5800.0, GoldPurpose::Repair),
        ];
        (vehicles, payments, gold_records)
    }

    #[test]
    fn test_empty_collections_give_zero_stats() {
        let stats = compute_dashboard_stats(&[], &[], &[], month("2024-02"), MonthMatch::Exact);
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn test_exact_month_stats_on_sample() {
        let (v, p, g) = sample();
        let stats = compute_dashboard_stats(&v, &p, &g, month("2024-02"), MonthMatch::Exact);

        assert_eq!(stats.total_vehicles, 3);
        assert_eq!(stats.paid_vehicles, 3);
        assert_eq!(stats.monthly_collection, 2800.0);
        assert_eq!(stats.pending_payments, 2);
        assert_eq!(stats.pending_alerts, 2);
        assert_eq!(stats.gold_stock_value, 29900.0);
    }

    #[test]
    fn test_year_prefix_counts_distinct_vehicles() {
        let (v, p, g) = sample();
        let stats = compute_dashboard_stats(
            &v,
            &p,
            &g,
            month("2026-10"),
            MonthMatch::YearPrefix { year: 2024 },
        );

        // Vehicle 1 has two paid months but counts once
        assert_eq!(stats.paid_vehicles, 3);
        assert_eq!(stats.monthly_collection, 4300.0);

        let policy = MonthMatch::YearPrefix { year: 2024 };
        let paid_payments = payments_in_bucket(&p, month("2026-10"), policy)
            .filter(|payment| payment.status == PaymentStatus::Paid)
            .count();
        assert_eq!(paid_payments, 4);
    }

    #[test]
    fn test_exact_month_outside_data_collects_nothing() {
        let (v, p, g) = sample();
        let stats = compute_dashboard_stats(&v, &p, &g, month("2026-10"), MonthMatch::Exact);
        assert_eq!(stats.paid_vehicles, 0);
        assert_eq!(stats.monthly_collection, 0.0);
        assert_eq!(stats.pending_payments, 2);
    }

    #[test]
    fn test_pending_payment_contributes_no_collection() {
        let vehicles = vec![vehicle(1, VehicleType::Auto, 1500.0)];
        let payments = vec![pay(1, 1, "2024-03", 0.0, PaymentStatus::Pending)];
        let stats =
            compute_dashboard_stats(&vehicles, &payments, &[], month("2024-03"), MonthMatch::Exact);

        assert_eq!(stats.pending_payments, 1);
        assert_eq!(stats.pending_alerts, 1);
        assert_eq!(stats.monthly_collection, 0.0);
        assert_eq!(stats.paid_vehicles, 0);
    }

    #[test]
    fn test_gold_stock_value_buy_minus_sell() {
        let records = vec![
            gold(1, GoldType::K22, 10.0, 5000.0, GoldPurpose::Buy),
            gold(2, GoldType::K22, 4.0, 5000.0, GoldPurpose::Sell),
        ];
        assert_eq!(records[0].total_value, 50000.0);
        assert_eq!(gold_stock_value(&records), 30000.0);
    }

    #[test]
    fn test_gold_stock_value_is_absolute() {
        let records = vec![
            gold(1, GoldType::K22, 1.0, 5000.0, GoldPurpose::Buy),
            gold(2, GoldType::K24, 3.0, 5000.0, GoldPurpose::Sell),
        ];
        assert_eq!(gold_stock_value(&records), 10000.0);
        assert_eq!(gold_stock(&records).net_value(), -10000.0);
    }

    #[test]
    fn test_gold_stock_balanced_buys_and_sells_cancel() {
        let records = vec![
            gold(1, GoldType::K22, 2.0, 6000.0, GoldPurpose::Buy),
            gold(2, GoldType::K24, 3.0, 4000.0, GoldPurpose::Sell),
        ];
        let swapped: Vec<_> = records
            .iter()
            .map(|r| gold_record::Model {
                purpose: match r.purpose {
                    GoldPurpose::Buy => GoldPurpose::Sell,
                    GoldPurpose::Sell => GoldPurpose::Buy,
                    GoldPurpose::Repair => GoldPurpose::Repair,
                },
                ..r.clone()
            })
            .collect();

        assert_eq!(gold_stock_value(&records), 0.0);
        assert_eq!(gold_stock_value(&swapped), 0.0);
    }

    #[test]
    fn test_gold_stock_weights() {
        let (_, _, g) = sample();
        let stock = gold_stock(&g);

        assert_eq!(stock.net_weight_22k, -10.5);
        assert_eq!(stock.net_weight_24k, 5.0);
        assert_eq!(stock.total_buy_value, 31000.0);
        assert_eq!(stock.total_sell_value, 60900.0);
    }

    #[test]
    fn test_count_vehicles_by_type() {
        let (mut v, _, _) = sample();
        v.push(vehicle(4, VehicleType::Auto, 100.0));
        let counts = count_vehicles_by_type(&v);

        assert_eq!(counts.get("Auto"), Some(&2));
        assert_eq!(counts.get("E-Rickshaw"), Some(&1));
        assert_eq!(counts.get("3W"), None);
    }

    #[test]
    fn test_vehicle_payment_status() {
        let (_, p, _) = sample();
        let feb = month("2024-02");
        let mar = month("2024-03");

        assert_eq!(vehicle_payment_status(1, &p, feb, MonthMatch::Exact), PaymentStatus::Paid);
        assert_eq!(vehicle_payment_status(1, &p, mar, MonthMatch::Exact), PaymentStatus::Pending);
        assert_eq!(vehicle_payment_status(3, &p, mar, MonthMatch::Exact), PaymentStatus::Pending);
    }

    #[test]
    fn test_payment_summary() {
        let (_, p, _) = sample();
        let summary = payment_summary(&p);

        assert_eq!(summary.paid_count, 4);
        assert_eq!(summary.pending_count, 2);
        assert_eq!(summary.total_collection, 4300.0);
        assert_eq!(
            payment_summary(std::iter::empty::<&payment::Model>()),
            PaymentSummary::default()
        );
    }
}
