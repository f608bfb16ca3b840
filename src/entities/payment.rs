//! Payment entity - One billing month's charge for a flex vehicle.
//!
//! A payment carries the `vehicle_id` it settles, the billing `month` (`YYYY-MM`),
//! the amount received and how it was received. Pending payments have no
//! `payment_date` yet.
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

/// How the money was received
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum PaymentMode {
    /// Cash in hand
    #[sea_orm(string_value = "Cash")]
    Cash,
    /// UPI transfer
    #[sea_orm(string_value = "UPI")]
    #[serde(rename = "UPI")]
    Upi,
    /// Bank transfer
    #[sea_orm(string_value = "Bank")]
    Bank,
}

impl PaymentMode {
    /// Label used on screens and in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Upi => "UPI",
            Self::Bank => "Bank",
        }
    }
}

/// Settlement state of a billing month
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum PaymentStatus {
    /// Money received
    #[sea_orm(string_value = "Paid")]
    Paid,
    /// Still owed
    #[sea_orm(string_value = "Pending")]
    Pending,
}

impl PaymentStatus {
    /// Label used on screens and in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Pending => "Pending",
        }
    }
}

/// Payment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    /// Unique identifier for the payment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the vehicle this payment settles (may no longer exist)
    pub vehicle_id: i64,
    /// Billing month as `YYYY-MM`
    pub month: String,
    /// Amount received in rupees
    pub amount_paid: f64,
    /// How the money was received
    pub payment_mode: PaymentMode,
    /// Day the money was received, `None` while pending
    pub payment_date: Option<Date>,
    /// `Paid` or `Pending`
    pub status: PaymentStatus,
}

/// No foreign key to `vehicles`: dangling references are allowed
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
