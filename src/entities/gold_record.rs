//! Gold record entity - One entry in the gold buy/sell/repair ledger.
//!
//! `total_value` is stored alongside its factors and is kept equal to
//! `weight * rate_per_gram` by the store whenever either factor changes.

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

/// Purity grade of the gold
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum GoldType {
    /// 22 karat
    #[sea_orm(string_value = "22K")]
    #[serde(rename = "22K")]
    K22,
    /// 24 karat
    #[sea_orm(string_value = "24K")]
    #[serde(rename = "24K")]
    K24,
}

impl GoldType {
    /// Label used on screens and in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::K22 => "22K",
            Self::K24 => "24K",
        }
    }
}

/// Why the gold changed hands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum GoldPurpose {
    /// Sold to a customer, leaves stock
    #[sea_orm(string_value = "Sell")]
    Sell,
    /// Bought from a customer, enters stock
    #[sea_orm(string_value = "Buy")]
    Buy,
    /// Customer's gold held for repair, not stock
    #[sea_orm(string_value = "Repair")]
    Repair,
}

impl GoldPurpose {
    /// Label used on screens and in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sell => "Sell",
            Self::Buy => "Buy",
            Self::Repair => "Repair",
        }
    }
}

/// Gold record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gold_records")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Customer's name
    pub customer_name: String,
    /// Customer's contact number
    pub mobile_number: String,
    /// Purity grade
    pub gold_type: GoldType,
    /// Weight in grams
    pub weight: f64,
    /// Rate in rupees per gram
    pub rate_per_gram: f64,
    /// `weight * rate_per_gram`
    pub total_value: f64,
    /// Sell, Buy or Repair
    pub purpose: GoldPurpose,
    /// Day of the transaction
    pub date: Date,
    /// Free-text remarks
    pub remarks: String,
    /// Day the record was entered
    pub created_at: Date,
}

/// Gold records have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
