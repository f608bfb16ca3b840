//! Vehicle entity - A vehicle carrying a flex advertisement panel.
//!
//! Each vehicle has an owner, a registration number, the kind of panel it carries,
//! and the monthly charge billed for it. Payments reference vehicles by id but no
//! foreign key is declared, so payments for removed vehicles are tolerated.

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

/// Kind of vehicle carrying the flex
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum VehicleType {
    /// Auto rickshaw
    #[sea_orm(string_value = "Auto")]
    #[serde(rename = "Auto")]
    Auto,
    /// Battery rickshaw
    #[sea_orm(string_value = "E-Rickshaw")]
    #[serde(rename = "E-Rickshaw")]
    ERickshaw,
    /// Two-wheeler
    #[sea_orm(string_value = "2W")]
    #[serde(rename = "2W")]
    TwoWheeler,
    /// Three-wheeler
    #[sea_orm(string_value = "3W")]
    #[serde(rename = "3W")]
    ThreeWheeler,
}

impl VehicleType {
    /// Label used on screens and in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::ERickshaw => "E-Rickshaw",
            Self::TwoWheeler => "2W",
            Self::ThreeWheeler => "3W",
        }
    }
}

/// Placement of the advertisement panel on the vehicle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum FlexType {
    /// Front panel
    #[sea_orm(string_value = "Front")]
    Front,
    /// Back panel
    #[sea_orm(string_value = "Back")]
    Back,
    /// Whole-vehicle wrap
    #[sea_orm(string_value = "Full Wrap")]
    #[serde(rename = "Full Wrap")]
    FullWrap,
}

impl FlexType {
    /// Label used on screens and in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Back => "Back",
            Self::FullWrap => "Full Wrap",
        }
    }
}

/// Vehicle database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    /// Unique identifier for the vehicle
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Kind of vehicle
    pub vehicle_type: VehicleType,
    /// Registration number (e.g., "UP32 AB 1234")
    pub vehicle_number: String,
    /// Name of the vehicle owner
    pub owner_name: String,
    /// Owner's contact number
    pub mobile_number: String,
    /// Placement of the flex panel
    pub flex_type: FlexType,
    /// Day the advertisement started running, if known
    pub flex_start_date: Option<Date>,
    /// Monthly charge in rupees, never negative
    pub monthly_amount: f64,
    /// Service area the vehicle operates in
    pub area: String,
    /// Free-text remarks
    pub remarks: String,
    /// Day the vehicle was registered in the ledger
    pub created_at: Date,
}

/// Vehicles declare no relations; payments keep a bare `vehicle_id`
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
