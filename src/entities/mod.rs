//! Entity module - Contains all SeaORM entity definitions for the ledger.
//! These entities represent the database tables backing the record store.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod gold_record;
pub mod payment;
pub mod vehicle;

// Re-export specific types to avoid conflicts
pub use gold_record::{
    Column as GoldRecordColumn, Entity as GoldRecord, GoldPurpose, GoldType,
    Model as GoldRecordModel,
};
pub use payment::{
    Column as PaymentColumn, Entity as Payment, Model as PaymentModel, PaymentMode, PaymentStatus,
};
pub use vehicle::{
    Column as VehicleColumn, Entity as Vehicle, FlexType, Model as VehicleModel, VehicleType,
};
