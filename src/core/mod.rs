/// Admin login and session state
pub mod auth;

/// Gold buy, sell and repair records
pub mod gold;

/// Billing months and the dashboard month-matching policy
pub mod month;

/// Monthly flex payments
pub mod payment;

/// Report snapshots and exporters
pub mod report;

/// Sample data for an empty store
pub mod seed;

/// Dashboard aggregations over the three collections
pub mod stats;

/// The owned record store
pub mod store;

pub(crate) mod validation;

/// Vehicles carrying flex advertisements
pub mod vehicle;
