//! Daily operational signals for an ICU: admissions, ventilator procedures,
//! medication spend and forecasted bed demand, derived from clinical record
//! tables loaded once into an immutable in-memory store.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod query;
pub mod reader;
pub mod schema;
pub mod service;
pub mod store;
pub mod utils;

// Core types
pub use config::{ConditionGroup, ConditionGroupTable, StoreConfig};
pub use error::{Result, SignalError};
pub use service::SignalService;
pub use store::{RecordStore, StoreSummary};

// Query surface
pub use algorithm::{DailyAggregateRow, DailySeries, aggregate_daily_resources};
pub use filter::{ConditionGroupFilter, GroupSelection};
pub use query::{
    ForecastOutcome, ForecastParams, ForecastRangeFilter, ForecastRow, PatientLookup, QueryOutcome,
    TrendOutcome, TrendParams, TrendQueryEngine, TrendRow,
};

// Record types
pub use models::{
    ConditionRecord, DemandRecord, EncounterRecord, MedicationRecord, PatientRecord,
    PatientRiskView, ProcedureRecord, RiskCategory,
};
