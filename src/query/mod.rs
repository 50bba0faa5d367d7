//! Query operations over a loaded [`RecordStore`](crate::store::RecordStore)
//!
//! Every query borrows the store, allocates its own result and never fails:
//! bad parameters are coerced in [`params`] and empty results are reported
//! through [`QueryOutcome::NoData`].

pub mod forecast;
pub mod outcome;
pub mod params;
pub mod patient_lookup;
pub mod trend;

pub use forecast::{ForecastMeta, ForecastOutcome, ForecastRangeFilter, ForecastRow, beds_required};
pub use outcome::QueryOutcome;
pub use params::{ForecastParams, TrendParams};
pub use patient_lookup::PatientLookup;
pub use trend::{TrendMeta, TrendOutcome, TrendQueryEngine, TrendRow};
