//! Date-keyed series and the daily resource aggregation built on them

pub mod aggregate;
pub mod daily_series;

pub use aggregate::{DailyAggregateRow, aggregate_daily_resources};
pub use daily_series::DailySeries;
