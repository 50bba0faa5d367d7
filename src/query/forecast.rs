//! Bed demand forecast over the trailing dates of the demand series
//!
//! The slice is anchored on the latest date in the series, never on the
//! wall clock, and holds exactly `range_days` calendar dates ending at the
//! anchor. Dates missing from the series are simply absent from the slice.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::algorithm::DailySeries;
use crate::config::BED_DEMAND_DIVISOR;
use crate::query::{ForecastParams, QueryOutcome};

/// Demand and derived bed requirement of one date
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub total_demand: f64,
    pub beds_required: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForecastMeta {
    /// Latest date of the demand series
    pub anchor: NaiveDate,
    /// Earliest date included
    pub start: NaiveDate,
    pub range_days: i64,
}

pub type ForecastOutcome = QueryOutcome<ForecastRow, ForecastMeta>;

/// Beds needed for a total demand, `ceil(total / 10)`
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn beds_required(total_demand: f64) -> i64 {
    (total_demand / BED_DEMAND_DIVISOR).ceil() as i64
}

/// First date of a slice of `range_days` dates ending at `anchor`
#[must_use]
pub fn forecast_start(anchor: NaiveDate, range_days: i64) -> NaiveDate {
    u64::try_from(range_days.saturating_sub(1))
        .ok()
        .and_then(|days| anchor.checked_sub_days(Days::new(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Slices a daily demand series
#[derive(Debug, Clone, Copy)]
pub struct ForecastRangeFilter<'a> {
    series: &'a DailySeries<f64>,
}

impl<'a> ForecastRangeFilter<'a> {
    #[must_use]
    pub const fn new(series: &'a DailySeries<f64>) -> Self {
        Self { series }
    }

    /// [`QueryOutcome::NoData`] when the series is empty
    #[must_use]
    pub fn query(&self, params: &ForecastParams) -> ForecastOutcome {
        let Some(anchor) = self.series.last_date() else {
            log::debug!("Demand series is empty, no forecast available");
            return QueryOutcome::NoData;
        };
        let start = forecast_start(anchor, params.range_days());

        let rows = self
            .series
            .since(start)
            .iter()
            .map(|&(date, total_demand)| ForecastRow {
                date,
                total_demand,
                beds_required: beds_required(total_demand),
            })
            .collect();

        QueryOutcome::from_rows(
            rows,
            ForecastMeta {
                anchor,
                start,
                range_days: params.range_days(),
            },
        )
    }
}
