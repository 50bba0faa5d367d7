//! Daily resource aggregation
//!
//! ICU encounters, procedures and medication costs are each grouped by
//! calendar date and then outer-merged, so every date seen in any of the three
//! sources appears once with zero for the metrics it lacks.

use chrono::NaiveDate;
use serde::Serialize;

use crate::algorithm::DailySeries;
use crate::models::Dated;
use crate::store::RecordStore;

/// Resource usage on one calendar date
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyAggregateRow {
    pub date: NaiveDate,
    /// ICU-relevant encounters starting on this date
    pub icu_beds: u64,
    /// Procedures starting on this date
    pub ventilators: u64,
    /// Summed medication cost of this date
    pub medications: f64,
}

/// Compute the daily resource series for the whole store
///
/// The result does not depend on any query parameter and can be cached for
/// the lifetime of the store.
#[must_use]
pub fn aggregate_daily_resources(store: &RecordStore) -> Vec<DailyAggregateRow> {
    let beds = DailySeries::count_by_date(store.icu_encounters().iter().map(Dated::date));
    let ventilators = DailySeries::count_by_date(store.procedures().iter().map(Dated::date));
    let medications = DailySeries::sum_by_date(
        store
            .medications()
            .iter()
            .map(|m| (m.date(), m.cost_or_zero())),
    );

    let rows: Vec<DailyAggregateRow> = beds
        .outer_merge(&ventilators)
        .outer_merge(&medications)
        .into_points()
        .into_iter()
        .map(|(date, ((icu_beds, ventilators), medications))| DailyAggregateRow {
            date,
            icu_beds,
            ventilators,
            medications,
        })
        .collect();

    log::debug!("Aggregated daily resources over {} dates", rows.len());
    rows
}
