//! Admission trend over a trailing window, optionally scoped to a condition group

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::algorithm::DailySeries;
use crate::config::ConditionGroupTable;
use crate::filter::{ConditionGroupFilter, count_distinct_patients};
use crate::models::{Dated, EncounterRecord};
use crate::query::{QueryOutcome, TrendParams};
use crate::store::RecordStore;

/// Admissions on one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendRow {
    pub date: NaiveDate,
    pub admissions: u64,
    /// Full English weekday name, present only when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendMeta {
    pub window_days: i64,
    pub group: String,
    /// Earliest date included
    pub cutoff: NaiveDate,
    /// Distinct patients across the whole filtered window
    pub distinct_patients: usize,
}

pub type TrendOutcome = QueryOutcome<TrendRow, TrendMeta>;

/// First date inside a window of `window_days` ending today
#[must_use]
pub fn trend_cutoff(today: NaiveDate, window_days: i64) -> NaiveDate {
    u64::try_from(window_days)
        .ok()
        .and_then(|days| today.checked_sub_days(Days::new(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Computes admission trends from the ICU-relevant encounters of a store
#[derive(Debug, Clone, Copy)]
pub struct TrendQueryEngine<'a> {
    store: &'a RecordStore,
    groups: &'a ConditionGroupTable,
}

impl<'a> TrendQueryEngine<'a> {
    #[must_use]
    pub const fn new(store: &'a RecordStore, groups: &'a ConditionGroupTable) -> Self {
        Self { store, groups }
    }

    /// Run a trend query relative to `today`
    ///
    /// The window is cut first and the condition group applied to what
    /// remains. An empty result is reported as [`QueryOutcome::NoData`].
    #[must_use]
    pub fn query(&self, params: &TrendParams, today: NaiveDate) -> TrendOutcome {
        let cutoff = trend_cutoff(today, params.window_days());

        let recent: Vec<&EncounterRecord> = self
            .store
            .icu_encounters()
            .iter()
            .filter(|encounter| encounter.date() >= cutoff)
            .collect();

        let filtered =
            ConditionGroupFilter::new(self.store, self.groups).apply(params.group(), recent);
        if filtered.is_empty() {
            log::debug!(
                "Trend query for group '{}' since {cutoff} matched no encounters",
                params.group()
            );
            return QueryOutcome::NoData;
        }

        let distinct_patients = count_distinct_patients(filtered.iter().copied());
        let rows = DailySeries::count_by_date(filtered.iter().map(|encounter| encounter.date()))
            .into_points()
            .into_iter()
            .map(|(date, admissions)| TrendRow {
                date,
                admissions,
                weekday: params
                    .annotate_weekday()
                    .then(|| date.format("%A").to_string()),
            })
            .collect();

        QueryOutcome::from_rows(
            rows,
            TrendMeta {
                window_days: params.window_days(),
                group: params.group().label().to_string(),
                cutoff,
                distinct_patients,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::GroupSelection;
    use crate::models::ConditionRecord;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn encounter(patient: &str, class: &str, d: u32) -> EncounterRecord {
        EncounterRecord::new(patient, class, day(d).and_hms_opt(9, 30, 0).unwrap())
    }

    fn store() -> RecordStore {
        RecordStore::from_records(
            Vec::new(),
            vec![
                encounter("p1", "inpatient", 1),
                encounter("p1", "Emergency", 10),
                encounter("p2", "inpatient", 10),
                encounter("p3", "ambulatory", 10),
                encounter("p3", "emergency", 11),
            ],
            Vec::new(),
            Vec::new(),
            vec![ConditionRecord::new(
                "p2",
                "Stress (finding)",
                day(1).and_hms_opt(0, 0, 0).unwrap(),
            )],
            DailySeries::default(),
        )
    }

    #[test]
    fn test_counts_per_date_within_window() {
        let store = store();
        let groups = ConditionGroupTable::default();
        let engine = TrendQueryEngine::new(&store, &groups);

        let outcome = engine.query(&TrendParams::new(5, GroupSelection::All), day(12));
        let rows = outcome.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].date, rows[0].admissions), (day(10), 2));
        assert_eq!((rows[1].date, rows[1].admissions), (day(11), 1));
        assert!(rows[0].weekday.is_none());

        let meta = outcome.meta().unwrap();
        assert_eq!(meta.cutoff, day(7));
        assert_eq!(meta.distinct_patients, 3);
        assert_eq!(meta.group, "All");
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let store = store();
        let groups = ConditionGroupTable::default();
        let engine = TrendQueryEngine::new(&store, &groups);
        let outcome = engine.query(&TrendParams::new(1, GroupSelection::All), day(11));
        assert_eq!(outcome.rows().len(), 2);
    }

    #[test]
    fn test_group_restricts_patients() {
        let store = store();
        let groups = ConditionGroupTable::default();
        let engine = TrendQueryEngine::new(&store, &groups);

        let params =
            TrendParams::parse(Some("30"), Some("psychosocial factors")).with_weekday(true);
        let outcome = engine.query(&params, day(12));
        assert_eq!(outcome.rows().len(), 1);
        assert_eq!(outcome.rows()[0].weekday.as_deref(), Some("Sunday"));
        assert_eq!(outcome.meta().unwrap().distinct_patients, 1);
    }

    #[test]
    fn test_empty_window_is_no_data() {
        let store = store();
        let groups = ConditionGroupTable::default();
        let engine = TrendQueryEngine::new(&store, &groups);
        let far_future = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert!(engine.query(&TrendParams::new(3, GroupSelection::All), far_future).is_no_data());
    }
}
