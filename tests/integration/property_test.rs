use std::collections::BTreeSet;

use chrono::{Days, NaiveDate, NaiveDateTime};
use icu_signals::models::Dated;
use icu_signals::{
    DailySeries, EncounterRecord, MedicationRecord, ProcedureRecord, RecordStore,
    aggregate_daily_resources,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CLASSES: [&str; 5] = ["inpatient", "Emergency", "ambulatory", "wellness", "INPATIENT"];

fn random_time(rng: &mut StdRng) -> NaiveDateTime {
    let base = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
    base.checked_add_days(Days::new(rng.random_range(0..60)))
        .unwrap()
        .and_hms_opt(rng.random_range(0..24), rng.random_range(0..60), 0)
        .unwrap()
}

fn random_store(rng: &mut StdRng) -> RecordStore {
    let encounters = (0..rng.random_range(0..80))
        .map(|i| {
            let class = CLASSES[rng.random_range(0..CLASSES.len())];
            EncounterRecord::new(format!("p{}", i % 7), class, random_time(rng))
        })
        .collect();
    let procedures = (0..rng.random_range(0..40))
        .map(|i| ProcedureRecord::new(format!("p{}", i % 5), random_time(rng)))
        .collect();
    let medications = (0..rng.random_range(0..40))
        .map(|i| {
            let cost = rng.random_bool(0.8).then(|| rng.random_range(0.0..500.0));
            MedicationRecord::new(format!("p{}", i % 3), random_time(rng), cost)
        })
        .collect();

    RecordStore::from_records(
        Vec::new(),
        encounters,
        procedures,
        medications,
        Vec::new(),
        DailySeries::default(),
    )
}

#[test]
fn test_aggregate_dates_are_union_of_sources() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let store = random_store(&mut rng);
        let rows = aggregate_daily_resources(&store);

        let expected: BTreeSet<NaiveDate> = store
            .icu_encounters()
            .iter()
            .map(Dated::date)
            .chain(store.procedures().iter().map(Dated::date))
            .chain(store.medications().iter().map(Dated::date))
            .collect();
        let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();

        // unique and ascending
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(dates.into_iter().collect::<BTreeSet<_>>(), expected);

        assert!(rows.iter().all(|r| r.medications >= 0.0));
        let beds: u64 = rows.iter().map(|r| r.icu_beds).sum();
        let ventilators: u64 = rows.iter().map(|r| r.ventilators).sum();
        assert_eq!(beds as usize, store.icu_encounters().len());
        assert_eq!(ventilators as usize, store.procedures().len());
    }
}

#[test]
fn test_absent_metric_is_zero() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..50 {
        let store = random_store(&mut rng);
        let procedure_dates: BTreeSet<NaiveDate> =
            store.procedures().iter().map(Dated::date).collect();

        for row in aggregate_daily_resources(&store) {
            if !procedure_dates.contains(&row.date) {
                assert_eq!(row.ventilators, 0);
            }
        }
    }
}
