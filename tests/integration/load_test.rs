use crate::utils::{Fixture, jan};
use icu_signals::{RiskCategory, SignalError};

#[test]
fn test_load_standard_fixture() {
    let fixture = Fixture::standard();
    let store = fixture.load().expect("store should load");

    let summary = store.summary();
    assert_eq!(summary.patients, 3);
    assert_eq!(summary.encounters, 4);
    assert_eq!(summary.icu_encounters, 3);
    assert_eq!(summary.procedures, 2);
    assert_eq!(summary.medications, 3);
    assert_eq!(summary.conditions, 2);
    assert_eq!(summary.demand_days, 3);
}

#[test]
fn test_offset_is_ignored_for_calendar_date() {
    let fixture = Fixture::standard();
    let store = fixture.load().unwrap();

    // 22:15 UTC stays on its wall-clock date
    let late = store
        .encounters()
        .iter()
        .find(|e| e.patient == "p2")
        .unwrap();
    assert_eq!(late.start.date(), jan(1));
}

#[test]
fn test_patients_merge_names_and_normalize_risk_columns() {
    let fixture = Fixture::standard();
    let store = fixture.load().unwrap();

    let patients = store.patients();
    assert_eq!(patients[0].first_name, "Maria");
    assert_eq!(patients[0].risk_score, Some(0.91));
    assert_eq!(patients[0].risk_category, Some(RiskCategory::High));
    assert_eq!(patients[2].first_name, "Unknown");
    assert_eq!(patients[2].age, None);
}

#[test]
fn test_canonical_risk_columns_are_accepted() {
    let fixture = Fixture::standard();
    fixture.write(
        "final_icu_scored_with_label.csv",
        "PATIENT,AGE,Risk_Score,Final_Risk_Category\np1,50,0.1,Low\n",
    );
    let store = fixture.load().unwrap();
    assert_eq!(store.patients()[0].risk_category, Some(RiskCategory::Low));
}

#[test]
fn test_missing_demographics_names_everyone_unknown() {
    let fixture = Fixture::standard();
    fixture.remove("patients.csv");

    let store = fixture.load().expect("demographics are optional");
    assert_eq!(store.patients().len(), 3);
    assert!(store.patients().iter().all(|p| p.first_name == "Unknown"));
}

#[test]
fn test_malformed_demographics_names_everyone_unknown() {
    let fixture = Fixture::standard();
    fixture.write("patients.csv", "Id,LAST\np1,Lopez\n");

    let store = fixture.load().unwrap();
    assert!(store.patients().iter().all(|p| p.first_name == "Unknown"));
}

#[test]
fn test_missing_required_column_is_fatal() {
    let fixture = Fixture::standard();
    fixture.write("encounters.csv", "Id,PATIENT,ENCOUNTERCLASS\ne1,p1,inpatient\n");

    let err = fixture.load().unwrap_err();
    assert!(
        matches!(
            &err,
            SignalError::MissingColumn { table: "encounters", column, .. } if column == "START"
        ),
        "unexpected error: {err}"
    );
}

#[test]
fn test_unparsable_timestamp_is_fatal() {
    let fixture = Fixture::standard();
    fixture.write("procedures.csv", "START,PATIENT\n2024-01-02T11:00:00Z,p1\nyesterday,p2\n");

    let err = fixture.load().unwrap_err();
    assert!(
        matches!(err, SignalError::Timestamp { table: "procedures", row: 1, .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn test_missing_event_table_is_fatal() {
    let fixture = Fixture::standard();
    fixture.remove("conditions.csv");

    let err = fixture.load().unwrap_err();
    assert!(matches!(err, SignalError::MissingSource { table: "conditions", .. }));
}

#[test]
fn test_demand_loader_is_tolerant() {
    let fixture = Fixture::standard();
    let store = fixture.load().unwrap();

    // the unparsable date is dropped and duplicate dates are summed
    assert_eq!(
        store.demand().points(),
        &[(jan(1), 11.0), (jan(2), 10.0), (jan(3), 0.0)]
    );
}

#[test]
fn test_missing_demand_never_aborts_startup() {
    let fixture = Fixture::standard();
    fixture.remove("cleaned/patients.csv");

    let store = fixture.load().expect("demand is optional");
    assert!(store.demand().is_empty());
}

#[test]
fn test_empty_event_tables_are_valid() {
    let fixture = Fixture::standard();
    fixture.write("procedures.csv", "START,PATIENT\n");
    fixture.write("medications.csv", "START,PATIENT,TOTALCOST\n");

    let store = fixture.load().unwrap();
    assert!(store.procedures().is_empty());
    assert!(store.medications().is_empty());
}
