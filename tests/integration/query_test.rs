use crate::utils::{Fixture, jan};
use icu_signals::{DailyAggregateRow, ForecastParams, QueryOutcome, TrendParams};

#[test]
fn test_daily_resource_forecast_outer_merges_sources() {
    let service = Fixture::standard().service();

    let row = |day, icu_beds, ventilators, medications| DailyAggregateRow {
        date: jan(day),
        icu_beds,
        ventilators,
        medications,
    };
    assert_eq!(
        service.daily_resource_forecast(),
        &[
            row(1, 2, 0, 20.0),
            row(2, 0, 1, 0.0),
            row(3, 1, 0, 0.0),
            row(4, 0, 1, 0.0),
            row(5, 0, 0, 0.0),
        ]
    );
}

#[test]
fn test_admission_trend_all_groups() {
    let service = Fixture::standard().service();
    let outcome = service.admission_trend_on(&TrendParams::parse(Some("30"), None), jan(10));

    let QueryOutcome::HasData { rows, meta } = outcome else {
        panic!("expected data");
    };
    let counts: Vec<_> = rows.iter().map(|r| (r.date, r.admissions)).collect();
    assert_eq!(counts, vec![(jan(1), 2), (jan(3), 1)]);
    assert_eq!(meta.distinct_patients, 3);
    assert_eq!(meta.window_days, 30);
}

#[test]
fn test_invalid_window_behaves_like_default() {
    let service = Fixture::standard().service();
    let today = jan(10);
    let reference = service.admission_trend_on(&TrendParams::parse(Some("365"), None), today);

    for raw in [None, Some("0"), Some("-5"), Some("abc"), Some("")] {
        assert_eq!(
            service.admission_trend_on(&TrendParams::parse(raw, None), today),
            reference,
            "window {raw:?}"
        );
    }
}

#[test]
fn test_all_group_matches_unfiltered() {
    let service = Fixture::standard().service();
    let today = jan(10);
    let unfiltered = service.admission_trend_on(&TrendParams::parse(Some("30"), None), today);

    for group in ["All", "all", "ALL", ""] {
        assert_eq!(
            service.admission_trend_on(&TrendParams::parse(Some("30"), Some(group)), today),
            unfiltered,
            "group {group:?}"
        );
    }
}

#[test]
fn test_condition_group_scopes_patients() {
    let service = Fixture::standard().service();
    let params = TrendParams::parse(Some("30"), Some("RESPIRATORY DISORDERS")).with_weekday(true);
    let outcome = service.admission_trend_on(&params, jan(10));

    let rows = outcome.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, jan(1));
    assert_eq!(rows[0].admissions, 1);
    assert_eq!(rows[0].weekday.as_deref(), Some("Monday"));
    assert_eq!(outcome.meta().unwrap().distinct_patients, 1);
}

#[test]
fn test_unknown_group_is_no_data() {
    let service = Fixture::standard().service();
    let params = TrendParams::parse(None, Some("Cardiology"));
    let outcome = service.admission_trend_on(&params, jan(10));
    assert!(outcome.is_no_data());
}

#[test]
fn test_window_before_all_encounters_is_no_data() {
    let service = Fixture::standard().service();
    let later = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let outcome = service.admission_trend_on(&TrendParams::parse(Some("7"), None), later);
    assert!(outcome.is_no_data());

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json, serde_json::json!({ "status": "no_data" }));
}

#[test]
fn test_bed_forecast_anchors_on_latest_demand_date() {
    let service = Fixture::standard().service();
    let outcome = service.bed_demand_forecast(&ForecastParams::parse(Some("2")));

    let rows: Vec<_> = outcome
        .rows()
        .iter()
        .map(|r| (r.date, r.total_demand, r.beds_required))
        .collect();
    assert_eq!(rows, vec![(jan(2), 10.0, 1), (jan(3), 0.0, 0)]);

    let meta = outcome.meta().unwrap();
    assert_eq!(meta.anchor, jan(3));
    assert_eq!(meta.range_days, 2);
}

#[test]
fn test_bed_forecast_default_range_covers_series() {
    let service = Fixture::standard().service();
    let outcome = service.bed_demand_forecast(&ForecastParams::parse(Some("soon")));
    assert_eq!(outcome.rows().len(), 3);
    assert_eq!(outcome.rows()[0].beds_required, 2);
    assert_eq!(outcome.meta().unwrap().range_days, 30);
}

#[test]
fn test_bed_forecast_without_demand_is_no_data() {
    let fixture = Fixture::standard();
    fixture.remove("cleaned/patients.csv");
    let service = fixture.service();
    assert!(service.bed_demand_forecast(&ForecastParams::default()).is_no_data());
}

#[test]
fn test_search_patients() {
    let service = Fixture::standard().service();

    assert_eq!(service.search_patients("").len(), 3);
    assert_eq!(service.search_patients(""), service.risk_roster());

    let by_name = service.search_patients("maRIA");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].identifier, "p1");

    let by_id = service.search_patients("P2");
    assert_eq!(by_id[0].first_name, "Jonas");

    // "p" hits every identifier
    assert_eq!(service.search_patients("p").len(), 3);
    assert!(service.search_patients("nobody").is_empty());
}

#[test]
fn test_queries_are_idempotent() {
    let service = Fixture::standard().service();
    let params = TrendParams::parse(Some("30"), Some("Psychosocial Factors"));

    assert_eq!(
        service.admission_trend_on(&params, jan(10)),
        service.admission_trend_on(&params, jan(10))
    );
    assert_eq!(
        service.bed_demand_forecast(&ForecastParams::new(2)),
        service.bed_demand_forecast(&ForecastParams::new(2))
    );
    assert_eq!(service.search_patients("a"), service.search_patients("a"));
    assert_eq!(
        service.daily_resource_forecast().to_vec(),
        service.daily_resource_forecast().to_vec()
    );
    assert_eq!(service.store().summary().patients, 3);
}

#[test]
fn test_distinct_patients_span_the_whole_window() {
    let fixture = Fixture::standard();
    fixture.write(
        "encounters.csv",
        "Id,START,PATIENT,ENCOUNTERCLASS\n\
         e1,2024-01-01T08:00:00Z,p1,inpatient\n\
         e2,2024-01-02T08:00:00Z,p1,emergency\n\
         e3,2024-01-03T08:00:00Z,p1,inpatient\n\
         e4,2024-01-03T09:00:00Z,p2,inpatient\n",
    );
    let service = fixture.service();
    let outcome = service.admission_trend_on(&TrendParams::parse(Some("30"), None), jan(10));

    let admissions: u64 = outcome.rows().iter().map(|r| r.admissions).sum();
    assert_eq!(outcome.rows().len(), 3);
    assert_eq!(admissions, 4);
    assert_eq!(outcome.meta().unwrap().distinct_patients, 2);
}

#[test]
fn test_nan_cells_are_missing_values() {
    let fixture = Fixture::standard();
    fixture.write(
        "medications.csv",
        "START,PATIENT,TOTALCOST\n2024-01-01,p1,NaN\n2024-01-01,p1,5\n2024-01-02,p2,NA\n",
    );
    fixture.write(
        "cleaned/patients.csv",
        "ENCOUNTER_DATE,ICU_Demand_ML\n2024-01-01,nan\n2024-01-01,12\n",
    );
    let service = fixture.service();

    let resources = service.daily_resource_forecast();
    assert_eq!(resources[0].date, jan(1));
    assert_eq!(resources[0].medications, 5.0);
    assert!(resources.iter().all(|r| r.medications.is_finite() && r.medications >= 0.0));

    let json = serde_json::to_value(resources).unwrap();
    assert_eq!(json[0]["medications"], 5.0);

    let forecast = service.bed_demand_forecast(&ForecastParams::default());
    let rows = forecast.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_demand, 12.0);
    assert_eq!(rows[0].beds_required, 2);
}
