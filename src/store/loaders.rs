//! Per-table loading jobs shared by the parallel and async store loaders

use std::path::Path;
use std::time::Instant;

use crate::algorithm::DailySeries;
use crate::config::StoreConfig;
use crate::error::Result;
use crate::models::{
    ConditionRecord, DemandRecord, DemographicRecord, EncounterRecord, MedicationRecord,
    PatientRecord, ProcedureRecord, RecordSet, RowPolicy, ScoredPatient, SourceRecord,
    patient::merge_demographics, records_from_table,
};
use crate::reader::TableReader;
use crate::schema::{DateFormatConfig, RISK_COLUMN_ALIASES};
use crate::utils::log_warning;

/// The independently loadable sources of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTable {
    /// Scored patients merged with demographic names
    Patients,
    Encounters,
    Procedures,
    Medications,
    Conditions,
    /// Daily ICU demand, loaded tolerantly
    Demand,
}

impl SourceTable {
    /// Every source, in load order
    pub const ALL: [Self; 6] = [
        Self::Patients,
        Self::Encounters,
        Self::Procedures,
        Self::Medications,
        Self::Conditions,
        Self::Demand,
    ];
}

/// Typed content of one loaded source
#[derive(Debug)]
pub enum TableData {
    Patients(Vec<PatientRecord>),
    Encounters(Vec<EncounterRecord>),
    Procedures(Vec<ProcedureRecord>),
    Medications(Vec<MedicationRecord>),
    Conditions(Vec<ConditionRecord>),
    Demand(DailySeries<f64>),
}

/// Load one source table into typed records
pub fn load_source(
    source: SourceTable,
    reader: &TableReader,
    config: &StoreConfig,
) -> Result<TableData> {
    let dates = DateFormatConfig::default();
    Ok(match source {
        SourceTable::Patients => TableData::Patients(load_patients(reader, config, &dates)?),
        SourceTable::Encounters => {
            TableData::Encounters(load_strict(reader, &config.encounters, &dates)?)
        }
        SourceTable::Procedures => {
            TableData::Procedures(load_strict(reader, &config.procedures, &dates)?)
        }
        SourceTable::Medications => {
            TableData::Medications(load_strict(reader, &config.medications, &dates)?)
        }
        SourceTable::Conditions => {
            TableData::Conditions(load_strict(reader, &config.conditions, &dates)?)
        }
        SourceTable::Demand => TableData::Demand(load_demand(reader, &config.demand, &dates)),
    })
}

/// Load a table where any unparsable cell aborts the load
fn load_strict<R: SourceRecord>(
    reader: &TableReader,
    path: &Path,
    dates: &DateFormatConfig,
) -> Result<Vec<R>> {
    let table = reader.read(path, R::TABLE)?;
    let RecordSet { records, .. } =
        records_from_table::<R>(&table, path, dates, RowPolicy::Strict)?;
    Ok(records)
}

/// Load scored patients and left join demographic first names onto them
///
/// The scored table is required. Any failure reading the demographic table
/// is logged and every patient is named `Unknown`.
pub fn load_patients(
    reader: &TableReader,
    config: &StoreConfig,
    dates: &DateFormatConfig,
) -> Result<Vec<PatientRecord>> {
    let path = &config.scored_patients;
    let table = reader
        .read(path, ScoredPatient::TABLE)?
        .normalize(&RISK_COLUMN_ALIASES)?;
    let scored =
        records_from_table::<ScoredPatient>(&table, path, dates, RowPolicy::Strict)?.records;

    let demographics = load_strict::<DemographicRecord>(reader, &config.demographics, dates)
        .unwrap_or_else(|e| {
            log_warning(
                &format!(
                    "Demographic names unavailable ({e}), using '{}'",
                    crate::config::UNKNOWN_FIRST_NAME
                ),
                Some(&config.demographics),
            );
            Vec::new()
        });

    Ok(merge_demographics(scored, &demographics))
}

/// Load the daily demand series, dropping rows that cannot be parsed
///
/// Unlike the event tables this never fails: a missing file or column yields
/// an empty series and the forecast reports no data.
pub fn load_demand(
    reader: &TableReader,
    path: &Path,
    dates: &DateFormatConfig,
) -> DailySeries<f64> {
    let start = Instant::now();
    let loaded = reader.read(path, DemandRecord::TABLE).and_then(|table| {
        records_from_table::<DemandRecord>(&table, path, dates, RowPolicy::DropInvalid)
    });

    match loaded {
        Ok(RecordSet { records, dropped }) => {
            if dropped > 0 {
                log_warning(
                    &format!("Dropped {dropped} unparsable demand rows"),
                    Some(path),
                );
            }
            let series = DailySeries::sum_by_date(records.iter().map(|r| (r.date, r.demand)));
            log::debug!(
                "Built demand series of {} days in {:?}",
                series.len(),
                start.elapsed()
            );
            series
        }
        Err(e) => {
            log_warning(&format!("Demand series unavailable ({e})"), Some(path));
            DailySeries::default()
        }
    }
}
