//! Typed rows for the clinical source tables.
//!
//! Each record type knows its table name, the columns it needs and how to
//! build itself from a raw text row. `records_from_table` drives the
//! conversion for any record type and applies a [`RowPolicy`].

pub mod condition;
pub mod demand;
pub mod encounter;
pub mod medication;
pub mod patient;
pub mod procedure;

pub use condition::ConditionRecord;
pub use demand::DemandRecord;
pub use encounter::EncounterRecord;
pub use medication::MedicationRecord;
pub use patient::{DemographicRecord, PatientRecord, PatientRiskView, RiskCategory, ScoredPatient};
pub use procedure::ProcedureRecord;

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;

use crate::error::{Result, SignalError};
use crate::reader::{TextTable, project_columns};
use crate::schema::{DateFormatConfig, parse_timestamp};

/// Rows keyed by a patient identifier
pub trait PatientKeyed {
    /// The patient identifier of this row
    fn patient_id(&self) -> &str;
}

/// Rows that happened on a calendar date
pub trait Dated {
    /// The calendar date of this row
    fn date(&self) -> NaiveDate;
}

/// A typed record built from one row of a source table
pub trait SourceRecord: Sized {
    /// Logical table name used in log lines and errors
    const TABLE: &'static str;
    /// Columns that must exist in the source
    const REQUIRED_COLUMNS: &'static [&'static str];
    /// Text row as produced by the reader
    type Raw: DeserializeOwned;

    /// Convert a raw row; `row` is the zero based index within the table
    fn from_raw(raw: Self::Raw, row: usize, dates: &DateFormatConfig) -> Result<Self>;
}

/// What to do with a row whose cells cannot be converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPolicy {
    /// Abort the whole load on the first bad row
    Strict,
    /// Drop bad rows and count them
    DropInvalid,
}

/// Records converted from a table plus the rows that were dropped
#[derive(Debug, Clone)]
pub struct RecordSet<R> {
    pub records: Vec<R>,
    pub dropped: usize,
}

/// Convert every row of a text table into typed records
///
/// Missing columns and undecodable batches always fail, whatever the policy.
pub fn records_from_table<R: SourceRecord>(
    table: &TextTable,
    path: &Path,
    dates: &DateFormatConfig,
    policy: RowPolicy,
) -> Result<RecordSet<R>> {
    table.require(R::TABLE, path, R::REQUIRED_COLUMNS)?;

    let mut records = Vec::with_capacity(table.num_rows());
    let mut dropped = 0;
    let mut row = 0;

    for batch in &table.batches {
        let projected = project_columns(batch, R::REQUIRED_COLUMNS)?;
        let raws: Vec<R::Raw> = serde_arrow::from_record_batch(&projected)
            .map_err(|e| SignalError::deserialize(R::TABLE, e))?;

        for raw in raws {
            match R::from_raw(raw, row, dates) {
                Ok(record) => records.push(record),
                Err(e)
                    if policy == RowPolicy::DropInvalid
                        && !matches!(e, SignalError::Deserialize { .. }) =>
                {
                    log::debug!("Dropping row {row} of {}: {e}", R::TABLE);
                    dropped += 1;
                }
                Err(e) => return Err(e),
            }
            row += 1;
        }
    }

    Ok(RecordSet { records, dropped })
}

/// Treat empty and whitespace-only cells as absent
#[must_use]
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a required timestamp cell
pub fn required_timestamp(
    value: Option<&str>,
    table: &'static str,
    column: &'static str,
    row: usize,
    dates: &DateFormatConfig,
) -> Result<NaiveDateTime> {
    let raw = value.unwrap_or_default();
    parse_timestamp(raw, dates).ok_or_else(|| SignalError::Timestamp {
        table,
        column,
        row,
        value: raw.to_string(),
    })
}

/// Cell values read as a missing number
pub const MISSING_NUMBER_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parse an optional numeric cell
///
/// Empty cells, missing-value tokens and non-finite numbers are `None`.
/// Anything else that is not a number is an error.
pub fn optional_number(
    value: Option<&str>,
    table: &'static str,
    column: &'static str,
    row: usize,
) -> Result<Option<f64>> {
    let Some(v) = value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !MISSING_NUMBER_TOKENS.contains(v))
    else {
        return Ok(None);
    };
    v.parse::<f64>()
        .map(|number| number.is_finite().then_some(number))
        .map_err(|_| SignalError::Numeric {
            table,
            column,
            row,
            value: v.to_string(),
        })
}
