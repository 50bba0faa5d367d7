//! Procedure events, counted per day as ventilator usage

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Dated, PatientKeyed, SourceRecord, non_empty, required_timestamp};
use crate::schema::DateFormatConfig;

/// Procedure row as read from the source
#[derive(Debug, Clone, Deserialize)]
pub struct RawProcedure {
    #[serde(rename = "PATIENT")]
    patient: Option<String>,
    #[serde(rename = "START")]
    start: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcedureRecord {
    pub patient: String,
    pub start: NaiveDateTime,
}

impl ProcedureRecord {
    #[must_use]
    pub fn new(patient: impl Into<String>, start: NaiveDateTime) -> Self {
        Self {
            patient: patient.into(),
            start,
        }
    }
}

impl PatientKeyed for ProcedureRecord {
    fn patient_id(&self) -> &str {
        &self.patient
    }
}

impl Dated for ProcedureRecord {
    fn date(&self) -> NaiveDate {
        self.start.date()
    }
}

impl SourceRecord for ProcedureRecord {
    const TABLE: &'static str = "procedures";
    const REQUIRED_COLUMNS: &'static [&'static str] = &["PATIENT", "START"];
    type Raw = RawProcedure;

    fn from_raw(raw: RawProcedure, row: usize, dates: &DateFormatConfig) -> Result<Self> {
        let start = required_timestamp(raw.start.as_deref(), Self::TABLE, "START", row, dates)?;
        Ok(Self {
            patient: non_empty(raw.patient).unwrap_or_default(),
            start,
        })
    }
}
