//! Medication events with their total cost

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{
    Dated, PatientKeyed, SourceRecord, non_empty, optional_number, required_timestamp,
};
use crate::schema::DateFormatConfig;

/// Medication row as read from the source
#[derive(Debug, Clone, Deserialize)]
pub struct RawMedication {
    #[serde(rename = "PATIENT")]
    patient: Option<String>,
    #[serde(rename = "START")]
    start: Option<String>,
    #[serde(rename = "TOTALCOST")]
    total_cost: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicationRecord {
    pub patient: String,
    pub start: NaiveDateTime,
    /// Absent costs contribute nothing to daily sums
    pub total_cost: Option<f64>,
}

impl MedicationRecord {
    #[must_use]
    pub fn new(patient: impl Into<String>, start: NaiveDateTime, total_cost: Option<f64>) -> Self {
        Self {
            patient: patient.into(),
            start,
            total_cost,
        }
    }

    /// Cost used for aggregation
    #[must_use]
    pub fn cost_or_zero(&self) -> f64 {
        self.total_cost.unwrap_or(0.0)
    }
}

impl PatientKeyed for MedicationRecord {
    fn patient_id(&self) -> &str {
        &self.patient
    }
}

impl Dated for MedicationRecord {
    fn date(&self) -> NaiveDate {
        self.start.date()
    }
}

impl SourceRecord for MedicationRecord {
    const TABLE: &'static str = "medications";
    const REQUIRED_COLUMNS: &'static [&'static str] = &["PATIENT", "START", "TOTALCOST"];
    type Raw = RawMedication;

    fn from_raw(raw: RawMedication, row: usize, dates: &DateFormatConfig) -> Result<Self> {
        let start = required_timestamp(raw.start.as_deref(), Self::TABLE, "START", row, dates)?;
        let total_cost = optional_number(raw.total_cost.as_deref(), Self::TABLE, "TOTALCOST", row)?;
        Ok(Self {
            patient: non_empty(raw.patient).unwrap_or_default(),
            start,
            total_cost,
        })
    }
}
