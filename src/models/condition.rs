//! Condition diagnoses, used only to resolve condition-group membership

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{PatientKeyed, SourceRecord, non_empty, required_timestamp};
use crate::schema::DateFormatConfig;

/// Condition row as read from the source
#[derive(Debug, Clone, Deserialize)]
pub struct RawCondition {
    #[serde(rename = "PATIENT")]
    patient: Option<String>,
    #[serde(rename = "DESCRIPTION")]
    description: Option<String>,
    #[serde(rename = "START")]
    start: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionRecord {
    pub patient: String,
    pub description: String,
    pub start: NaiveDateTime,
}

impl ConditionRecord {
    #[must_use]
    pub fn new(
        patient: impl Into<String>,
        description: impl Into<String>,
        start: NaiveDateTime,
    ) -> Self {
        Self {
            patient: patient.into(),
            description: description.into(),
            start,
        }
    }
}

impl PatientKeyed for ConditionRecord {
    fn patient_id(&self) -> &str {
        &self.patient
    }
}

impl SourceRecord for ConditionRecord {
    const TABLE: &'static str = "conditions";
    const REQUIRED_COLUMNS: &'static [&'static str] = &["PATIENT", "DESCRIPTION", "START"];
    type Raw = RawCondition;

    fn from_raw(raw: RawCondition, row: usize, dates: &DateFormatConfig) -> Result<Self> {
        let start = required_timestamp(raw.start.as_deref(), Self::TABLE, "START", row, dates)?;
        Ok(Self {
            patient: non_empty(raw.patient).unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            start,
        })
    }
}
