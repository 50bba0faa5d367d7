//! Encounter events

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::ICU_ENCOUNTER_CLASSES;
use crate::error::Result;
use crate::models::{Dated, PatientKeyed, SourceRecord, non_empty, required_timestamp};
use crate::schema::DateFormatConfig;

/// Encounter row as read from the source
#[derive(Debug, Clone, Deserialize)]
pub struct RawEncounter {
    #[serde(rename = "PATIENT")]
    patient: Option<String>,
    #[serde(rename = "ENCOUNTERCLASS")]
    encounter_class: Option<String>,
    #[serde(rename = "START")]
    start: Option<String>,
}

/// A patient encounter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncounterRecord {
    pub patient: String,
    /// Free-text class such as `inpatient` or `ambulatory`
    pub encounter_class: String,
    pub start: NaiveDateTime,
}

impl EncounterRecord {
    #[must_use]
    pub fn new(
        patient: impl Into<String>,
        encounter_class: impl Into<String>,
        start: NaiveDateTime,
    ) -> Self {
        Self {
            patient: patient.into(),
            encounter_class: encounter_class.into(),
            start,
        }
    }

    /// Whether the class is `inpatient` or `emergency`, ignoring case
    #[must_use]
    pub fn is_icu_relevant(&self) -> bool {
        is_icu_class(&self.encounter_class)
    }
}

/// Whether an encounter class counts as ICU-relevant
#[must_use]
pub fn is_icu_class(encounter_class: &str) -> bool {
    let class = encounter_class.to_lowercase();
    ICU_ENCOUNTER_CLASSES.contains(&class.as_str())
}

impl PatientKeyed for EncounterRecord {
    fn patient_id(&self) -> &str {
        &self.patient
    }
}

impl Dated for EncounterRecord {
    fn date(&self) -> NaiveDate {
        self.start.date()
    }
}

impl SourceRecord for EncounterRecord {
    const TABLE: &'static str = "encounters";
    const REQUIRED_COLUMNS: &'static [&'static str] = &["PATIENT", "ENCOUNTERCLASS", "START"];
    type Raw = RawEncounter;

    fn from_raw(raw: RawEncounter, row: usize, dates: &DateFormatConfig) -> Result<Self> {
        let start = required_timestamp(raw.start.as_deref(), Self::TABLE, "START", row, dates)?;
        Ok(Self {
            patient: non_empty(raw.patient).unwrap_or_default(),
            encounter_class: raw.encounter_class.unwrap_or_default(),
            start,
        })
    }
}
