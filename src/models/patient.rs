//! Scored patients, their demographic names and the normalized risk projection

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::config::UNKNOWN_FIRST_NAME;
use crate::error::{Result, SignalError};
use crate::models::{PatientKeyed, SourceRecord, non_empty, optional_number};
use crate::schema::DateFormatConfig;

/// Risk label produced by the upstream scoring process
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
    /// A label outside the known levels, kept verbatim
    Other(String),
}

impl RiskCategory {
    /// Parse a label such as `High`, `high risk` or `Moderate Risk`
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        let level = normalized.strip_suffix(" risk").unwrap_or(&normalized).trim();
        match level {
            "low" => Self::Low,
            "medium" | "moderate" => Self::Medium,
            "high" => Self::High,
            _ => Self::Other(label.trim().to_string()),
        }
    }

    /// Display label
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RiskCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Scored patient row after `_ML` column normalization
#[derive(Debug, Clone, Deserialize)]
pub struct RawScoredPatient {
    #[serde(rename = "PATIENT")]
    patient: Option<String>,
    #[serde(rename = "AGE")]
    age: Option<String>,
    #[serde(rename = "Risk_Score")]
    risk_score: Option<String>,
    #[serde(rename = "Final_Risk_Category")]
    risk_category: Option<String>,
}

/// A patient as delivered by the scoring dataset, before the name merge
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPatient {
    pub patient: String,
    pub age: Option<u32>,
    pub risk_score: Option<f64>,
    pub risk_category: Option<RiskCategory>,
}

impl SourceRecord for ScoredPatient {
    const TABLE: &'static str = "scored_patients";
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["PATIENT", "AGE", "Risk_Score", "Final_Risk_Category"];
    type Raw = RawScoredPatient;

    fn from_raw(raw: RawScoredPatient, row: usize, _dates: &DateFormatConfig) -> Result<Self> {
        let age = match optional_number(raw.age.as_deref(), Self::TABLE, "AGE", row)? {
            Some(age) if age.is_finite() && age >= 0.0 => Some(age.round() as u32),
            Some(age) => {
                return Err(SignalError::Numeric {
                    table: Self::TABLE,
                    column: "AGE",
                    row,
                    value: age.to_string(),
                });
            }
            None => None,
        };
        let risk_score =
            optional_number(raw.risk_score.as_deref(), Self::TABLE, "Risk_Score", row)?;
        let risk_category =
            non_empty(raw.risk_category).map(|label| RiskCategory::from_label(&label));

        Ok(Self {
            patient: non_empty(raw.patient).unwrap_or_default(),
            age,
            risk_score,
            risk_category,
        })
    }
}

/// Demographic row as read from the source
#[derive(Debug, Clone, Deserialize)]
pub struct RawDemographic {
    #[serde(rename = "Id")]
    id: Option<String>,
    #[serde(rename = "FIRST")]
    first: Option<String>,
}

/// Identifier and first name from the demographic dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemographicRecord {
    pub id: String,
    pub first_name: Option<String>,
}

impl SourceRecord for DemographicRecord {
    const TABLE: &'static str = "demographics";
    const REQUIRED_COLUMNS: &'static [&'static str] = &["Id", "FIRST"];
    type Raw = RawDemographic;

    fn from_raw(raw: RawDemographic, _row: usize, _dates: &DateFormatConfig) -> Result<Self> {
        Ok(Self {
            id: non_empty(raw.id).unwrap_or_default(),
            first_name: non_empty(raw.first),
        })
    }
}

/// A scored patient with a resolved first name
#[derive(Debug, Clone, PartialEq)]
pub struct PatientRecord {
    pub patient: String,
    pub first_name: String,
    pub age: Option<u32>,
    pub risk_score: Option<f64>,
    pub risk_category: Option<RiskCategory>,
}

impl PatientRecord {
    /// Attach a first name, falling back to `Unknown`
    #[must_use]
    pub fn from_scored(scored: ScoredPatient, first_name: Option<&str>) -> Self {
        Self {
            patient: scored.patient,
            first_name: first_name.unwrap_or(UNKNOWN_FIRST_NAME).to_string(),
            age: scored.age,
            risk_score: scored.risk_score,
            risk_category: scored.risk_category,
        }
    }

    /// The normalized projection served to callers
    #[must_use]
    pub fn risk_view(&self) -> PatientRiskView {
        PatientRiskView {
            identifier: self.patient.clone(),
            first_name: self.first_name.clone(),
            age: self.age,
            risk_score: self.risk_score,
            risk_category: self.risk_category.clone(),
        }
    }
}

impl PatientKeyed for PatientRecord {
    fn patient_id(&self) -> &str {
        &self.patient
    }
}

/// Left join scored patients with demographic names on `PATIENT = Id`
///
/// Every scored patient survives. Unmatched patients and matches without a
/// first name get `Unknown`. The first demographic row wins for duplicate ids.
#[must_use]
pub fn merge_demographics(
    scored: Vec<ScoredPatient>,
    demographics: &[DemographicRecord],
) -> Vec<PatientRecord> {
    let mut names: FxHashMap<&str, Option<&str>> = FxHashMap::default();
    for record in demographics {
        names
            .entry(record.id.as_str())
            .or_insert(record.first_name.as_deref());
    }

    scored
        .into_iter()
        .map(|patient| {
            let first_name = names.get(patient.patient.as_str()).copied().flatten();
            PatientRecord::from_scored(patient, first_name)
        })
        .collect()
}

/// Normalized risk projection of a patient
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRiskView {
    pub identifier: String,
    pub first_name: String,
    pub age: Option<u32>,
    pub risk_score: Option<f64>,
    pub risk_category: Option<RiskCategory>,
}
