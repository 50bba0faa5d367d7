//! Patient search over identifier and first name

use crate::models::{PatientRecord, PatientRiskView};
use crate::store::RecordStore;

/// Case-insensitive substring search over the patient table
#[derive(Debug, Clone, Copy)]
pub struct PatientLookup<'a> {
    patients: &'a [PatientRecord],
}

impl<'a> PatientLookup<'a> {
    #[must_use]
    pub fn new(store: &'a RecordStore) -> Self {
        Self {
            patients: store.patients(),
        }
    }

    /// Patients whose identifier or first name contains `query`, in load order
    ///
    /// The query is matched literally, ignoring case. An empty query matches
    /// every patient.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<PatientRiskView> {
        let needle = query.to_lowercase();
        self.patients
            .iter()
            .filter(|patient| {
                needle.is_empty()
                    || patient.patient.to_lowercase().contains(&needle)
                    || patient.first_name.to_lowercase().contains(&needle)
            })
            .map(PatientRecord::risk_view)
            .collect()
    }

    /// Every patient in load order
    #[must_use]
    pub fn all(&self) -> Vec<PatientRiskView> {
        self.patients.iter().map(PatientRecord::risk_view).collect()
    }
}
