//! Condition-group filter
//!
//! A group name resolves to its configured condition descriptions, the
//! descriptions to the patients diagnosed with any of them (exact match,
//! ignoring case), and that patient set restricts candidate rows. An unknown
//! group resolves to no patients rather than an error.

use std::fmt;

use serde::Serialize;

use crate::config::ConditionGroupTable;
use crate::filter::patient_set::{PatientSet, restrict_to_patients};
use crate::models::{ConditionRecord, PatientKeyed};
use crate::store::RecordStore;

/// Which condition group a query is scoped to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum GroupSelection {
    /// No filtering
    #[default]
    All,
    /// A group name as given by the caller, matched ignoring case
    Named(String),
}

impl GroupSelection {
    /// Interpret a caller supplied group; absent, empty or `all` in any case means no filtering
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None => Self::All,
            Some(v) if v.is_empty() || v.eq_ignore_ascii_case("all") => Self::All,
            Some(v) => Self::Named(v.to_string()),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Named(name) => name,
        }
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for GroupSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<GroupSelection> for String {
    fn from(selection: GroupSelection) -> Self {
        selection.label().to_string()
    }
}

/// Resolves condition groups against the condition table of a store
#[derive(Debug, Clone, Copy)]
pub struct ConditionGroupFilter<'a> {
    conditions: &'a [ConditionRecord],
    groups: &'a ConditionGroupTable,
}

impl<'a> ConditionGroupFilter<'a> {
    #[must_use]
    pub fn new(store: &'a RecordStore, groups: &'a ConditionGroupTable) -> Self {
        Self {
            conditions: store.conditions(),
            groups,
        }
    }

    /// Distinct patients with a condition of the named group
    ///
    /// An unrecognized group has no descriptions and therefore no patients.
    #[must_use]
    pub fn matched_patients(&self, group_name: &str) -> PatientSet<'a> {
        let Some(group) = self.groups.lookup(group_name) else {
            log::debug!("Unknown condition group '{group_name}', matching no patients");
            return PatientSet::default();
        };
        let keywords = group.lowercase_descriptions();

        let patients: PatientSet<'a> = self
            .conditions
            .iter()
            .filter(|condition| {
                let description = condition.description.to_lowercase();
                keywords.iter().any(|keyword| *keyword == description)
            })
            .map(|condition| condition.patient.as_str())
            .collect();

        log::debug!(
            "Condition group '{}' matched {} patients",
            group.name(),
            patients.len()
        );
        patients
    }

    /// Restrict candidate rows to the selected group's patients
    #[must_use]
    pub fn apply<'r, R: PatientKeyed>(
        &self,
        selection: &GroupSelection,
        rows: Vec<&'r R>,
    ) -> Vec<&'r R> {
        match selection {
            GroupSelection::All => rows,
            GroupSelection::Named(name) => {
                let patients = self.matched_patients(name);
                restrict_to_patients(rows, &patients)
            }
        }
    }
}
