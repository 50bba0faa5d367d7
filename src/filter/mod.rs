//! Row filters over the record store
//!
//! Patient-set restriction works on any [`PatientKeyed`](crate::models::PatientKeyed)
//! rows; the condition-group filter resolves a named clinical category into
//! such a set.

pub mod condition_group;
pub mod patient_set;

pub use condition_group::{ConditionGroupFilter, GroupSelection};
pub use patient_set::{PatientSet, count_distinct_patients, restrict_to_patients};
