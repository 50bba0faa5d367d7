//! Restricting rows to a set of patient identifiers

use std::collections::HashSet;
use std::hash::BuildHasher;

use rustc_hash::FxHashSet;

use crate::models::PatientKeyed;

/// Distinct patient identifiers borrowed from the store
pub type PatientSet<'a> = FxHashSet<&'a str>;

/// Keep only rows whose patient is in `patients`
///
/// Equivalent to an inner join of the rows against the distinct patient set:
/// row order is preserved and no row is duplicated.
pub fn restrict_to_patients<'r, R, I, S>(rows: I, patients: &HashSet<&str, S>) -> Vec<&'r R>
where
    R: PatientKeyed + 'r,
    I: IntoIterator<Item = &'r R>,
    S: BuildHasher,
{
    rows.into_iter()
        .filter(|row| patients.contains(row.patient_id()))
        .collect()
}

/// Number of distinct patients across `rows`
pub fn count_distinct_patients<'r, R, I>(rows: I) -> usize
where
    R: PatientKeyed + 'r,
    I: IntoIterator<Item = &'r R>,
{
    rows.into_iter()
        .map(PatientKeyed::patient_id)
        .collect::<PatientSet<'_>>()
        .len()
}
