//! The tagged result shared by every query operation

use serde::Serialize;

/// Either rows with their metadata, or an explicit absence of data
///
/// `NoData` is distinct from `HasData` with zero-valued rows: it means the
/// filtered input was empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryOutcome<T, M> {
    HasData { rows: Vec<T>, meta: M },
    NoData,
}

impl<T, M> QueryOutcome<T, M> {
    /// `NoData` when `rows` is empty
    #[must_use]
    pub fn from_rows(rows: Vec<T>, meta: M) -> Self {
        if rows.is_empty() {
            Self::NoData
        } else {
            Self::HasData { rows, meta }
        }
    }

    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }

    /// Rows, empty for `NoData`
    #[must_use]
    pub fn rows(&self) -> &[T] {
        match self {
            Self::HasData { rows, .. } => rows,
            Self::NoData => &[],
        }
    }

    #[must_use]
    pub const fn meta(&self) -> Option<&M> {
        match self {
            Self::HasData { meta, .. } => Some(meta),
            Self::NoData => None,
        }
    }
}
