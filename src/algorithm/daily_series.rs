//! A series holding one value per calendar date, kept in ascending date order.
//!
//! [`DailySeries::outer_merge`] is the join used for every aggregate: the
//! result covers the union of both date sets and a date missing from one side
//! takes that side's default (zero for counts and sums).

use std::collections::BTreeMap;
use std::ops::AddAssign;

use chrono::NaiveDate;
use itertools::{EitherOrBoth, Itertools};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySeries<V> {
    points: Vec<(NaiveDate, V)>,
}

impl<V> Default for DailySeries<V> {
    fn default() -> Self {
        Self { points: Vec::new() }
    }
}

impl<V> DailySeries<V> {
    /// Accumulate values per date; repeated dates are added together
    pub fn accumulate<I>(values: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, V)>,
        V: AddAssign + Default,
    {
        let mut by_date: BTreeMap<NaiveDate, V> = BTreeMap::new();
        for (date, value) in values {
            *by_date.entry(date).or_default() += value;
        }
        Self {
            points: by_date.into_iter().collect(),
        }
    }

    /// Number of dates in the series
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in ascending date order
    #[must_use]
    pub fn points(&self) -> &[(NaiveDate, V)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(NaiveDate, V)> {
        self.points
    }

    /// The latest date, used as the anchor of trailing windows
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|(date, _)| *date)
    }

    /// Points on or after `start`
    #[must_use]
    pub fn since(&self, start: NaiveDate) -> &[(NaiveDate, V)] {
        let from = self.points.partition_point(|(date, _)| *date < start);
        &self.points[from..]
    }

    /// Join with another series on the union of dates, filling gaps with defaults
    #[must_use]
    pub fn outer_merge<W>(&self, other: &DailySeries<W>) -> DailySeries<(V, W)>
    where
        V: Copy + Default,
        W: Copy + Default,
    {
        let points = self
            .points
            .iter()
            .merge_join_by(other.points.iter(), |left, right| left.0.cmp(&right.0))
            .map(|pair| match pair {
                EitherOrBoth::Both(left, right) => (left.0, (left.1, right.1)),
                EitherOrBoth::Left(left) => (left.0, (left.1, W::default())),
                EitherOrBoth::Right(right) => (right.0, (V::default(), right.1)),
            })
            .collect();
        DailySeries { points }
    }
}

impl DailySeries<u64> {
    /// Count occurrences of each date
    pub fn count_by_date<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        Self::accumulate(dates.into_iter().map(|date| (date, 1)))
    }
}

impl DailySeries<f64> {
    /// Sum values per date
    pub fn sum_by_date<I: IntoIterator<Item = (NaiveDate, f64)>>(values: I) -> Self {
        Self::accumulate(values)
    }
}
