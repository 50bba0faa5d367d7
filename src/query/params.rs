//! Validated query parameters
//!
//! Raw caller input is coerced here, once. Missing, empty, non-numeric and
//! non-positive windows all fall back to the documented defaults; parsing
//! never fails.

use serde::Serialize;

use crate::config::{DEFAULT_FORECAST_RANGE_DAYS, DEFAULT_TREND_WINDOW_DAYS};
use crate::filter::GroupSelection;

/// Parse a positive day count, falling back to `default`
fn positive_days(value: Option<&str>, default: i64) -> i64 {
    value
        .map(str::trim)
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|days| *days > 0)
        .unwrap_or(default)
}

/// Parameters of an admission trend query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendParams {
    window_days: i64,
    group: GroupSelection,
    annotate_weekday: bool,
}

impl TrendParams {
    /// Build from typed values; a non-positive window means the default
    #[must_use]
    pub fn new(window_days: i64, group: GroupSelection) -> Self {
        let window_days = if window_days > 0 {
            window_days
        } else {
            DEFAULT_TREND_WINDOW_DAYS
        };
        Self {
            window_days,
            group,
            annotate_weekday: false,
        }
    }

    /// Build from raw caller text
    #[must_use]
    pub fn parse(days: Option<&str>, group: Option<&str>) -> Self {
        Self::new(
            positive_days(days, DEFAULT_TREND_WINDOW_DAYS),
            GroupSelection::parse(group),
        )
    }

    /// Add the weekday name to each returned row
    #[must_use]
    pub const fn with_weekday(mut self, annotate: bool) -> Self {
        self.annotate_weekday = annotate;
        self
    }

    #[must_use]
    pub const fn window_days(&self) -> i64 {
        self.window_days
    }

    #[must_use]
    pub const fn group(&self) -> &GroupSelection {
        &self.group
    }

    #[must_use]
    pub const fn annotate_weekday(&self) -> bool {
        self.annotate_weekday
    }
}

impl Default for TrendParams {
    fn default() -> Self {
        Self::new(DEFAULT_TREND_WINDOW_DAYS, GroupSelection::All)
    }
}

/// Parameters of a bed demand forecast query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForecastParams {
    range_days: i64,
}

impl ForecastParams {
    #[must_use]
    pub const fn new(range_days: i64) -> Self {
        let range_days = if range_days > 0 {
            range_days
        } else {
            DEFAULT_FORECAST_RANGE_DAYS
        };
        Self { range_days }
    }

    /// Build from raw caller text
    #[must_use]
    pub fn parse(range: Option<&str>) -> Self {
        Self::new(positive_days(range, DEFAULT_FORECAST_RANGE_DAYS))
    }

    /// Number of dates in the trailing slice, anchor included
    ///
    /// The anchor counts toward the range, so a range of N covers N dates and
    /// not the N + 1 dates a plain `anchor - N` cutoff would give.
    #[must_use]
    pub const fn range_days(&self) -> i64 {
        self.range_days
    }
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self::new(DEFAULT_FORECAST_RANGE_DAYS)
    }
}
