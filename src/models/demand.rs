//! Per-encounter ICU demand scores produced by an upstream model

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Result, SignalError};
use crate::models::{Dated, SourceRecord, optional_number};
use crate::schema::{DateFormatConfig, parse_calendar_date};

/// Demand row as read from the source
#[derive(Debug, Clone, Deserialize)]
pub struct RawDemand {
    #[serde(rename = "ENCOUNTER_DATE")]
    encounter_date: Option<String>,
    #[serde(rename = "ICU_Demand_ML")]
    demand: Option<String>,
}

/// One scored encounter contributing to daily ICU demand
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandRecord {
    pub date: NaiveDate,
    pub demand: f64,
}

impl DemandRecord {
    #[must_use]
    pub const fn new(date: NaiveDate, demand: f64) -> Self {
        Self { date, demand }
    }
}

impl Dated for DemandRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl SourceRecord for DemandRecord {
    const TABLE: &'static str = "demand";
    const REQUIRED_COLUMNS: &'static [&'static str] = &["ENCOUNTER_DATE", "ICU_Demand_ML"];
    type Raw = RawDemand;

    fn from_raw(raw: RawDemand, row: usize, dates: &DateFormatConfig) -> Result<Self> {
        let value = raw.encounter_date.unwrap_or_default();
        let date = parse_calendar_date(&value, dates).ok_or_else(|| SignalError::Timestamp {
            table: Self::TABLE,
            column: "ENCOUNTER_DATE",
            row,
            value: value.clone(),
        })?;
        // An empty score keeps the date but adds nothing to it
        let demand = optional_number(raw.demand.as_deref(), Self::TABLE, "ICU_Demand_ML", row)?
            .unwrap_or(0.0);
        Ok(Self { date, demand })
    }
}
