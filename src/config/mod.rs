//! Configuration for loading the clinical record tables and answering queries.

mod groups;

pub use groups::{ConditionGroup, ConditionGroupTable};

use std::fmt;
use std::path::{Path, PathBuf};

/// Patients that contribute this much summed ICU demand need one bed.
pub const BED_DEMAND_DIVISOR: f64 = 10.0;

/// Lookback used by the admission trend when no usable window is given.
pub const DEFAULT_TREND_WINDOW_DAYS: i64 = 365;

/// Trailing range used by the bed demand forecast when no usable range is given.
pub const DEFAULT_FORECAST_RANGE_DAYS: i64 = 30;

/// First name assigned when no demographic record can be matched.
pub const UNKNOWN_FIRST_NAME: &str = "Unknown";

/// Encounter classes (lowercase) that count as ICU-relevant.
pub const ICU_ENCOUNTER_CLASSES: [&str; 2] = ["inpatient", "emergency"];

/// Default number of rows per record batch
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Read the batch size override from the environment
#[must_use]
pub fn get_batch_size() -> Option<usize> {
    std::env::var("ICU_BATCH_SIZE")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0)
}

/// Locations of the source tables and loader tuning
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Scored patient table (risk score and category columns)
    pub scored_patients: PathBuf,
    /// Demographic table providing first names
    pub demographics: PathBuf,
    /// Encounter events
    pub encounters: PathBuf,
    /// Procedure events
    pub procedures: PathBuf,
    /// Medication events with costs
    pub medications: PathBuf,
    /// Condition diagnoses
    pub conditions: PathBuf,
    /// Per-encounter ICU demand scores
    pub demand: PathBuf,
    /// Rows per record batch
    pub batch_size: usize,
    /// Rows inspected when reading a CSV header
    pub infer_schema_rows: usize,
    /// Worker threads used to load tables in parallel
    pub load_threads: usize,
}

impl StoreConfig {
    /// Build a configuration with the default file layout under `data_dir`
    #[must_use]
    pub fn from_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            scored_patients: dir.join("final_icu_scored_with_label.csv"),
            demographics: dir.join("patients.csv"),
            encounters: dir.join("encounters.csv"),
            procedures: dir.join("procedures.csv"),
            medications: dir.join("medications.csv"),
            conditions: dir.join("conditions.csv"),
            demand: dir.join("cleaned").join("patients.csv"),
            batch_size: get_batch_size().unwrap_or(DEFAULT_BATCH_SIZE),
            infer_schema_rows: 100,
            load_threads: num_cpus::get().max(1),
        }
    }

    /// Override the batch size
    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Override the number of loader threads
    #[must_use]
    pub const fn with_load_threads(mut self, threads: usize) -> Self {
        self.load_threads = threads;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::from_data_dir(".")
    }
}

impl fmt::Display for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Store Configuration:")?;
        writeln!(f, "  Scored Patients: {}", self.scored_patients.display())?;
        writeln!(f, "  Demographics: {}", self.demographics.display())?;
        writeln!(f, "  Encounters: {}", self.encounters.display())?;
        writeln!(f, "  Procedures: {}", self.procedures.display())?;
        writeln!(f, "  Medications: {}", self.medications.display())?;
        writeln!(f, "  Conditions: {}", self.conditions.display())?;
        writeln!(f, "  Demand: {}", self.demand.display())?;
        writeln!(f, "  Batch Size: {}", self.batch_size)?;
        write!(f, "  Load Threads: {}", self.load_threads)
    }
}
