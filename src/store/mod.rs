//! The Record Store: immutable in-memory tables loaded once at startup.
//!
//! Tables are loaded in parallel, either on a rayon pool ([`RecordStore::load`])
//! or as blocking tokio tasks ([`RecordStore::load_async`]). After loading
//! nothing is mutated; queries borrow the store and allocate their results.

pub mod loaders;

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use indicatif::ProgressBar;
use rayon::prelude::*;

use crate::algorithm::DailySeries;
use crate::config::StoreConfig;
use crate::error::{Result, SignalError};
use crate::models::{
    ConditionRecord, EncounterRecord, MedicationRecord, PatientRecord, ProcedureRecord,
};
use crate::reader::TableReader;

pub use loaders::{SourceTable, TableData, load_source};

/// Read-only clinical tables
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    patients: Vec<PatientRecord>,
    encounters: Vec<EncounterRecord>,
    icu_encounters: Vec<EncounterRecord>,
    procedures: Vec<ProcedureRecord>,
    medications: Vec<MedicationRecord>,
    conditions: Vec<ConditionRecord>,
    demand: DailySeries<f64>,
}

impl RecordStore {
    /// Build a store from already typed tables
    #[must_use]
    pub fn from_records(
        patients: Vec<PatientRecord>,
        encounters: Vec<EncounterRecord>,
        procedures: Vec<ProcedureRecord>,
        medications: Vec<MedicationRecord>,
        conditions: Vec<ConditionRecord>,
        demand: DailySeries<f64>,
    ) -> Self {
        let icu_encounters = encounters
            .iter()
            .filter(|e| e.is_icu_relevant())
            .cloned()
            .collect();
        Self {
            patients,
            encounters,
            icu_encounters,
            procedures,
            medications,
            conditions,
            demand,
        }
    }

    /// Load every source table on a rayon pool
    pub fn load(config: &StoreConfig) -> Result<Self> {
        Self::load_with_progress(config, None)
    }

    /// Load every source table on a rayon pool, ticking `progress` per table
    pub fn load_with_progress(
        config: &StoreConfig,
        progress: Option<&ProgressBar>,
    ) -> Result<Self> {
        let start = Instant::now();
        let reader = TableReader::from_config(config);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.load_threads.max(1))
            .build()?;

        let loaded = pool.install(|| {
            SourceTable::ALL
                .par_iter()
                .map(|&source| {
                    let data = load_source(source, &reader, config);
                    if let Some(pb) = progress {
                        pb.inc(1);
                    }
                    data
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let store = Self::assemble(loaded);
        log::info!("Loaded record store in {:?}: {}", start.elapsed(), store.summary());
        Ok(store)
    }

    /// Load every source table as blocking tasks on the tokio runtime
    pub async fn load_async(config: StoreConfig, progress: Option<ProgressBar>) -> Result<Self> {
        let start = Instant::now();
        let config = Arc::new(config);

        let tasks = SourceTable::ALL.into_iter().map(|source| {
            let config = Arc::clone(&config);
            let progress = progress.clone();
            tokio::task::spawn_blocking(move || {
                let reader = TableReader::from_config(&config);
                let data = load_source(source, &reader, &config);
                if let Some(pb) = &progress {
                    pb.inc(1);
                }
                data
            })
        });

        let loaded = futures::future::try_join_all(tasks)
            .await
            .map_err(|e| SignalError::TaskJoin(e.to_string()))?
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        let store = Self::assemble(loaded);
        log::info!("Loaded record store in {:?}: {}", start.elapsed(), store.summary());
        Ok(store)
    }

    fn assemble(loaded: Vec<TableData>) -> Self {
        let mut patients = Vec::new();
        let mut encounters = Vec::new();
        let mut procedures = Vec::new();
        let mut medications = Vec::new();
        let mut conditions = Vec::new();
        let mut demand = DailySeries::default();

        for data in loaded {
            match data {
                TableData::Patients(rows) => patients = rows,
                TableData::Encounters(rows) => encounters = rows,
                TableData::Procedures(rows) => procedures = rows,
                TableData::Medications(rows) => medications = rows,
                TableData::Conditions(rows) => conditions = rows,
                TableData::Demand(series) => demand = series,
            }
        }

        Self::from_records(
            patients,
            encounters,
            procedures,
            medications,
            conditions,
            demand,
        )
    }

    /// Scored patients with resolved names
    #[must_use]
    pub fn patients(&self) -> &[PatientRecord] {
        &self.patients
    }

    /// Every encounter, whatever its class
    #[must_use]
    pub fn encounters(&self) -> &[EncounterRecord] {
        &self.encounters
    }

    /// Encounters whose class is `inpatient` or `emergency`
    #[must_use]
    pub fn icu_encounters(&self) -> &[EncounterRecord] {
        &self.icu_encounters
    }

    #[must_use]
    pub fn procedures(&self) -> &[ProcedureRecord] {
        &self.procedures
    }

    #[must_use]
    pub fn medications(&self) -> &[MedicationRecord] {
        &self.medications
    }

    #[must_use]
    pub fn conditions(&self) -> &[ConditionRecord] {
        &self.conditions
    }

    /// Summed ICU demand per date
    #[must_use]
    pub const fn demand(&self) -> &DailySeries<f64> {
        &self.demand
    }

    /// Row counts per table
    #[must_use]
    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            patients: self.patients.len(),
            encounters: self.encounters.len(),
            icu_encounters: self.icu_encounters.len(),
            procedures: self.procedures.len(),
            medications: self.medications.len(),
            conditions: self.conditions.len(),
            demand_days: self.demand.len(),
        }
    }
}

/// Row counts of a loaded store
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StoreSummary {
    pub patients: usize,
    pub encounters: usize,
    pub icu_encounters: usize,
    pub procedures: usize,
    pub medications: usize,
    pub conditions: usize,
    pub demand_days: usize,
}

impl fmt::Display for StoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} patients, {} encounters ({} ICU), {} procedures, {} medications, \
             {} conditions, {} demand days",
            self.patients,
            self.encounters,
            self.icu_encounters,
            self.procedures,
            self.medications,
            self.conditions,
            self.demand_days
        )
    }
}
