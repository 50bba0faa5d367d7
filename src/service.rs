//! Facade over a loaded store exposing the signal operations

use std::sync::OnceLock;

use chrono::{Local, NaiveDate};
use indicatif::ProgressBar;

use crate::algorithm::{DailyAggregateRow, aggregate_daily_resources};
use crate::config::{ConditionGroupTable, StoreConfig};
use crate::error::Result;
use crate::models::PatientRiskView;
use crate::query::{
    ForecastOutcome, ForecastParams, ForecastRangeFilter, PatientLookup, TrendOutcome, TrendParams,
    TrendQueryEngine,
};
use crate::store::RecordStore;

/// Owns a [`RecordStore`] and the condition groups, and answers queries
///
/// The daily resource series is computed on first use and cached for the
/// lifetime of the service. Everything else is computed per call.
#[derive(Debug)]
pub struct SignalService {
    store: RecordStore,
    groups: ConditionGroupTable,
    resources: OnceLock<Vec<DailyAggregateRow>>,
}

impl SignalService {
    /// Wrap a store using the default condition groups
    #[must_use]
    pub fn new(store: RecordStore) -> Self {
        Self::with_groups(store, ConditionGroupTable::default())
    }

    #[must_use]
    pub const fn with_groups(store: RecordStore, groups: ConditionGroupTable) -> Self {
        Self {
            store,
            groups,
            resources: OnceLock::new(),
        }
    }

    /// Load the store on a rayon pool and wrap it
    pub fn load(config: &StoreConfig) -> Result<Self> {
        RecordStore::load(config).map(Self::new)
    }

    /// Load the store on the tokio blocking pool and wrap it
    pub async fn load_async(config: StoreConfig, progress: Option<ProgressBar>) -> Result<Self> {
        RecordStore::load_async(config, progress).await.map(Self::new)
    }

    /// ICU beds, ventilators and medication spend per date
    pub fn daily_resource_forecast(&self) -> &[DailyAggregateRow] {
        self.resources
            .get_or_init(|| aggregate_daily_resources(&self.store))
    }

    /// Admission trend relative to the local calendar date
    #[must_use]
    pub fn admission_trend(&self, params: &TrendParams) -> TrendOutcome {
        self.admission_trend_on(params, Local::now().date_naive())
    }

    /// Admission trend relative to a given date
    #[must_use]
    pub fn admission_trend_on(&self, params: &TrendParams, today: NaiveDate) -> TrendOutcome {
        TrendQueryEngine::new(&self.store, &self.groups).query(params, today)
    }

    #[must_use]
    pub fn bed_demand_forecast(&self, params: &ForecastParams) -> ForecastOutcome {
        ForecastRangeFilter::new(self.store.demand()).query(params)
    }

    #[must_use]
    pub fn search_patients(&self, query: &str) -> Vec<PatientRiskView> {
        PatientLookup::new(&self.store).search(query)
    }

    /// Risk projection of every patient
    #[must_use]
    pub fn risk_roster(&self) -> Vec<PatientRiskView> {
        PatientLookup::new(&self.store).all()
    }

    /// Configured condition group names in order
    #[must_use]
    pub fn condition_group_names(&self) -> Vec<&str> {
        self.groups.names().collect()
    }

    #[must_use]
    pub const fn store(&self) -> &RecordStore {
        &self.store
    }

    #[must_use]
    pub const fn groups(&self) -> &ConditionGroupTable {
        &self.groups
    }
}
