use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use icu_signals::{RecordStore, SignalService, StoreConfig};
use tempfile::TempDir;

pub const SCORED: &str = "\
PATIENT,AGE,Risk_Score_ML,Final_Risk_Category_ML
p1,71,0.91,High
p2,45,0.35,Low
p3,,0.5,Medium
";

pub const DEMOGRAPHICS: &str = "\
Id,FIRST,LAST
p1,Maria,Lopez
p2,Jonas,Berg
";

pub const ENCOUNTERS: &str = "\
Id,START,PATIENT,ENCOUNTERCLASS
e1,2024-01-01T08:00:00Z,p1,inpatient
e2,2024-01-01T22:15:00Z,p2,emergency
e3,2024-01-02T09:00:00Z,p3,ambulatory
e4,2024-01-03T10:00:00Z,p3,Inpatient
";

pub const PROCEDURES: &str = "\
START,PATIENT,CODE
2024-01-02T11:00:00Z,p1,1
2024-01-04T11:00:00Z,p2,2
";

pub const MEDICATIONS: &str = "\
START,PATIENT,TOTALCOST
2024-01-01T09:00:00Z,p1,12.5
2024-01-01T10:00:00Z,p2,7.5
2024-01-05T10:00:00Z,p3,
";

pub const CONDITIONS: &str = "\
START,PATIENT,DESCRIPTION
2023-12-01,p1,Acute bronchitis (disorder)
2023-12-01,p3,Stress (finding)
";

pub const DEMAND: &str = "\
ENCOUNTER_DATE,ICU_Demand_ML
2024-01-01,4
2024-01-01,7
2024-01-02,10
not-a-date,5
2024-01-03,0
";

/// A temporary data directory in the default file layout
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    /// An empty data directory
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// A data directory holding every source table
    pub fn standard() -> Self {
        let fixture = Self::empty();
        fixture.write("final_icu_scored_with_label.csv", SCORED);
        fixture.write("patients.csv", DEMOGRAPHICS);
        fixture.write("encounters.csv", ENCOUNTERS);
        fixture.write("procedures.csv", PROCEDURES);
        fixture.write("medications.csv", MEDICATIONS);
        fixture.write("conditions.csv", CONDITIONS);
        fixture.write("cleaned/patients.csv", DEMAND);
        fixture
    }

    /// Write (or replace) a file relative to the data directory
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture directory");
        }
        fs::write(&path, contents).expect("failed to write fixture");
        path
    }

    /// Remove a file relative to the data directory
    pub fn remove(&self, relative: &str) {
        fs::remove_file(self.dir.path().join(relative)).expect("failed to remove fixture");
    }

    pub fn config(&self) -> StoreConfig {
        StoreConfig::from_data_dir(self.dir.path()).with_load_threads(2)
    }

    pub fn load(&self) -> icu_signals::Result<RecordStore> {
        RecordStore::load(&self.config())
    }

    pub fn service(&self) -> SignalService {
        SignalService::load(&self.config()).expect("fixture store should load")
    }
}

/// A date in January 2024
pub fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date")
}
