use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use icu_signals::utils::{create_load_progress_bar, finish_progress_bar};
use icu_signals::{ForecastParams, SignalService, StoreConfig, TrendParams};

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

#[derive(Parser, Debug)]
#[command(
    name = "icu-signals",
    about = "Daily ICU resource signals and patient risk lookups from clinical record tables."
)]
struct Args {
    /// Directory holding the source tables
    #[arg(short, long, global = true, default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// ICU beds, ventilators and medication spend per date
    Resources,
    /// Daily admissions over a trailing window
    Trend {
        /// Window in days; invalid or non-positive values mean 365
        #[arg(long)]
        days: Option<String>,
        /// Condition group, or `All`
        #[arg(long)]
        group: Option<String>,
        /// Include weekday names
        #[arg(long)]
        weekday: bool,
    },
    /// Bed demand over the latest dates of the demand series
    Beds {
        /// Range in days; invalid or non-positive values mean 30
        #[arg(long)]
        range: Option<String>,
    },
    /// Search patients by identifier or first name
    Search {
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Risk projection of every patient
    Roster,
    /// Configured condition groups
    Groups,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("failed to write JSON output")?;
    writeln!(out)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = StoreConfig::from_data_dir(&args.data_dir);
    info!("Loading record store: {config}");

    let tables = u64::try_from(icu_signals::store::SourceTable::ALL.len()).unwrap_or_default();
    let progress = create_load_progress_bar(tables, Some("loading tables"));
    let service = SignalService::load_async(config, Some(progress.clone()))
        .await
        .with_context(|| {
            format!(
                "failed to load record store from {}",
                args.data_dir.display()
            )
        })?;
    finish_progress_bar(&progress, Some("tables loaded"));

    match args.command {
        Command::Resources => print_json(&service.daily_resource_forecast()),
        Command::Trend {
            days,
            group,
            weekday,
        } => {
            let params =
                TrendParams::parse(days.as_deref(), group.as_deref()).with_weekday(weekday);
            print_json(&service.admission_trend(&params))
        }
        Command::Beds { range } => {
            let params = ForecastParams::parse(range.as_deref());
            print_json(&service.bed_demand_forecast(&params))
        }
        Command::Search { query } => print_json(&service.search_patients(&query)),
        Command::Roster => print_json(&service.risk_roster()),
        Command::Groups => print_json(&service.condition_group_names()),
    }
}
