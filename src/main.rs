use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;

use aircraft_ranker::catalog::loader::load_catalog;
use aircraft_ranker::catalog::models::{AircraftRecord, Metric};
use aircraft_ranker::cohort::{score_catalog, BuyerPreferenceProfile};
use aircraft_ranker::config::AppConfig;
use aircraft_ranker::deals;
use aircraft_ranker::monitoring::logger;
use aircraft_ranker::scoring::constraints::Constraints;
use aircraft_ranker::scoring::priority::PriorityWeights;
use aircraft_ranker::scoring::rank;

#[derive(Debug, Parser)]
#[command(name = "aircraft-ranker", version, about = "Rank aircraft listings for a buyer")]
struct Cli {
    /// JSON array of aircraft records.
    #[arg(long, global = true, default_value = "data/sample_catalog.json")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Filter by hard constraints and rank by value and weighted priorities.
    Rank(RankArgs),
    /// Score listings against others of the same manufacturer and model.
    Cohort(CohortArgs),
    /// Price-versus-segment and upgrade annotations for the whole catalog.
    Deals,
}

#[derive(Debug, Args)]
struct RankArgs {
    #[arg(long)]
    budget: Option<Decimal>,
    #[arg(long)]
    min_range: Option<Decimal>,
    #[arg(long)]
    min_passengers: Option<u32>,
    #[arg(long)]
    min_speed: Option<Decimal>,
    #[arg(long)]
    max_runway: Option<Decimal>,
    #[arg(long)]
    max_hourly_cost: Option<Decimal>,
    #[arg(long)]
    lowest_year: Option<i32>,
    #[arg(long)]
    min_altitude: Option<Decimal>,
    #[arg(long)]
    min_cabin_volume: Option<Decimal>,
    #[arg(long)]
    max_annual_cost: Option<Decimal>,
    /// Defaults to `ranking.yearly_trips` from the config file.
    #[arg(long)]
    yearly_trips: Option<u32>,

    /// Priority weight as `metric=weight`, e.g. `range=3`. Repeatable.
    #[arg(long = "weight", value_parser = parse_weight)]
    weights: Vec<(Metric, Decimal)>,
}

impl RankArgs {
    fn constraints(&self, default_trips: u32) -> Constraints {
        Constraints {
            budget: self.budget,
            min_range: self.min_range,
            min_passengers: self.min_passengers,
            min_speed: self.min_speed,
            max_runway: self.max_runway,
            max_hourly_cost: self.max_hourly_cost,
            lowest_year: self.lowest_year,
            min_altitude: self.min_altitude,
            min_cabin_volume: self.min_cabin_volume,
            max_annual_cost: self.max_annual_cost,
            yearly_trips: Some(self.yearly_trips.unwrap_or(default_trips)),
        }
    }
}

#[derive(Debug, Args)]
struct CohortArgs {
    /// JSON buyer preference profile.
    #[arg(long)]
    preferences: Option<PathBuf>,
    /// Reference date for inspection recency; defaults to today (UTC).
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

fn parse_weight(raw: &str) -> Result<(Metric, Decimal), String> {
    let (name, weight) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected metric=weight, got {raw:?}"))?;
    let metric: Metric = name.trim().parse()?;
    let weight: Decimal = weight
        .trim()
        .parse()
        .map_err(|e| format!("invalid weight {weight:?}: {e}"))?;
    Ok((metric, weight))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;

    logger::init_logging(&config.logging)?;

    tracing::info!(
        catalog = %cli.catalog.display(),
        "Aircraft ranker starting"
    );

    let catalog = load_catalog(&cli.catalog)
        .with_context(|| format!("Failed to load catalog {}", cli.catalog.display()))?;

    match cli.command {
        Command::Rank(args) => {
            let constraints = args.constraints(config.ranking.yearly_trips);
            let weights: PriorityWeights = args.weights.iter().copied().collect();
            print_json(&rank(&catalog, &constraints, &weights))
        }
        Command::Cohort(args) => {
            let profile = args.preferences.as_deref().map(load_preferences).transpose()?;
            let as_of = args.as_of.unwrap_or_else(|| Utc::now().date_naive());
            let settings = config.cohort.settings();
            print_json(&score_catalog(&catalog, profile.as_ref(), &settings, as_of))
        }
        Command::Deals => {
            let records: Vec<&AircraftRecord> = catalog.iter().collect();
            print_json(&deals::annotate(&records, &records))
        }
    }
}

fn load_preferences(path: &Path) -> Result<BuyerPreferenceProfile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read preferences: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse preferences: {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
