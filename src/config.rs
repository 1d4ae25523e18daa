use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::cohort::tables::{EngineTboTable, ModelWeightTable, ResaleWeights};
use crate::cohort::CohortSettings;
use crate::scoring::constraints::DEFAULT_YEARLY_TRIPS;

/// Environment variable that points at an alternative config file.
pub const CONFIG_PATH_ENV: &str = "AIRCRAFT_RANKER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub cohort: CohortConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Trips per year used to turn an hourly cost into an annual one.
    pub yearly_trips: u32,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            yearly_trips: DEFAULT_YEARLY_TRIPS,
        }
    }
}

/// Additions to the built-in cohort tables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CohortConfig {
    /// Engine model → hours between overhauls.
    pub engine_tbo_hours: BTreeMap<String, Decimal>,
    /// "manufacturer model" or model → resale weights.
    pub model_weights: BTreeMap<String, ResaleWeights>,
}

impl CohortConfig {
    pub fn settings(&self) -> CohortSettings {
        CohortSettings {
            engine_tbo: EngineTboTable::with_overrides(&self.engine_tbo_hours),
            model_weights: ModelWeightTable::with_overrides(&self.model_weights),
        }
    }
}

impl AppConfig {
    /// Load configuration from config/default.toml, or from the file named by
    /// `AIRCRAFT_RANKER_CONFIG`. A `.env` file is read first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}
