use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use planner::{ScoreWeights, SelectionTuning};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Base catalog, a JSON array of recipes.
    #[serde(default = "default_catalog_path")]
    pub path: String,
    /// User catalog; appended when present, target of stored recipes.
    #[serde(default = "default_user_catalog_path")]
    pub user_path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            user_path: default_user_catalog_path(),
        }
    }
}

fn default_catalog_path() -> String {
    "data/recipes.json".to_string()
}

fn default_user_catalog_path() -> String {
    "data/recipes_user.json".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    /// Daily calorie target used when the command line does not set one.
    #[serde(default = "default_daily_kcal")]
    pub daily_kcal: u32,
    /// Default breakfast/lunch/dinner split pattern.
    #[serde(default = "default_split_pattern")]
    pub split_pattern: String,
    #[serde(default)]
    pub tuning: SelectionTuning,
    #[serde(default)]
    pub weights: ScoreWeights,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            daily_kcal: default_daily_kcal(),
            split_pattern: default_split_pattern(),
            tuning: SelectionTuning::default(),
            weights: ScoreWeights::default(),
        }
    }
}

fn default_daily_kcal() -> u32 {
    2000
}

fn default_split_pattern() -> String {
    planner::DEFAULT_SPLIT_PATTERN.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JAVORE__PLANNER__DAILY_KCAL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        // Load config file if path provided or CONFIG_PATH env var set
        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Try to load config file (optional - ignore if not found)
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        // Override with environment variables (JAVORE__CATALOG__PATH, etc.)
        builder = builder.add_source(
            Environment::with_prefix("JAVORE")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.planner.daily_kcal == 0 {
            return Err("Daily calorie target must be greater than zero".to_string());
        }
        if self.planner.tuning.shortlist_size == 0 {
            return Err("Selection shortlist size must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.planner.tuning.novelty_probability) {
            return Err("Novelty probability must lie within 0.0..=1.0".to_string());
        }
        if self.catalog.path.trim().is_empty() {
            return Err("Catalog path must not be empty".to_string());
        }
        Ok(())
    }
}
