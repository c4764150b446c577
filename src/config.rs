use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::LogConfig;
use crate::muscles::ExerciseMuscleMap;
use crate::stats::StatsConfig;

/// Longest period-comparison window accepted from a config file (ten years)
pub const MAX_COMPARISON_DAYS: u32 = 3_650;

/// Longest weekly-frequency window accepted from a config file (ten years)
pub const MAX_FREQUENCY_WEEKS: u32 = 520;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// JSON muscle map to use instead of the built-in catalogue
    #[serde(default)]
    pub muscle_map_path: Option<PathBuf>,

    /// Application metadata
    pub metadata: ConfigMetadata,

    /// Statistics windows and limits
    #[serde(default)]
    pub stats: StatsConfig,

    /// Logging settings for the command-line driver
    #[serde(default)]
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();

        AppConfig {
            muscle_map_path: None,
            metadata: ConfigMetadata {
                version: "1.0".to_string(),
                created_at: now,
                updated_at: now,
            },
            stats: StatsConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".liftrs")
            .join("config.toml")
    }

    /// Load configuration with fallback to defaults
    pub fn load_or_default() -> Self {
        let config_path = Self::default_config_path();

        match Self::load_from_file(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!(
                    path = %config_path.display(),
                    error = %err,
                    "Using default configuration"
                );
                Self::default()
            }
        }
    }

    /// Reject windows that are empty or longer than any real training history
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_COMPARISON_DAYS).contains(&self.stats.comparison_days) {
            anyhow::bail!(
                "stats.comparison_days must be between 1 and {}",
                MAX_COMPARISON_DAYS
            );
        }
        if !(1..=MAX_FREQUENCY_WEEKS).contains(&self.stats.frequency_weeks) {
            anyhow::bail!(
                "stats.frequency_weeks must be between 1 and {}",
                MAX_FREQUENCY_WEEKS
            );
        }
        Ok(())
    }

    /// The configured muscle map, or the built-in catalogue
    pub fn muscle_map(&self) -> Result<ExerciseMuscleMap> {
        match &self.muscle_map_path {
            Some(path) => ExerciseMuscleMap::load_from_file(path)
                .with_context(|| format!("Failed to load muscle map: {}", path.display())),
            None => Ok(ExerciseMuscleMap::builtin()),
        }
    }
}
