use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use super::interpolation::{
    interpolate_toml,
    InterpolationError,
};
use super::schema::{
    DailyStatsConfig,
    CONFIG_FILE_NAME,
};

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Environment variable interpolation failed: {0}")]
    InterpolationError(#[from] InterpolationError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type ConfigLoadResult<T> = Result<T, ConfigLoadError>;

pub struct ConfigLoader;

impl ConfigLoader {
    /// `DAILYSTATS_CONFIG_PATH`, then the user config dir, then the working directory
    pub fn discover_config_path() -> PathBuf {
        if let Ok(path) = std::env::var("DAILYSTATS_CONFIG_PATH") {
            tracing::debug!("Using config path from DAILYSTATS_CONFIG_PATH: {}", path);
            return PathBuf::from(path);
        }

        let user_path = DailyStatsConfig::default_config_path();
        if user_path.exists() {
            tracing::debug!("Using user config path: {}", user_path.display());
            return user_path;
        }

        let fallback = PathBuf::from(CONFIG_FILE_NAME);
        tracing::debug!("Using fallback config path: {}", fallback.display());
        fallback
    }

    pub fn load_default() -> ConfigLoadResult<DailyStatsConfig> {
        let path = Self::discover_config_path();
        Self::load(&path)
    }

    pub fn load(path: &Path) -> ConfigLoadResult<DailyStatsConfig> {
        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> ConfigLoadResult<DailyStatsConfig> {
        let mut value: toml::Value = toml::from_str(content)?;

        interpolate_toml(&mut value)?;

        let config: DailyStatsConfig = value.try_into().map_err(|e| {
            ConfigLoadError::InvalidConfig(format!("Failed to deserialize config: {}", e))
        })?;

        tracing::debug!(
            source = %config.source.source_type,
            lookback_days = config.query.lookback_days,
            metrics = config.metrics.len(),
            "Loaded config"
        );

        Ok(config)
    }
}
