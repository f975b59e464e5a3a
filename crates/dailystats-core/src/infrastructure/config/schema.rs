use std::collections::HashMap;
use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};

use super::validation::{
    self,
    ValidationReport,
};
use crate::domain::presets;
use crate::domain::{
    DailyStatsResult,
    FieldSpec,
    RatioField,
    RecordSchema,
    SchemaBuilder,
    TimeZoneConvention,
};

pub(super) const DEFAULT_LOOKBACK_DAYS: u32 = 55;

pub(super) const DEFAULT_SOURCE_TYPE: &str = "google-analytics";

pub(super) const CONFIG_FILE_NAME: &str = "dailystats.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DailyStatsConfig {
    pub source: SourceConfig,

    #[serde(default)]
    pub query: QueryConfig,

    /// Record fields; the session stats preset when empty
    #[serde(default)]
    pub metrics: Vec<FieldSpec>,

    #[serde(default)]
    pub derived: Vec<RatioField>,
}

impl DailyStatsConfig {
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("dailystats").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    pub fn uses_preset(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Binds the configured fields, failing before any report is requested
    pub fn record_schema(&self) -> DailyStatsResult<RecordSchema> {
        let builder = if self.uses_preset() {
            presets::session_stats()
        } else {
            SchemaBuilder::from_specs(&self.metrics)?
        };

        let builder = if self.derived.is_empty() {
            builder
        } else {
            builder.derived(self.derived.clone())
        };

        builder.build()
    }

    pub fn validate(&self) -> ValidationReport {
        validation::validate(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(rename = "type", default = "default_source_type")]
    pub source_type: String,

    /// Data source identifier passed with every query (GA view id)
    #[serde(default)]
    pub view_id: String,

    /// Remaining keys, handed to the source on initialization
    #[serde(flatten)]
    pub options: HashMap<String, String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            source_type: default_source_type(),
            view_id: String::new(),
            options: HashMap::new(),
        }
    }
}

fn default_source_type() -> String {
    DEFAULT_SOURCE_TYPE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    #[serde(default)]
    pub timezone: TimeZoneConvention,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            timezone: TimeZoneConvention::default(),
        }
    }
}

fn default_lookback_days() -> u32 {
    DEFAULT_LOOKBACK_DAYS
}
