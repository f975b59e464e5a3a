pub mod config;

pub use config::{
    ConfigIssue,
    ConfigLoadError,
    ConfigLoader,
    DailyStatsConfig,
    QueryConfig,
    SourceConfig,
    ValidationReport,
};
