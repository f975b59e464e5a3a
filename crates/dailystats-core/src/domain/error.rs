use dailystats_report_api::ReportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DailyStatsError {
    #[error("Duplicate metric definition: {0}")]
    DuplicateMetric(String),

    #[error("Unsupported value kind '{kind}' for field '{field}'")]
    UnsupportedValueKind { field: String, kind: String },

    #[error("Invalid record schema: {0}")]
    InvalidSchema(String),

    #[error("Invalid lookback window: {0}")]
    InvalidLookback(String),

    #[error("Unknown metric in result: {0}")]
    UnknownMetric(String),

    #[error("Date dimension was not found in row")]
    MissingDateDimension,

    #[error("Invalid date '{value}': {source}")]
    DateParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid value '{value}' for metric {metric}: {reason}")]
    ValueParse {
        metric: String,
        value: String,
        reason: String,
    },

    #[error("Report source error: {0}")]
    Source(#[from] ReportError),
}

pub type DailyStatsResult<T> = Result<T, DailyStatsError>;
