//! Turns daily analytics reports into contiguous, typed per-day records.
//!
//! A [`RecordSchema`] binds metric identifiers to record fields. The
//! [`DailyStatsAssembler`] queries a [`ReportSource`](dailystats_report_api::ReportSource),
//! maps every returned row with that schema and fills the days the service
//! left out with zeroed records.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use application::{
    assemble_response,
    fill_gaps,
    map_row,
    DailySequence,
    DailyStatsAssembler,
};
pub use domain::{
    presets,
    DailyRecord,
    DailyStatsError,
    DailyStatsResult,
    DerivedFields,
    FieldSpec,
    MetricBinding,
    MetricValue,
    RatioField,
    RecordSchema,
    SchemaBuilder,
    TimeZoneConvention,
    ValueKind,
};
pub use infrastructure::{
    ConfigLoader,
    DailyStatsConfig,
};
