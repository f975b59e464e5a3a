pub mod calendar;
pub mod derived;
pub mod error;
pub mod presets;
pub mod record;
pub mod schema;

pub use calendar::TimeZoneConvention;
pub use derived::{
    DerivedFields,
    NoDerivedFields,
    RatioField,
};
pub use error::{
    DailyStatsError,
    DailyStatsResult,
};
pub use record::{
    DailyRecord,
    MetricValue,
};
pub use schema::{
    FieldSpec,
    MetricBinding,
    RecordSchema,
    SchemaBuilder,
    ValueKind,
};
