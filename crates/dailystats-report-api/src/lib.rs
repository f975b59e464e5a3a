pub mod error;
pub mod source;
pub mod types;

pub use error::{
    ReportError,
    ReportResult,
};
pub use source::{
    ReportSource,
    SourceMetadata,
};
pub use types::{
    ColumnHeader,
    DateRange,
    MetricValueGroup,
    ReportRequest,
    ReportResponse,
    ReportRow,
    DATE_DIMENSION,
};
