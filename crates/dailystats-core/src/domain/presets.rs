//! Ready-made record types

use super::schema::{
    RecordSchema,
    SchemaBuilder,
};

/// Session overview: traffic counts plus bounce rate and average duration.
///
/// Don't mix in metrics Google Analytics refuses to combine with these.
pub fn session_stats() -> SchemaBuilder {
    RecordSchema::builder()
        .integer("ga:sessions", "sessions")
        .integer("ga:bounces", "bounces")
        .float("ga:bounceRate", "bounce_rate_percent")
        .float("ga:avgSessionDuration", "avg_session_duration")
        .integer("ga:hits", "hits")
}
