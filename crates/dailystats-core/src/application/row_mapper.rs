//! Maps report rows onto typed daily records

use chrono::NaiveDate;
use dailystats_report_api::{
    ColumnHeader,
    ReportRow,
    DATE_DIMENSION,
};

use crate::domain::{
    DailyRecord,
    DailyStatsError,
    DailyStatsResult,
    MetricValue,
    RecordSchema,
};

/// Compact date format of the date dimension (`YYYYMMDD`)
pub const DIMENSION_DATE_FORMAT: &str = "%Y%m%d";

pub fn parse_day(value: &str) -> DailyStatsResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DIMENSION_DATE_FORMAT).map_err(|source| {
        DailyStatsError::DateParse {
            value: value.to_string(),
            source,
        }
    })
}

/// Maps one report row to a record with id 0; ids are assigned by the caller.
///
/// Metric values are matched to `header.metric_names` by position. Extra
/// values or extra header names beyond the shorter of the two lists are
/// ignored. A header name missing from `schema` aborts the mapping.
pub fn map_row(
    schema: &RecordSchema, header: &ColumnHeader, row: &ReportRow,
) -> DailyStatsResult<DailyRecord> {
    let day = row
        .dimension(header, DATE_DIMENSION)
        .ok_or(DailyStatsError::MissingDateDimension)
        .and_then(parse_day)?;

    let mut record = DailyRecord::zeroed(schema, 0, day);

    for group in &row.metric_value_groups {
        assign_values(schema, &header.metric_names, &group.values, &mut record)?;
        schema.derived().populate(&mut record);
    }

    Ok(record)
}

fn assign_values(
    schema: &RecordSchema, metric_names: &[String], values: &[String], record: &mut DailyRecord,
) -> DailyStatsResult<()> {
    for (metric, text) in metric_names.iter().zip(values) {
        let binding = schema
            .binding(metric)
            .ok_or_else(|| DailyStatsError::UnknownMetric(metric.clone()))?;

        let value = MetricValue::parse(binding.kind, text).map_err(|reason| {
            DailyStatsError::ValueParse {
                metric: metric.clone(),
                value: text.clone(),
                reason,
            }
        })?;

        record.set(&binding.field, value);
    }

    Ok(())
}
