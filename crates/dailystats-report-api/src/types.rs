use chrono::{
    Days,
    NaiveDate,
};
use serde::{
    Deserialize,
    Serialize,
};

/// Well-known name of the calendar date dimension
pub const DATE_DIMENSION: &str = "ga:date";

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Range from `lookback_days` before `today` up to and including `today`.
    ///
    /// `None` when the start falls before the earliest representable date.
    pub fn lookback(today: NaiveDate, lookback_days: u32) -> Option<Self> {
        let start = today.checked_sub_days(Days::new(u64::from(lookback_days)))?;
        Some(Self { start, end: today })
    }

    /// Number of calendar days covered, both ends included
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// A single report query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Opaque identifier of the data source (e.g. a GA view id)
    pub source_id: String,
    pub date_range: DateRange,
    pub dimensions: Vec<String>,
    pub metrics: Vec<String>,
}

/// Names of the dimension and metric columns, in the order the service used
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnHeader {
    pub dimension_names: Vec<String>,
    pub metric_names: Vec<String>,
}

/// Metric values of one row for one date range
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricValueGroup {
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub dimension_values: Vec<String>,
    pub metric_value_groups: Vec<MetricValueGroup>,
}

impl ReportRow {
    /// Looks up a dimension value by column name.
    ///
    /// Only positions present in both the header and the row are considered.
    pub fn dimension<'a>(&'a self, header: &ColumnHeader, name: &str) -> Option<&'a str> {
        header
            .dimension_names
            .iter()
            .zip(self.dimension_values.iter())
            .find(|(dimension, _)| dimension.as_str() == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Source-agnostic report body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportResponse {
    pub column_header: ColumnHeader,
    pub rows: Vec<ReportRow>,
}

impl ReportResponse {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_lookback_range() {
        let range = DateRange::lookback(day(2024, 3, 1), 2).unwrap();
        assert_eq!(range.start, day(2024, 2, 28));
        assert_eq!(range.end, day(2024, 3, 1));
        assert_eq!(range.num_days(), 3);
    }

    #[test]
    fn test_lookback_zero_is_single_day() {
        let range = DateRange::lookback(day(2024, 3, 1), 0).unwrap();
        assert_eq!(range.start, range.end);
        assert_eq!(range.num_days(), 1);
    }

    #[test]
    fn test_lookback_before_earliest_date() {
        let today = NaiveDate::MIN.checked_add_days(Days::new(3)).unwrap();
        assert!(DateRange::lookback(today, 4).is_none());
        assert_eq!(
            DateRange::lookback(today, 3).map(|r| r.start),
            Some(NaiveDate::MIN)
        );
    }

    #[test]
    fn test_dimension_located_by_name() {
        let header = ColumnHeader {
            dimension_names: vec!["ga:country".to_string(), DATE_DIMENSION.to_string()],
            metric_names: vec![],
        };
        let row = ReportRow {
            dimension_values: vec!["Czechia".to_string(), "20240101".to_string()],
            metric_value_groups: vec![],
        };

        assert_eq!(row.dimension(&header, DATE_DIMENSION), Some("20240101"));
        assert_eq!(row.dimension(&header, "ga:country"), Some("Czechia"));
        assert_eq!(row.dimension(&header, "ga:city"), None);
    }

    #[test]
    fn test_dimension_missing_value() {
        let header = ColumnHeader {
            dimension_names: vec!["ga:country".to_string(), DATE_DIMENSION.to_string()],
            metric_names: vec![],
        };
        let row = ReportRow {
            dimension_values: vec!["Czechia".to_string()],
            metric_value_groups: vec![],
        };

        assert_eq!(row.dimension(&header, DATE_DIMENSION), None);
    }
}
