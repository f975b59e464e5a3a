//! Request and response types for the Analytics Reporting API v4
//!
//! These types are internal implementation details for talking to
//! `reports:batchGet`.

use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GetReportsRequest {
    pub report_requests: Vec<ReportRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReportRequest {
    pub view_id: String,
    pub date_ranges: Vec<DateRange>,
    pub dimensions: Vec<Dimension>,
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct Dimension {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct Metric {
    pub expression: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetReportsResponse {
    #[serde(default)]
    pub reports: Vec<Report>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Report {
    #[serde(default)]
    pub column_header: ColumnHeader,
    #[serde(default)]
    pub data: ReportData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ColumnHeader {
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub metric_header: MetricHeader,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MetricHeader {
    #[serde(default)]
    pub metric_header_entries: Vec<MetricHeaderEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MetricHeaderEntry {
    pub name: String,
    #[serde(rename = "type", default)]
    #[allow(dead_code)]
    pub value_type: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReportData {
    /// Absent when the range had no activity at all
    pub rows: Option<Vec<ReportRow>>,
    #[allow(dead_code)]
    pub row_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportRow {
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<DateRangeValues>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DateRangeValues {
    #[serde(default)]
    pub values: Vec<String>,
}
