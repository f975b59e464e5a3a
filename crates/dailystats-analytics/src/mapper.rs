//! Mapping between Analytics Reporting wire types and report types

use dailystats_report_api::{
    ColumnHeader,
    MetricValueGroup,
    ReportRequest,
    ReportResponse,
    ReportRow,
};

use crate::types;

const API_DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn build_request_body(request: &ReportRequest) -> types::GetReportsRequest {
    let report_request = types::ReportRequest {
        view_id: request.source_id.clone(),
        date_ranges: vec![types::DateRange {
            start_date: request
                .date_range
                .start
                .format(API_DATE_FORMAT)
                .to_string(),
            end_date: request.date_range.end.format(API_DATE_FORMAT).to_string(),
        }],
        dimensions: request
            .dimensions
            .iter()
            .map(|name| types::Dimension { name: name.clone() })
            .collect(),
        metrics: request
            .metrics
            .iter()
            .map(|expression| types::Metric {
                expression: expression.clone(),
            })
            .collect(),
    };

    types::GetReportsRequest {
        report_requests: vec![report_request],
    }
}

/// Converts a batchGet answer into a single report.
///
/// Only the first report is used since exactly one report is requested.
pub(crate) fn map_response(response: types::GetReportsResponse) -> ReportResponse {
    let report_count = response.reports.len();
    let Some(report) = response.reports.into_iter().next() else {
        tracing::debug!("Analytics response contained no reports");
        return ReportResponse::default();
    };

    if report_count > 1 {
        tracing::warn!(
            report_count,
            "Analytics response contained more than one report, ignoring the rest"
        );
    }

    let column_header = ColumnHeader {
        dimension_names: report.column_header.dimensions,
        metric_names: report
            .column_header
            .metric_header
            .metric_header_entries
            .into_iter()
            .map(|entry| entry.name)
            .collect(),
    };

    let rows = report
        .data
        .rows
        .unwrap_or_default()
        .into_iter()
        .map(map_row)
        .collect();

    ReportResponse {
        column_header,
        rows,
    }
}

fn map_row(row: types::ReportRow) -> ReportRow {
    ReportRow {
        dimension_values: row.dimensions,
        metric_value_groups: row
            .metrics
            .into_iter()
            .map(|group| MetricValueGroup {
                values: group.values,
            })
            .collect(),
    }
}
