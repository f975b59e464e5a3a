use std::sync::Arc;

use chrono::NaiveDate;
use dailystats_report_api::{
    DateRange,
    ReportRequest,
    ReportResponse,
    ReportSource,
    DATE_DIMENSION,
};

use super::gap_fill::DailySequence;
use super::row_mapper::map_row;
use crate::domain::{
    DailyRecord,
    DailyStatsError,
    DailyStatsResult,
    RecordSchema,
    TimeZoneConvention,
};

/// Fetches a daily report and turns it into a contiguous record sequence
pub struct DailyStatsAssembler {
    source: Arc<dyn ReportSource>,
    source_id: String,
    lookback_days: u32,
    timezone: TimeZoneConvention,
}

impl DailyStatsAssembler {
    /// Fails when `lookback_days` is zero
    pub fn new(
        source: Arc<dyn ReportSource>, source_id: String, lookback_days: u32,
    ) -> DailyStatsResult<Self> {
        if lookback_days == 0 {
            return Err(DailyStatsError::InvalidLookback(
                "must be at least one day".to_string(),
            ));
        }

        Ok(Self {
            source,
            source_id,
            lookback_days,
            timezone: TimeZoneConvention::default(),
        })
    }

    pub fn with_timezone(mut self, timezone: TimeZoneConvention) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn date_range(&self, today: NaiveDate) -> DailyStatsResult<DateRange> {
        DateRange::lookback(today, self.lookback_days).ok_or_else(|| {
            DailyStatsError::InvalidLookback(format!(
                "{} days before {} is out of range",
                self.lookback_days, today
            ))
        })
    }

    pub async fn assemble(&self, schema: &RecordSchema) -> DailyStatsResult<Vec<DailyRecord>> {
        self.assemble_as_of(schema, self.timezone.today()).await
    }

    /// Same as [`assemble`](Self::assemble) with an explicit "today"
    pub async fn assemble_as_of(
        &self, schema: &RecordSchema, today: NaiveDate,
    ) -> DailyStatsResult<Vec<DailyRecord>> {
        let request = self.build_request(schema, today)?;

        tracing::debug!(
            source = %self.source.source_type(),
            start = %request.date_range.start,
            end = %request.date_range.end,
            days = request.date_range.num_days(),
            "Fetching daily report"
        );

        let response = self.source.fetch_report(&request).await?;
        let records = assemble_response(schema, &response)?;

        tracing::info!(
            rows = response.rows.len(),
            records = records.len(),
            "Assembled daily stats"
        );

        Ok(records)
    }

    fn build_request(
        &self, schema: &RecordSchema, today: NaiveDate,
    ) -> DailyStatsResult<ReportRequest> {
        Ok(ReportRequest {
            source_id: self.source_id.clone(),
            date_range: self.date_range(today)?,
            dimensions: vec![DATE_DIMENSION.to_string()],
            metrics: schema.metrics().map(|m| m.to_string()).collect(),
        })
    }
}

/// Maps every row of `response` in order and fills the days between them.
///
/// The sequence spans the first to the last returned day; no record is
/// made up outside of that span. Any row error aborts the whole call.
pub fn assemble_response(
    schema: &RecordSchema, response: &ReportResponse,
) -> DailyStatsResult<Vec<DailyRecord>> {
    if response.is_empty() {
        return Ok(Vec::new());
    }

    let mut sequence = DailySequence::new(schema);
    for row in &response.rows {
        let record = map_row(schema, &response.column_header, row)?;
        sequence.push(record);
    }

    Ok(sequence.into_records())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use dailystats_report_api::{
        ColumnHeader,
        MetricValueGroup,
        ReportError,
        ReportResult,
        ReportRow,
        SourceMetadata,
    };

    use super::*;
    use crate::domain::RatioField;

    struct MockSource {
        metadata: SourceMetadata,
        response: Mutex<Option<ReportResult<ReportResponse>>>,
        requests: Mutex<Vec<ReportRequest>>,
    }

    impl MockSource {
        fn new(response: ReportResult<ReportResponse>) -> Self {
            Self {
                metadata: SourceMetadata {
                    name: "Mock".to_string(),
                    source_type: "mock".to_string(),
                    version: "0.0.0".to_string(),
                    description: "In-memory report source".to_string(),
                },
                response: Mutex::new(Some(response)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<ReportRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReportSource for MockSource {
        fn metadata(&self) -> &SourceMetadata {
            &self.metadata
        }

        fn initialize(&mut self, _config: HashMap<String, String>) -> ReportResult<()> {
            Ok(())
        }

        async fn fetch_report(&self, request: &ReportRequest) -> ReportResult<ReportResponse> {
            self.requests.lock().unwrap().push(request.clone());
            self.response
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(ReportError::Internal("called twice".to_string())))
        }
    }

    fn sessions_schema() -> RecordSchema {
        RecordSchema::builder()
            .integer("ga:sessions", "sessions")
            .build()
            .unwrap()
    }

    fn response(rows: &[(&str, &str)]) -> ReportResponse {
        ReportResponse {
            column_header: ColumnHeader {
                dimension_names: vec![DATE_DIMENSION.to_string()],
                metric_names: vec!["ga:sessions".to_string()],
            },
            rows: rows
                .iter()
                .map(|(date, sessions)| ReportRow {
                    dimension_values: vec![date.to_string()],
                    metric_value_groups: vec![MetricValueGroup {
                        values: vec![sessions.to_string()],
                    }],
                })
                .collect(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assembler(source: Arc<MockSource>) -> DailyStatsAssembler {
        DailyStatsAssembler::new(source, "123456".to_string(), 55).unwrap()
    }

    fn summary(records: &[DailyRecord]) -> Vec<(u64, NaiveDate, Option<i64>)> {
        records
            .iter()
            .map(|r| (r.id, r.day, r.integer("sessions")))
            .collect()
    }

    #[tokio::test]
    async fn test_fills_missing_day() {
        let source = Arc::new(MockSource::new(Ok(response(&[
            ("20240101", "10"),
            ("20240103", "20"),
        ]))));

        let records = assembler(source)
            .assemble_as_of(&sessions_schema(), day(2024, 1, 3))
            .await
            .unwrap();

        assert_eq!(
            summary(&records),
            vec![
                (1, day(2024, 1, 1), Some(10)),
                (2, day(2024, 1, 2), Some(0)),
                (3, day(2024, 1, 3), Some(20)),
            ]
        );
    }

    #[tokio::test]
    async fn test_single_row() {
        let source = Arc::new(MockSource::new(Ok(response(&[("20240210", "5")]))));

        let records = assembler(source)
            .assemble_as_of(&sessions_schema(), day(2024, 2, 20))
            .await
            .unwrap();

        assert_eq!(summary(&records), vec![(1, day(2024, 2, 10), Some(5))]);
    }

    #[tokio::test]
    async fn test_empty_rows() {
        let source = Arc::new(MockSource::new(Ok(response(&[]))));

        let records = assembler(source)
            .assemble_as_of(&sessions_schema(), day(2024, 2, 20))
            .await
            .unwrap();

        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_value_yields_nothing() {
        let source = Arc::new(MockSource::new(Ok(response(&[
            ("20240101", "10"),
            ("20240102", "abc"),
        ]))));

        let result = assembler(source)
            .assemble_as_of(&sessions_schema(), day(2024, 1, 3))
            .await;

        assert!(matches!(result, Err(DailyStatsError::ValueParse { .. })));
    }

    #[tokio::test]
    async fn test_unknown_metric_yields_nothing() {
        let mut report = response(&[("20240101", "10")]);
        report.column_header.metric_names = vec!["ga:users".to_string()];
        let source = Arc::new(MockSource::new(Ok(report)));

        let result = assembler(source)
            .assemble_as_of(&sessions_schema(), day(2024, 1, 3))
            .await;

        assert!(matches!(result, Err(DailyStatsError::UnknownMetric(_))));
    }

    #[tokio::test]
    async fn test_source_error_propagates() {
        let source = Arc::new(MockSource::new(Err(ReportError::AuthenticationFailed(
            "expired token".to_string(),
        ))));

        let result = assembler(source)
            .assemble_as_of(&sessions_schema(), day(2024, 1, 3))
            .await;

        assert!(matches!(
            result,
            Err(DailyStatsError::Source(ReportError::AuthenticationFailed(_)))
        ));
    }

    #[tokio::test]
    async fn test_request_covers_lookback_window() {
        let source = Arc::new(MockSource::new(Ok(response(&[]))));
        let schema = RecordSchema::builder()
            .integer("ga:sessions", "sessions")
            .float("ga:bounceRate", "bounce_rate_percent")
            .build()
            .unwrap();

        DailyStatsAssembler::new(source.clone(), "987".to_string(), 7)
            .unwrap()
            .assemble_as_of(&schema, day(2024, 3, 3))
            .await
            .unwrap();

        let requests = source.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].source_id, "987");
        assert_eq!(
            requests[0].date_range,
            DateRange::new(day(2024, 2, 25), day(2024, 3, 3))
        );
        assert_eq!(requests[0].dimensions, vec![DATE_DIMENSION]);
        assert_eq!(requests[0].metrics, vec!["ga:sessions", "ga:bounceRate"]);
    }

    #[tokio::test]
    async fn test_no_records_before_first_row() {
        let source = Arc::new(MockSource::new(Ok(response(&[
            ("20240110", "1"),
            ("20240111", "2"),
        ]))));

        let records = assembler(source)
            .assemble_as_of(&sessions_schema(), day(2024, 1, 20))
            .await
            .unwrap();

        assert_eq!(records.first().map(|r| r.day), Some(day(2024, 1, 10)));
        assert_eq!(records.last().map(|r| r.day), Some(day(2024, 1, 11)));
    }

    #[test]
    fn test_assemble_response_ids_contiguous() {
        let schema = sessions_schema();
        let report = response(&[
            ("20231230", "1"),
            ("20240102", "2"),
            ("20240103", "3"),
            ("20240107", "4"),
        ]);

        let records = assemble_response(&schema, &report).unwrap();

        assert_eq!(records.len(), 9);
        for (index, pair) in records.windows(2).enumerate() {
            assert_eq!(pair[0].id, index as u64 + 1);
            assert_eq!(pair[1].id, pair[0].id + 1);
            assert_eq!(pair[0].day.succ_opt(), Some(pair[1].day));
        }
    }

    #[test]
    fn test_gap_days_keep_derived_fields_zero() {
        let schema = RecordSchema::builder()
            .integer("ga:sessions", "sessions")
            .integer("ga:bounces", "bounces")
            .derived(RatioField::new("bounce_percent", "bounces", "sessions").with_scale(100.0))
            .build()
            .unwrap();
        let mut report = response(&[]);
        report.column_header.metric_names =
            vec!["ga:sessions".to_string(), "ga:bounces".to_string()];
        report.rows = [("20240101", "4", "1"), ("20240103", "2", "1")]
            .iter()
            .map(|(date, sessions, bounces)| ReportRow {
                dimension_values: vec![date.to_string()],
                metric_value_groups: vec![MetricValueGroup {
                    values: vec![sessions.to_string(), bounces.to_string()],
                }],
            })
            .collect();

        let records = assemble_response(&schema, &report).unwrap();

        let ratios: Vec<(NaiveDate, Option<f64>)> = records
            .iter()
            .map(|r| (r.day, r.float("bounce_percent")))
            .collect();
        assert_eq!(
            ratios,
            vec![
                (day(2024, 1, 1), Some(25.0)),
                (day(2024, 1, 2), Some(0.0)),
                (day(2024, 1, 3), Some(50.0)),
            ]
        );
        assert!(records[1].is_zero());
    }

    #[test]
    fn test_zero_lookback_rejected() {
        let source = Arc::new(MockSource::new(Ok(response(&[]))));

        let result = DailyStatsAssembler::new(source, "123456".to_string(), 0);
        assert!(matches!(result, Err(DailyStatsError::InvalidLookback(_))));
    }

    #[tokio::test]
    async fn test_lookback_out_of_range_fails_before_fetch() {
        let source = Arc::new(MockSource::new(Ok(response(&[]))));
        let today = NaiveDate::MIN.succ_opt().unwrap();

        let result = DailyStatsAssembler::new(source.clone(), "123456".to_string(), 2)
            .unwrap()
            .assemble_as_of(&sessions_schema(), today)
            .await;

        assert!(matches!(result, Err(DailyStatsError::InvalidLookback(_))));
        assert!(source.requests().is_empty());
    }
}
