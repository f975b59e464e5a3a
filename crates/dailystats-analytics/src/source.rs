//! Google Analytics source implementation

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use dailystats_report_api::*;
use reqwest::header::{
    HeaderMap,
    HeaderValue,
    AUTHORIZATION,
};

use crate::{
    client,
    config,
    mapper,
    metadata,
};

/// Report source backed by the Analytics Reporting API v4
pub struct AnalyticsSource {
    metadata: SourceMetadata,
    client: Option<client::AnalyticsClient>,
}

impl Default for AnalyticsSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsSource {
    pub fn new() -> Self {
        Self {
            metadata: metadata::create_metadata(),
            client: None,
        }
    }

    fn client(&self) -> ReportResult<&client::AnalyticsClient> {
        self.client
            .as_ref()
            .ok_or_else(|| ReportError::Internal("Source not initialized".to_string()))
    }
}

#[async_trait]
impl ReportSource for AnalyticsSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn initialize(&mut self, config: HashMap<String, String>) -> ReportResult<()> {
        let config = config::parse_config(&config)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.access_token))
                .map_err(|e| ReportError::InvalidConfig(format!("Invalid token format: {e}")))?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ReportError::Internal(format!("Failed to build HTTP client: {e}")))?;

        tracing::debug!(api_url = %config.api_url, "Initialized Google Analytics source");

        self.client = Some(client::AnalyticsClient::new(http_client, config.api_url));
        Ok(())
    }

    async fn fetch_report(&self, request: &ReportRequest) -> ReportResult<ReportResponse> {
        let client = self.client()?;

        tracing::debug!(
            view_id = %request.source_id,
            start = %request.date_range.start,
            end = %request.date_range.end,
            metrics = request.metrics.len(),
            "Requesting Analytics report"
        );

        let body = mapper::build_request_body(request);
        let response = client.batch_get(&body).await?;

        Ok(mapper::map_response(response))
    }
}
