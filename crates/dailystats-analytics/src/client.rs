//! HTTP client for the Analytics Reporting API

use dailystats_report_api::{
    ReportError,
    ReportResult,
};
use reqwest::StatusCode;

use crate::types::{
    GetReportsRequest,
    GetReportsResponse,
};

pub(crate) struct AnalyticsClient {
    http_client: reqwest::Client,
    api_url: String,
}

impl AnalyticsClient {
    pub fn new(http_client: reqwest::Client, api_url: String) -> Self {
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Runs a `reports:batchGet` call. Failures are returned as is, never retried.
    pub async fn batch_get(&self, body: &GetReportsRequest) -> ReportResult<GetReportsResponse> {
        let url = format!("{}/reports:batchGet", self.api_url);

        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ReportError::NetworkError(format!("Failed to fetch report: {e}")))?;

        self.handle_response(response).await
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self, response: reqwest::Response,
    ) -> ReportResult<T> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ReportError::AuthenticationFailed(format!(
                "Analytics API rejected credentials ({status}): {error_text}"
            )));
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ReportError::ApiError(format!(
                "Analytics API error ({status}): {error_text}"
            )));
        }

        response.json::<T>().await.map_err(|e| {
            ReportError::ApiError(format!("Failed to parse Analytics API response: {e}"))
        })
    }
}
