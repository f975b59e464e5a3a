use std::collections::HashMap;

use dailystats_report_api::{
    ReportError,
    ReportResult,
};

pub(crate) const DEFAULT_API_URL: &str = "https://analyticsreporting.googleapis.com/v4";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AnalyticsConfig {
    pub access_token: String,
    pub api_url: String,
}

pub(crate) fn parse_config(config: &HashMap<String, String>) -> ReportResult<AnalyticsConfig> {
    let access_token = config
        .get("access_token")
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            ReportError::InvalidConfig("Missing Google Analytics access token".to_string())
        })?;

    let api_url = config
        .get("api_url")
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .unwrap_or(DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string();

    if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
        return Err(ReportError::InvalidConfig(format!(
            "API URL must start with http:// or https://: {api_url}"
        )));
    }

    Ok(AnalyticsConfig {
        access_token: access_token.to_string(),
        api_url,
    })
}
