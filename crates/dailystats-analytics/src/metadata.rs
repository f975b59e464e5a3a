use dailystats_report_api::SourceMetadata;

pub(crate) const SOURCE_TYPE: &str = "google-analytics";

pub(crate) fn create_metadata() -> SourceMetadata {
    SourceMetadata {
        name: "Google Analytics".to_string(),
        source_type: SOURCE_TYPE.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Daily metrics from the Google Analytics Reporting API v4".to_string(),
    }
}
