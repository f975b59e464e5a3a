use std::collections::HashMap;

use async_trait::async_trait;
use serde::{
    Deserialize,
    Serialize,
};

use crate::error::ReportResult;
use crate::types::{
    ReportRequest,
    ReportResponse,
};

/// Source metadata - describes a reporting backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Display name (e.g., "Google Analytics")
    pub name: String,
    /// Source identifier used in config files (e.g., "google-analytics")
    pub source_type: String,
    /// Source version
    pub version: String,
    /// Source description
    pub description: String,
}

/// A remote reporting service able to answer one daily report query.
///
/// Implementations own transport and authentication. They must not retry:
/// a failed call is reported to the caller as is.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Get source metadata
    fn metadata(&self) -> &SourceMetadata;

    /// Initialize the source with its configuration options
    fn initialize(&mut self, config: HashMap<String, String>) -> ReportResult<()>;

    /// Run a single report query
    async fn fetch_report(&self, request: &ReportRequest) -> ReportResult<ReportResponse>;

    /// Get the source type string
    fn source_type(&self) -> &str {
        &self.metadata().source_type
    }
}
