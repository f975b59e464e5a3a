//! Google Analytics source for Daily Stats
//!
//! Runs daily report queries against the Analytics Reporting API v4
//! (`reports:batchGet`) and translates the answer into the source-agnostic
//! [`ReportResponse`](dailystats_report_api::ReportResponse).
//!
//! # Architecture
//!
//! - `source` - `ReportSource` implementation
//! - `client` - HTTP client and API methods
//! - `types` - API request/response types
//! - `mapper` - Wire to report mapping
//! - `config` - Configuration parsing
//!
//! # Example Usage
//!
//! ```no_run
//! use std::collections::HashMap;
//!
//! use dailystats_analytics::AnalyticsSource;
//! use dailystats_report_api::ReportSource;
//!
//! let mut source = AnalyticsSource::new();
//! let mut config = HashMap::new();
//! config.insert("access_token".to_string(), "ya29...".to_string());
//! source.initialize(config).unwrap();
//! ```

mod client;
mod config;
mod mapper;
mod metadata;
mod source;
mod types;

pub use source::AnalyticsSource;
