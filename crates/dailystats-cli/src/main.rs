use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use dailystats_analytics::AnalyticsSource;
use dailystats_core::{
    logging,
    ConfigLoader,
    DailyRecord,
    DailyStatsAssembler,
    DailyStatsConfig,
};
use dailystats_report_api::ReportSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

struct RunConfig {
    config_path: Option<PathBuf>,
    output: OutputFormat,
    debug: bool,
}

impl RunConfig {
    /// Optional config path as the only argument, the rest from the environment
    fn from_env() -> Self {
        let config_path = std::env::args().nth(1).map(PathBuf::from);

        let output = match std::env::var("DAILYSTATS_OUTPUT").as_deref() {
            Ok("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        };

        let debug = std::env::var("DAILYSTATS_DEBUG")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            config_path,
            output,
            debug,
        }
    }
}

fn load_config(run_config: &RunConfig) -> anyhow::Result<DailyStatsConfig> {
    let config = match &run_config.config_path {
        Some(path) => ConfigLoader::load(path),
        None => ConfigLoader::load_default(),
    }
    .context("Failed to load configuration")?;

    let report = config.validate();
    for warning in report.warnings() {
        tracing::warn!("{}", warning);
    }
    if !report.is_ok() {
        anyhow::bail!("Invalid configuration: {}", report.error_summary());
    }

    Ok(config)
}

fn build_source(config: &DailyStatsConfig) -> anyhow::Result<Arc<dyn ReportSource>> {
    let mut source: Box<dyn ReportSource> = match config.source.source_type.as_str() {
        "google-analytics" => Box::new(AnalyticsSource::new()),
        other => anyhow::bail!("Unsupported source type: {}", other),
    };

    source
        .initialize(config.source.options.clone())
        .with_context(|| format!("Failed to initialize {} source", source.source_type()))?;

    Ok(Arc::from(source))
}

fn print_records(records: &[DailyRecord], output: OutputFormat) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for record in records {
        match output {
            OutputFormat::Text => writeln!(out, "{}", record)?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(record)?)?,
        }
    }

    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let run_config = RunConfig::from_env();

    if run_config.debug {
        logging::init_dev();
    } else {
        logging::init();
    }

    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::debug!("rustls crypto provider already installed");
    }

    let config = load_config(&run_config)?;
    let schema = config
        .record_schema()
        .context("Failed to bind record schema")?;
    let source = build_source(&config)?;

    tracing::info!(
        source = %source.metadata().name,
        view_id = %config.source.view_id,
        lookback_days = config.query.lookback_days,
        timezone = %config.query.timezone,
        "Fetching daily stats"
    );

    let assembler = DailyStatsAssembler::new(
        source,
        config.source.view_id.clone(),
        config.query.lookback_days,
    )?
    .with_timezone(config.query.timezone);

    let records = assembler
        .assemble(&schema)
        .await
        .context("Failed to assemble daily stats")?;

    print_records(&records, run_config.output)
}
