use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Overrides the built-in filter when set, `RUST_LOG` syntax
pub const LOG_ENV_VAR: &str = "DAILYSTATS_LOG";

const CRATES: [&str; 4] = [
    "dailystats",
    "dailystats_core",
    "dailystats_analytics",
    "dailystats_report_api",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Normal,
    Debug,
}

impl Verbosity {
    fn level(self) -> &'static str {
        match self {
            Verbosity::Normal => "info",
            Verbosity::Debug => "debug",
        }
    }

    /// Filter directive enabling this level for every workspace crate
    pub fn directive(self) -> String {
        let level = self.level();
        CRATES
            .iter()
            .map(|krate| format!("{krate}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

pub fn init() {
    init_with(Verbosity::Normal);
}

pub fn init_dev() {
    init_with(Verbosity::Debug);
}

/// Installs the global subscriber. Records go to stdout, so logs go to stderr.
pub fn init_with(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbosity == Verbosity::Debug)
                .with_writer(std::io::stderr),
        )
        .try_init();

    if result.is_err() {
        tracing::debug!("Global subscriber already set");
    }
}
