use chrono::{
    Local,
    NaiveDate,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

/// Which clock decides what "today" is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeZoneConvention {
    #[default]
    Local,
    Utc,
}

impl TimeZoneConvention {
    pub fn today(&self) -> NaiveDate {
        match self {
            TimeZoneConvention::Local => Local::now().date_naive(),
            TimeZoneConvention::Utc => Utc::now().date_naive(),
        }
    }
}

impl std::fmt::Display for TimeZoneConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Utc => write!(f, "utc"),
        }
    }
}
