use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

use super::record::{
    DailyRecord,
    MetricValue,
};
use super::schema::ValueKind;

/// Hook computing fields from the raw metric values of a mapped row.
///
/// `populate` runs once per mapped row, after every bound field is assigned.
/// Zero-filled days never go through it and keep all outputs at zero.
pub trait DerivedFields: fmt::Debug + Send + Sync {
    /// Fields written by `populate`
    fn outputs(&self) -> Vec<(&str, ValueKind)> {
        Vec::new()
    }

    /// Bound fields read by `populate`
    fn inputs(&self) -> Vec<&str> {
        Vec::new()
    }

    fn populate(&self, _record: &mut DailyRecord) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoDerivedFields;

impl DerivedFields for NoDerivedFields {}

/// `field = numerator / denominator * scale`, zero when the denominator is zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioField {
    pub field: String,
    pub numerator: String,
    pub denominator: String,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl RatioField {
    pub fn new(field: &str, numerator: &str, denominator: &str) -> Self {
        Self {
            field: field.to_string(),
            numerator: numerator.to_string(),
            denominator: denominator.to_string(),
            scale: default_scale(),
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

impl DerivedFields for RatioField {
    fn outputs(&self) -> Vec<(&str, ValueKind)> {
        vec![(self.field.as_str(), ValueKind::Float)]
    }

    fn inputs(&self) -> Vec<&str> {
        vec![self.numerator.as_str(), self.denominator.as_str()]
    }

    fn populate(&self, record: &mut DailyRecord) {
        let numerator = record.get(&self.numerator).map_or(0.0, |v| v.as_f64());
        let denominator = record.get(&self.denominator).map_or(0.0, |v| v.as_f64());

        let value = if denominator == 0.0 {
            0.0
        } else {
            numerator / denominator * self.scale
        };

        record.set(&self.field, MetricValue::Float(value));
    }
}

impl<T: DerivedFields> DerivedFields for Vec<T> {
    fn outputs(&self) -> Vec<(&str, ValueKind)> {
        self.iter().flat_map(|d| d.outputs()).collect()
    }

    fn inputs(&self) -> Vec<&str> {
        self.iter().flat_map(|d| d.inputs()).collect()
    }

    fn populate(&self, record: &mut DailyRecord) {
        for derived in self {
            derived.populate(record);
        }
    }
}
