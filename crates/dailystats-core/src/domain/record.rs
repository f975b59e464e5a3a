use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};

use super::schema::{
    RecordSchema,
    ValueKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Integer(i64),
    Float(f64),
}

impl MetricValue {
    pub fn zero(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Integer => MetricValue::Integer(0),
            ValueKind::Float => MetricValue::Float(0.0),
        }
    }

    /// Parses report text as `kind`; the error is the parser's message
    pub fn parse(kind: ValueKind, text: &str) -> Result<Self, String> {
        match kind {
            ValueKind::Integer => text
                .parse::<i64>()
                .map(MetricValue::Integer)
                .map_err(|e| e.to_string()),
            ValueKind::Float => text
                .parse::<f64>()
                .map(MetricValue::Float)
                .map_err(|e| e.to_string()),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            MetricValue::Integer(_) => ValueKind::Integer,
            MetricValue::Float(_) => ValueKind::Float,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            MetricValue::Integer(v) => *v as f64,
            MetricValue::Float(v) => *v,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Integer(v) => write!(f, "{v}"),
            MetricValue::Float(v) => write!(f, "{v}"),
        }
    }
}

/// One day of metrics.
///
/// Every field of the schema the record was created from is present,
/// zero until assigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub id: u64,
    pub day: NaiveDate,
    #[serde(flatten)]
    values: IndexMap<String, MetricValue>,
}

impl DailyRecord {
    /// Creates a record with every bound and derived field at zero
    pub fn zeroed(schema: &RecordSchema, id: u64, day: NaiveDate) -> Self {
        let values = schema
            .fields()
            .map(|(field, kind)| (field.to_string(), MetricValue::zero(kind)))
            .collect();

        Self { id, day, values }
    }

    pub fn get(&self, field: &str) -> Option<MetricValue> {
        self.values.get(field).copied()
    }

    pub fn integer(&self, field: &str) -> Option<i64> {
        match self.get(field)? {
            MetricValue::Integer(v) => Some(v),
            MetricValue::Float(_) => None,
        }
    }

    pub fn float(&self, field: &str) -> Option<f64> {
        match self.get(field)? {
            MetricValue::Float(v) => Some(v),
            MetricValue::Integer(_) => None,
        }
    }

    pub fn set(&mut self, field: &str, value: MetricValue) {
        match self.values.get_mut(field) {
            Some(slot) => *slot = value,
            None => {
                self.values.insert(field.to_string(), value);
            }
        }
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, MetricValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_zero(&self) -> bool {
        self.values.values().all(|v| v.as_f64() == 0.0)
    }
}

impl fmt::Display for DailyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id={} day={}", self.id, self.day)?;
        for (field, value) in &self.values {
            write!(f, " {field}={value}")?;
        }
        Ok(())
    }
}
