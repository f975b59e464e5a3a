use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};

use super::derived::{
    DerivedFields,
    NoDerivedFields,
};
use super::error::{
    DailyStatsError,
    DailyStatsResult,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Integer,
    Float,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ValueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "integer" | "int" | "long" | "i64" => Ok(ValueKind::Integer),
            "float" | "double" | "decimal" | "f64" => Ok(ValueKind::Float),
            _ => Err(format!("Unknown value kind: {}", s)),
        }
    }
}

/// Record keys every [`DailyRecord`](super::DailyRecord) carries itself
pub const RESERVED_FIELDS: [&str; 2] = ["id", "day"];

fn check_field_name(field: &str) -> DailyStatsResult<()> {
    if RESERVED_FIELDS.contains(&field) {
        return Err(DailyStatsError::InvalidSchema(format!(
            "Field name '{}' is reserved",
            field
        )));
    }
    Ok(())
}

/// Association of a metric identifier with the record field storing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricBinding {
    pub metric: String,
    pub field: String,
    pub kind: ValueKind,
}

/// Untyped field declaration, as written in config files
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: String,
    pub metric: String,
    pub kind: String,
}

impl FieldSpec {
    pub fn new(field: &str, metric: &str, kind: &str) -> Self {
        Self {
            field: field.to_string(),
            metric: metric.to_string(),
            kind: kind.to_string(),
        }
    }
}

/// Resolved metric-to-field bindings of one record type.
///
/// Immutable once built. Bindings keep their declaration order, which is
/// also the order metrics are requested in.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    bindings: IndexMap<String, MetricBinding>,
    derived: Arc<dyn DerivedFields>,
}

impl RecordSchema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Resolves untyped field declarations into a schema without derived fields
    pub fn bind(specs: &[FieldSpec]) -> DailyStatsResult<Self> {
        SchemaBuilder::from_specs(specs)?.build()
    }

    pub fn binding(&self, metric: &str) -> Option<&MetricBinding> {
        self.bindings.get(metric)
    }

    pub fn bindings(&self) -> impl Iterator<Item = &MetricBinding> {
        self.bindings.values()
    }

    pub fn metrics(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(|k| k.as_str())
    }

    /// Every field a record of this schema carries, derived fields last
    pub fn fields(&self) -> impl Iterator<Item = (&str, ValueKind)> + '_ {
        self.bindings
            .values()
            .map(|b| (b.field.as_str(), b.kind))
            .chain(self.derived.outputs())
    }

    pub fn derived(&self) -> &dyn DerivedFields {
        self.derived.as_ref()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    bindings: Vec<MetricBinding>,
    derived: Option<Arc<dyn DerivedFields>>,
}

impl SchemaBuilder {
    pub fn from_specs(specs: &[FieldSpec]) -> DailyStatsResult<Self> {
        let mut builder = Self::default();

        for spec in specs {
            let kind = spec.kind.parse::<ValueKind>().map_err(|_| {
                DailyStatsError::UnsupportedValueKind {
                    field: spec.field.clone(),
                    kind: spec.kind.clone(),
                }
            })?;
            builder = builder.binding(&spec.metric, &spec.field, kind);
        }

        Ok(builder)
    }

    pub fn binding(mut self, metric: &str, field: &str, kind: ValueKind) -> Self {
        self.bindings.push(MetricBinding {
            metric: metric.to_string(),
            field: field.to_string(),
            kind,
        });
        self
    }

    pub fn integer(self, metric: &str, field: &str) -> Self {
        self.binding(metric, field, ValueKind::Integer)
    }

    pub fn float(self, metric: &str, field: &str) -> Self {
        self.binding(metric, field, ValueKind::Float)
    }

    pub fn derived<D: DerivedFields + 'static>(mut self, derived: D) -> Self {
        self.derived = Some(Arc::new(derived));
        self
    }

    pub fn build(self) -> DailyStatsResult<RecordSchema> {
        if self.bindings.is_empty() {
            return Err(DailyStatsError::InvalidSchema(
                "At least one metric must be bound".to_string(),
            ));
        }

        let mut bindings = IndexMap::with_capacity(self.bindings.len());
        let mut fields = HashSet::new();

        for binding in self.bindings {
            check_field_name(&binding.field)?;
            if bindings.contains_key(&binding.metric) {
                return Err(DailyStatsError::DuplicateMetric(binding.metric));
            }
            if !fields.insert(binding.field.clone()) {
                return Err(DailyStatsError::InvalidSchema(format!(
                    "Field '{}' is bound to more than one metric",
                    binding.field
                )));
            }
            bindings.insert(binding.metric.clone(), binding);
        }

        let derived = self
            .derived
            .unwrap_or_else(|| Arc::new(NoDerivedFields));

        for input in derived.inputs() {
            if !bindings.values().any(|b| b.field == input) {
                return Err(DailyStatsError::InvalidSchema(format!(
                    "Derived field reads unbound field '{}'",
                    input
                )));
            }
        }

        for (output, _) in derived.outputs() {
            check_field_name(output)?;
            if !fields.insert(output.to_string()) {
                return Err(DailyStatsError::InvalidSchema(format!(
                    "Derived field '{}' clashes with another field",
                    output
                )));
            }
        }

        Ok(RecordSchema { bindings, derived })
    }
}
