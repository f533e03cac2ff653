//! Metric values and insertion-ordered metric mappings.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A computed metric value as produced by the metric engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// The metric could not be computed (e.g. min of an empty column)
    Null,
    Boolean(bool),
    Long(i64),
    Double(f64),
    String(String),
}

impl MetricValue {
    /// Attempts to get the numeric value as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Double(v) => Some(*v),
            MetricValue::Long(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Returns true for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, MetricValue::Null)
    }

    /// Orders two values of compatible kinds. Numbers compare across
    /// `Long`/`Double`; mismatched kinds and nulls are incomparable.
    pub fn compare(&self, other: &MetricValue) -> Option<Ordering> {
        match (self, other) {
            (MetricValue::Long(a), MetricValue::Long(b)) => Some(a.cmp(b)),
            (MetricValue::String(a), MetricValue::String(b)) => Some(a.cmp(b)),
            (MetricValue::Boolean(a), MetricValue::Boolean(b)) => Some(a.cmp(b)),
            (a, b) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Null => f.write_str("null"),
            MetricValue::Boolean(b) => write!(f, "{b}"),
            MetricValue::Long(v) => write!(f, "{v}"),
            // whole floats keep their fractional part: 100.0, not 100
            MetricValue::Double(v) => write!(f, "{v:?}"),
            MetricValue::String(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for MetricValue {
                fn from(value: $ty) -> Self {
                    MetricValue::Long(value.into())
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Double(value)
    }
}

impl From<bool> for MetricValue {
    fn from(value: bool) -> Self {
        MetricValue::Boolean(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::String(value.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::String(value)
    }
}

impl<T: Into<MetricValue>> From<Option<T>> for MetricValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(MetricValue::Null, Into::into)
    }
}

/// Metric name to value mapping that iterates in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricResults(IndexMap<String, MetricValue>);

impl MetricResults {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a metric. Re-inserting a name replaces the value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<MetricValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates metrics in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for MetricResults
where
    K: Into<String>,
    V: Into<MetricValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}
