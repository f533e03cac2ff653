//! Test validation outcomes.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::MetricValue;

/// Comparison applied between a computed metric and its expected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonOperator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl ComparisonOperator {
    /// Returns the operator's mnemonic, as printed in reports.
    pub fn name(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "eq",
            ComparisonOperator::Ne => "ne",
            ComparisonOperator::Lt => "lt",
            ComparisonOperator::Le => "le",
            ComparisonOperator::Gt => "gt",
            ComparisonOperator::Ge => "ge",
        }
    }

    /// Returns the operator's mathematical symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "==",
            ComparisonOperator::Ne => "!=",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Le => "<=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Ge => ">=",
        }
    }

    /// Applies the operator to `computed` and `expected`.
    ///
    /// Incomparable values only satisfy `Ne`.
    pub fn apply(&self, computed: &MetricValue, expected: &MetricValue) -> bool {
        let Some(ordering) = computed.compare(expected) else {
            return matches!(self, ComparisonOperator::Ne);
        };
        match self {
            ComparisonOperator::Eq => ordering == Ordering::Equal,
            ComparisonOperator::Ne => ordering != Ordering::Equal,
            ComparisonOperator::Lt => ordering == Ordering::Less,
            ComparisonOperator::Le => ordering != Ordering::Greater,
            ComparisonOperator::Gt => ordering == Ordering::Greater,
            ComparisonOperator::Ge => ordering != Ordering::Less,
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one comparison inside a test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    pub valid: bool,
    pub computed_metric: MetricValue,
    pub operator: ComparisonOperator,
    /// Expected value the metric is compared against
    pub value: MetricValue,
}

impl Validation {
    /// Builds a validation by applying `operator` to the computed and expected values.
    pub fn evaluate(
        computed_metric: impl Into<MetricValue>,
        operator: ComparisonOperator,
        value: impl Into<MetricValue>,
    ) -> Self {
        let computed_metric = computed_metric.into();
        let value = value.into();
        Self {
            valid: operator.apply(&computed_metric, &value),
            computed_metric,
            operator,
            value,
        }
    }
}
