//! Profile and test results produced by the metric engine.
//!
//! A [`ProfileAndTests`] bundle is built once per table and consumed exactly
//! once by a [`Sink`](crate::sink::Sink). Metric mappings preserve insertion
//! order so that rendering the same bundle always yields the same report.

mod metric;
mod profile;
mod validation;

pub use metric::{MetricResults, MetricValue};
pub use profile::{
    ColumnProfile, ColumnTestResult, ColumnTests, ProfileAndTests, TableProfile, TableTestResult,
    TestResults,
};
pub use validation::{ComparisonOperator, Validation};
