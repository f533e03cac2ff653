//! Per-table profile and test result bundles.

use serde::{Deserialize, Serialize};

use super::{MetricResults, Validation};

/// Metrics computed for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub column: String,
    pub results: MetricResults,
}

impl ColumnProfile {
    pub fn new(column: impl Into<String>, results: MetricResults) -> Self {
        Self {
            column: column.into(),
            results,
        }
    }
}

/// Table-level metrics plus the column profiles, in the order they were computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableProfile {
    pub fully_qualified_name: String,
    pub table_results: MetricResults,
    #[serde(default)]
    pub column_profiles: Vec<ColumnProfile>,
}

impl TableProfile {
    pub fn new(fully_qualified_name: impl Into<String>, table_results: MetricResults) -> Self {
        Self {
            fully_qualified_name: fully_qualified_name.into(),
            table_results,
            column_profiles: Vec::new(),
        }
    }

    /// Appends a column profile.
    pub fn with_column(mut self, column: ColumnProfile) -> Self {
        self.column_profiles.push(column);
        self
    }
}

/// Result of a table-level test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableTestResult {
    pub name: String,
    /// Validation outcomes, in evaluation order
    pub expression: Vec<Validation>,
}

impl TableTestResult {
    pub fn new(name: impl Into<String>, expression: Vec<Validation>) -> Self {
        Self {
            name: name.into(),
            expression,
        }
    }
}

/// Result of a test run against a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTestResult {
    pub column: String,
    pub name: String,
    pub expression: Vec<Validation>,
}

impl ColumnTestResult {
    pub fn new(
        column: impl Into<String>,
        name: impl Into<String>,
        expression: Vec<Validation>,
    ) -> Self {
        Self {
            column: column.into(),
            name: name.into(),
            expression,
        }
    }
}

/// A group of column test results reported under one heading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnTests {
    pub columns: Vec<ColumnTestResult>,
}

impl ColumnTests {
    pub fn new(columns: Vec<ColumnTestResult>) -> Self {
        Self { columns }
    }
}

/// All test results for a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestResults {
    #[serde(default)]
    pub table_tests: Vec<TableTestResult>,
    #[serde(default)]
    pub column_tests: Vec<ColumnTests>,
}

impl TestResults {
    /// Returns true if every validation of every test passed.
    pub fn all_valid(&self) -> bool {
        let table_valid = self
            .table_tests
            .iter()
            .flat_map(|test| &test.expression)
            .all(|validation| validation.valid);
        let column_valid = self
            .column_tests
            .iter()
            .flat_map(|group| &group.columns)
            .flat_map(|test| &test.expression)
            .all(|validation| validation.valid);
        table_valid && column_valid
    }
}

/// Profile and optional test results for one table, handed to a sink once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileAndTests {
    pub profile: TableProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests: Option<TestResults>,
}

impl ProfileAndTests {
    /// Creates a bundle without test results.
    pub fn new(profile: TableProfile) -> Self {
        Self {
            profile,
            tests: None,
        }
    }

    /// Attaches test results.
    pub fn with_tests(mut self, tests: TestResults) -> Self {
        self.tests = Some(tests);
        self
    }

    /// Fully qualified name of the profiled table.
    pub fn table_name(&self) -> &str {
        &self.profile.fully_qualified_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::ComparisonOperator;

    #[test]
    fn test_all_valid() {
        let mut tests = TestResults {
            table_tests: vec![TableTestResult::new(
                "row_count_check",
                vec![Validation::evaluate(100, ComparisonOperator::Ge, 10)],
            )],
            column_tests: vec![ColumnTests::new(vec![ColumnTestResult::new(
                "age",
                "min_check",
                vec![Validation::evaluate(3, ComparisonOperator::Ge, 0)],
            )])],
        };
        assert!(tests.all_valid());

        tests.column_tests[0].columns[0]
            .expression
            .push(Validation::evaluate(130, ComparisonOperator::Le, 120));
        assert!(!tests.all_valid());
    }

    #[test]
    fn test_bundle_serializes_without_tests() {
        let bundle = ProfileAndTests::new(TableProfile::new(
            "t1",
            MetricResults::new().with("row_count", 100),
        ));
        let value = serde_json::to_value(&bundle).unwrap();

        assert_eq!(bundle.table_name(), "t1");
        assert!(value.get("tests").is_none());
        assert_eq!(value["profile"]["table_results"]["row_count"], 100);
    }
}
