//! Textual rendering of profile and test results.
//!
//! The report is line-oriented and performs no escaping:
//!
//! ```text
//! Profile for: <fqn>
//! Table Profile results:
//! 	<metric>: <value>
//! Column Profile results:
//! 	Column [<column>]:
//! 		<metric>: <value>
//!
//! Test results:
//! 	Table Tests results:
//! 		<test>: <valid>, (Real) <computed> <<op>> <expected> (expected)
//! 	Column Tests results:
//! 		[<column>] - <test>: <valid>, (Real) <computed> <<op>> <expected> (expected)
//! ```

use std::fmt::Write;

use crate::error::{ErrorContext, Result};
use crate::results::{ProfileAndTests, TestResults, Validation};

/// Configuration options for rendering reports.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Include the test results section when a record carries tests
    pub include_tests: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_tests: true,
        }
    }
}

impl ReportConfig {
    /// Creates a configuration that only renders profiles.
    pub fn profiles_only() -> Self {
        Self {
            include_tests: false,
        }
    }
}

/// Renders [`ProfileAndTests`] records as human-readable text blocks.
///
/// # Examples
///
/// ```rust
/// use term_profiler::results::{ColumnProfile, MetricResults, ProfileAndTests, TableProfile};
/// use term_profiler::sink::ReportFormatter;
///
/// let record = ProfileAndTests::new(
///     TableProfile::new("t1", MetricResults::new().with("row_count", 100))
///         .with_column(ColumnProfile::new("c1", MetricResults::new().with("null_count", 0))),
/// );
///
/// let block = ReportFormatter::new().format(&record).unwrap();
/// assert_eq!(
///     block,
///     "Profile for: t1\nTable Profile results:\n\trow_count: 100\nColumn Profile results:\n\tColumn [c1]:\n\t\tnull_count: 0\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportFormatter {
    config: ReportConfig,
}

impl ReportFormatter {
    /// Creates a formatter with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a formatter with the specified configuration.
    pub fn with_config(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Renders one record as a block terminated by a newline.
    pub fn format(&self, record: &ProfileAndTests) -> Result<String> {
        let mut output = String::new();
        self.write_record(&mut output, record)
            .with_context(|| format!("Failed to render report for '{}'", record.table_name()))?;
        Ok(output)
    }

    fn write_record(&self, out: &mut String, record: &ProfileAndTests) -> std::fmt::Result {
        let profile = &record.profile;

        writeln!(out, "Profile for: {}", profile.fully_qualified_name)?;
        writeln!(out, "Table Profile results:")?;
        for (metric, value) in profile.table_results.iter() {
            writeln!(out, "\t{metric}: {value}")?;
        }

        writeln!(out, "Column Profile results:")?;
        for column in &profile.column_profiles {
            writeln!(out, "\tColumn [{}]:", column.column)?;
            for (metric, value) in column.results.iter() {
                writeln!(out, "\t\t{metric}: {value}")?;
            }
        }

        if self.config.include_tests {
            if let Some(tests) = &record.tests {
                write_tests(out, tests)?;
            }
        }
        Ok(())
    }
}

fn write_tests(out: &mut String, tests: &TestResults) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "Test results:")?;

    for test in &tests.table_tests {
        writeln!(out, "\tTable Tests results:")?;
        for validation in &test.expression {
            writeln!(out, "\t\t{}: {}", test.name, outcome(validation))?;
        }
    }

    for group in &tests.column_tests {
        writeln!(out, "\tColumn Tests results:")?;
        for test in &group.columns {
            for validation in &test.expression {
                writeln!(
                    out,
                    "\t\t[{}] - {}: {}",
                    test.column,
                    test.name,
                    outcome(validation)
                )?;
            }
        }
    }
    Ok(())
}

fn outcome(validation: &Validation) -> String {
    format!(
        "{}, (Real) {} <{}> {} (expected)",
        validation.valid, validation.computed_metric, validation.operator, validation.value
    )
}

/// Lists the names and values of a record that contain a line break.
///
/// The report format cannot represent them; a sink writes them anyway and
/// flags the record. Test results are only inspected when `config` renders
/// them.
pub fn fields_with_line_breaks(record: &ProfileAndTests, config: &ReportConfig) -> Vec<String> {
    let profile = &record.profile;
    let mut offending = Vec::new();

    if has_break(&profile.fully_qualified_name) {
        offending.push("table name".to_string());
    }
    for (metric, value) in profile.table_results.iter() {
        if has_break(metric) || has_break(&value.to_string()) {
            offending.push(format!("table metric '{}'", metric.escape_debug()));
        }
    }
    for column in &profile.column_profiles {
        if has_break(&column.column) {
            offending.push(format!("column '{}'", column.column.escape_debug()));
        }
        for (metric, value) in column.results.iter() {
            if has_break(metric) || has_break(&value.to_string()) {
                offending.push(format!(
                    "column '{}' metric '{}'",
                    column.column.escape_debug(),
                    metric.escape_debug()
                ));
            }
        }
    }

    let Some(tests) = record.tests.as_ref().filter(|_| config.include_tests) else {
        return offending;
    };

    for test in &tests.table_tests {
        let name = test.name.escape_debug();
        if has_break(&test.name) {
            offending.push(format!("table test '{name}'"));
        }
        if test.expression.iter().any(validation_has_break) {
            offending.push(format!("table test '{name}' validation"));
        }
    }
    for test in tests.column_tests.iter().flat_map(|group| &group.columns) {
        let column = test.column.escape_debug();
        let name = test.name.escape_debug();
        if has_break(&test.column) || has_break(&test.name) {
            offending.push(format!("column test '{name}' on '{column}'"));
        }
        if test.expression.iter().any(validation_has_break) {
            offending.push(format!("column test '{name}' on '{column}' validation"));
        }
    }
    offending
}

fn has_break(s: &str) -> bool {
    s.contains('\n') || s.contains('\r')
}

fn validation_has_break(validation: &Validation) -> bool {
    has_break(&validation.computed_metric.to_string()) || has_break(&validation.value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{
        ColumnProfile, ColumnTestResult, ColumnTests, ComparisonOperator, MetricResults,
        TableProfile, TableTestResult,
    };

    fn record() -> ProfileAndTests {
        ProfileAndTests::new(
            TableProfile::new(
                "svc.db.schema.users",
                MetricResults::new().with("rowCount", 3).with("columnCount", 2),
            )
            .with_column(ColumnProfile::new(
                "age",
                MetricResults::new().with("min", 18).with("mean", 30.5),
            ))
            .with_column(ColumnProfile::new("name", MetricResults::new())),
        )
    }

    fn tests() -> TestResults {
        TestResults {
            table_tests: vec![TableTestResult::new(
                "table_row_count",
                vec![Validation::evaluate(3, ComparisonOperator::Ge, 1)],
            )],
            column_tests: vec![ColumnTests::new(vec![
                ColumnTestResult::new(
                    "age",
                    "age_min",
                    vec![Validation::evaluate(18, ComparisonOperator::Ge, 21)],
                ),
                ColumnTestResult::new(
                    "name",
                    "name_nulls",
                    vec![Validation::evaluate(0, ComparisonOperator::Eq, 0)],
                ),
            ])],
        }
    }

    #[test]
    fn test_profile_only_block() {
        let block = ReportFormatter::new().format(&record()).unwrap();
        assert_eq!(
            block,
            "Profile for: svc.db.schema.users\n\
             Table Profile results:\n\
             \trowCount: 3\n\
             \tcolumnCount: 2\n\
             Column Profile results:\n\
             \tColumn [age]:\n\
             \t\tmin: 18\n\
             \t\tmean: 30.5\n\
             \tColumn [name]:\n"
        );
    }

    #[test]
    fn test_block_with_tests() {
        let block = ReportFormatter::new()
            .format(&record().with_tests(tests()))
            .unwrap();
        let expected_tail = "\n\
             Test results:\n\
             \tTable Tests results:\n\
             \t\ttable_row_count: true, (Real) 3 <ge> 1 (expected)\n\
             \tColumn Tests results:\n\
             \t\t[age] - age_min: false, (Real) 18 <ge> 21 (expected)\n\
             \t\t[name] - name_nulls: true, (Real) 0 <eq> 0 (expected)\n";
        assert!(block.ends_with(expected_tail), "{block}");
    }

    #[test]
    fn test_whole_floats_render_with_fraction() {
        let record = ProfileAndTests::new(TableProfile::new(
            "t1",
            MetricResults::new().with("rowCount", 100).with("mean", 100.0),
        ));
        let block = ReportFormatter::new().format(&record).unwrap();
        assert!(block.contains("\trowCount: 100\n\tmean: 100.0\n"), "{block}");
    }

    #[test]
    fn test_profiles_only_config_skips_tests() {
        let formatter = ReportFormatter::with_config(ReportConfig::profiles_only());
        let block = formatter.format(&record().with_tests(tests())).unwrap();
        assert!(!block.contains("Test results:"));
    }

    #[test]
    fn test_empty_tests_still_render_header() {
        let block = ReportFormatter::new()
            .format(&record().with_tests(TestResults::default()))
            .unwrap();
        assert!(block.ends_with("\tColumn [name]:\n\nTest results:\n"));
    }

    #[test]
    fn test_fields_with_line_breaks() {
        let config = ReportConfig::default();
        assert!(fields_with_line_breaks(&record(), &config).is_empty());
        assert!(fields_with_line_breaks(&record().with_tests(tests()), &config).is_empty());

        let mut bad = record();
        bad.profile.column_profiles[0]
            .results
            .insert("histogram", "a\nb");
        assert_eq!(
            fields_with_line_breaks(&bad, &config),
            vec!["column 'age' metric 'histogram'".to_string()]
        );
    }

    #[test]
    fn test_line_breaks_in_test_results() {
        let bad_tests = TestResults {
            table_tests: vec![TableTestResult::new(
                "row\ncount",
                vec![Validation::evaluate(3, ComparisonOperator::Ge, 1)],
            )],
            column_tests: vec![ColumnTests::new(vec![ColumnTestResult::new(
                "c\n1",
                "bad\nname",
                vec![Validation::evaluate("a\nb", ComparisonOperator::Eq, "a")],
            )])],
        };
        let record = record().with_tests(bad_tests);

        assert_eq!(
            fields_with_line_breaks(&record, &ReportConfig::default()),
            vec![
                "table test 'row\\ncount'".to_string(),
                "column test 'bad\\nname' on 'c\\n1'".to_string(),
                "column test 'bad\\nname' on 'c\\n1' validation".to_string(),
            ]
        );
        assert!(fields_with_line_breaks(&record, &ReportConfig::profiles_only()).is_empty());
    }
}
