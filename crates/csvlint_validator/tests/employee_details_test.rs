//! Integration tests for the lint engine.
//!
//! These tests run complete CSV documents through the sample registry and
//! through hand-built schemas.

use chrono::NaiveDate;
use csvlint_core::samples::builtin_registry;
use csvlint_core::{ColumnBuilder, IssueCategory, SchemaBuilder, SchemaRegistry};
use csvlint_validator::{CsvLinter, LintError, LintOptions};
use pretty_assertions::assert_eq;
use std::sync::Arc;

const EMPLOYEE_HEADER: &str = "EmployeeId,Name,HireDate,Salary,Salutation,Gender";

fn sample_linter() -> CsvLinter {
    let reference = NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    CsvLinter::new(Arc::new(builtin_registry().unwrap()))
        .with_options(LintOptions::new().with_reference_time(reference))
}

fn employee_csv(rows: &[&str]) -> String {
    let mut csv = String::from(EMPLOYEE_HEADER);
    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }
    csv.push('\n');
    csv
}

#[test]
fn test_valid_employee_row() {
    let csv = employee_csv(&["1,John Doe,1990-01-01,55000.00,Mr.,male"]);
    let report = sample_linter()
        .lint_bytes("EmployeeDetails", csv.as_bytes())
        .unwrap();

    assert!(report.passed(), "unexpected issues: {:?}", report.messages());
    assert_eq!(report.stats.rows_validated, 1);
    assert_eq!(report.stats.columns_matched, 6);
}

#[test]
fn test_invalid_employee_row() {
    let csv = employee_csv(&["1,John Doe,not-a-date,55000.00,Mr.,unknown"]);
    let report = sample_linter()
        .lint_bytes("EmployeeDetails", csv.as_bytes())
        .unwrap();

    assert_eq!(
        report.messages(),
        vec![
            "Line 1: HireDate value 'not-a-date' is not a valid date.".to_string(),
            "Line 1: Gender value 'unknown' is not a valid value. Expected values: male, female, x, u."
                .to_string(),
        ]
    );
    assert!(report.issues.iter().all(|i| i.line == Some(1)));
    assert!(report
        .issues
        .iter()
        .all(|i| i.category == IssueCategory::Field));
}

#[test]
fn test_header_matching_is_case_and_whitespace_insensitive() {
    let registry = SchemaRegistry::builder()
        .schema(
            SchemaBuilder::new("Hires")
                .column(ColumnBuilder::new("EmployeeId", "int"))
                .column(ColumnBuilder::new("Name", "nvarchar"))
                .column(ColumnBuilder::new("HireDate", "datetime")),
        )
        .build()
        .unwrap();
    let linter = CsvLinter::new(Arc::new(registry));

    let report = linter
        .lint_bytes("Hires", b"EmployeeId, NAME , hiredate\n7,Ada,2020-02-29\n")
        .unwrap();

    assert!(report.passed(), "unexpected issues: {:?}", report.messages());
    assert_eq!(report.stats.columns_matched, 3);
}

#[test]
fn test_missing_column_reported_once() {
    let csv = "EmployeeId,Name,HireDate,Salary,Salutation\n\
               1,John Doe,1990-01-01,55000.00,Mr.\n\
               2,Jane Doe,1991-02-02,61000.00,Ms.\n\
               3,Sam Roe,1992-03-03,48000.00,Mx.\n";
    let report = sample_linter()
        .lint_bytes("EmployeeDetails", csv.as_bytes())
        .unwrap();

    assert_eq!(
        report.messages(),
        vec![
            "Missing expected column: Gender".to_string(),
            "Column count mismatch: schema 'EmployeeDetails' expects 6 columns but the header has 5"
                .to_string(),
        ]
    );
    assert_eq!(report.stats.rows_validated, 3);
}

#[test]
fn test_reordered_columns_are_matched_by_name() {
    let csv = "Gender,Salutation,Salary,HireDate,Name,EmployeeId\n\
               female,Ms.,100.5,2001-07-04,Jane Doe,2\n";
    let report = sample_linter()
        .lint_bytes("EmployeeDetails", csv.as_bytes())
        .unwrap();

    assert!(report.passed(), "unexpected issues: {:?}", report.messages());
}

#[test]
fn test_enumeration_checked_only_after_type() {
    let registry = SchemaRegistry::builder()
        .schema(
            SchemaBuilder::new("Badges")
                .column(ColumnBuilder::new("Level", "varchar").max_length(4)),
        )
        .enumeration("Badges", "Level", ["gold", "blue"])
        .build()
        .unwrap();
    let linter = CsvLinter::new(Arc::new(registry));

    let report = linter
        .lint_bytes("Badges", b"Level\nplatinum\nred\ngold\n")
        .unwrap();

    assert_eq!(
        report.messages(),
        vec![
            "Line 1: Level value 'platinum' exceeds the maximum length of 4.".to_string(),
            "Line 2: Level value 'red' is not a valid value. Expected values: gold, blue."
                .to_string(),
        ]
    );
}

#[test]
fn test_passport_birth_dates() {
    let csv = "EmployeeId,PassportID,PassportCountry,PassportIssuingAuthority,DateOfBirth,Gender\n\
               1,X1,US,State,01-Jan-1990,female\n\
               2,X2,US,State,01-Jan-2999,male\n\
               3,X3,US,State,01-Jan-1890,x\n\
               4,X4,US,State,1990-13-01,u\n";
    let report = sample_linter()
        .lint_bytes("Passport", csv.as_bytes())
        .unwrap();
    let messages = report.messages();

    assert_eq!(messages.len(), 3);
    assert_eq!(
        messages[0],
        "Line 2: DateOfBirth value '01-Jan-2999' is not a logical birth date."
    );
    assert_eq!(
        messages[1],
        "Line 3: DateOfBirth value '01-Jan-1890' is not a logical birth date."
    );
    assert!(messages[2].starts_with("Line 4: DateOfBirth value '1990-13-01' is not a valid date."));
}

#[test]
fn test_repeated_runs_are_identical() {
    let csv = employee_csv(&[
        "1,John Doe,not-a-date,55000.00,Mr.,unknown",
        "x,Jane Doe,1990-01-01,abc,Ms.,female",
    ]);
    let linter = sample_linter();

    let first = linter
        .lint_bytes("EmployeeDetails", csv.as_bytes())
        .unwrap();
    let second = linter
        .lint_bytes("EmployeeDetails", csv.as_bytes())
        .unwrap();

    assert_eq!(first.messages(), second.messages());
    assert_eq!(first.messages().len(), 4);
}

#[test]
fn test_unknown_schema() {
    let result = sample_linter().lint_bytes("Payroll", b"A,B\n1,2\n");
    assert!(matches!(result, Err(LintError::Config(_))));
}

#[test]
fn test_empty_input() {
    let report = sample_linter().lint_bytes("EmployeeDetails", b"").unwrap();

    assert!(report.aborted);
    assert_eq!(report.messages(), vec!["Failed to read CSV header".to_string()]);
    assert_eq!(report.stats.rows_validated, 0);
}

#[test]
fn test_parallel_runs_share_registry() {
    let linter = sample_linter();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let linter = linter.clone();
            std::thread::spawn(move || {
                let csv = employee_csv(&[&format!("{},Worker,2020-01-01,1.00,Mx.,x", i)]);
                linter
                    .lint_bytes("EmployeeDetails", csv.as_bytes())
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().passed());
    }
}
