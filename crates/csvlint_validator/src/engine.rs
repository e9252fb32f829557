//! Main lint engine.
//!
//! This module provides the `CsvLinter` that resolves a schema, reconciles
//! the header once and streams every data row through the row validator.

use crate::{FieldValidator, Result, RowValidator, header};
use chrono::NaiveDateTime;
use csv::{ErrorKind, ReaderBuilder};
use csvlint_core::{Issue, LintReport, Schema, SchemaRegistry, normalize_name};
use std::io::Read;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Options for a lint run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintOptions {
    /// Stop before the data rows when the header has any structural issue
    pub strict_header: bool,

    /// Maximum number of data rows to validate
    pub row_limit: Option<usize>,

    /// Field delimiter
    pub delimiter: u8,

    /// Pinned "now" for birth-date bounds; the local time at run start if unset
    pub reference_time: Option<NaiveDateTime>,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            strict_header: false,
            row_limit: None,
            delimiter: b',',
            reference_time: None,
        }
    }
}

impl LintOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets strict header mode.
    pub fn with_strict_header(mut self, strict: bool) -> Self {
        self.strict_header = strict;
        self
    }

    /// Limits the number of data rows validated.
    pub fn with_row_limit(mut self, limit: usize) -> Self {
        self.row_limit = Some(limit);
        self
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Pins the reference time used for birth-date bounds.
    pub fn with_reference_time(mut self, reference_time: NaiveDateTime) -> Self {
        self.reference_time = Some(reference_time);
        self
    }
}

/// Lints CSV input against schemas from a shared registry.
///
/// Cheap to clone; clones share the registry.
///
/// # Example
///
/// ```rust
/// use csvlint_core::{ColumnBuilder, SchemaBuilder, SchemaRegistry};
/// use csvlint_validator::CsvLinter;
/// use std::sync::Arc;
///
/// let registry = SchemaRegistry::builder()
///     .schema(
///         SchemaBuilder::new("Orders")
///             .column(ColumnBuilder::new("OrderId", "int"))
///             .column(ColumnBuilder::new("Email", "varchar").max_length(64)),
///     )
///     .build()
///     .unwrap();
///
/// let linter = CsvLinter::new(Arc::new(registry));
/// let report = linter
///     .lint_bytes("Orders", b"OrderId,Email\n1,jane@example.com\nx,nope\n")
///     .unwrap();
///
/// assert!(!report.passed());
/// for message in report.messages() {
///     println!("{}", message);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CsvLinter {
    registry: Arc<SchemaRegistry>,
    options: LintOptions,
}

impl CsvLinter {
    /// Creates a linter with default options.
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self {
            registry,
            options: LintOptions::default(),
        }
    }

    /// Replaces the run options.
    pub fn with_options(mut self, options: LintOptions) -> Self {
        self.options = options;
        self
    }

    /// Registry the linter resolves schema names against.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Current run options.
    pub fn options(&self) -> &LintOptions {
        &self.options
    }

    /// Lints CSV input against a named schema.
    ///
    /// An unknown schema name is the only error; every problem with the data
    /// itself is returned as an issue in the report.
    pub fn lint<R: Read>(&self, schema_name: &str, reader: R) -> Result<LintReport> {
        let schema = self.registry.get_schema(schema_name)?;
        info!(schema = schema.name(), "Starting lint run");

        let start = Instant::now();
        let mut report = self.run(schema, reader);
        report.stats.duration_ms = start.elapsed().as_millis() as u64;

        if report.aborted {
            warn!(
                schema = schema.name(),
                issues = report.issues.len(),
                rows = report.stats.rows_validated,
                "Lint run aborted"
            );
        }
        info!(
            schema = schema.name(),
            issues = report.issues.len(),
            rows = report.stats.rows_validated,
            duration_ms = report.stats.duration_ms,
            "Lint run finished"
        );

        Ok(report)
    }

    /// Lints an in-memory CSV document.
    pub fn lint_bytes(&self, schema_name: &str, bytes: &[u8]) -> Result<LintReport> {
        self.lint(schema_name, bytes)
    }

    fn run<R: Read>(&self, schema: &Schema, reader: R) -> LintReport {
        let mut report = LintReport::new(schema.name());
        let mut csv = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.options.delimiter)
            .from_reader(reader);

        let header = match csv.headers() {
            Ok(header) if !header.iter().all(|cell| normalize_name(cell).is_empty()) => {
                header.clone()
            }
            Ok(_) => {
                debug!(schema = schema.name(), "Input has no header row");
                report.push(Issue::structural("Failed to read CSV header"));
                report.aborted = true;
                return report;
            }
            Err(e) => {
                debug!(schema = schema.name(), error = %e, "Failed to read header row");
                report.push(Issue::structural("Failed to read CSV header"));
                report.aborted = true;
                return report;
            }
        };

        let reconciliation = header::reconcile(schema, header.iter());
        debug!(
            schema = schema.name(),
            matched = reconciliation.matched,
            header_issues = reconciliation.issues.len(),
            "Header reconciled"
        );
        report.stats.columns_matched = reconciliation.matched;

        let header_clean = reconciliation.is_clean();
        report.issues.extend(reconciliation.issues);
        if self.options.strict_header && !header_clean {
            report.aborted = true;
            return report;
        }

        let reference = self
            .options
            .reference_time
            .map(FieldValidator::new)
            .unwrap_or_else(FieldValidator::now);
        debug!(
            schema = schema.name(),
            reference_time = %reference.reference_time(),
            "Birth dates judged against reference time"
        );
        let rows = RowValidator::new(reference);

        for (offset, record) in csv.records().enumerate() {
            let line = offset + 1;
            if self.options.row_limit.is_some_and(|limit| offset >= limit) {
                break;
            }

            match record {
                Ok(record) => {
                    let (issues, cells) =
                        rows.check_row(schema, &reconciliation.index, line, &record);
                    report.issues.extend(issues);
                    report.stats.rows_validated += 1;
                    report.stats.cells_checked += cells;
                }
                Err(e) => {
                    let fatal = e.is_io_error();
                    let reason = match e.kind() {
                        ErrorKind::Utf8 { err, .. } => err.to_string(),
                        _ => e.to_string(),
                    };
                    report.push(Issue::structural_at(
                        line,
                        format!("Failed to read row: {}", reason),
                    ));
                    if fatal {
                        report.aborted = true;
                        break;
                    }
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use csvlint_core::{ColumnBuilder, IssueCategory, SchemaBuilder};
    use pretty_assertions::assert_eq;
    use std::io;

    fn linter() -> CsvLinter {
        let registry = SchemaRegistry::builder()
            .schema(
                SchemaBuilder::new("Contacts")
                    .column(ColumnBuilder::new("Id", "int"))
                    .column(ColumnBuilder::new("Email", "varchar").max_length(40))
                    .column(ColumnBuilder::new("DateOfBirth", "varchar")),
            )
            .build()
            .unwrap();
        let now = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        CsvLinter::new(Arc::new(registry))
            .with_options(LintOptions::new().with_reference_time(now))
    }

    #[test]
    fn test_valid_input() {
        let report = linter()
            .lint_bytes(
                "Contacts",
                b"Id,Email,DateOfBirth\n1,a@example.com,1990-01-01\n2,b@example.com,02/03/1985\n",
            )
            .unwrap();

        assert!(report.passed(), "unexpected issues: {:?}", report.messages());
        assert!(!report.aborted);
        assert_eq!(report.stats.rows_validated, 2);
        assert_eq!(report.stats.columns_matched, 3);
        assert_eq!(report.stats.cells_checked, 6);
    }

    #[test]
    fn test_blank_lines_are_not_counted() {
        let report = linter()
            .lint_bytes(
                "Contacts",
                b"Id,Email,DateOfBirth\n\n1,a@example.com,1990-01-01\n\nx,a@example.com,1990-01-01\n",
            )
            .unwrap();

        assert_eq!(
            report.messages(),
            vec!["Line 2: Id value 'x' is not a valid integer.".to_string()]
        );
    }

    #[test]
    fn test_unknown_schema_is_an_error() {
        let err = linter().lint_bytes("Nope", b"Id\n1\n").unwrap_err();
        assert_eq!(err.to_string(), "Schema not found: Nope");
    }

    #[test]
    fn test_empty_input_aborts() {
        let report = linter().lint_bytes("Contacts", b"").unwrap();
        assert_eq!(report.messages(), vec!["Failed to read CSV header".to_string()]);
        assert!(report.aborted);
        assert_eq!(report.issues[0].category, IssueCategory::Structural);
    }

    #[test]
    fn test_missing_column_reported_once() {
        let report = linter()
            .lint_bytes("Contacts", b"Id,Email\n1,a@example.com\n2,b@example.com\n")
            .unwrap();

        let missing: Vec<_> = report
            .messages()
            .into_iter()
            .filter(|m| m.starts_with("Missing expected column"))
            .collect();
        assert_eq!(missing, vec!["Missing expected column: DateOfBirth".to_string()]);
        assert_eq!(report.stats.rows_validated, 2);
        assert!(!report.aborted);
    }

    #[test]
    fn test_strict_header_stops_before_rows() {
        let report = linter()
            .with_options(LintOptions::new().with_strict_header(true))
            .lint_bytes("Contacts", b"Id,Email\nx,a@example.com\n")
            .unwrap();

        assert!(report.aborted);
        assert_eq!(report.stats.rows_validated, 0);
        assert!(report
            .issues
            .iter()
            .all(|i| i.category == IssueCategory::Structural));
    }

    #[test]
    fn test_row_limit() {
        let linter = CsvLinter::new(linter().registry.clone())
            .with_options(LintOptions::new().with_row_limit(1));
        let report = linter
            .lint_bytes("Contacts", b"Id,Email,DateOfBirth\n1,a@b.com,1990-01-01\nx,a@b.com,1990-01-01\n")
            .unwrap();

        assert!(report.passed());
        assert_eq!(report.stats.rows_validated, 1);
        assert!(!report.aborted);
    }

    #[test]
    fn test_custom_delimiter() {
        let report = linter()
            .with_options(LintOptions::new().with_delimiter(b';').with_reference_time(
                NaiveDate::from_ymd_opt(2026, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            ))
            .lint_bytes("Contacts", b"Id;Email;DateOfBirth\n1;a@example.com;1990-01-01\n")
            .unwrap();
        assert!(report.passed(), "unexpected issues: {:?}", report.messages());
    }

    #[test]
    fn test_invalid_utf8_row_continues() {
        let mut input = b"Id,Email,DateOfBirth\n".to_vec();
        input.extend_from_slice(b"1,\xff\xfe,1990-01-01\n");
        input.extend_from_slice(b"y,a@example.com,1990-01-01\n");

        let report = linter().lint_bytes("Contacts", &input).unwrap();
        let messages = report.messages();

        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("Line 1: Failed to read row: "));
        assert_eq!(messages[1], "Line 2: Id value 'y' is not a valid integer.");
        assert!(!report.aborted);
    }

    struct FailingReader {
        data: &'static [u8],
        sent: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.sent {
                return Err(io::Error::other("disk on fire"));
            }
            self.sent = true;
            buf[..self.data.len()].copy_from_slice(self.data);
            Ok(self.data.len())
        }
    }

    #[test]
    fn test_io_error_aborts() {
        let reader = FailingReader {
            data: b"Id,Email,DateOfBirth\n1,a@example.com,1990-01-01\n",
            sent: false,
        };
        let report = linter().lint("Contacts", reader).unwrap();

        assert!(report.aborted);
        let last = report.messages().pop().unwrap();
        assert!(last.starts_with("Line 2: Failed to read row: "), "{}", last);
        assert_eq!(report.stats.rows_validated, 1);
    }

    #[test]
    fn test_date_named_column() {
        let registry = SchemaRegistry::builder()
            .schema(
                SchemaBuilder::new("Shipments")
                    .column(ColumnBuilder::new("Id", "int"))
                    .column(ColumnBuilder::new("Date", "varchar")),
            )
            .build()
            .unwrap();
        let report = CsvLinter::new(Arc::new(registry))
            .lint_bytes("Shipments", b"Id,Date\n1,15-Mar-55\n2,2024/13/01\n")
            .unwrap();

        assert_eq!(
            report.messages(),
            vec![
                "Line 2: Date value '2024/13/01' is not a valid date. Expected formats: \
                 dd-MMM-yyyy, dd-MMM-yy, yyyy-MM-dd, yyyy/MM/dd, dd/MM/yyyy, M/d/yyyy h:mm:ss tt, M/d/yyyy."
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_linter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CsvLinter>();
    }
}
