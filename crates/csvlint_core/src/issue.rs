//! Issues and lint reports.
//!
//! An [`Issue`] is one reported defect. A [`LintReport`] collects the issues
//! of a run in arrival order together with run statistics.

use std::fmt;

/// Broad class of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueCategory {
    /// The input does not match the schema's shape (header problems)
    Structural,
    /// A single cell failed a type, length, enumeration or format rule
    Field,
}

/// One reported defect.
///
/// Row-level issues carry the 1-based data line they were found on (the
/// header is not counted); header-level issues carry no line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Data line number, if the issue belongs to a row
    pub line: Option<usize>,
    /// Issue class
    pub category: IssueCategory,
    /// Human-readable description
    pub message: String,
}

impl Issue {
    /// Creates a header-level structural issue.
    pub fn structural(message: impl Into<String>) -> Self {
        Self {
            line: None,
            category: IssueCategory::Structural,
            message: message.into(),
        }
    }

    /// Creates a field issue on a data line.
    pub fn field(line: usize, message: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            category: IssueCategory::Field,
            message: message.into(),
        }
    }

    /// Creates a structural issue tied to a data line.
    pub fn structural_at(line: usize, message: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            category: IssueCategory::Structural,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Line {}: {}", line, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Statistics about a lint run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintStats {
    /// Number of data rows validated
    pub rows_validated: usize,

    /// Number of schema columns found in the header
    pub columns_matched: usize,

    /// Number of cells checked
    pub cells_checked: usize,

    /// Run duration in milliseconds
    pub duration_ms: u64,
}

/// Result of linting one CSV input against one schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintReport {
    /// Schema the input was checked against
    pub schema: String,

    /// Issues in arrival order
    pub issues: Vec<Issue>,

    /// Whether row processing stopped before the end of the input
    pub aborted: bool,

    /// Run statistics
    pub stats: LintStats,
}

impl LintReport {
    /// Creates an empty report for a schema.
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            issues: Vec::new(),
            aborted: false,
            stats: LintStats::default(),
        }
    }

    /// Returns true when no issue was found.
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }

    /// Adds an issue to the report.
    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Issues rendered as `"Line {n}: {message}"` or bare messages.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }

    /// Issues that belong to the header rather than to a data line.
    pub fn header_issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.line.is_none())
    }

    /// Issues tied to a data line, including rows that could not be read.
    pub fn row_issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.line.is_some())
    }
}
