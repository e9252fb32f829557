//! Row validation.

use crate::{FieldValidator, FieldViolation, HeaderIndex};
use csv::StringRecord;
use csvlint_core::{Issue, Schema};

/// Validates data rows against a schema through a reconciled header.
#[derive(Debug, Clone, Copy)]
pub struct RowValidator {
    fields: FieldValidator,
}

impl RowValidator {
    /// Creates a row validator on top of a field validator.
    pub fn new(fields: FieldValidator) -> Self {
        Self { fields }
    }

    /// Validates one data row.
    ///
    /// Schema columns absent from the header are skipped; they were reported
    /// once by the header reconciler. Each cell yields at most one issue.
    pub fn validate_row(
        &self,
        schema: &Schema,
        index: &HeaderIndex,
        line: usize,
        row: &StringRecord,
    ) -> Vec<Issue> {
        self.check_row(schema, index, line, row).0
    }

    /// Validates one data row and also returns the number of cells checked.
    pub(crate) fn check_row(
        &self,
        schema: &Schema,
        index: &HeaderIndex,
        line: usize,
        row: &StringRecord,
    ) -> (Vec<Issue>, usize) {
        let mut issues = Vec::new();
        let mut cells = 0;

        for rule in schema.columns() {
            let Some(position) = index.position_normalized(rule.normalized_name()) else {
                continue;
            };

            let violation = match row.get(position) {
                Some(cell) => {
                    cells += 1;
                    self.fields.validate(rule, cell.trim())
                }
                None => Some(FieldViolation::MissingValue {
                    field: rule.name().to_string(),
                    expected: rule.kind(),
                }),
            };

            if let Some(violation) = violation {
                issues.push(Issue::field(line, violation.to_string()));
            }
        }

        (issues, cells)
    }
}
