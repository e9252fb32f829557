//! Header reconciliation.
//!
//! Maps the CSV header onto a schema once per run: which schema columns are
//! present and where, and which structural issues the header carries.

use csvlint_core::{Issue, Schema, normalize_name};
use std::collections::HashMap;

/// Normalized column name to zero-based header position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
    width: usize,
}

impl HeaderIndex {
    /// Builds an index from raw header cells.
    ///
    /// Returns the index and the normalized names that appeared more than
    /// once; the first position of a duplicated name wins.
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a str>) -> (Self, Vec<String>) {
        let mut positions = HashMap::new();
        let mut duplicates = Vec::new();
        let mut width = 0;

        for (position, cell) in cells.into_iter().enumerate() {
            width = position + 1;
            let normalized = normalize_name(cell);
            if positions.contains_key(&normalized) {
                if !duplicates.contains(&normalized) {
                    duplicates.push(normalized);
                }
                continue;
            }
            positions.insert(normalized, position);
        }

        (Self { positions, width }, duplicates)
    }

    /// Position of a column, looked up by any spelling of its name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(&normalize_name(name)).copied()
    }

    /// Position of an already normalized column name.
    pub fn position_normalized(&self, normalized: &str) -> Option<usize> {
        self.positions.get(normalized).copied()
    }

    /// Number of cells in the header.
    pub fn width(&self) -> usize {
        self.width
    }
}

/// Outcome of matching a header against a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Positions of the header's columns
    pub index: HeaderIndex,

    /// Structural issues, in schema column order
    pub issues: Vec<Issue>,

    /// Number of schema columns present in the header
    pub matched: usize,
}

impl Reconciliation {
    /// Returns true if the header carried no structural issue.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Matches header cells against a schema.
///
/// Emits one issue per duplicated header name, one per schema column absent
/// from the header, and one if the header width differs from the schema.
pub fn reconcile<'a>(schema: &Schema, cells: impl IntoIterator<Item = &'a str>) -> Reconciliation {
    let (index, duplicates) = HeaderIndex::from_cells(cells);
    let mut issues: Vec<Issue> = duplicates
        .iter()
        .map(|name| Issue::structural(format!("Duplicate column in header: {}", name)))
        .collect();

    let mut matched = 0;
    for column in schema.columns() {
        if index.position_normalized(column.normalized_name()).is_some() {
            matched += 1;
        } else {
            issues.push(Issue::structural(format!(
                "Missing expected column: {}",
                column.name()
            )));
        }
    }

    if index.width() != schema.len() {
        issues.push(Issue::structural(format!(
            "Column count mismatch: schema '{}' expects {} columns but the header has {}",
            schema.name(),
            schema.len(),
            index.width()
        )));
    }

    Reconciliation {
        index,
        issues,
        matched,
    }
}
