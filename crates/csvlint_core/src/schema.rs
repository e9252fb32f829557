//! Schema types: column rules and the schemas that group them.
//!
//! A [`Schema`] is an ordered list of [`ColumnRule`]s identified by name. Every
//! rule carries a closed [`ColumnKind`] resolved once from the declared type
//! string, and an optional [`SemanticRule`] resolved once from the column
//! name, so that per-cell validation never inspects type names again.

use crate::{ConfigError, Result};
use serde::Serialize;
use std::fmt;

/// Normalizes a column or header name for case-insensitive matching.
///
/// Strips a leading UTF-8 byte order mark, trims whitespace and folds case.
pub fn normalize_name(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Resolved type of a column.
///
/// The declared vocabulary (`int`, `varchar`, `nvarchar`, `datetime`, ...) is
/// collapsed onto these variants by [`ColumnKind::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// 32-bit signed integer (`int`, `integer`)
    Integer,
    /// Finite floating point number (`float`)
    Float,
    /// Plain decimal literal (`decimal`)
    Decimal,
    /// Calendar date (`date`)
    Date,
    /// Date with optional time of day (`datetime`)
    DateTime,
    /// Free text with an optional character limit (`string`, `varchar`, `nvarchar`)
    String {
        /// Maximum length in characters; `None` means unbounded
        max_length: Option<usize>,
    },
    /// Value restricted to the column's allowed values (`enum`)
    Enumeration,
}

impl ColumnKind {
    /// Resolves a declared type name into a column kind.
    ///
    /// Matching is trimmed and case-insensitive. A `max_length` of zero is
    /// treated as unbounded and is ignored for non-string kinds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedSchemaType`] for any other type name.
    pub fn resolve(column: &str, type_name: &str, max_length: Option<usize>) -> Result<Self> {
        let kind = match type_name.trim().to_lowercase().as_str() {
            "int" | "integer" => ColumnKind::Integer,
            "float" => ColumnKind::Float,
            "decimal" => ColumnKind::Decimal,
            "date" => ColumnKind::Date,
            "datetime" => ColumnKind::DateTime,
            "string" | "varchar" | "nvarchar" => ColumnKind::String {
                max_length: max_length.filter(|len| *len > 0),
            },
            "enum" | "enumeration" => ColumnKind::Enumeration,
            _ => return Err(ConfigError::unsupported_type(column, type_name)),
        };
        Ok(kind)
    }

    /// Returns true for kinds that may carry an enumeration override.
    pub fn is_string_like(&self) -> bool {
        matches!(self, ColumnKind::String { .. })
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Integer => write!(f, "integer"),
            ColumnKind::Float => write!(f, "float"),
            ColumnKind::Decimal => write!(f, "decimal"),
            ColumnKind::Date => write!(f, "date"),
            ColumnKind::DateTime => write!(f, "datetime"),
            ColumnKind::String { max_length: None } => write!(f, "string"),
            ColumnKind::String {
                max_length: Some(len),
            } => write!(f, "string({len})"),
            ColumnKind::Enumeration => write!(f, "enumeration"),
        }
    }
}

/// Domain-specific check selected by column name.
///
/// Semantic rules run before the type check; a failing semantic rule is the
/// only issue reported for the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticRule {
    /// Multi-format date (`date`)
    Date,
    /// Multi-format date within the last 120 years (`birthdate`, `dateofbirth`)
    BirthDate,
    /// Basic email address (`email`)
    Email,
    /// North American or international phone number (`phonenumber`)
    PhoneNumber,
    /// 9-digit Known Traveler Number (`tsaprecheck`, `knowntravelernumber`, `ktn`)
    KnownTravelerNumber,
    /// 7-digit Redress Number (`redressnumber`)
    RedressNumber,
}

impl SemanticRule {
    /// Selects the semantic rule for a column name, if any.
    pub fn for_column(name: &str) -> Option<Self> {
        match normalize_name(name).as_str() {
            "birthdate" | "dateofbirth" => Some(SemanticRule::BirthDate),
            "date" => Some(SemanticRule::Date),
            "email" => Some(SemanticRule::Email),
            "phonenumber" => Some(SemanticRule::PhoneNumber),
            "tsaprecheck" | "knowntravelernumber" | "ktn" => {
                Some(SemanticRule::KnownTravelerNumber)
            }
            "redressnumber" => Some(SemanticRule::RedressNumber),
            _ => None,
        }
    }
}

/// Contract for a single schema column.
///
/// Rules are only built through [`ColumnRule::new`], [`ColumnRule::enumeration`]
/// and [`ColumnRule::with_allowed_values`], which enforce that enumerations
/// always have at least one allowed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRule {
    name: String,
    normalized: String,
    kind: ColumnKind,
    allowed_values: Vec<String>,
    semantic: Option<SemanticRule>,
}

impl ColumnRule {
    /// Creates a rule for a non-enumeration column.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyEnumerationDefinition`] when `kind` is
    /// [`ColumnKind::Enumeration`]; use [`ColumnRule::enumeration`] instead.
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Result<Self> {
        let name = name.into();
        if kind == ColumnKind::Enumeration {
            return Err(ConfigError::empty_enumeration(name));
        }
        Ok(Self::from_parts(name, kind, Vec::new()))
    }

    /// Creates an enumeration column restricted to `values`.
    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(ConfigError::empty_enumeration(name));
        }
        Ok(Self::from_parts(name, ColumnKind::Enumeration, values))
    }

    /// Layers an enumeration override on top of a string-like column.
    ///
    /// For an enumeration column the allowed values are replaced.
    pub fn with_allowed_values<I, S>(mut self, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !(self.kind.is_string_like() || self.kind == ColumnKind::Enumeration) {
            return Err(ConfigError::InvalidEnumerationOverride {
                column: self.name,
                kind: self.kind.to_string(),
            });
        }
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(ConfigError::empty_enumeration(self.name));
        }
        self.allowed_values = values;
        Ok(self)
    }

    fn from_parts(name: String, kind: ColumnKind, allowed_values: Vec<String>) -> Self {
        Self {
            normalized: normalize_name(&name),
            semantic: SemanticRule::for_column(&name),
            name,
            kind,
            allowed_values,
        }
    }

    /// Column name as configured.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column name trimmed and case folded, used for header matching.
    pub fn normalized_name(&self) -> &str {
        &self.normalized
    }

    /// Resolved column kind.
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Maximum length for string columns.
    pub fn max_length(&self) -> Option<usize> {
        match self.kind {
            ColumnKind::String { max_length } => max_length,
            _ => None,
        }
    }

    /// Allowed values; empty when the column is not enumerated.
    pub fn allowed_values(&self) -> &[String] {
        &self.allowed_values
    }

    /// Semantic rule selected from the column name.
    pub fn semantic(&self) -> Option<SemanticRule> {
        self.semantic
    }
}

/// A named, ordered set of column rules.
///
/// Column order is configuration order; header matching is by name, so it
/// does not need to match the order of columns in a CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
    columns: Vec<ColumnRule>,
}

impl Schema {
    /// Creates a schema from its rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateColumn`] when two columns share a
    /// normalized name.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnRule>) -> Result<Self> {
        let name = name.into();
        for (idx, column) in columns.iter().enumerate() {
            if columns[..idx]
                .iter()
                .any(|earlier| earlier.normalized == column.normalized)
            {
                return Err(ConfigError::DuplicateColumn {
                    schema: name,
                    column: column.name.clone(),
                });
            }
        }
        Ok(Self { name, columns })
    }

    /// Schema name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column rules in configuration order.
    pub fn columns(&self) -> &[ColumnRule] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Looks up a column by name, ignoring case and surrounding whitespace.
    pub fn column(&self, name: &str) -> Option<&ColumnRule> {
        let normalized = normalize_name(name);
        self.columns.iter().find(|c| c.normalized == normalized)
    }

    pub(crate) fn column_position(&self, name: &str) -> Option<usize> {
        let normalized = normalize_name(name);
        self.columns.iter().position(|c| c.normalized == normalized)
    }

    pub(crate) fn replace_column(&mut self, position: usize, rule: ColumnRule) {
        self.columns[position] = rule;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_sql_vocabulary() {
        assert_eq!(
            ColumnKind::resolve("a", "Int", None).unwrap(),
            ColumnKind::Integer
        );
        assert_eq!(
            ColumnKind::resolve("a", " NVARCHAR ", Some(50)).unwrap(),
            ColumnKind::String {
                max_length: Some(50)
            }
        );
        assert_eq!(
            ColumnKind::resolve("a", "varchar", Some(0)).unwrap(),
            ColumnKind::String { max_length: None }
        );
        assert_eq!(
            ColumnKind::resolve("a", "DateTime", None).unwrap(),
            ColumnKind::DateTime
        );
        assert_eq!(
            ColumnKind::resolve("a", "enum", None).unwrap(),
            ColumnKind::Enumeration
        );
    }

    #[test]
    fn test_resolve_unsupported_type() {
        let err = ColumnKind::resolve("Flag", "bit", None).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnsupportedSchemaType {
                column: "Flag".to_string(),
                type_name: "bit".to_string(),
            }
        );
    }

    #[test]
    fn test_semantic_rule_by_name() {
        assert_eq!(
            SemanticRule::for_column("DateOfBirth"),
            Some(SemanticRule::BirthDate)
        );
        assert_eq!(SemanticRule::for_column(" KTN "), Some(SemanticRule::KnownTravelerNumber));
        assert_eq!(SemanticRule::for_column("Date"), Some(SemanticRule::Date));
        assert_eq!(SemanticRule::for_column("HireDate"), None);
        assert_eq!(SemanticRule::for_column("EmailAddress"), None);
    }

    #[test]
    fn test_enumeration_requires_values() {
        let err = ColumnRule::enumeration("Gender", Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyEnumerationDefinition { .. }));

        let err = ColumnRule::new("Gender", ColumnKind::Enumeration).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyEnumerationDefinition { .. }));
    }

    #[test]
    fn test_override_only_on_string_columns() {
        let rule = ColumnRule::new("Gender", ColumnKind::String { max_length: None })
            .unwrap()
            .with_allowed_values(["male", "female"])
            .unwrap();
        assert_eq!(rule.allowed_values(), ["male", "female"]);

        let err = ColumnRule::new("Age", ColumnKind::Integer)
            .unwrap()
            .with_allowed_values(["1"])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnumerationOverride { .. }));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let columns = vec![
            ColumnRule::new("Name", ColumnKind::String { max_length: None }).unwrap(),
            ColumnRule::new(" name", ColumnKind::String { max_length: None }).unwrap(),
        ];
        let err = Schema::new("People", columns).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateColumn { .. }));
    }

    #[test]
    fn test_column_lookup_is_case_insensitive() {
        let schema = Schema::new(
            "People",
            vec![ColumnRule::new("HireDate", ColumnKind::DateTime).unwrap()],
        )
        .unwrap();
        assert_eq!(schema.column("hiredate").map(|c| c.name()), Some("HireDate"));
        assert!(schema.column("fired").is_none());
    }

    #[test]
    fn test_normalize_name_strips_bom() {
        assert_eq!(normalize_name("\u{feff} EmployeeId "), "employeeid");
    }
}
