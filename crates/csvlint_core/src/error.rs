//! Error types for schema configuration.
//!
//! These errors describe caller misconfiguration: an unknown schema, a column
//! declared with a type the linter does not understand, or an enumeration
//! without values. They are kept apart from data-quality findings, which are
//! reported as [`Issue`](crate::Issue)s instead.

use thiserror::Error;

/// Result type for schema configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main error type for schema configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No schema is registered under the requested name
    #[error("Schema not found: {0}")]
    SchemaNotFound(String),

    /// A column declares a type outside the supported vocabulary
    #[error("Unsupported type '{type_name}' for column '{column}' in schema")]
    UnsupportedSchemaType {
        /// Column carrying the type
        column: String,
        /// Declared type name as written in the configuration
        type_name: String,
    },

    /// An enumeration was declared without any allowed value
    #[error("Enumeration for column '{column}' has no allowed values")]
    EmptyEnumerationDefinition {
        /// Column declaring the enumeration
        column: String,
    },

    /// Two schemas were registered under the same name
    #[error("Schema '{0}' is already registered")]
    DuplicateSchema(String),

    /// Two columns of one schema normalize to the same header name
    #[error("Duplicate column '{column}' in schema '{schema}'")]
    DuplicateColumn {
        /// Schema name
        schema: String,
        /// Column name
        column: String,
    },

    /// Allowed values were attached to a column that is not string-like
    #[error("Column '{column}' of type {kind} cannot carry an enumeration override")]
    InvalidEnumerationOverride {
        /// Column name
        column: String,
        /// Resolved column kind
        kind: String,
    },

    /// An enumeration override points at a schema or column that does not exist
    #[error("Enumeration override targets unknown column '{column}' in schema '{schema}'")]
    UnknownEnumerationTarget {
        /// Schema name
        schema: String,
        /// Column name
        column: String,
    },
}

impl ConfigError {
    /// Creates a new unsupported type error.
    pub fn unsupported_type(column: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::UnsupportedSchemaType {
            column: column.into(),
            type_name: type_name.into(),
        }
    }

    /// Creates a new empty enumeration error.
    pub fn empty_enumeration(column: impl Into<String>) -> Self {
        Self::EmptyEnumerationDefinition {
            column: column.into(),
        }
    }
}
