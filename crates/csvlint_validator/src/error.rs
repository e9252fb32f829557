//! Error types for lint operations.

use crate::fields::ACCEPTED_DATE_FORMATS;
use csvlint_core::{ColumnKind, ConfigError};
use thiserror::Error;

/// Errors that stop a lint run before it produces a report.
///
/// Data problems never end up here; they are reported as issues.
#[derive(Debug, Error)]
pub enum LintError {
    /// Schema configuration problem (unknown schema, bad type, empty enum)
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for lint operations.
pub type Result<T> = std::result::Result<T, LintError>;

/// A single cell failing one of its column's rules.
///
/// The `Display` output is the message reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldViolation {
    /// Value matches none of the accepted date formats
    #[error(
        "{field} value '{value}' is not a valid date. Expected formats: {}.",
        ACCEPTED_DATE_FORMATS.join(", ")
    )]
    InvalidDate { field: String, value: String },

    /// Parsed birth date lies in the future or more than 120 years back
    #[error("{field} value '{value}' is not a logical birth date.")]
    IllogicalBirthDate { field: String, value: String },

    /// Value is not an email address
    #[error("{field} value '{value}' is not a valid email address.")]
    InvalidEmail { field: String, value: String },

    /// Value is not a phone number
    #[error("{field} value '{value}' is not a valid phone number.")]
    InvalidPhoneNumber { field: String, value: String },

    /// Value is not a 9-digit Known Traveler Number
    #[error(
        "{field} value '{value}' is not a valid Known Traveler Number. It must be a 9-digit number."
    )]
    InvalidKnownTravelerNumber { field: String, value: String },

    /// Value is not a 7-digit Redress Number
    #[error("{field} value '{value}' is not a valid Redress Number. It must be a 7-digit number.")]
    InvalidRedressNumber { field: String, value: String },

    /// Integer column with a non-integer value
    #[error("{field} value '{value}' is not a valid integer.")]
    NotInteger { field: String, value: String },

    /// Float column with a non-numeric value
    #[error("{field} value '{value}' is not a valid float.")]
    NotFloat { field: String, value: String },

    /// Decimal column with a non-decimal value
    #[error("{field} value '{value}' is not a valid decimal.")]
    NotDecimal { field: String, value: String },

    /// Date or datetime column with an unparseable value
    #[error("{field} value '{value}' is not a valid date.")]
    NotDate { field: String, value: String },

    /// String longer than the column allows
    #[error("{field} value '{value}' exceeds the maximum length of {max_length}.")]
    TooLong {
        field: String,
        value: String,
        max_length: usize,
    },

    /// Value outside the column's allowed values
    #[error(
        "{field} value '{value}' is not a valid value. Expected values: {}.",
        .allowed.join(", ")
    )]
    NotAllowed {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    /// Row ended before this column
    #[error("{field} value is missing. Expected {expected}.")]
    MissingValue { field: String, expected: ColumnKind },
}
