//! Field-level validation.
//!
//! This module checks a single trimmed cell against its [`ColumnRule`]:
//! - Semantic rules chosen by column name (dates, birth dates, email, phone,
//!   Known Traveler and Redress numbers)
//! - Type checks chosen by the column kind (integer, float, decimal, string
//!   length, date)
//! - Enumeration membership, consulted only once the type check has passed
//!
//! Every check is a non-panicking parse attempt; a malformed value yields a
//! [`FieldViolation`], never an error.

use crate::FieldViolation;
use chrono::{DateTime, Datelike, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};
use csvlint_core::{ColumnKind, ColumnRule, SemanticRule};
use regex::Regex;
use std::sync::LazyLock;

/// Date formats accepted for `date`, `birthdate` and `dateofbirth` columns,
/// in the order they are tried.
pub const ACCEPTED_DATE_FORMATS: [&str; 7] = [
    "dd-MMM-yyyy",
    "dd-MMM-yy",
    "yyyy-MM-dd",
    "yyyy/MM/dd",
    "dd/MM/yyyy",
    "M/d/yyyy h:mm:ss tt",
    "M/d/yyyy",
];

/// Maximum age, in years, of a logical birth date.
pub const MAX_BIRTH_DATE_AGE_YEARS: u32 = 120;

/// Latest year a two-digit `yy` year maps to; `50` and above land in the 1900s.
pub const TWO_DIGIT_YEAR_MAX: i32 = 2049;

/// Maximum number of significant digits in a decimal value.
pub const MAX_DECIMAL_DIGITS: usize = 38;

/// One accepted format: exact shape, chrono pattern, and whether it has a time part.
struct DateFormat {
    shape: Regex,
    pattern: &'static str,
    with_time: bool,
}

// Same order as ACCEPTED_DATE_FORMATS. The shape regex pins digit counts,
// which chrono's numeric specifiers do not.
static DATE_FORMATS: LazyLock<Vec<DateFormat>> = LazyLock::new(|| {
    [
        (r"^\d{2}-[A-Za-z]{3}-\d{4}$", "%d-%b-%Y", false),
        (r"^\d{2}-[A-Za-z]{3}-\d{2}$", "%d-%b-%y", false),
        (r"^\d{4}-\d{2}-\d{2}$", "%Y-%m-%d", false),
        (r"^\d{4}/\d{2}/\d{2}$", "%Y/%m/%d", false),
        (r"^\d{2}/\d{2}/\d{4}$", "%d/%m/%Y", false),
        (
            r"^\d{1,2}/\d{1,2}/\d{4} \d{1,2}:\d{2}:\d{2} [AaPp][Mm]$",
            "%m/%d/%Y %I:%M:%S %p",
            true,
        ),
        (r"^\d{1,2}/\d{1,2}/\d{4}$", "%m/%d/%Y", false),
    ]
    .into_iter()
    .map(|(shape, pattern, with_time)| DateFormat {
        shape: Regex::new(&shape.replace(r"\d", "[0-9]")).expect("Invalid date shape regex"),
        pattern,
        with_time,
    })
    .collect()
});

/// Additional date-time patterns understood by generic date columns.
const GENERIC_DATETIME_PATTERNS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
];

/// Additional date patterns understood by generic date columns.
const GENERIC_DATE_PATTERNS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+([\.-]?\w+)*@\w+([\.-]?\w+)*(\.\w{2,3})+$").expect("Invalid email regex")
});

static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?(\d{1,3})?[-. ]?\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}(\s*(x|ext)\s*\d{1,6})?$")
        .expect("Invalid phone regex")
});

static DECIMAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)$").expect("Invalid decimal regex")
});

/// Parses a value against [`ACCEPTED_DATE_FORMATS`]; the first exact match wins.
pub fn parse_accepted_date(value: &str) -> Option<NaiveDateTime> {
    DATE_FORMATS.iter().find_map(|format| {
        if !format.shape.is_match(value) {
            return None;
        }
        if format.with_time {
            NaiveDateTime::parse_from_str(value, format.pattern).ok()
        } else {
            let date = NaiveDate::parse_from_str(value, format.pattern).ok()?;
            let date = if format.pattern.contains("%y") {
                pivot_two_digit_year(date)?
            } else {
                date
            };
            Some(date.and_time(NaiveTime::MIN))
        }
    })
}

// chrono expands `%y` 00-69 to 2000-2069; years past the pivot go back a century.
fn pivot_two_digit_year(date: NaiveDate) -> Option<NaiveDate> {
    if date.year() > TWO_DIGIT_YEAR_MAX {
        date.checked_sub_months(Months::new(1200))
    } else {
        Some(date)
    }
}

/// Lenient date parser used by generic `date`/`datetime` columns.
///
/// Accepts the strict formats, RFC 3339 timestamps, ISO-8601 date-times and
/// common month-name and US layouts.
pub fn parse_generic_date(value: &str) -> Option<NaiveDateTime> {
    if let Some(parsed) = parse_accepted_date(value) {
        return Some(parsed);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_local());
    }
    GENERIC_DATETIME_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(value, pattern).ok())
        .or_else(|| {
            GENERIC_DATE_PATTERNS.iter().find_map(|pattern| {
                NaiveDate::parse_from_str(value, pattern)
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
        })
}

/// Returns true if `date` is not after `reference` and at most 120 years before it.
pub fn is_logical_birth_date(date: NaiveDateTime, reference: NaiveDateTime) -> bool {
    if date > reference {
        return false;
    }
    match reference.checked_sub_months(Months::new(MAX_BIRTH_DATE_AGE_YEARS * 12)) {
        Some(earliest) => date >= earliest,
        None => true,
    }
}

/// Basic email address check.
pub fn is_valid_email(value: &str) -> bool {
    !value.trim().is_empty() && EMAIL_REGEX.is_match(value)
}

/// North American or international phone number check, extensions allowed.
pub fn is_valid_phone_number(value: &str) -> bool {
    !value.trim().is_empty() && PHONE_REGEX.is_match(value)
}

/// Known Traveler Number: exactly 9 digits.
pub fn is_valid_known_traveler_number(value: &str) -> bool {
    is_fixed_digits(value, 9)
}

/// Redress Number: exactly 7 digits.
pub fn is_valid_redress_number(value: &str) -> bool {
    is_fixed_digits(value, 7)
}

fn is_fixed_digits(value: &str, len: usize) -> bool {
    value.len() == len
        && value.bytes().all(|b| b.is_ascii_digit())
        && value.parse::<u64>().is_ok()
}

fn is_valid_integer(value: &str) -> bool {
    value.parse::<i32>().is_ok()
}

fn is_valid_float(value: &str) -> bool {
    value.parse::<f64>().is_ok_and(f64::is_finite)
}

fn is_valid_decimal(value: &str) -> bool {
    if !DECIMAL_REGEX.is_match(value) {
        return false;
    }
    let significant = value
        .chars()
        .filter(char::is_ascii_digit)
        .skip_while(|c| *c == '0')
        .count();
    significant <= MAX_DECIMAL_DIGITS
}

/// Validates single cells against column rules.
///
/// Holds the reference time used for birth-date bounds so that every cell
/// of a run is judged against the same "now".
#[derive(Debug, Clone, Copy)]
pub struct FieldValidator {
    reference_time: NaiveDateTime,
}

impl FieldValidator {
    /// Creates a validator judging birth dates against `reference_time`.
    pub fn new(reference_time: NaiveDateTime) -> Self {
        Self { reference_time }
    }

    /// Creates a validator judging birth dates against the current local time.
    pub fn now() -> Self {
        Self::new(Local::now().naive_local())
    }

    /// Reference time for birth-date bounds.
    pub fn reference_time(&self) -> NaiveDateTime {
        self.reference_time
    }

    /// Validates a trimmed cell value against a column rule.
    ///
    /// The semantic rule runs first; if it fails its violation is returned
    /// alone. Otherwise the type check runs, and only a value that passed the
    /// type check is tested against the allowed values.
    pub fn validate(&self, rule: &ColumnRule, value: &str) -> Option<FieldViolation> {
        if let Some(semantic) = rule.semantic() {
            if let Some(violation) = self.validate_semantic(rule.name(), semantic, value) {
                return Some(violation);
            }
        }

        validate_type(rule, value).or_else(|| validate_allowed_values(rule, value))
    }

    /// Runs one semantic rule.
    pub fn validate_semantic(
        &self,
        field: &str,
        semantic: SemanticRule,
        value: &str,
    ) -> Option<FieldViolation> {
        let field = field.to_string();
        let value_owned = || value.to_string();

        match semantic {
            SemanticRule::Date => parse_accepted_date(value)
                .is_none()
                .then(|| FieldViolation::InvalidDate {
                    field,
                    value: value_owned(),
                }),
            SemanticRule::BirthDate => match parse_accepted_date(value) {
                None => Some(FieldViolation::InvalidDate {
                    field,
                    value: value_owned(),
                }),
                Some(date) if !is_logical_birth_date(date, self.reference_time) => {
                    Some(FieldViolation::IllogicalBirthDate {
                        field,
                        value: value_owned(),
                    })
                }
                Some(_) => None,
            },
            SemanticRule::Email => (!is_valid_email(value)).then(|| FieldViolation::InvalidEmail {
                field,
                value: value_owned(),
            }),
            SemanticRule::PhoneNumber => {
                (!is_valid_phone_number(value)).then(|| FieldViolation::InvalidPhoneNumber {
                    field,
                    value: value_owned(),
                })
            }
            SemanticRule::KnownTravelerNumber => (!is_valid_known_traveler_number(value)).then(
                || FieldViolation::InvalidKnownTravelerNumber {
                    field,
                    value: value_owned(),
                },
            ),
            SemanticRule::RedressNumber => {
                (!is_valid_redress_number(value)).then(|| FieldViolation::InvalidRedressNumber {
                    field,
                    value: value_owned(),
                })
            }
        }
    }
}

/// Checks a value against the column kind.
///
/// Enumeration columns always pass here; their membership is checked by
/// [`validate_allowed_values`].
pub fn validate_type(rule: &ColumnRule, value: &str) -> Option<FieldViolation> {
    let field = || rule.name().to_string();
    let value_owned = || value.to_string();

    match rule.kind() {
        ColumnKind::Integer => (!is_valid_integer(value)).then(|| FieldViolation::NotInteger {
            field: field(),
            value: value_owned(),
        }),
        ColumnKind::Float => (!is_valid_float(value)).then(|| FieldViolation::NotFloat {
            field: field(),
            value: value_owned(),
        }),
        ColumnKind::Decimal => (!is_valid_decimal(value)).then(|| FieldViolation::NotDecimal {
            field: field(),
            value: value_owned(),
        }),
        ColumnKind::Date | ColumnKind::DateTime => {
            parse_generic_date(value)
                .is_none()
                .then(|| FieldViolation::NotDate {
                    field: field(),
                    value: value_owned(),
                })
        }
        ColumnKind::String {
            max_length: Some(max_length),
        } if value.chars().count() > max_length => Some(FieldViolation::TooLong {
            field: field(),
            value: value_owned(),
            max_length,
        }),
        ColumnKind::String { .. } | ColumnKind::Enumeration => None,
    }
}

/// Checks membership in the column's allowed values, if it has any.
pub fn validate_allowed_values(rule: &ColumnRule, value: &str) -> Option<FieldViolation> {
    let allowed = rule.allowed_values();
    if allowed.is_empty() || allowed.iter().any(|a| a == value) {
        return None;
    }
    Some(FieldViolation::NotAllowed {
        field: rule.name().to_string(),
        value: value.to_string(),
        allowed: allowed.to_vec(),
    })
}
