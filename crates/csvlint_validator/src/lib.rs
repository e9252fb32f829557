//! # CSV Lint Validator
//!
//! Validation engine for the CSV schema linter. This crate checks CSV input
//! against a schema from a [`csvlint_core::SchemaRegistry`], including:
//!
//! - Header reconciliation (case and whitespace insensitive column matching)
//! - Semantic checks chosen by column name (dates, birth dates, email, phone
//!   numbers, Known Traveler and Redress numbers)
//! - Type checks (integer, float, decimal, date, string length)
//! - Enumeration membership
//!
//! ## Example
//!
//! ```rust
//! use csvlint_core::samples::builtin_registry;
//! use csvlint_validator::CsvLinter;
//! use std::sync::Arc;
//!
//! let linter = CsvLinter::new(Arc::new(builtin_registry().unwrap()));
//! let csv = "EmployeeId,Name,HireDate,Salary,Salutation,Gender\n\
//!            1,John Doe,not-a-date,55000.00,Mr.,unknown\n";
//!
//! let report = linter.lint_bytes("EmployeeDetails", csv.as_bytes()).unwrap();
//!
//! if report.passed() {
//!     println!("CSV is valid");
//! } else {
//!     for message in report.messages() {
//!         println!("{}", message);
//!     }
//! }
//! ```

mod engine;
mod error;
mod fields;
mod header;
mod row;

pub use engine::*;
pub use error::*;
pub use fields::*;
pub use header::*;
pub use row::*;
