//! # CSV Lint Core
//!
//! Core data structures for the CSV schema linter.
//!
//! A schema describes the columns a CSV file must carry: each column has a
//! type (or enumeration), an optional maximum length and, depending on its
//! name, a domain-specific semantic rule such as a birth date or an email
//! address. This crate defines those types, the registry that holds named
//! schemas, and the issues a lint run reports.
//!
//! ## Key Concepts
//!
//! - **Schema**: Named, ordered set of column rules
//! - **ColumnRule**: One column's type, length and enumeration constraint
//! - **SchemaRegistry**: Read-only lookup of schemas by name
//! - **Issue**: One reported defect, optionally tied to a data line
//!
//! ## Example
//!
//! ```rust
//! use csvlint_core::{ColumnBuilder, SchemaBuilder, SchemaRegistry};
//!
//! let registry = SchemaRegistry::builder()
//!     .schema(
//!         SchemaBuilder::new("EmployeeDetails")
//!             .column(ColumnBuilder::new("EmployeeId", "Int"))
//!             .column(ColumnBuilder::new("Name", "Nvarchar").max_length(100))
//!             .column(ColumnBuilder::new("Gender", "Varchar")),
//!     )
//!     .enumeration("EmployeeDetails", "Gender", ["male", "female", "x", "u"])
//!     .build()
//!     .unwrap();
//!
//! let schema = registry.get_schema("EmployeeDetails").unwrap();
//! assert_eq!(schema.len(), 3);
//! ```

pub mod builder;
pub mod error;
pub mod issue;
pub mod registry;
pub mod samples;
pub mod schema;

pub use builder::*;
pub use error::*;
pub use issue::*;
pub use registry::*;
pub use schema::*;
