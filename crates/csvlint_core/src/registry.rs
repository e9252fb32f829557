//! Named schema registry.
//!
//! The registry is assembled once through a [`RegistryBuilder`] and is
//! read-only afterwards, so a single instance can be shared behind an `Arc`
//! by any number of concurrent lint runs.

use crate::builder::apply_enumeration;
use crate::{ConfigError, Result, Schema, SchemaBuilder};
use std::collections::BTreeMap;
use tracing::debug;

/// Allowed values layered on a string-like column of a named schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationOverride {
    /// Target schema name
    pub schema: String,
    /// Target column name (matched case-insensitively)
    pub column: String,
    /// Allowed values, in configuration order
    pub values: Vec<String>,
}

impl EnumerationOverride {
    /// Creates a new override.
    pub fn new<I, S>(schema: impl Into<String>, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schema: schema.into(),
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Immutable lookup table from schema name to [`Schema`].
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Schema>,
}

impl SchemaRegistry {
    /// Starts building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Returns the schema registered under `name`.
    ///
    /// Names are matched exactly.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SchemaNotFound`] for unregistered names.
    pub fn get_schema(&self, name: &str) -> Result<&Schema> {
        self.schemas
            .get(name)
            .ok_or_else(|| ConfigError::SchemaNotFound(name.to_string()))
    }

    /// Returns true if a schema is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Registered schema names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Registered schemas in name order.
    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if no schema is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Builder for a [`SchemaRegistry`].
///
/// # Example
///
/// ```rust
/// use csvlint_core::{ColumnBuilder, SchemaBuilder, SchemaRegistry};
///
/// let registry = SchemaRegistry::builder()
///     .schema(
///         SchemaBuilder::new("Addresses")
///             .column(ColumnBuilder::new("EmployeeId", "int"))
///             .column(ColumnBuilder::new("Address", "varchar")),
///     )
///     .build()
///     .unwrap();
///
/// assert!(registry.get_schema("Addresses").is_ok());
/// assert!(registry.get_schema("Payroll").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    schemas: Vec<SchemaBuilder>,
    overrides: Vec<EnumerationOverride>,
}

impl RegistryBuilder {
    /// Creates an empty registry builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a schema.
    pub fn schema(mut self, schema: SchemaBuilder) -> Self {
        self.schemas.push(schema);
        self
    }

    /// Adds multiple schemas.
    pub fn schemas(mut self, schemas: impl IntoIterator<Item = SchemaBuilder>) -> Self {
        self.schemas.extend(schemas);
        self
    }

    /// Adds an enumeration override for `schema.column`.
    pub fn enumeration<I, S>(
        mut self,
        schema: impl Into<String>,
        column: impl Into<String>,
        values: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overrides
            .push(EnumerationOverride::new(schema, column, values));
        self
    }

    /// Adds prebuilt enumeration overrides.
    pub fn overrides(mut self, overrides: impl IntoIterator<Item = EnumerationOverride>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    /// Appends the schemas and overrides of another builder.
    pub fn merge(mut self, other: RegistryBuilder) -> Self {
        self.schemas.extend(other.schemas);
        self.overrides.extend(other.overrides);
        self
    }

    /// Number of schemas added so far.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Builds every schema, applies the overrides and freezes the registry.
    pub fn build(self) -> Result<SchemaRegistry> {
        let mut schemas = BTreeMap::new();

        for builder in self.schemas {
            let schema = builder.build()?;
            if schemas.contains_key(schema.name()) {
                return Err(ConfigError::DuplicateSchema(schema.name().to_string()));
            }
            debug!(
                schema = schema.name(),
                columns = schema.len(),
                "Registered schema"
            );
            schemas.insert(schema.name().to_string(), schema);
        }

        for EnumerationOverride {
            schema,
            column,
            values,
        } in self.overrides
        {
            let target = schemas
                .get_mut(&schema)
                .ok_or_else(|| ConfigError::UnknownEnumerationTarget {
                    schema: schema.clone(),
                    column: column.clone(),
                })?;
            debug!(schema = %schema, column = %column, values = ?values, "Applied enumeration override");
            apply_enumeration(target, &column, values)?;
        }

        Ok(SchemaRegistry { schemas })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColumnBuilder;
    use pretty_assertions::assert_eq;

    fn employee_details() -> SchemaBuilder {
        SchemaBuilder::new("EmployeeDetails")
            .column(ColumnBuilder::new("EmployeeId", "Int"))
            .column(ColumnBuilder::new("Gender", "Varchar"))
    }

    #[test]
    fn test_get_schema() {
        let registry = SchemaRegistry::builder()
            .schema(employee_details())
            .build()
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get_schema("EmployeeDetails").unwrap().name(),
            "EmployeeDetails"
        );
    }

    #[test]
    fn test_schema_not_found() {
        let registry = SchemaRegistry::builder()
            .schema(employee_details())
            .build()
            .unwrap();

        assert_eq!(
            registry.get_schema("employeedetails").unwrap_err(),
            ConfigError::SchemaNotFound("employeedetails".to_string())
        );
    }

    #[test]
    fn test_duplicate_schema() {
        let err = SchemaRegistry::builder()
            .schema(employee_details())
            .schema(employee_details())
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateSchema("EmployeeDetails".to_string()));
    }

    #[test]
    fn test_override_layered_on_schema() {
        let registry = SchemaRegistry::builder()
            .schema(employee_details())
            .enumeration("EmployeeDetails", "Gender", ["male", "female", "x", "u"])
            .build()
            .unwrap();

        let gender = registry
            .get_schema("EmployeeDetails")
            .unwrap()
            .column("Gender")
            .unwrap();
        assert_eq!(gender.allowed_values(), ["male", "female", "x", "u"]);
    }

    #[test]
    fn test_override_unknown_schema() {
        let err = SchemaRegistry::builder()
            .schema(employee_details())
            .enumeration("Passport", "Gender", ["male"])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEnumerationTarget { .. }));
    }

    #[test]
    fn test_override_on_integer_column() {
        let err = SchemaRegistry::builder()
            .schema(employee_details())
            .enumeration("EmployeeDetails", "EmployeeId", ["1"])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnumerationOverride { .. }));
    }

    #[test]
    fn test_merge_builders() {
        let addresses = RegistryBuilder::new().schema(
            SchemaBuilder::new("Addresses").column(ColumnBuilder::new("Address", "varchar")),
        );
        let registry = SchemaRegistry::builder()
            .schema(employee_details())
            .merge(addresses)
            .build()
            .unwrap();

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["Addresses", "EmployeeDetails"]);
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SchemaRegistry>();
    }
}
