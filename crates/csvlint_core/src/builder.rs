//! Builder pattern for creating schemas.
//!
//! Builders accept the declared configuration vocabulary (type names as
//! strings, optional lengths and values) and normalize it into [`Schema`]s.
//! All configuration errors surface from `build()`.

use crate::{ColumnKind, ColumnRule, ConfigError, Result, Schema};

/// Builder for creating a [`Schema`].
///
/// # Example
///
/// ```rust
/// use csvlint_core::{ColumnBuilder, SchemaBuilder};
///
/// let schema = SchemaBuilder::new("EmployeeDetails")
///     .column(ColumnBuilder::new("EmployeeId", "int"))
///     .column(ColumnBuilder::new("Name", "nvarchar").max_length(100))
///     .column(ColumnBuilder::new("Gender", "varchar"))
///     .enumeration("Gender", ["male", "female", "x", "u"])
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    columns: Vec<ColumnBuilder>,
    enumerations: Vec<(String, Vec<String>)>,
}

impl SchemaBuilder {
    /// Creates a new schema builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            enumerations: Vec::new(),
        }
    }

    /// Schema name this builder produces.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a column.
    pub fn column(mut self, column: ColumnBuilder) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds multiple columns.
    pub fn columns(mut self, columns: impl IntoIterator<Item = ColumnBuilder>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Restricts a string-like column to a set of values.
    pub fn enumeration<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enumerations
            .push((column.into(), values.into_iter().map(Into::into).collect()));
        self
    }

    /// Builds the schema.
    ///
    /// # Errors
    ///
    /// Fails on unsupported column types, empty enumerations, duplicate
    /// columns, or enumeration overrides that target a missing or
    /// non-string column.
    pub fn build(self) -> Result<Schema> {
        let columns = self
            .columns
            .into_iter()
            .map(ColumnBuilder::build)
            .collect::<Result<Vec<_>>>()?;
        let mut schema = Schema::new(self.name, columns)?;

        for (column, values) in self.enumerations {
            apply_enumeration(&mut schema, &column, values)?;
        }

        Ok(schema)
    }
}

/// Layers allowed values on an already-built schema column.
pub(crate) fn apply_enumeration(
    schema: &mut Schema,
    column: &str,
    values: Vec<String>,
) -> Result<()> {
    let position =
        schema
            .column_position(column)
            .ok_or_else(|| ConfigError::UnknownEnumerationTarget {
                schema: schema.name().to_string(),
                column: column.to_string(),
            })?;
    let rule = schema.columns()[position].clone().with_allowed_values(values)?;
    schema.replace_column(position, rule);
    Ok(())
}

/// Builder for creating a [`ColumnRule`] from its declared configuration.
///
/// # Example
///
/// ```rust
/// use csvlint_core::{ColumnBuilder, ColumnKind};
///
/// let rule = ColumnBuilder::new("Salutation", "varchar")
///     .max_length(10)
///     .build()
///     .unwrap();
///
/// assert_eq!(rule.kind(), ColumnKind::String { max_length: Some(10) });
/// ```
#[derive(Debug, Clone)]
pub struct ColumnBuilder {
    name: String,
    type_name: String,
    max_length: Option<usize>,
    allowed_values: Option<Vec<String>>,
}

impl ColumnBuilder {
    /// Creates a new column builder.
    ///
    /// # Arguments
    ///
    /// * `name` - Column name
    /// * `type_name` - Declared type (e.g., "int", "nvarchar", "enum")
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            max_length: None,
            allowed_values: None,
        }
    }

    /// Sets the maximum length for string columns.
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Sets the allowed values.
    pub fn allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the column rule.
    pub fn build(self) -> Result<ColumnRule> {
        let kind = ColumnKind::resolve(&self.name, &self.type_name, self.max_length)?;
        match (kind, self.allowed_values) {
            (ColumnKind::Enumeration, values) => {
                ColumnRule::enumeration(self.name, values.unwrap_or_default())
            }
            (kind, Some(values)) => ColumnRule::new(self.name, kind)?.with_allowed_values(values),
            (kind, None) => ColumnRule::new(self.name, kind),
        }
    }
}
