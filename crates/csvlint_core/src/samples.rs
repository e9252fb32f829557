//! Built-in sample schemas.
//!
//! `EmployeeDetails`, `Addresses` and `Passport`, with the Gender enumeration
//! shared by `EmployeeDetails` and `Passport`.

use crate::{ColumnBuilder, RegistryBuilder, Result, SchemaBuilder, SchemaRegistry};

/// Values accepted in the Gender columns of the sample schemas.
pub const GENDER_VALUES: [&str; 4] = ["male", "female", "x", "u"];

/// Returns a registry builder preloaded with the sample schemas.
///
/// Callers may add further schemas before building.
pub fn builtin_schemas() -> RegistryBuilder {
    RegistryBuilder::new()
        .schema(
            SchemaBuilder::new("EmployeeDetails")
                .column(ColumnBuilder::new("EmployeeId", "Int"))
                .column(ColumnBuilder::new("Name", "Nvarchar"))
                .column(ColumnBuilder::new("HireDate", "DateTime"))
                .column(ColumnBuilder::new("Salary", "Decimal"))
                .column(ColumnBuilder::new("Salutation", "Varchar"))
                .column(ColumnBuilder::new("Gender", "Varchar")),
        )
        .schema(
            SchemaBuilder::new("Addresses")
                .column(ColumnBuilder::new("EmployeeId", "Int"))
                .column(ColumnBuilder::new("Address", "Varchar")),
        )
        .schema(
            SchemaBuilder::new("Passport")
                .column(ColumnBuilder::new("EmployeeId", "Int"))
                .column(ColumnBuilder::new("PassportID", "Nvarchar"))
                .column(ColumnBuilder::new("PassportCountry", "Nvarchar"))
                .column(ColumnBuilder::new("PassportIssuingAuthority", "Nvarchar"))
                .column(ColumnBuilder::new("DateOfBirth", "DateTime"))
                .column(ColumnBuilder::new("Gender", "Varchar")),
        )
        .enumeration("EmployeeDetails", "Gender", GENDER_VALUES)
        .enumeration("Passport", "Gender", GENDER_VALUES)
}

/// Builds the sample registry.
pub fn builtin_registry() -> Result<SchemaRegistry> {
    builtin_schemas().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnKind, SemanticRule};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_registry() {
        let registry = builtin_registry().unwrap();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["Addresses", "EmployeeDetails", "Passport"]);

        let passport = registry.get_schema("Passport").unwrap();
        let dob = passport.column("DateOfBirth").unwrap();
        assert_eq!(dob.kind(), ColumnKind::DateTime);
        assert_eq!(dob.semantic(), Some(SemanticRule::BirthDate));
        assert_eq!(passport.column("Gender").unwrap().allowed_values(), GENDER_VALUES);
    }
}
