//! Parser for schema documents (JSON/YAML/TOML formats).
//!
//! A schema document maps column names to column definitions, in document
//! order:
//!
//! ```json
//! {
//!   "EmployeeId": { "type": "int" },
//!   "Name": { "type": "nvarchar", "maxLength": 100 },
//!   "Gender": { "type": "varchar", "values": ["male", "female", "x", "u"] }
//! }
//! ```
//!
//! The schema name is supplied by the caller, or taken from the file stem
//! when loading from disk (`schemas/EmployeeDetails.json` registers
//! `EmployeeDetails`).
//!
//! # Example
//!
//! ```rust
//! use csvlint_parser::parse_yaml;
//!
//! let yaml = r#"
//! EmployeeId:
//!   type: int
//! Name:
//!   type: nvarchar
//!   maxLength: 100
//! "#;
//!
//! let schema = parse_yaml("EmployeeDetails", yaml)
//!     .expect("Failed to parse schema")
//!     .build()
//!     .expect("Invalid schema");
//! assert_eq!(schema.len(), 2);
//! ```

use csvlint_core::{
    ColumnBuilder, ConfigError, EnumerationOverride, RegistryBuilder, SchemaBuilder,
    SchemaRegistry,
};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading schema documents.
#[derive(Debug, Error)]
pub enum ParserError {
    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// The file name cannot be used as a schema name
    #[error("Cannot derive a schema name from {}", .0.display())]
    InvalidFileName(PathBuf),

    /// A document parsed but describes an invalid schema configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Error raised while loading a specific file
    #[error("{}: {source}", .path.display())]
    InFile {
        /// File being loaded
        path: PathBuf,
        /// Underlying error
        #[source]
        source: Box<ParserError>,
    },
}

impl ParserError {
    fn in_file(path: &Path, source: ParserError) -> Self {
        Self::InFile {
            path: path.to_path_buf(),
            source: Box::new(source),
        }
    }
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported schema document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Declared configuration of one column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnDefinition {
    /// Declared type name (e.g., "int", "nvarchar", "enum")
    #[serde(rename = "type")]
    pub type_name: String,

    /// Maximum length for string columns; 0 or absent means unbounded
    #[serde(default, rename = "maxLength", alias = "max_length")]
    pub max_length: Option<usize>,

    /// Allowed values for enumeration or enumerated string columns
    #[serde(default, alias = "allowedValues", alias = "allowed_values")]
    pub values: Option<Vec<String>>,
}

impl ColumnDefinition {
    fn into_builder(self, name: String) -> ColumnBuilder {
        let mut builder = ColumnBuilder::new(name, self.type_name);
        if let Some(max_length) = self.max_length {
            builder = builder.max_length(max_length);
        }
        if let Some(values) = self.values {
            builder = builder.allowed_values(values);
        }
        builder
    }
}

/// A schema document: column definitions in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDocument {
    /// Column name and definition pairs
    pub columns: Vec<(String, ColumnDefinition)>,
}

impl SchemaDocument {
    /// Converts the document into a schema builder named `name`.
    pub fn into_builder(self, name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name).columns(
            self.columns
                .into_iter()
                .map(|(column, definition)| definition.into_builder(column)),
        )
    }
}

impl<'de> Deserialize<'de> for SchemaDocument {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SchemaDocumentVisitor;

        impl<'de> Visitor<'de> for SchemaDocumentVisitor {
            type Value = SchemaDocument;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of column names to column definitions")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut columns = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, definition)) =
                    map.next_entry::<String, ColumnDefinition>()?
                {
                    columns.push((name, definition));
                }
                Ok(SchemaDocument { columns })
            }
        }

        deserializer.deserialize_map(SchemaDocumentVisitor)
    }
}

/// Enumeration table: schema name → column name → allowed values.
type EnumerationTable = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Parse a schema from a JSON string.
///
/// # Example
///
/// ```rust
/// use csvlint_parser::parse_json;
///
/// let json = r#"{ "EmployeeId": { "type": "int" }, "Address": { "type": "varchar" } }"#;
/// let schema = parse_json("Addresses", json).unwrap().build().unwrap();
/// assert_eq!(schema.columns()[1].name(), "Address");
/// ```
pub fn parse_json(name: &str, content: &str) -> Result<SchemaBuilder> {
    let document: SchemaDocument = serde_json::from_str(content)?;
    Ok(document.into_builder(name))
}

/// Parse a schema from a YAML string.
pub fn parse_yaml(name: &str, content: &str) -> Result<SchemaBuilder> {
    let document: SchemaDocument = serde_yaml_ng::from_str(content)?;
    Ok(document.into_builder(name))
}

/// Parse a schema from a TOML string.
///
/// # Example
///
/// ```rust
/// use csvlint_parser::parse_toml;
///
/// let toml = r#"
/// [EmployeeId]
/// type = "int"
///
/// [Address]
/// type = "varchar"
/// maxLength = 200
/// "#;
///
/// let schema = parse_toml("Addresses", toml).unwrap().build().unwrap();
/// assert_eq!(schema.len(), 2);
/// ```
pub fn parse_toml(name: &str, content: &str) -> Result<SchemaBuilder> {
    let document: SchemaDocument =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(document.into_builder(name))
}

/// Parse a schema document in the given format.
pub fn parse_schema(name: &str, content: &str, format: DocumentFormat) -> Result<SchemaBuilder> {
    match format {
        DocumentFormat::Json => parse_json(name, content),
        DocumentFormat::Yaml => parse_yaml(name, content),
        DocumentFormat::Toml => parse_toml(name, content),
    }
}

/// Detect the document format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.json` → `DocumentFormat::Json`
/// * `.yaml`, `.yml` → `DocumentFormat::Yaml`
/// * `.toml` → `DocumentFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<DocumentFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "json" => Ok(DocumentFormat::Json),
        "yaml" | "yml" => Ok(DocumentFormat::Yaml),
        "toml" => Ok(DocumentFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a schema from a file; the schema name is the file stem.
///
/// ```no_run
/// use csvlint_parser::parse_file;
/// use std::path::Path;
///
/// let schema = parse_file(Path::new("schemas/EmployeeDetails.json")).unwrap();
/// assert_eq!(schema.name(), "EmployeeDetails");
/// ```
pub fn parse_file(path: &Path) -> Result<SchemaBuilder> {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.trim().is_empty())
        .ok_or_else(|| ParserError::InvalidFileName(path.to_path_buf()))?;
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    debug!(schema = name, path = %path.display(), "Parsing schema document");
    parse_schema(name, &content, format)
}

/// Load every schema document found directly inside `dir`.
///
/// Files are visited in file-name order; files without a supported extension
/// are skipped. Errors are tagged with the offending file.
pub fn load_dir(dir: &Path) -> Result<RegistryBuilder> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if detect_format(&path).is_err() {
            debug!(path = %path.display(), "Skipping non-schema file");
            continue;
        }
        paths.push(path);
    }
    paths.sort();

    let mut builder = RegistryBuilder::new();
    for path in &paths {
        let schema = parse_file(path).map_err(|e| ParserError::in_file(path, e))?;
        builder = builder.schema(schema);
    }

    debug!(dir = %dir.display(), schemas = builder.schema_count(), "Loaded schema directory");
    Ok(builder)
}

/// Parse an enumeration table (schema → column → values).
///
/// ```rust
/// use csvlint_parser::{parse_enumerations, DocumentFormat};
///
/// let yaml = r#"
/// EmployeeDetails:
///   Gender: [male, female, x, u]
/// "#;
///
/// let overrides = parse_enumerations(yaml, DocumentFormat::Yaml).unwrap();
/// assert_eq!(overrides[0].column, "Gender");
/// ```
pub fn parse_enumerations(content: &str, format: DocumentFormat) -> Result<Vec<EnumerationOverride>> {
    let table: EnumerationTable = match format {
        DocumentFormat::Json => serde_json::from_str(content)?,
        DocumentFormat::Yaml => serde_yaml_ng::from_str(content)?,
        DocumentFormat::Toml => {
            toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?
        }
    };

    Ok(table
        .into_iter()
        .flat_map(|(schema, columns)| {
            columns
                .into_iter()
                .map(move |(column, values)| EnumerationOverride::new(schema.clone(), column, values))
        })
        .collect())
}

/// Parse an enumeration table from a file, format detected by extension.
pub fn parse_enumerations_file(path: &Path) -> Result<Vec<EnumerationOverride>> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_enumerations(&content, format).map_err(|e| ParserError::in_file(path, e))
}

/// Load a schema directory plus an optional enumeration table and build the
/// registry.
pub fn load_registry(dir: &Path, enumerations: Option<&Path>) -> Result<SchemaRegistry> {
    let mut builder = load_dir(dir)?;
    if let Some(path) = enumerations {
        builder = builder.overrides(parse_enumerations_file(path)?);
    }
    Ok(builder.build()?)
}
