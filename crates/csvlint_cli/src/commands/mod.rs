pub mod check;
pub mod lint;

use anyhow::{Context, Result, bail};
use csvlint_core::samples::builtin_schemas;
use csvlint_core::{RegistryBuilder, SchemaRegistry};
use csvlint_parser::{load_dir, parse_enumerations_file};
use tracing::{debug, info};

use crate::SchemaSource;

/// Builds the registry from the schema directory, the built-in samples and
/// the enumeration table.
///
/// A missing schema directory is only an error when the built-in samples
/// were not requested.
pub fn load_registry(source: &SchemaSource) -> Result<SchemaRegistry> {
    let mut builder = if source.builtin {
        debug!("Including built-in sample schemas");
        builtin_schemas()
    } else {
        RegistryBuilder::new()
    };

    if source.schemas.is_dir() {
        info!("Loading schemas from: {}", source.schemas.display());
        let loaded = load_dir(&source.schemas).with_context(|| {
            format!(
                "Failed to load schema directory: {}",
                source.schemas.display()
            )
        })?;
        builder = builder.merge(loaded);
    } else if !source.builtin {
        bail!(
            "Schema directory not found: {} (use --schemas or --builtin)",
            source.schemas.display()
        );
    }

    if let Some(path) = &source.enumerations {
        info!("Loading enumerations from: {}", path.display());
        let overrides = parse_enumerations_file(path)
            .with_context(|| format!("Failed to load enumerations file: {}", path.display()))?;
        builder = builder.overrides(overrides);
    }

    builder.build().context("Invalid schema configuration")
}
