use anyhow::Result;
use tracing::info;

use crate::SchemaSource;
use crate::commands::load_registry;
use crate::output;

pub fn execute(source: &SchemaSource, format: &str) -> Result<()> {
    info!("Checking schema configuration");

    let registry = load_registry(source)?;

    if format != "json" {
        if registry.is_empty() {
            output::print_info("No schemas found");
        } else {
            output::print_success(&format!("Loaded {} schema(s)", registry.len()));
        }
    }

    output::print_registry_summary(&registry, format)?;

    Ok(())
}
