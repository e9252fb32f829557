use anyhow::{Context, Result, anyhow, bail};
use csvlint_validator::{CsvLinter, LintOptions};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::SchemaSource;
use crate::commands::load_registry;
use crate::output;

/// Run options taken from the command line.
#[derive(Debug, Clone, Copy)]
pub struct LintArgs {
    pub strict: bool,
    pub limit: Option<usize>,
    pub delimiter: char,
}

impl LintArgs {
    fn to_options(self) -> Result<LintOptions> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| anyhow!("Delimiter must be a single ASCII character: {:?}", self.delimiter))?;

        let mut options = LintOptions::new()
            .with_strict_header(self.strict)
            .with_delimiter(delimiter);
        if let Some(limit) = self.limit {
            options = options.with_row_limit(limit);
        }
        Ok(options)
    }
}

pub fn execute(
    csv_path: &Path,
    schema: &str,
    source: &SchemaSource,
    args: LintArgs,
    format: &str,
) -> Result<()> {
    info!("Linting {} against schema: {}", csv_path.display(), schema);
    info!("Strict header: {}", args.strict);
    if let Some(limit) = args.limit {
        info!("Row limit: {}", limit);
    }

    let metadata = std::fs::metadata(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;
    if metadata.len() == 0 {
        bail!("CSV file is empty: {}", csv_path.display());
    }

    let registry = load_registry(source)?;
    let linter = CsvLinter::new(Arc::new(registry)).with_options(args.to_options()?);

    let file = File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;
    let report = linter
        .lint(schema, BufReader::new(file))
        .with_context(|| format!("Failed to lint {}", csv_path.display()))?;

    output::print_lint_report(&report, format)?;

    if !report.passed() {
        std::process::exit(1);
    }

    Ok(())
}
