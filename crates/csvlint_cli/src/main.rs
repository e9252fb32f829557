mod commands;
mod output;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "csvlint")]
#[command(version, about = "Schema-driven CSV linter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Where schemas come from.
#[derive(Args, Debug, Clone)]
pub struct SchemaSource {
    /// Directory of schema documents (JSON, YAML or TOML)
    #[arg(long, env = "CSVLINT_SCHEMA_DIR", default_value = "schemas")]
    pub schemas: PathBuf,

    /// Enumeration table applied on top of the schemas
    #[arg(short, long)]
    pub enumerations: Option<PathBuf>,

    /// Include the built-in sample schemas
    #[arg(long)]
    pub builtin: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint a CSV file against a schema
    Lint {
        /// Path to the CSV file
        csv: PathBuf,

        /// Name of the schema to lint against
        #[arg(short, long)]
        schema: String,

        #[command(flatten)]
        source: SchemaSource,

        /// Skip the data rows when the header has any structural issue
        #[arg(long)]
        strict: bool,

        /// Validate only the first N data rows
        #[arg(short, long)]
        limit: Option<usize>,

        /// Field delimiter
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Load the schema configuration and print a summary
    Check {
        #[command(flatten)]
        source: SchemaSource,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Lint {
            csv,
            schema,
            source,
            strict,
            limit,
            delimiter,
            format,
        } => commands::lint::execute(
            &csv,
            &schema,
            &source,
            commands::lint::LintArgs {
                strict,
                limit,
                delimiter,
            },
            &format,
        ),

        Commands::Check { source, format } => commands::check::execute(&source, &format),
    }
}
