use anyhow::Result;
use colored::*;
use csvlint_core::{LintReport, SchemaRegistry};
use serde_json::json;

pub fn print_lint_report(report: &LintReport, format: &str) -> Result<()> {
    match format {
        "json" => print_json_report(report),
        _ => {
            print_text_report(report);
            Ok(())
        }
    }
}

fn print_text_report(report: &LintReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", format!("  LINT REPORT: {}", report.schema).bold());
    println!("{}", "═".repeat(60));

    if report.passed() {
        println!("\n{} {}", "✓".green().bold(), "Lint PASSED".green().bold());
    } else {
        println!("\n{} {}", "✗".red().bold(), "Lint FAILED".red().bold());
    }

    let header: Vec<_> = report.header_issues().collect();
    if !header.is_empty() {
        println!("\n{}", "Header:".yellow().bold());
        for (i, issue) in header.iter().enumerate() {
            println!("  {}. {}", i + 1, issue.to_string().yellow());
        }
    }

    let rows: Vec<_> = report.row_issues().collect();
    if !rows.is_empty() {
        println!("\n{}", "Issues:".red().bold());
        for (i, issue) in rows.iter().enumerate() {
            println!("  {}. {}", i + 1, issue.to_string().red());
        }
    }

    if report.aborted {
        println!("\n{}", "Processing stopped before the end of the file".yellow());
    }

    println!("\n{}", "Summary:".bold());
    println!("  Rows validated:  {}", report.stats.rows_validated);
    println!("  Columns matched: {}", report.stats.columns_matched);
    println!("  Total issues:    {}", report.issues.len());
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &LintReport) -> Result<()> {
    let output = json!({
        "schema": report.schema,
        "passed": report.passed(),
        "aborted": report.aborted,
        "issues": report.messages(),
        "summary": {
            "issue_count": report.issues.len(),
            "rows_validated": report.stats.rows_validated,
            "columns_matched": report.stats.columns_matched,
            "cells_checked": report.stats.cells_checked,
            "duration_ms": report.stats.duration_ms,
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_registry_summary(registry: &SchemaRegistry, format: &str) -> Result<()> {
    if format == "json" {
        let schemas: Vec<_> = registry
            .schemas()
            .map(|schema| {
                json!({
                    "name": schema.name(),
                    "columns": schema.columns().iter().map(|column| json!({
                        "name": column.name(),
                        "kind": column.kind().to_string(),
                        "semantic": column.semantic(),
                        "allowed_values": column.allowed_values(),
                    })).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json!({ "schemas": schemas }))?);
        return Ok(());
    }

    for schema in registry.schemas() {
        println!("\n{} ({} columns)", schema.name().bold(), schema.len());
        for column in schema.columns() {
            let mut line = format!("  {:<28} {}", column.name(), column.kind());
            if let Some(semantic) = column.semantic() {
                line.push_str(&format!("  [{:?}]", semantic));
            }
            if !column.allowed_values().is_empty() {
                line.push_str(&format!("  values: {}", column.allowed_values().join(", ")));
            }
            println!("{}", line);
        }
    }

    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
