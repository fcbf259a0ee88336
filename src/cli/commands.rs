use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::ImportConfig;
use crate::importer::Importer;

/// Execute the import command
pub async fn import(config: ImportConfig, json: bool, verbose: bool) -> Result<()> {
    if !json {
        println!("{}", "📊 Sheetgraph - importing workbook".bold().green());
        println!("   File:   {}", config.source_path.display());
        println!("   Sheet:  {}", config.sheet_index);
        println!("   Target: {}", config.db_url);
        println!();
    }

    let importer = Importer::new(config);
    let report = importer.run().await.context("import failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if verbose {
        println!("{}", "📋 Headers:".cyan());
        for header in &report.headers {
            println!("   {}", header.bright_blue());
        }
        println!();
    }

    println!("{}", "✅ Import complete".bold().green());
    println!("   Rows written:  {}", report.rows_read);
    println!("   Rows skipped:  {}", report.rows_skipped);
    if report.rows_failed > 0 {
        println!(
            "   {}",
            format!("Rows failed:   {}", report.rows_failed).yellow()
        );
    }
    println!("   Nodes merged:  {}", report.nodes_merged);
    println!("   Relationships: {}", report.relationships_created);

    Ok(())
}

/// Execute the preview command - classify without writing
pub fn preview(config: ImportConfig, json: bool, verbose: bool) -> Result<()> {
    let import_tag = config.import_tag.clone();
    let importer = Importer::new(config);
    let preview = importer.preview().context("preview failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&preview)?);
        return Ok(());
    }

    println!("{}", "🔍 Sheetgraph - preview (no writes)".bold().green());
    println!("   Sheet: {}", preview.sheet.bright_blue());
    println!();

    println!("{}", "📋 Headers:".cyan());
    for header in &preview.headers {
        println!("   {}", header.bright_blue());
    }
    println!();

    let mut nodes = 0usize;
    let mut relationships = 0usize;

    for row in &preview.rows {
        let k = row.nodes.len();
        nodes += k;
        relationships += k.saturating_sub(1) * k;

        println!(
            "   Row {}: {} nodes, {} numeric properties",
            row.row.to_string().bold(),
            k,
            row.properties.len()
        );
        if verbose {
            for (label, value) in &row.nodes {
                println!("      ({}:{}) {}", label.cyan(), import_tag.dimmed(), value);
            }
            for (key, value) in &row.properties {
                println!("      {} = {}", key.bright_yellow(), value);
            }
        }
    }

    println!();
    println!("{}", "✅ Preview complete".bold().green());
    println!("   Rows:                {}", preview.rows.len());
    println!("   Nodes to merge:      {nodes}");
    println!("   Relationships to create: {relationships}");

    Ok(())
}
