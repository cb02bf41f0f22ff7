use std::path::Path;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::{CrateOutcome, SkipReason};

/// Render a colored terminal report of the bundling run.
pub fn render(outcomes: &[CrateOutcome], project: &Path, verbose: bool) -> Result<()> {
    let total = outcomes.len();
    let bundled = outcomes.iter().filter(|o| o.bundled()).count();
    let missing = outcomes
        .iter()
        .filter(|o| o.skip_reason() == Some(SkipReason::NotInCache))
        .count();
    let bare = outcomes
        .iter()
        .filter(|o| o.skip_reason() == Some(SkipReason::NoLicenseFiles))
        .count();

    println!(
        "\n {} v{}",
        "license-bundlr".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Project: {}\n", project.display());

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(
        " │  {:<48} │",
        format!("Third-party crates : {}", total)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Bundled          : {:>4}", "✓".green(), bundled)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Not in cache     : {:>4}", "⚠".yellow(), missing)
    );
    println!(
        " │  {:<48} │",
        format!("{}  No license files : {:>4}", "⚠".yellow(), bare)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    // Skipped crates degrade completeness of the notice file but never
    // fail the run; surface them so the omission is visible.
    let skipped: Vec<&CrateOutcome> = outcomes.iter().filter(|o| o.skip_reason().is_some()).collect();
    if !skipped.is_empty() {
        println!(
            " {} Crates omitted from the notice file:\n",
            "[WARN]".yellow().bold()
        );
        for outcome in &skipped {
            let reason = outcome
                .skip_reason()
                .map(|r| r.to_string())
                .unwrap_or_default();
            println!(
                "   {} {} {} ({})",
                "⚠".yellow(),
                outcome.name,
                outcome.version,
                reason
            );
        }
        println!();
    }

    if verbose {
        render_table(outcomes);
    }

    Ok(())
}

fn render_table(outcomes: &[CrateOutcome]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("Origin").add_attribute(Attribute::Bold),
            Cell::new("License files").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for outcome in outcomes {
        let origin = outcome
            .crate_dir
            .as_ref()
            .map(|d| d.origin.to_string())
            .unwrap_or_else(|| "-".to_string());

        let files = if outcome.license_files.is_empty() {
            "-".to_string()
        } else {
            outcome
                .license_files
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let (status, status_color) = match outcome.skip_reason() {
            None => ("✓ bundled".to_string(), Color::Green),
            Some(reason) => (format!("⚠ {}", reason), Color::Yellow),
        };

        table.add_row(vec![
            Cell::new(&outcome.name),
            Cell::new(&outcome.version),
            Cell::new(origin),
            Cell::new(files),
            Cell::new(status).fg(status_color),
        ]);
    }

    println!("{}", table);
}
