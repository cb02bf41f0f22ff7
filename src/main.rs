//! `license-bundlr` — bundle third-party crate license texts into one notice file.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Scan the lockfile for third-party crates ([`lockfile`]).
//! 4. Resolve each crate's source directory in the Cargo cache ([`cache`]).
//! 5. Pick license-like files from each resolved directory ([`picker`]).
//! 6. Render and write the aggregate notice file ([`notice`]).
//! 7. Report what was bundled and what was skipped ([`report`]).
//!
//! Per-crate failures (not in cache, no license files, unreadable file)
//! degrade the notice file instead of failing the run; only the final
//! write may abort.

mod cache;
mod cli;
mod config;
mod lockfile;
mod models;
mod notice;
mod picker;
mod report;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cli::{Cli, ReportFormat};
use config::load_config;
use models::{CrateOutcome, PackageRecord};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Resolve project path
    let path = cli.path.canonicalize().unwrap_or_else(|_| cli.path.clone());

    let config = load_config(&path, cli.config.as_deref())?;

    // CLI prefixes extend the configured ones
    let mut internal_prefixes = config.filter.internal_prefixes.clone();
    internal_prefixes.extend(cli.internal_prefix.iter().cloned());

    let lock_path = path.join(
        cli.lockfile
            .as_deref()
            .unwrap_or_else(|| Path::new("Cargo.lock")),
    );
    let records = lockfile::parse_lockfile(&lock_path, &internal_prefixes)?;

    if !cli.quiet {
        eprintln!(
            "  {} {} third-party crates in {}",
            "→".cyan(),
            records.len(),
            lock_path.display()
        );
    }

    let cargo_home = cache::cargo_home(cli.cargo_home.as_deref());

    let pb = if !cli.quiet {
        let pb = ProgressBar::new(records.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        pb.set_message("resolving crates");
        Some(pb)
    } else {
        None
    };

    let outcomes = resolve_all(&records, cargo_home.as_deref(), pb.as_ref());

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let product = cli
        .product
        .clone()
        .or_else(|| config.output.product.clone())
        .or_else(|| path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "project".to_string());

    let out_path = {
        let configured = cli.output.clone().unwrap_or_else(|| config.output.path.clone());
        if configured.is_absolute() {
            configured
        } else {
            path.join(configured)
        }
    };

    if !cli.dry_run {
        let content = notice::render(&outcomes, &product);
        notice::write(&out_path, &content)?;
    }

    if cli.quiet {
        println!("{}", out_path.display());
        return Ok(());
    }

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&outcomes, &path, cli.verbose)?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcomes)?);
        }
    }

    if cli.dry_run {
        println!("Dry run, nothing written ({})", out_path.display());
    } else {
        println!("Wrote {}", out_path.display());
    }

    Ok(())
}

/// Resolve every record against the cache and pick its license files.
///
/// Each crate is processed independently; one failed resolution never
/// affects the others.
fn resolve_all(
    records: &[PackageRecord],
    cargo_home: Option<&Path>,
    pb: Option<&ProgressBar>,
) -> Vec<CrateOutcome> {
    let mut outcomes = Vec::with_capacity(records.len());
    for record in records {
        let crate_dir =
            cargo_home.and_then(|home| cache::find_crate_dir(home, &record.name, &record.version));
        let license_files = crate_dir
            .as_ref()
            .map(|dir| picker::pick_license_files(&dir.path))
            .unwrap_or_default();
        outcomes.push(CrateOutcome {
            name: record.name.clone(),
            version: record.version.clone(),
            crate_dir,
            license_files,
        });
        if let Some(pb) = pb {
            pb.inc(1);
        }
    }
    outcomes
}
