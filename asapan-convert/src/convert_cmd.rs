//! Command-line driver: read the input, run the conversion, commit the output.
//!
//! Output is rendered fully in memory and only written once the whole
//! conversion succeeded. The file is written next to its destination under a
//! temporary name and renamed into place, so a failed run never leaves a
//! partial file behind.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::{Cli, Format, OnMalformed, SummaryFormat};
use crate::path_guard::ensure_output_not_input;
use asapan_convert::config::load_config;
use asapan_convert::convert::{convert, ConvertOptions, MalformedLinePolicy, SkippedLine};
use asapan_convert::render::OutputFormat;
use asapan_convert::summary::{render as render_summary, SummaryReport};

pub fn run_convert(args: Cli) -> Result<()> {
    ensure_output_not_input(&args.output, &args.input)?;
    let options = resolve_options(&args)?;

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let lines: Vec<&str> = raw.lines().collect();

    let conversion = convert(&lines, &options)
        .with_context(|| format!("failed to convert {}", args.input.display()))?;
    for skipped in &conversion.skipped {
        print_skipped(skipped);
    }

    commit_output(&args.output, &conversion.output)
        .with_context(|| format!("failed to write output {}", args.output.display()))?;

    match options.format {
        OutputFormat::Set => println!("Palo Alto config written to: {}", args.output.display()),
        OutputFormat::Xml => println!("Panorama XML written to: {}", args.output.display()),
    }
    match args.summary {
        SummaryFormat::Text => println!("{}", render_summary(conversion.summary).cyan()),
        SummaryFormat::Json => {
            let report = SummaryReport::new(&conversion);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

/// Defaults, then the settings file, then command-line flags.
fn resolve_options(args: &Cli) -> Result<ConvertOptions> {
    let mut options = ConvertOptions::default();
    if let Some(path) = &args.config {
        let file = load_config(path)?;
        log::debug!("loaded settings from {}", path.display());
        options = file.apply(options);
    }

    if args.xml {
        options.format = OutputFormat::Xml;
    }
    if let Some(format) = args.format {
        options.format = match format {
            Format::Set => OutputFormat::Set,
            Format::Xml => OutputFormat::Xml,
        };
    }
    if let Some(device_group) = &args.device_group {
        options.device_group = device_group.clone();
    }
    if args.no_tags {
        options.render.include_tags = false;
    }
    if let Some(tag_name) = &args.tag_name {
        options.render.tag_name = tag_name.clone();
    }
    if let Some(policy) = args.on_malformed {
        options.on_malformed = match policy {
            OnMalformed::Abort => MalformedLinePolicy::Abort,
            OnMalformed::Skip => MalformedLinePolicy::Skip,
        };
    }
    Ok(options)
}

fn print_skipped(skipped: &SkippedLine) {
    eprintln!(
        "{} skipped access-list rule #{} at line {}: {} ('{}')",
        "warning:".yellow(),
        skipped.index,
        skipped.line_number,
        skipped.reason,
        skipped.line
    );
}

fn commit_output(path: &Path, bytes: &[u8]) -> Result<()> {
    let staging = staging_path(path);
    fs::write(&staging, bytes)
        .with_context(|| format!("failed to write {}", staging.display()))?;
    if let Err(err) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(err).with_context(|| format!("failed to move output into {}", path.display()));
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{name}.partial"))
}
