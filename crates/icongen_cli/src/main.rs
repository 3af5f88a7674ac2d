//! icongen CLI
//!
//! Convert Compose `ImageVector` icon sources into theme-aware SVG files.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use icongen::{convert_tree, ConvertOptions, EmitOptions};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::IconGenConfig;

#[derive(Parser, Debug)]
#[command(name = "icongen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert Compose ImageVector icons into themed SVG files", long_about = None)]
struct Cli {
    /// Root directory to scan for icon sources
    #[arg(long, value_name = "DIR")]
    src: Option<PathBuf>,

    /// Root directory to write SVG files into (created if missing)
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// CSS color for the light color scheme [default: #000000]
    #[arg(long, value_name = "COLOR")]
    light: Option<String>,

    /// CSS color for the dark color scheme [default: #FFFFFF]
    #[arg(long, value_name = "COLOR")]
    dark: Option<String>,

    /// Keep black and white paints instead of mapping them to currentColor
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    preserve_colors: Option<bool>,

    /// File name to skip (repeatable, replaces the configured list)
    #[arg(long, value_name = "FILE")]
    exclude: Vec<String>,

    /// Configuration file [default: ./icongen.toml when present]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = load_config(cli.config.as_deref())?;
    let options = build_options(cli, config)?;

    if !options.src.is_dir() {
        anyhow::bail!("--src {} is not a directory", options.src.display());
    }

    info!(
        "Converting icons from {} into {}",
        options.src.display(),
        options.out.display()
    );

    let report = convert_tree(&options)
        .with_context(|| format!("Failed to convert {}", options.src.display()))?;

    if report.failures > 0 {
        warn!("{} files could not be read or written", report.failures);
    }
    if report.warnings > 0 {
        info!(
            "{} source constructs were skipped (run with --verbose for details)",
            report.warnings
        );
    }

    println!(
        "Generated {} SVG files in {}",
        report.generated.len(),
        options.out.display()
    );

    Ok(())
}

/// Explicit `--config` must load; the implicit ./icongen.toml is optional
fn load_config(path: Option<&Path>) -> Result<IconGenConfig> {
    match path {
        Some(path) => IconGenConfig::load_from_file(path),
        None => {
            let cwd = std::env::current_dir()?;
            Ok(IconGenConfig::load_from_dir(&cwd)?.unwrap_or_default())
        }
    }
}

/// Merge command-line flags over the configuration file
fn build_options(cli: Cli, config: IconGenConfig) -> Result<ConvertOptions> {
    let Some(src) = cli.src.or(config.convert.src) else {
        anyhow::bail!("Missing required --src <DIR> (or `src` under [convert] in icongen.toml)");
    };
    let Some(out) = cli.out.or(config.convert.out) else {
        anyhow::bail!("Missing required --out <DIR> (or `out` under [convert] in icongen.toml)");
    };

    let mut options = ConvertOptions::new(src, out);
    options.emit = EmitOptions {
        light_color: cli.light.unwrap_or(config.theme.light),
        dark_color: cli.dark.unwrap_or(config.theme.dark),
        preserve_colors: cli.preserve_colors.unwrap_or(config.theme.preserve_colors),
    };
    options.extensions = config.convert.extensions;
    options.exclude = if cli.exclude.is_empty() {
        config.convert.exclude
    } else {
        cli.exclude
    };

    Ok(options)
}
