//! glb-palette - CLI tool to extract a color palette from a glTF asset.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use glb_palette::{AnalysisResult, AnalyzerConfig, FileFetcher, PaletteExtractor};

/// Extract a representative color palette from a glTF binary furniture asset.
#[derive(Parser, Debug)]
#[command(name = "glb-palette")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input GLB/glTF file path
    #[arg(short, long)]
    input: PathBuf,

    /// Asset display name (defaults to the file stem)
    #[arg(short, long)]
    name: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Euclidean RGB distance under which a color counts as neutral
    #[arg(long)]
    neutral_tolerance: Option<f32>,

    /// k-means seed
    #[arg(long)]
    seed: Option<u64>,

    /// Output JSON file path (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Include nearest color names in the output
    #[arg(long)]
    names: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    #[serde(flatten)]
    result: &'a AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    color_names: Option<Vec<&'static str>>,
}

fn load_config(args: &Args) -> Result<AnalyzerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            AnalyzerConfig::from_json(&json)
                .with_context(|| format!("Invalid configuration in {}", path.display()))?
        }
        None => AnalyzerConfig::default(),
    };

    if let Some(tolerance) = args.neutral_tolerance {
        config = config.with_neutral_tolerance(tolerance);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&args)?;
    let name = args.name.clone().unwrap_or_else(|| {
        args.input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string()
    });

    info!("Processing: {}", args.input.display());

    let fetcher = FileFetcher::new().with_max_bytes(config.max_asset_bytes);
    let extractor = PaletteExtractor::new(config);
    let result = extractor.analyze_fetched(fetcher.read_path(&args.input), &name);

    if let Some(err) = &result.error {
        warn!("{}", err);
    }

    let output = Output {
        result: &result,
        color_names: args.names.then(|| result.color_names()),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Generated: {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
