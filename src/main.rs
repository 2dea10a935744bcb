use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use episode_quality::algorithm::statistics::RunSummary;
use episode_quality::utils::sample::sample_raw_records;
use episode_quality::{ScoringConfig, ScoringEngine, WeightingConstants, export, loader};

/// Command-line arguments for episode-quality
#[derive(Parser, Debug)]
#[command(name = "episode-quality")]
#[command(about = "Score the data quality of maternity episode records")]
#[command(version)]
struct Args {
    /// CSV file of episode records; the built-in sample run is used when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory to write score tables into
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Field-tier multiplier
    #[arg(long)]
    field_weight: Option<u32>,

    /// Intra-record-tier multiplier
    #[arg(long)]
    intra_weight: Option<u32>,

    /// Inter-record-tier multiplier
    #[arg(long)]
    inter_weight: Option<u32>,

    /// Evaluate records on a single thread
    #[arg(long)]
    sequential: bool,

    /// Draw progress bars
    #[arg(long)]
    progress: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let start = Instant::now();

    let env_weights =
        WeightingConstants::from_env().context("Invalid weighting constants in environment")?;
    let weights = WeightingConstants::new(
        args.field_weight.unwrap_or(env_weights.field()),
        args.intra_weight.unwrap_or(env_weights.intra()),
        args.inter_weight.unwrap_or(env_weights.inter()),
    )
    .context("Invalid weighting constants")?;

    let config = ScoringConfig::new()
        .with_weights(weights)
        .with_parallel(!args.sequential)
        .with_progress(args.progress);

    let raw = match &args.input {
        Some(path) => loader::load_csv(path)
            .with_context(|| format!("Failed to load episodes from {}", path.display()))?,
        None => {
            warn!("No input file given, scoring the built-in sample episodes");
            sample_raw_records()
        }
    };

    let engine = ScoringEngine::new(config);
    info!("{}", engine.config());
    let output = engine.score_raw(&raw).context("Scoring failed")?;
    println!("{}", RunSummary::from_output(&output));

    if let Some(dir) = &args.output {
        let written = export::write_all(&output, dir)
            .with_context(|| format!("Failed to write results to {}", dir.display()))?;
        for path in written {
            info!("Wrote {}", path.display());
        }
    }

    info!("Finished in {:?}", start.elapsed());
    Ok(())
}
