//! Mars Settlers - Entry Point
//!
//! Generates a cohort of founder colonists and writes them as JSON lines.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use mars_settlers::core::types::Sex;
use mars_settlers::{AstronautFactory, ColonistStore, GeneratorConfig, JsonLinesStore, NamePool, Result};
use tracing_subscriber::EnvFilter;

/// Founder colonist generator
#[derive(Parser, Debug)]
#[command(name = "mars-settlers")]
#[command(about = "Generate founder colonists for a Mars colonization simulation")]
struct Args {
    /// Number of colonists to generate
    #[arg(long, short = 'n', default_value_t = 10)]
    count: usize,

    /// Current simulation sol
    #[arg(long, default_value_t = 0)]
    solday: i64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Generator config (TOML); stock weights when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Name lists (TOML); built-in names when omitted
    #[arg(long)]
    names: Option<PathBuf>,

    /// Force every colonist's sex (m/male or f/female)
    #[arg(long)]
    sex: Option<String>,

    /// Output file; stdout when omitted
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mars_settlers=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    let names = match &args.names {
        Some(path) => NamePool::load(path)?,
        None => NamePool::builtin(),
    };
    let sex = args.sex.as_deref().map(str::parse::<Sex>).transpose()?;
    let seed = args.seed.unwrap_or_else(rand::random);

    tracing::info!(
        simulation = %config.simulation_id,
        count = args.count,
        solday = args.solday,
        seed,
        "Generating founders"
    );

    let factory = AstronautFactory::with_config(&names, &config);
    let cohort = factory.create_cohort(args.count, args.solday, seed, sex, None)?;

    let writer: Box<dyn Write> = match &args.out {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut store = JsonLinesStore::new(writer);
    let stored = store.store_all(cohort)?;
    store.into_inner()?;

    eprintln!(
        "Generated {} colonists for simulation {} (seed {})",
        stored, config.simulation_id, seed
    );
    Ok(())
}
