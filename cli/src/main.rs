use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use provenance_shuffle_core_rs::{
    DigestAlgorithm, HashValue, ShuffleConfig, ShuffleOrchestrator, ShuffleOutcome,
};

/// Shuffle a metadata collection with a seed folded from a published hash.
#[derive(Debug, Parser)]
#[command(name = "provenance-shuffle")]
#[command(version)]
#[command(about = "Deterministic, verifiable metadata shuffle", long_about = None)]
struct Opts {
    /// JSON run config; flags given on the command line take precedence
    #[arg(long, env = "SHUFFLE_CONFIG")]
    config: Option<PathBuf>,

    /// Hex seed hash for shuffling (32 bytes, optional 0x prefix)
    #[arg(long = "seed-hash", alias = "seed_hash", env = "SHUFFLE_SEED_HASH")]
    seed_hash: Option<HashValue>,

    /// Unshuffled JSON collection
    #[arg(long, env = "SHUFFLE_INPUT")]
    input: PathBuf,

    /// Where to write the shuffled collection
    #[arg(long, default_value = "shuffled.json")]
    output: PathBuf,

    /// Number of records the collection must contain [default: 10000]
    #[arg(long)]
    expected_count: Option<usize>,

    /// Provenance digest algorithm (keccak256 or sha256) [default: keccak256]
    #[arg(long)]
    digest: Option<DigestAlgorithm>,

    /// Published digest the unshuffled collection must match
    #[arg(long)]
    expect_initial_digest: Option<String>,

    /// Also write a JSON provenance report (seed, digests) here
    #[arg(long)]
    report: Option<PathBuf>,

    /// Report digests without writing the output file
    #[arg(long)]
    dry_run: bool,
}

impl Opts {
    fn config(&self) -> Result<ShuffleConfig> {
        let mut config = match (&self.config, self.seed_hash) {
            (Some(path), _) => {
                let bytes = fs::read(path)
                    .with_context(|| format!("Failed to read config from {}", path.display()))?;
                ShuffleConfig::from_json(&bytes)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            (None, Some(seed_hash)) => ShuffleConfig::new(seed_hash),
            (None, None) => bail!("--seed-hash is required when no --config is given"),
        };

        if let Some(seed_hash) = self.seed_hash {
            config.seed_hash = seed_hash;
        }
        if let Some(expected_count) = self.expected_count {
            config = config.with_expected_count(expected_count);
        }
        if let Some(digest) = self.digest {
            config = config.with_digest_algorithm(digest);
        }
        if let Some(expected) = &self.expect_initial_digest {
            config = config.with_expected_initial_digest(expected.clone());
        }

        Ok(config)
    }
}

fn report(outcome: &ShuffleOutcome) {
    let algorithm = outcome.initial_digest.algorithm;
    log::info!("Initial collection ({}): {}", algorithm, outcome.initial_digest);
    log::info!("Seed hash: {}", outcome.seed_hash);
    log::info!("XOR-folded bytes: {:#x}", outcome.folded);
    log::info!("RNG seed: {}", outcome.seed);
    log::info!("Shuffled collection ({}): {}", algorithm, outcome.shuffled_digest);
}

fn run(opts: &Opts) -> Result<ShuffleOutcome> {
    let input = fs::read(&opts.input)
        .with_context(|| format!("Failed to read collection from {}", opts.input.display()))?;
    log::debug!("Read {} bytes from {}", input.len(), opts.input.display());

    let outcome = ShuffleOrchestrator::new(opts.config()?)
        .run(&input)
        .context("Shuffle failed")?;
    report(&outcome);

    if opts.dry_run {
        log::info!("Dry run; not writing {}", opts.output.display());
    } else {
        fs::write(&opts.output, &outcome.output)
            .with_context(|| format!("Failed to write {}", opts.output.display()))?;
        log::info!(
            "Wrote {} shuffled records to {}",
            outcome.record_count,
            opts.output.display()
        );
    }

    if let Some(path) = &opts.report {
        let json = outcome.report().to_json()?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        log::info!("Wrote provenance report to {}", path.display());
    }

    Ok(outcome)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = Opts::parse();
    run(&opts)?;

    Ok(())
}
