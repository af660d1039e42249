//! The `civic compare` command.

use civic_core::pipeline::hamming_distance;
use civic_core::{Config, Fingerprint, FingerprintGenerator};
use clap::Args;
use std::path::Path;

/// Arguments for the `compare` command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First image path or hex fingerprint
    pub left: String,

    /// Second image path or hex fingerprint
    pub right: String,

    /// Maximum Hamming distance counted as a duplicate [default: from config]
    #[arg(short, long)]
    pub threshold: Option<u32>,
}

/// Execute the compare command.
pub async fn execute(config: &Config, args: CompareArgs) -> anyhow::Result<()> {
    let generator = FingerprintGenerator::new(&config.detection, config.limits.clone());
    let threshold = args
        .threshold
        .unwrap_or(config.detection.similarity_threshold);

    let left = resolve(&generator, &args.left).await?;
    let right = resolve(&generator, &args.right).await?;

    let distance = hamming_distance(&left, &right)?;
    let verdict = if distance <= threshold {
        "duplicate"
    } else {
        "distinct"
    };
    println!(
        "distance {distance}/{} (threshold {threshold}): {verdict}",
        left.len_bits()
    );
    Ok(())
}

/// An existing file is fingerprinted; anything else is parsed as hex.
async fn resolve(generator: &FingerprintGenerator, arg: &str) -> anyhow::Result<Fingerprint> {
    let path = Path::new(arg);
    if path.is_file() {
        return Ok(generator.generate_from_path(path).await?);
    }
    Fingerprint::from_hex(arg)
        .map_err(|e| anyhow::anyhow!("{arg:?} is neither an image file nor a fingerprint: {e}"))
}
