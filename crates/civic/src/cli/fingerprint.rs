//! The `civic fingerprint` command.

use civic_core::evidence::media_type_for_path;
use civic_core::pipeline::MediaDiscovery;
use civic_core::{Config, Fingerprint, FingerprintGenerator, MediaKind};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the `fingerprint` command.
#[derive(Args, Debug)]
pub struct FingerprintArgs {
    /// Image files or directories
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Print a JSON array instead of tab-separated lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct FingerprintLine {
    path: PathBuf,
    bits: usize,
    fingerprint: Fingerprint,
}

/// Execute the fingerprint command.
pub async fn execute(config: &Config, args: FingerprintArgs) -> anyhow::Result<()> {
    let generator = FingerprintGenerator::new(&config.detection, config.limits.clone());
    let discovery = MediaDiscovery::new(config.media.clone());

    let images: Vec<PathBuf> = args
        .paths
        .iter()
        .flat_map(|p| discovery.discover(p))
        .filter(|p| {
            MediaKind::from_media_type(&media_type_for_path(p, &config.media)) == MediaKind::Image
        })
        .collect();
    if images.is_empty() {
        anyhow::bail!("No images found in {:?}", args.paths);
    }

    let mut lines = Vec::with_capacity(images.len());
    let mut failed = 0usize;
    for path in images {
        match generator.generate_from_path(&path).await {
            Ok(fingerprint) => {
                if !args.json {
                    println!("{}\t{}", path.display(), fingerprint);
                }
                lines.push(FingerprintLine {
                    bits: fingerprint.len_bits(),
                    path,
                    fingerprint,
                });
            }
            Err(e) => {
                tracing::error!("{e}");
                failed += 1;
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    }
    if failed > 0 {
        tracing::warn!("{failed} image(s) could not be fingerprinted");
    }
    if lines.is_empty() {
        anyhow::bail!("No image could be fingerprinted");
    }
    Ok(())
}
