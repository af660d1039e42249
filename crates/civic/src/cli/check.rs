//! The `civic check` command: screens selection batches as one draft would.

use civic_core::{Config, SubmissionGate};
use clap::Args;
use std::path::PathBuf;

use super::{load_batch, notice};

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// One selection batch per argument (a file, or a directory of files)
    #[arg(required = true)]
    pub batches: Vec<PathBuf>,

    /// Maximum Hamming distance counted as a duplicate [default: from config]
    #[arg(short, long)]
    pub threshold: Option<u32>,
}

/// Execute the check command.
///
/// Fails if any batch was rejected, so scripts can gate on the exit status.
pub async fn execute(config: &Config, args: CheckArgs) -> anyhow::Result<()> {
    let mut gate = gate_for(config, args.threshold);

    let mut rejected = 0usize;
    for (i, path) in args.batches.iter().enumerate() {
        let batch = load_batch(config, path).await;
        let outcome = gate.submit_batch(batch).await;
        if !outcome.is_accepted() {
            rejected += 1;
        }
        notice::print(&format!("batch {} ({})", i + 1, path.display()), &outcome);
    }

    tracing::info!(
        "{} fingerprint(s) registered across {} batch(es)",
        gate.registry().len(),
        args.batches.len()
    );
    if rejected > 0 {
        anyhow::bail!(
            "{rejected} of {} batch(es) rejected as duplicate evidence",
            args.batches.len()
        );
    }
    Ok(())
}

fn gate_for(config: &Config, threshold: Option<u32>) -> SubmissionGate {
    match threshold {
        Some(threshold) => {
            let mut config = config.clone();
            config.detection.similarity_threshold = threshold;
            SubmissionGate::from_config(&config)
        }
        None => SubmissionGate::from_config(config),
    }
}
