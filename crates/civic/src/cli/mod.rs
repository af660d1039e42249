//! Command handlers for the `civic` binary.

pub mod check;
pub mod compare;
pub mod config;
pub mod fingerprint;
pub mod recent;
pub mod report;

mod notice;

use civic_core::pipeline::MediaDiscovery;
use civic_core::{Config, EvidenceFile};
use std::path::Path;

/// Read every supported media file under `path` as one selection batch.
///
/// Files that cannot be read are left out of the batch with a warning.
pub(crate) async fn load_batch(config: &Config, path: &Path) -> Vec<EvidenceFile> {
    let discovery = MediaDiscovery::new(config.media.clone());
    let paths = discovery.discover(path);
    if paths.is_empty() {
        tracing::warn!("No image or video files found at {:?}", path);
    }

    let mut batch = Vec::with_capacity(paths.len());
    for file in paths {
        match EvidenceFile::from_path(&file, &config.media).await {
            Ok(evidence) => batch.push(evidence),
            Err(e) => tracing::warn!("Leaving {:?} out of the batch: {e}", file),
        }
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_batch_reads_supported_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.mp4"), b"video").unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"not really a jpeg").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"skip me").unwrap();

        let batch = load_batch(&Config::default(), dir.path()).await;
        let names: Vec<&str> = batch.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["a.jpg", "b.mp4"]);
        assert_eq!(batch[0].media_type(), "image/jpeg");
        assert_eq!(batch[1].media_type(), "video/mp4");
    }

    #[tokio::test]
    async fn load_batch_of_missing_path_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let batch = load_batch(&Config::default(), &dir.path().join("gone")).await;
        assert!(batch.is_empty());
    }
}
