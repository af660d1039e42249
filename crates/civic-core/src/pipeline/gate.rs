//! Submission gate: screens each batch of selected evidence for near-duplicates.
//!
//! A batch is accepted or rejected as a whole. Images are fingerprinted one at
//! a time in selection order and checked against everything already accepted in
//! the draft plus the earlier images of the same batch. The registry is only
//! extended once the whole batch is known to be clean, so a dropped or rejected
//! batch never leaves partial state behind.

use serde::Serialize;
use std::fmt;

use crate::config::Config;
use crate::evidence::{EvidenceFile, MediaKind};

use super::fingerprint::{Fingerprint, FingerprintGenerator};
use super::registry::{find_duplicate, DuplicateRegistry};

/// Stages of screening one batch.
///
/// A gate is `Hashing` for the whole of [`SubmissionGate::submit_batch`] and
/// back to `Idle` when it returns; the verdict is reported through
/// [`BatchOutcome::state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GateState {
    Idle,
    Hashing,
    Accepted,
    Rejected,
}

/// What an incoming image was found to duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum MatchSource {
    /// An image accepted in an earlier batch, by registry index
    Registry { index: usize },
    /// An earlier image of the same batch, by batch position
    Batch { position: usize },
}

/// The first duplicate found in a rejected batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateMatch {
    /// Name of the offending file
    pub file_name: String,
    /// Its position in the batch
    pub position: usize,
    /// What it matched
    pub matched: MatchSource,
}

/// Result of screening one batch.
#[derive(Debug, Clone)]
pub enum BatchOutcome {
    /// Every file is attached; new fingerprints were registered
    Accepted {
        files: Vec<EvidenceFile>,
        fingerprinted: usize,
        skipped: usize,
    },
    /// Nothing from the batch is kept
    Rejected {
        duplicate: DuplicateMatch,
        discarded: usize,
    },
}

impl BatchOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, BatchOutcome::Accepted { .. })
    }

    /// Terminal gate state this outcome corresponds to.
    pub fn state(&self) -> GateState {
        match self {
            BatchOutcome::Accepted { .. } => GateState::Accepted,
            BatchOutcome::Rejected { .. } => GateState::Rejected,
        }
    }

    /// The user-facing notice for this outcome.
    ///
    /// An empty selection produces no notice.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            BatchOutcome::Accepted { files, .. } if files.is_empty() => None,
            BatchOutcome::Accepted { files, .. } => Some(Notice::FilesAdded {
                count: files.len(),
            }),
            BatchOutcome::Rejected { .. } => Some(Notice::FraudAlert),
        }
    }
}

/// User-visible feedback for a batch.
///
/// Internal errors never produce a notice; they degrade to acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Transient confirmation
    FilesAdded { count: usize },
    /// Blocking alert about a resubmitted photo
    FraudAlert,
}

impl Notice {
    pub fn is_blocking(&self) -> bool {
        matches!(self, Notice::FraudAlert)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Notice::FilesAdded { .. } => "Evidence added",
            Notice::FraudAlert => "Duplicate evidence detected",
        }
    }

    /// Additional detail lines for a blocking alert.
    pub fn details(&self) -> &'static [&'static str] {
        match self {
            Notice::FilesAdded { .. } => &[],
            Notice::FraudAlert => &[
                "This photo has already been submitted.",
                "Uploading the same image again to inflate a report is not allowed. \
                 None of the selected files were added.",
                "Repeated attempts to submit duplicate evidence may lead to your \
                 account being flagged for review.",
            ],
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::FilesAdded { count } => write!(f, "{count} file(s) added"),
            Notice::FraudAlert => write!(f, "{}", self.title()),
        }
    }
}

/// Screens evidence batches for one report draft.
///
/// Owns the draft's [`DuplicateRegistry`]; there is exactly one writer, so no
/// locking is involved.
#[derive(Debug, Clone)]
pub struct SubmissionGate {
    generator: FingerprintGenerator,
    threshold: u32,
    registry: DuplicateRegistry,
}

impl SubmissionGate {
    pub fn new(generator: FingerprintGenerator, threshold: u32) -> Self {
        Self {
            generator,
            threshold,
            registry: DuplicateRegistry::new(),
        }
    }

    /// Build a gate from the detection and limits sections of `config`.
    pub fn from_config(config: &Config) -> Self {
        let generator = FingerprintGenerator::new(&config.detection, config.limits.clone());
        Self::new(generator, config.detection.similarity_threshold)
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn registry(&self) -> &DuplicateRegistry {
        &self.registry
    }

    /// Screen a batch of newly selected files.
    pub async fn submit_batch(&mut self, files: Vec<EvidenceFile>) -> BatchOutcome {
        if files.is_empty() {
            tracing::debug!("Empty selection, nothing to screen");
            return BatchOutcome::Accepted {
                files,
                fingerprinted: 0,
                skipped: 0,
            };
        }
        tracing::debug!(
            "Gate {:?} -> {:?}: screening {} file(s)",
            GateState::Idle,
            GateState::Hashing,
            files.len()
        );

        let outcome = match self.screen(&files).await {
            Ok((pending, skipped)) => {
                let fingerprinted = pending.len();
                self.registry.extend(pending);
                tracing::info!(
                    "Accepted {} file(s), {} new fingerprint(s), {} skipped",
                    files.len(),
                    fingerprinted,
                    skipped
                );
                BatchOutcome::Accepted {
                    files,
                    fingerprinted,
                    skipped,
                }
            }
            Err(duplicate) => {
                tracing::info!(
                    "Rejected batch of {} file(s): {} duplicates {:?}",
                    files.len(),
                    duplicate.file_name,
                    duplicate.matched
                );
                BatchOutcome::Rejected {
                    duplicate,
                    discarded: files.len(),
                }
            }
        };

        tracing::debug!(
            "Gate {:?} -> {:?} -> {:?}",
            GateState::Hashing,
            outcome.state(),
            GateState::Idle
        );
        outcome
    }

    /// Fingerprint the batch in order; stop at the first duplicate.
    ///
    /// Returns the fingerprints to register and the number of images that
    /// could not be fingerprinted.
    async fn screen(
        &self,
        files: &[EvidenceFile],
    ) -> Result<(Vec<Fingerprint>, usize), DuplicateMatch> {
        let mut pending: Vec<Fingerprint> = Vec::new();
        let mut pending_positions: Vec<usize> = Vec::new();
        let mut skipped = 0;

        for (position, file) in files.iter().enumerate() {
            if file.kind() != MediaKind::Image {
                tracing::debug!("{} is {}, not fingerprinted", file.name(), file.kind());
                continue;
            }

            let fingerprint = match self
                .generator
                .generate(file.shared_content(), file.name())
                .await
            {
                Ok(fingerprint) => fingerprint,
                Err(e) => {
                    tracing::warn!("Skipping duplicate check for {}: {e}", file.name());
                    skipped += 1;
                    continue;
                }
            };

            if let Some(index) = self.registry.find(&fingerprint, self.threshold) {
                return Err(DuplicateMatch {
                    file_name: file.name().to_string(),
                    position,
                    matched: MatchSource::Registry { index },
                });
            }
            if let Some(index) = find_duplicate(&fingerprint, &pending, self.threshold) {
                return Err(DuplicateMatch {
                    file_name: file.name().to_string(),
                    position,
                    matched: MatchSource::Batch {
                        position: pending_positions[index],
                    },
                });
            }

            pending.push(fingerprint);
            pending_positions.push(position);
        }

        Ok((pending, skipped))
    }

    /// Forget every registered fingerprint (draft submitted or abandoned).
    pub fn reset(&mut self) {
        self.registry.clear();
    }
}

impl Default for SubmissionGate {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    /// Vertical split at `split` (0..=grid), dark left, bright right.
    fn split_png(split: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(64, 64, |x, _| {
            if x < split * 2 {
                Rgb([10, 10, 10])
            } else {
                Rgb([240, 240, 240])
            }
        });
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn image(name: &str, split: u32) -> EvidenceFile {
        EvidenceFile::new(name, "image/png", split_png(split))
    }

    #[tokio::test]
    async fn test_unique_images_accepted() {
        let mut gate = SubmissionGate::default();
        let outcome = gate
            .submit_batch(vec![image("a.png", 8), image("b.png", 24)])
            .await;

        assert!(outcome.is_accepted());
        assert_eq!(outcome.notice(), Some(Notice::FilesAdded { count: 2 }));
        assert_eq!(outcome.notice().unwrap().to_string(), "2 file(s) added");
        assert_eq!(gate.registry().len(), 2);
        assert_eq!(outcome.state(), GateState::Accepted);
    }

    #[tokio::test]
    async fn test_duplicate_within_batch_rejected() {
        let mut gate = SubmissionGate::default();
        let outcome = gate
            .submit_batch(vec![image("a.png", 8), image("b.png", 24), image("a2.png", 8)])
            .await;

        match outcome {
            BatchOutcome::Rejected {
                ref duplicate,
                discarded,
            } => {
                assert_eq!(discarded, 3);
                assert_eq!(duplicate.position, 2);
                assert_eq!(duplicate.matched, MatchSource::Batch { position: 0 });
            }
            _ => panic!("expected rejection"),
        }
        assert_eq!(outcome.notice(), Some(Notice::FraudAlert));
        assert_eq!(outcome.state(), GateState::Rejected);
        assert!(gate.registry().is_empty());
    }

    #[tokio::test]
    async fn test_empty_selection_has_no_notice() {
        let mut gate = SubmissionGate::default();
        gate.submit_batch(vec![image("a.png", 8)]).await;

        let outcome = gate.submit_batch(vec![]).await;
        assert!(outcome.is_accepted());
        assert_eq!(outcome.notice(), None);
        assert_eq!(gate.registry().len(), 1);
    }

    #[tokio::test]
    async fn test_video_bypasses_fingerprinting() {
        let mut gate = SubmissionGate::default();
        let video = EvidenceFile::new("clip.mp4", "video/mp4", b"not decodable".to_vec());
        let outcome = gate.submit_batch(vec![video, image("a.png", 16)]).await;

        match outcome {
            BatchOutcome::Accepted {
                files,
                fingerprinted,
                skipped,
            } => {
                assert_eq!(files.len(), 2);
                assert_eq!(fingerprinted, 1);
                assert_eq!(skipped, 0);
            }
            _ => panic!("expected acceptance"),
        }
        assert_eq!(gate.registry().len(), 1);
    }

    #[tokio::test]
    async fn test_undecodable_image_is_skipped_not_fatal() {
        let mut gate = SubmissionGate::default();
        let broken = EvidenceFile::new("broken.png", "image/png", b"garbage".to_vec());
        let outcome = gate
            .submit_batch(vec![broken.clone(), image("a.png", 16), broken])
            .await;

        match outcome {
            BatchOutcome::Accepted {
                files,
                fingerprinted,
                skipped,
            } => {
                assert_eq!(files.len(), 3);
                assert_eq!(fingerprinted, 1);
                assert_eq!(skipped, 2);
            }
            _ => panic!("expected acceptance"),
        }
    }

    #[tokio::test]
    async fn test_reset_clears_registry() {
        let mut gate = SubmissionGate::default();
        gate.submit_batch(vec![image("a.png", 8)]).await;
        assert_eq!(gate.registry().len(), 1);

        gate.reset();
        assert!(gate.registry().is_empty());
        assert!(gate.submit_batch(vec![image("a.png", 8)]).await.is_accepted());
    }

    #[test]
    fn test_fraud_alert_is_blocking() {
        assert!(Notice::FraudAlert.is_blocking());
        assert!(!Notice::FilesAdded { count: 1 }.is_blocking());
        assert!(!Notice::FraudAlert.details().is_empty());
        assert!(Notice::FilesAdded { count: 1 }.details().is_empty());
    }
}
