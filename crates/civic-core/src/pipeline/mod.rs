//! Duplicate evidence detection pipeline.
//!
//! This module contains the stages evidence passes through on upload:
//! - **decode**: Load and decode images with limits and timeout
//! - **fingerprint**: Average-luminance perceptual fingerprints
//! - **compare**: Hamming distance and similarity policy
//! - **registry**: Per-draft record of accepted fingerprints
//! - **gate**: Batch-level accept/reject orchestration
//! - **discovery**: Find media files on disk

pub mod compare;
pub mod decode;
pub mod discovery;
pub mod fingerprint;
pub mod gate;
pub mod registry;

// Re-exports for convenient access
pub use compare::{are_similar, are_similar_hex, hamming_distance};
pub use decode::{DecodedImage, ImageDecoder};
pub use discovery::MediaDiscovery;
pub use fingerprint::{Fingerprint, FingerprintGenerator};
pub use gate::{BatchOutcome, DuplicateMatch, GateState, MatchSource, Notice, SubmissionGate};
pub use registry::{find_duplicate, DuplicateRegistry};
