//! Civic Core - issue reporting with near-duplicate evidence detection.
//!
//! Citizens report infrastructure problems with photo and video evidence.
//! Every uploaded photo is fingerprinted and compared against the photos
//! already attached to the same report, and a batch containing a resubmitted
//! photo is refused as a whole.
//!
//! # Architecture
//!
//! ```text
//! Selected files → Decode → Fingerprint (32×32 average luminance)
//!               → Compare (Hamming ≤ threshold) against draft registry
//!               → Accept batch | Reject batch with fraud alert
//! Draft → validate → IssueStore (hosted REST service)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use civic_core::{Config, EvidenceFile, MemoryIssueStore, ReportDraft};
//!
//! #[tokio::main]
//! async fn main() -> civic_core::Result<()> {
//!     let config = Config::load()?;
//!     let mut draft = ReportDraft::from_config(&config);
//!     draft.title = "Pothole on MG Road".into();
//!     draft.description = "Deep pothole near the bus stop".into();
//!     draft.category = "road".into();
//!
//!     let photo = EvidenceFile::new("pothole.jpg", "image/jpeg", std::fs::read("pothole.jpg")?);
//!     let outcome = draft.add_evidence(vec![photo]).await;
//!     if let Some(notice) = outcome.notice() {
//!         println!("{notice}");
//!     }
//!
//!     let record = draft.submit(&MemoryIssueStore::new()).await?;
//!     println!("Reported issue {}", record.id);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod category;
pub mod config;
pub mod draft;
pub mod error;
pub mod evidence;
pub mod pipeline;
pub mod store;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use draft::ReportDraft;
pub use error::{
    CivicError, CompareError, ConfigError, DraftError, FingerprintError, Result, StoreError,
};
pub use evidence::{EvidenceFile, EvidenceSummary, MediaKind};
pub use pipeline::{
    BatchOutcome, DuplicateMatch, DuplicateRegistry, Fingerprint, FingerprintGenerator,
    GateState, MatchSource, Notice, SubmissionGate,
};
pub use store::{IssueStore, MemoryIssueStore, RestIssueStore};
pub use types::{IssueRecord, IssueStatus, Location, NewIssue, Urgency};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
