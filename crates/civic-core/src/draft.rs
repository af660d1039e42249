//! Issue report drafts.
//!
//! A draft collects the form fields and the evidence of one report. Evidence
//! only enters the draft through its [`SubmissionGate`], so every attached
//! image has been screened against the draft's earlier uploads.

use crate::category;
use crate::config::Config;
use crate::error::{CivicError, DraftError};
use crate::evidence::EvidenceFile;
use crate::pipeline::{BatchOutcome, SubmissionGate};
use crate::store::IssueStore;
use crate::types::{IssueRecord, IssueStatus, Location, NewIssue, Urgency};

/// A report being composed before submission.
#[derive(Debug, Clone)]
pub struct ReportDraft {
    pub title: String,
    pub description: String,
    /// Category id from [`category::CATEGORIES`]
    pub category: String,
    pub urgency: Urgency,
    pub location: Location,
    evidence: Vec<EvidenceFile>,
    gate: SubmissionGate,
}

impl ReportDraft {
    /// Start an empty draft screened by `gate`.
    pub fn new(gate: SubmissionGate) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: String::new(),
            urgency: Urgency::default(),
            location: Location::default(),
            evidence: Vec::new(),
            gate,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(SubmissionGate::from_config(config))
    }

    /// Evidence attached so far, in upload order.
    pub fn evidence(&self) -> &[EvidenceFile] {
        &self.evidence
    }

    pub fn gate(&self) -> &SubmissionGate {
        &self.gate
    }

    /// Screen a newly selected batch; attach it only if accepted.
    pub async fn add_evidence(&mut self, files: Vec<EvidenceFile>) -> BatchOutcome {
        let outcome = self.gate.submit_batch(files).await;
        if let BatchOutcome::Accepted { files, .. } = &outcome {
            self.evidence.extend(files.iter().cloned());
        }
        outcome
    }

    /// Check the required fields.
    pub fn validate(&self) -> Result<(), DraftError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.category.trim().is_empty() {
            missing.push("category");
        }
        if !missing.is_empty() {
            return Err(DraftError::MissingFields(missing));
        }

        if category::find(&self.category).is_none() {
            return Err(DraftError::UnknownCategory(self.category.clone()));
        }
        if !self.location.is_valid() {
            return Err(DraftError::InvalidLocation {
                latitude: self.location.latitude,
                longitude: self.location.longitude,
            });
        }
        Ok(())
    }

    /// The row this draft would insert.
    pub fn to_new_issue(&self) -> Result<NewIssue, DraftError> {
        self.validate()?;
        Ok(NewIssue {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.clone(),
            urgency: self.urgency,
            status: IssueStatus::Reported,
            location_address: self
                .location
                .address
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(String::from),
            latitude: self.location.latitude,
            longitude: self.location.longitude,
            evidence: self.evidence.iter().map(EvidenceFile::summary).collect(),
        })
    }

    /// Insert the report and reset the draft.
    ///
    /// If the store rejects the insert, the draft is left as it was so the
    /// reporter can retry.
    pub async fn submit(&mut self, store: &dyn IssueStore) -> Result<IssueRecord, CivicError> {
        let issue = self.to_new_issue()?;
        let record = store.insert(&issue).await?;
        tracing::info!(
            "Issue {} reported via {} with {} evidence file(s)",
            record.id,
            store.name(),
            issue.evidence.len()
        );
        self.reset();
        Ok(record)
    }

    /// Discard the draft without submitting.
    pub fn abandon(&mut self) {
        tracing::debug!("Draft abandoned with {} evidence file(s)", self.evidence.len());
        self.reset();
    }

    fn reset(&mut self) {
        self.title.clear();
        self.description.clear();
        self.category.clear();
        self.urgency = Urgency::default();
        self.location = Location::default();
        self.evidence.clear();
        self.gate.reset();
    }
}

impl Default for ReportDraft {
    fn default() -> Self {
        Self::new(SubmissionGate::default())
    }
}
