//! The `civic report` command for filing a new issue.

use civic_core::store::open_rest_store;
use civic_core::{Config, IssueStore, MemoryIssueStore, ReportDraft, Urgency};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use super::{load_batch, notice};

/// Urgency levels accepted on the command line.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum UrgencyArg {
    Low,
    #[default]
    Medium,
    High,
}

impl From<UrgencyArg> for Urgency {
    fn from(arg: UrgencyArg) -> Self {
        match arg {
            UrgencyArg::Low => Urgency::Low,
            UrgencyArg::Medium => Urgency::Medium,
            UrgencyArg::High => Urgency::High,
        }
    }
}

/// Arguments for the `report` command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Short summary of the issue
    #[arg(long)]
    pub title: String,

    /// What is wrong and where exactly
    #[arg(long)]
    pub description: String,

    /// Category id (road, water, electricity, sanitation, ...)
    #[arg(long)]
    pub category: String,

    /// How urgently the issue needs attention
    #[arg(long, value_enum, default_value_t = UrgencyArg::Medium)]
    pub urgency: UrgencyArg,

    /// Street address or landmark
    #[arg(long)]
    pub address: Option<String>,

    /// Latitude of the issue
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the issue
    #[arg(long, allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Evidence batch (file or directory); repeat for several batches
    #[arg(long = "evidence", value_name = "PATH")]
    pub evidence: Vec<PathBuf>,

    /// Validate and print the record without contacting the issue store
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the report command.
pub async fn execute(config: &Config, args: ReportArgs) -> anyhow::Result<()> {
    let mut draft = draft_from_args(config, &args);

    for path in &args.evidence {
        let batch = load_batch(config, path).await;
        let outcome = draft.add_evidence(batch).await;
        notice::print(&path.display().to_string(), &outcome);
    }

    let store: Box<dyn IssueStore> = if args.dry_run {
        Box::new(MemoryIssueStore::new())
    } else {
        Box::new(open_rest_store(&config.store)?)
    };

    let record = draft.submit(store.as_ref()).await?;
    for evidence in &record.issue.evidence {
        tracing::info!(
            "Evidence {} ({}, {} bytes, blake3 {})",
            evidence.name,
            evidence.kind,
            evidence.size,
            evidence.content_hash
        );
    }
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn draft_from_args(config: &Config, args: &ReportArgs) -> ReportDraft {
    let mut draft = ReportDraft::from_config(config);
    draft.title = args.title.clone();
    draft.description = args.description.clone();
    draft.category = args.category.clone();
    draft.urgency = args.urgency.into();
    draft.location.address = args.address.clone();
    if let Some(lat) = args.lat {
        draft.location.latitude = lat;
    }
    if let Some(lng) = args.lng {
        draft.location.longitude = lng;
    }
    draft
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ReportArgs {
        ReportArgs {
            title: "Streetlight out".to_string(),
            description: "Dark stretch near the school".to_string(),
            category: "electricity".to_string(),
            urgency: UrgencyArg::High,
            address: Some("School Road".to_string()),
            lat: Some(12.97),
            lng: None,
            evidence: vec![],
            dry_run: true,
        }
    }

    #[test]
    fn draft_takes_form_fields() {
        let draft = draft_from_args(&Config::default(), &args());
        assert_eq!(draft.urgency, Urgency::High);
        assert_eq!(draft.location.latitude, 12.97);
        assert_eq!(draft.location.longitude, 77.209);
        assert!(draft.validate().is_ok());
    }

    #[tokio::test]
    async fn dry_run_with_evidence_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("clip.mp4"), b"frames").unwrap();

        let mut args = args();
        args.evidence = vec![dir.path().to_path_buf()];
        execute(&Config::default(), args).await.unwrap();
    }

    #[tokio::test]
    async fn unknown_category_is_refused() {
        let mut args = args();
        args.category = "spaceport".to_string();
        let err = execute(&Config::default(), args).await.unwrap_err();
        assert!(err.to_string().contains("spaceport"));
    }

    #[tokio::test]
    async fn live_submit_without_endpoint_fails() {
        let mut args = args();
        args.dry_run = false;
        assert!(execute(&Config::default(), args).await.is_err());
    }
}
