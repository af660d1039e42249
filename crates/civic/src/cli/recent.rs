//! The `civic recent` command.

use civic_core::store::open_rest_store;
use civic_core::{Config, IssueRecord, IssueStore};
use clap::Args;

/// Arguments for the `recent` command.
#[derive(Args, Debug)]
pub struct RecentArgs {
    /// Number of issues to list
    #[arg(short = 'n', long, default_value_t = 10)]
    pub limit: usize,

    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the recent command.
pub async fn execute(config: &Config, args: RecentArgs) -> anyhow::Result<()> {
    let store = open_rest_store(&config.store)?;
    let records = store.recent(args.limit).await?;
    tracing::debug!("{} issue(s) fetched from {}", records.len(), store.name());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("No issues reported yet.");
    } else {
        for record in &records {
            println!("{}", summary_line(record));
        }
    }
    Ok(())
}

fn summary_line(record: &IssueRecord) -> String {
    let issue = &record.issue;
    format!(
        "#{:<6} {:<14} {:<7} {:<12} {}",
        record.id,
        issue.status.label(),
        issue.urgency.to_string(),
        issue.category,
        issue.title
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_core::{IssueStatus, NewIssue};

    #[test]
    fn summary_line_columns() {
        let record = IssueRecord {
            id: "42".to_string(),
            created_at: None,
            issue: NewIssue {
                title: "Garbage pile".to_string(),
                category: "sanitation".to_string(),
                status: IssueStatus::InProgress,
                ..NewIssue::default()
            },
        };
        let line = summary_line(&record);
        assert!(line.starts_with("#42 "));
        assert!(line.contains("In Progress"));
        assert!(line.ends_with("sanitation   Garbage pile"));
    }
}
