//! Terminal rendering of batch notices.

use civic_core::{BatchOutcome, MatchSource, Notice};
use console::style;

/// Lines shown to the reporter for one screened batch.
///
/// Empty when the batch had nothing to report.
pub(crate) fn render(label: &str, outcome: &BatchOutcome) -> Vec<String> {
    let Some(notice) = outcome.notice() else {
        return Vec::new();
    };
    match outcome {
        BatchOutcome::Accepted { skipped, .. } => {
            let mut lines = vec![format!("{} {label}: {notice}", style("✓").green())];
            if *skipped > 0 {
                lines.push(format!(
                    "  {}",
                    style(format!("{skipped} image(s) could not be checked")).dim()
                ));
            }
            lines
        }
        BatchOutcome::Rejected { duplicate, .. } => {
            let mut lines = vec![format!(
                "{} {label}: {}",
                style("✗").red(),
                style(notice.title()).red().bold()
            )];
            lines.extend(notice.details().iter().map(|d| format!("  {d}")));
            let matched = match duplicate.matched {
                MatchSource::Registry { index } => format!("previously added image #{}", index + 1),
                MatchSource::Batch { position } => format!("file #{} of this batch", position + 1),
            };
            lines.push(format!(
                "  {}",
                style(format!("{} matches {matched}", duplicate.file_name)).dim()
            ));
            lines
        }
    }
}

/// Print the notice for `outcome` to stdout.
pub(crate) fn print(label: &str, outcome: &BatchOutcome) {
    for line in render(label, outcome) {
        println!("{line}");
    }
    if let Some(Notice::FraudAlert) = outcome.notice() {
        println!();
    }
}
