//! Issue data exchanged with the hosted issue store.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::evidence::EvidenceSummary;

/// How urgently an issue needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Low => write!(f, "low"),
            Urgency::Medium => write!(f, "medium"),
            Urgency::High => write!(f, "high"),
        }
    }
}

/// Resolution status of an issue.
///
/// New reports are always created as [`IssueStatus::Reported`]; later
/// transitions happen in the hosted store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    #[default]
    Reported,
    Pending,
    Open,
    InProgress,
    Resolved,
    Rejected,
}

impl IssueStatus {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            IssueStatus::Reported => "Reported",
            IssueStatus::Pending => "Pending Review",
            IssueStatus::Open => "Open",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Resolved => "Resolved",
            IssueStatus::Rejected => "Rejected",
        }
    }
}

/// Where an issue was observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Human-readable address picked on the map, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Default for Location {
    /// City-centre default used before the reporter picks a point.
    fn default() -> Self {
        Self {
            latitude: 28.6139,
            longitude: 77.209,
            address: None,
        }
    }
}

impl Location {
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A row to insert into the issues table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    pub category: String,
    pub urgency: Urgency,
    pub status: IssueStatus,
    pub location_address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Evidence attached in the draft. Not a column of the issues table, so
    /// it never goes over the wire.
    #[serde(skip)]
    pub evidence: Vec<EvidenceSummary>,
}

/// An issue as stored by the hosted service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueRecord {
    /// Row id; numeric ids are normalized to strings
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Creation timestamp as reported by the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(flatten)]
    pub issue: NewIssue,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&IssueStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        assert_eq!(IssueStatus::InProgress.label(), "In Progress");
        assert_eq!(IssueStatus::default(), IssueStatus::Reported);
    }

    #[test]
    fn test_location_bounds() {
        assert!(Location::default().is_valid());
        let bad = Location {
            latitude: 91.0,
            ..Location::default()
        };
        assert!(!bad.is_valid());
    }

    #[test]
    fn test_record_accepts_numeric_id_and_missing_columns() {
        let json = r#"{
            "id": 42,
            "created_at": "2024-05-01T10:00:00Z",
            "title": "Pothole on MG Road",
            "description": "Deep pothole near the bus stop",
            "category": "road",
            "status": "open",
            "latitude": 12.97,
            "longitude": 77.59,
            "user_id": "ignored"
        }"#;
        let record: IssueRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.issue.status, IssueStatus::Open);
        assert_eq!(record.issue.urgency, Urgency::Medium);
        assert!(record.issue.location_address.is_none());
    }

    #[test]
    fn test_new_issue_never_serializes_evidence() {
        let clip = crate::evidence::EvidenceFile::new("clip.mp4", "video/mp4", vec![1, 2]);
        let issue = NewIssue {
            title: "t".into(),
            evidence: vec![clip.summary()],
            ..NewIssue::default()
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert!(json.get("evidence").is_none());
        assert_eq!(json["status"], "reported");
        assert_eq!(json["urgency"], "medium");
    }
}
