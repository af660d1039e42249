//! In-process issue store for dry runs and tests.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::IssueStore;
use crate::error::StoreError;
use crate::types::{IssueRecord, NewIssue};

/// Keeps inserted issues in memory with sequential ids.
#[derive(Debug, Default)]
pub struct MemoryIssueStore {
    rows: Mutex<Vec<IssueRecord>>,
}

impl MemoryIssueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored issues.
    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.lock().await.is_empty()
    }
}

#[async_trait]
impl IssueStore for MemoryIssueStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn insert(&self, issue: &NewIssue) -> Result<IssueRecord, StoreError> {
        let mut rows = self.rows.lock().await;
        let record = IssueRecord {
            id: (rows.len() + 1).to_string(),
            created_at: None,
            issue: issue.clone(),
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<IssueRecord>, StoreError> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().rev().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(title: &str) -> NewIssue {
        NewIssue {
            title: title.to_string(),
            ..NewIssue::default()
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = MemoryIssueStore::new();
        assert!(store.is_empty().await);
        let a = store.insert(&issue("a")).await.unwrap();
        let b = store.insert(&issue("b")).await.unwrap();
        assert_eq!(a.id, "1");
        assert_eq!(b.id, "2");
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_recent_newest_first_with_limit() {
        let store = MemoryIssueStore::new();
        for title in ["a", "b", "c"] {
            store.insert(&issue(title)).await.unwrap();
        }
        let recent = store.recent(2).await.unwrap();
        let titles: Vec<_> = recent.iter().map(|r| r.issue.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b"]);
    }
}
