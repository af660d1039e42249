//! Issue persistence through the hosted data service.
//!
//! The store is an external collaborator: this crate only inserts new reports
//! and reads recent ones. Status transitions, auth, and profiles all live on
//! the service side.

mod memory;
mod rest;

pub use memory::MemoryIssueStore;
pub use rest::RestIssueStore;

use async_trait::async_trait;
use std::time::Duration;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::types::{IssueRecord, NewIssue};

/// Trait that all issue stores implement.
///
/// Uses `async_trait` so drafts can submit through `&dyn IssueStore`.
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Store name for logging.
    fn name(&self) -> &str;

    /// Insert a new issue and return the stored row.
    async fn insert(&self, issue: &NewIssue) -> Result<IssueRecord, StoreError>;

    /// Most recently created issues, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<IssueRecord>, StoreError>;
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Create the REST store described by `config`.
pub fn open_rest_store(config: &StoreConfig) -> Result<RestIssueStore, StoreError> {
    let endpoint = config.endpoint.as_deref().ok_or(StoreError::NotConfigured)?;
    let api_key = resolve_env_var(&config.api_key).ok_or_else(|| StoreError::Request {
        message: format!(
            "Issue store API key not set (store.api_key = {:?})",
            config.api_key
        ),
        status_code: None,
    })?;
    RestIssueStore::new(
        endpoint,
        &config.table,
        &api_key,
        Duration::from_millis(config.timeout_ms),
    )
}
