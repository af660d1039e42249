//! REST issue store speaking the PostgREST dialect of the hosted service.
//!
//! Rows live under `{endpoint}/rest/v1/{table}`; requests carry the project
//! key both as `apikey` and as a bearer token.

use async_trait::async_trait;
use std::time::Duration;

use super::IssueStore;
use crate::error::StoreError;
use crate::types::{IssueRecord, NewIssue};

/// Hosted issue store reached over HTTPS.
#[cfg_attr(test, derive(Debug))]
pub struct RestIssueStore {
    table_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl RestIssueStore {
    pub fn new(
        endpoint: &str,
        table: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Request {
                message: format!("Failed to build HTTP client: {e}"),
                status_code: None,
            })?;
        Ok(Self {
            table_url: format!("{}/rest/v1/{}", endpoint.trim_end_matches('/'), table),
            api_key: api_key.to_string(),
            client,
        })
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn parse_rows(resp: reqwest::Response) -> Result<Vec<IssueRecord>, StoreError> {
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(StoreError::Request {
                message: format!("HTTP {status}: {text}"),
                status_code: Some(status.as_u16()),
            });
        }
        resp.json()
            .await
            .map_err(|e| StoreError::Response(e.to_string()))
    }
}

#[async_trait]
impl IssueStore for RestIssueStore {
    fn name(&self) -> &str {
        "rest"
    }

    async fn insert(&self, issue: &NewIssue) -> Result<IssueRecord, StoreError> {
        let resp = self
            .authorized(self.client.post(&self.table_url))
            .header("Prefer", "return=representation")
            .json(issue)
            .send()
            .await
            .map_err(|e| StoreError::Request {
                message: format!("Insert failed: {e}"),
                status_code: None,
            })?;

        let mut record = Self::parse_rows(resp)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Response("insert returned no rows".to_string()))?;
        // The table has no evidence column; keep the summaries on the record
        record.issue.evidence = issue.evidence.clone();
        Ok(record)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<IssueRecord>, StoreError> {
        let limit = limit.to_string();
        let resp = self
            .authorized(self.client.get(&self.table_url))
            .query(&[
                ("select", "*"),
                ("order", "created_at.desc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| StoreError::Request {
                message: format!("Query failed: {e}"),
                status_code: None,
            })?;

        Self::parse_rows(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::ReportDraft;
    use crate::evidence::EvidenceFile;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one HTTP response and hand back the raw request text.
    async fn one_shot_server(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buf).to_string();
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let content_length = text[..head_end]
                        .lines()
                        .find_map(|l| {
                            let lower = l.to_ascii_lowercase();
                            lower
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                        })
                        .unwrap_or(0);
                    if buf.len() >= head_end + 4 + content_length {
                        break;
                    }
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&buf).to_string()
        });

        (format!("http://{addr}"), handle)
    }

    #[tokio::test]
    async fn test_insert_posts_row_with_auth_headers() {
        let (endpoint, server) = one_shot_server(
            "201 Created",
            r#"[{"id":7,"created_at":"2024-05-01T10:00:00Z","title":"Broken streetlight","description":"Dark for a week","category":"electricity","status":"reported","latitude":28.6,"longitude":77.2}]"#,
        )
        .await;
        let store =
            RestIssueStore::new(&endpoint, "issues", "anon-key", Duration::from_secs(5)).unwrap();

        let issue = NewIssue {
            title: "Broken streetlight".to_string(),
            description: "Dark for a week".to_string(),
            category: "electricity".to_string(),
            latitude: 28.6,
            longitude: 77.2,
            ..NewIssue::default()
        };
        let record = store.insert(&issue).await.unwrap();
        assert_eq!(record.id, "7");
        assert_eq!(record.issue.title, "Broken streetlight");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /rest/v1/issues "));
        let lower = request.to_ascii_lowercase();
        assert!(lower.contains("apikey: anon-key"));
        assert!(lower.contains("authorization: bearer anon-key"));
        assert!(lower.contains("prefer: return=representation"));
        assert!(request.contains("\"status\":\"reported\""));
    }

    #[tokio::test]
    async fn test_draft_with_evidence_posts_only_table_columns() {
        let (endpoint, server) = one_shot_server(
            "201 Created",
            r#"[{"id":"a1b2","title":"Open manhole","description":"No cover on the footpath","category":"safety","latitude":28.6139,"longitude":77.209}]"#,
        )
        .await;
        let store =
            RestIssueStore::new(&endpoint, "issues", "anon-key", Duration::from_secs(5)).unwrap();

        let mut draft = ReportDraft::default();
        draft.title = "Open manhole".to_string();
        draft.description = "No cover on the footpath".to_string();
        draft.category = "safety".to_string();
        let clip = EvidenceFile::new("manhole.mp4", "video/mp4", b"frames".to_vec());
        assert!(draft.add_evidence(vec![clip]).await.is_accepted());

        let record = draft.submit(&store).await.unwrap();
        assert_eq!(record.id, "a1b2");
        assert_eq!(record.issue.evidence.len(), 1);
        assert_eq!(record.issue.evidence[0].name, "manhole.mp4");

        let request = server.await.unwrap();
        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "category",
                "description",
                "latitude",
                "location_address",
                "longitude",
                "status",
                "title",
                "urgency",
            ]
        );
    }

    #[tokio::test]
    async fn test_recent_queries_newest_first() {
        let (endpoint, server) = one_shot_server("200 OK", "[]").await;
        let store =
            RestIssueStore::new(&endpoint, "issues", "anon-key", Duration::from_secs(5)).unwrap();

        let rows = store.recent(4).await.unwrap();
        assert!(rows.is_empty());

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /rest/v1/issues?"));
        assert!(request.contains("order=created_at.desc"));
        assert!(request.contains("limit=4"));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (endpoint, server) =
            one_shot_server("401 Unauthorized", r#"{"message":"Invalid API key"}"#).await;
        let store =
            RestIssueStore::new(&endpoint, "issues", "bad-key", Duration::from_secs(5)).unwrap();

        let err = store.recent(1).await.unwrap_err();
        match err {
            StoreError::Request { status_code, .. } => assert_eq!(status_code, Some(401)),
            other => panic!("unexpected error: {other}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_with_empty_representation_is_response_error() {
        let (endpoint, server) = one_shot_server("201 Created", "[]").await;
        let store =
            RestIssueStore::new(&endpoint, "issues", "anon-key", Duration::from_secs(5)).unwrap();

        let err = store.insert(&NewIssue::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::Response(_)));
        server.await.unwrap();
    }
}
