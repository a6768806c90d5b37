//! HTTP client for the ingestion service's record outbox.

use chrono::{DateTime, Utc};
use fleetwatch_core::RawRegulatoryRecord;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Client for `<base>/api/outbox/records`.
pub struct FeedClient {
    client: reqwest::Client,
    base_url: String,
}

impl FeedClient {
    /// `base_url` should be like `http://localhost:4000`; a trailing slash is
    /// dropped.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Outbox URL, restricted to records scraped after `since` when given.
    pub fn records_url(&self, since: Option<DateTime<Utc>>) -> String {
        let mut url = format!("{}/api/outbox/records", self.base_url);
        if let Some(ts) = since {
            url.push_str(&format!("?since={}", ts.to_rfc3339()));
        }
        url
    }

    /// Pull raw regulatory records from the outbox.
    ///
    /// Records are returned exactly as served; the normalizer decides what
    /// to keep.
    pub async fn pull_records(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<RawRegulatoryRecord>, SyncError> {
        let url = self.records_url(since);

        info!(url = %url, "pulling regulatory records");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SyncError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let text = resp.text().await?;
        let records: Vec<RawRegulatoryRecord> = serde_json::from_str(&text)?;
        info!(count = records.len(), "pulled regulatory records");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve one canned HTTP response on a local port and return the base URL.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn feed_client_trims_trailing_slash() {
        let client = FeedClient::new("http://localhost:4000/".into());
        assert_eq!(client.base_url(), "http://localhost:4000");
    }

    #[test]
    fn records_url_with_and_without_since() {
        let client = FeedClient::new("http://localhost:4000".into());
        assert_eq!(
            client.records_url(None),
            "http://localhost:4000/api/outbox/records"
        );
        let since = DateTime::parse_from_rfc3339("2026-02-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            client.records_url(Some(since)),
            "http://localhost:4000/api/outbox/records?since=2026-02-01T00:00:00+00:00"
        );
    }

    #[test]
    fn record_json_with_missing_fields() {
        let json = r#"[
            {"body": "IOTC", "alert_type": "QUOTA_OR_ALLOCATION_NOTICE", "severity": "high",
             "title": "Yellowfin Tuna Quota Cut", "due_date": "2026-02-28"},
            {"title": "Untitled circular", "source_url": null}
        ]"#;
        let records: Vec<RawRegulatoryRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].body.as_deref(), Some("IOTC"));
        assert!(records[0].published_date.is_none());
        assert!(records[1].body.is_none());
        assert!(records[1].source_url.is_none());
    }

    #[tokio::test]
    async fn pulls_records() {
        let base = serve_once(
            "200 OK",
            r#"[{"body": "WCPFC", "title": "Transhipment reporting", "severity": "medium"}]"#,
        );
        let records = FeedClient::new(base).pull_records(None).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].body.as_deref(), Some("WCPFC"));
    }

    #[tokio::test]
    async fn non_success_status_is_a_server_error() {
        let base = serve_once("503 Service Unavailable", "scraper offline");
        let err = FeedClient::new(base).pull_records(None).await.unwrap_err();
        match err {
            SyncError::Server { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "scraper offline");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_json_error() {
        let base = serve_once("200 OK", r#"{"records": "#);
        let err = FeedClient::new(base).pull_records(None).await.unwrap_err();
        assert!(matches!(err, SyncError::Json(_)));
    }
}
