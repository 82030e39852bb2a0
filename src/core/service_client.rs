// src/core/service_client.rs
//! HTTP client for the resume analysis service

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{error, info, trace};

use crate::types::{AnalysisRequest, AnalysisResult, AnalyzeResponse, ErrorResponse, HistoryRecord};

const ANALYZE_ENDPOINT: &str = "/analyze";
const HISTORY_ENDPOINT: &str = "/history";

/// The remote collaborator the dashboard talks to
#[async_trait]
pub trait AnalysisBackend: Send + Sync + 'static {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult>;

    async fn history(&self) -> Result<Vec<HistoryRecord>>;
}

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create new service client; `timeout_seconds` of `None` keeps reqwest's default
    pub fn new(base_url: &str, timeout_seconds: Option<u64>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn analysis_form(request: &AnalysisRequest) -> Result<Form> {
        let resume = &request.resume;
        let file_content = tokio::fs::read(resume.path())
            .await
            .with_context(|| format!("Failed to read file: {}", resume.path().display()))?;

        let part = Part::bytes(file_content)
            .file_name(resume.file_name.clone())
            .mime_str(resume.mime_type)
            .context("Failed to create multipart")?;

        Ok(Form::new()
            .part("resume", part)
            .text("jd", request.job_description.clone()))
    }

    async fn error_from(response: reqwest::Response, what: &str) -> anyhow::Error {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = ErrorResponse::message_from(&error_text);

        error!("{} error response {}: {}", what, status, message);
        anyhow::anyhow!("{} returned error status {}: {}", what, status, message)
    }
}

#[async_trait]
impl AnalysisBackend for ServiceClient {
    /// Multipart upload of the resume and job description
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let url = self.endpoint(ANALYZE_ENDPOINT);
        let form = Self::analysis_form(request).await?;

        info!(
            "Calling analysis service: {} (resume: {})",
            url, request.resume.file_name
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("HTTP request failed")?;

        let status = response.status();
        trace!("Response status: {}", status);

        if !status.is_success() {
            return Err(Self::error_from(response, "Analysis service").await);
        }

        let response_text = response
            .text()
            .await
            .context("Failed to read response text")?;

        let envelope: AnalyzeResponse =
            serde_json::from_str(&response_text).with_context(|| {
                format!(
                    "Failed to parse response as AnalyzeResponse. Raw response: {}",
                    response_text
                )
            })?;

        info!(
            "Analysis complete: {}% match, {} missing keywords",
            envelope.data.match_percentage,
            envelope.data.missing_keywords.len()
        );
        Ok(envelope.data)
    }

    async fn history(&self) -> Result<Vec<HistoryRecord>> {
        let url = self.endpoint(HISTORY_ENDPOINT);
        trace!("Fetching history: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET from {}", url))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response, "History service").await);
        }

        let records: Vec<HistoryRecord> = response
            .json()
            .await
            .context("Failed to parse history response")?;

        info!("Fetched {} history records", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResumeFile;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// One-shot HTTP server: answers a single request with `status` and a
    /// JSON `body`, and hands back the raw request it received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if request_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (base_url, handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let headers = text[..header_end].to_ascii_lowercase();
        let body_len = raw.len() - (header_end + 4);

        match headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
        {
            Some(expected) => body_len >= expected,
            None if headers.contains("transfer-encoding: chunked") => text.ends_with("0\r\n\r\n"),
            None => true,
        }
    }

    fn closed_port_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    fn pdf_request(dir: &tempfile::TempDir) -> AnalysisRequest {
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, b"%PDF-1.7").unwrap();
        AnalysisRequest {
            job_description: "Requires Python and SQL".to_string(),
            resume: ResumeFile::from_path(&path).unwrap(),
        }
    }

    #[test]
    fn test_endpoint_join() {
        let client = ServiceClient::new("https://example.test/", None).unwrap();
        assert_eq!(client.endpoint(ANALYZE_ENDPOINT), "https://example.test/analyze");
        assert_eq!(client.endpoint(HISTORY_ENDPOINT), "https://example.test/history");
    }

    #[tokio::test]
    async fn test_analyze_posts_multipart_and_parses_envelope() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"message": "Success",
                "data": {"match_percentage": 82, "summary": "Strong match", "missing_keywords": ["Docker"]},
                "url": "https://bucket.s3.amazonaws.com/resume.pdf"}"#,
        )
        .await;
        let dir = tempfile::tempdir().unwrap();
        let client = ServiceClient::new(&base_url, Some(5)).unwrap();

        let result = client.analyze(&pdf_request(&dir)).await.unwrap();
        let request = server.await.unwrap();

        let lowered = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /analyze HTTP/1.1\r\n"));
        assert!(lowered.contains("content-type: multipart/form-data"));
        assert!(request.contains(r#"name="resume"; filename="resume.pdf""#));
        assert!(lowered.contains("content-type: application/pdf"));
        assert!(request.contains("%PDF-1.7"));
        assert!(request.contains(r#"name="jd""#));
        assert!(request.contains("Requires Python and SQL"));

        assert_eq!(result.match_percentage, 82);
        assert_eq!(result.summary, "Strong match");
        assert_eq!(result.missing_keywords, vec!["Docker".to_string()]);
    }

    #[tokio::test]
    async fn test_analyze_error_status_carries_backend_message() {
        let (base_url, server) =
            serve_once("500 Internal Server Error", r#"{"error": "Model unavailable"}"#).await;
        let dir = tempfile::tempdir().unwrap();
        let client = ServiceClient::new(&base_url, Some(5)).unwrap();

        let err = client.analyze(&pdf_request(&dir)).await.unwrap_err();
        server.await.unwrap();

        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("Model unavailable"));
    }

    #[tokio::test]
    async fn test_history_fetches_records_in_order() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"[{"date": "Sat, 18 Oct 2025 12:30:00 GMT", "score": 91, "jd": "Platform engineer", "url": "https://bucket.s3.amazonaws.com/a.pdf"},
                {"date": "Fri, 17 Oct 2025 08:00:00 GMT", "score": null, "jd": "Marketing lead", "url": null}]"#,
        )
        .await;
        let client = ServiceClient::new(&base_url, Some(5)).unwrap();

        let records = client.history().await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("GET /history HTTP/1.1\r\n"));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].score, 91);
        assert_eq!(records[0].job_description_excerpt, "Platform engineer");
        assert_eq!(
            records[0].report_url.as_deref(),
            Some("https://bucket.s3.amazonaws.com/a.pdf")
        );
        assert_eq!(records[1].score, 0);
        assert!(records[1].report_url.is_none());
    }

    #[tokio::test]
    async fn test_form_fails_for_missing_file() {
        let request = AnalysisRequest {
            job_description: "Requires Python and SQL".to_string(),
            resume: ResumeFile::from_path("/definitely/not/here/resume.pdf").unwrap(),
        };

        let err = ServiceClient::analysis_form(&request).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_an_error() {
        let client = ServiceClient::new(&closed_port_url(), Some(2)).unwrap();
        assert!(client.history().await.is_err());
    }
}
