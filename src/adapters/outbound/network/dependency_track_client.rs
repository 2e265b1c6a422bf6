use crate::assembly::domain::{FetchedSbom, ProjectIds, ServerCredentials};
use crate::ports::outbound::SbomFetcher;
use crate::shared::error::{AssembleError, FetchFailure};
use crate::shared::security::{validate_document_size, MAX_SBOM_SIZE};
use crate::shared::Result;
use async_trait::async_trait;
use futures::stream::{self, Stream, StreamExt};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

/// Just enough of a CycloneDX document to recognise one
#[derive(Debug, Deserialize)]
struct BomHeader {
    #[serde(rename = "bomFormat")]
    bom_format: Option<String>,
}

/// DependencyTrackClient adapter for exporting project SBOMs from Dependency-Track
///
/// Implements the SbomFetcher port on top of the `/api/v1/bom/cyclonedx/project`
/// export endpoint, authenticating with the `X-Api-Key` header.
///
/// # Behaviour
/// - A few requests run concurrently; results keep the identifier order
/// - Failed requests are not retried
/// - Every failing project is reported in one aggregated error
pub struct DependencyTrackClient {
    client: reqwest::Client,
    max_concurrent: usize,
}

impl DependencyTrackClient {
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
    const MAX_CONCURRENT: usize = 4;
    const API_KEY_HEADER: &'static str = "X-Api-Key";

    /// Creates a new client with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(Self::DEFAULT_TIMEOUT_SECONDS))
    }

    /// Creates a new client with a per-request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("dtassemble/{}", version);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            max_concurrent: Self::MAX_CONCURRENT,
        })
    }

    /// Builds the SBOM export url for one project
    fn bom_endpoint(base_url: &str, project_id: &Uuid) -> String {
        format!(
            "{}/api/v1/bom/cyclonedx/project/{}?format=json",
            base_url.trim_end_matches('/'),
            project_id
        )
    }

    /// Turns a non-success status into a message the user can act on
    fn describe_status(status: StatusCode) -> String {
        match status {
            StatusCode::UNAUTHORIZED => {
                "HTTP 401 Unauthorized: the API key was rejected".to_string()
            }
            StatusCode::FORBIDDEN => {
                "HTTP 403 Forbidden: the API key lacks the VIEW_PORTFOLIO permission".to_string()
            }
            StatusCode::NOT_FOUND => {
                "HTTP 404 Not Found: no project with this identifier".to_string()
            }
            other => format!("HTTP {}", other),
        }
    }

    /// Checks that a response body is a CycloneDX JSON document
    fn validate_bom_body(body: &str) -> Result<()> {
        validate_document_size(body.len() as u64, "Project SBOM", MAX_SBOM_SIZE)?;

        let header: BomHeader = serde_json::from_str(body)
            .map_err(|e| anyhow::anyhow!("response is not valid JSON: {}", e))?;

        match header.bom_format.as_deref() {
            Some("CycloneDX") => Ok(()),
            Some(other) => anyhow::bail!("unexpected bomFormat '{}' in response", other),
            None => anyhow::bail!("response is not a CycloneDX document (no bomFormat)"),
        }
    }

    /// Collects a response body, giving up as soon as it grows past `max_size`
    async fn read_body_capped<S, B, E>(chunks: S, max_size: u64) -> Result<Vec<u8>>
    where
        S: Stream<Item = std::result::Result<B, E>>,
        B: AsRef<[u8]>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let mut chunks = std::pin::pin!(chunks);
        let mut body = Vec::new();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            let chunk = chunk.as_ref();
            validate_document_size(
                (body.len() + chunk.len()) as u64,
                "Project SBOM",
                max_size,
            )?;
            body.extend_from_slice(chunk);
        }
        Ok(body)
    }

    /// Fetches the SBOM of a single project
    async fn fetch_project_sbom(
        &self,
        server: &ServerCredentials,
        project_id: Uuid,
    ) -> Result<String> {
        let url = Self::bom_endpoint(server.url(), &project_id);
        tracing::debug!(%project_id, %url, "requesting project sbom");

        let response = self
            .client
            .get(&url)
            .header(Self::API_KEY_HEADER, server.api_key())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!(Self::describe_status(status));
        }

        if let Some(length) = response.content_length() {
            validate_document_size(length, "Project SBOM", MAX_SBOM_SIZE)?;
        }

        let bytes = Self::read_body_capped(response.bytes_stream(), MAX_SBOM_SIZE).await?;
        let body = String::from_utf8(bytes)
            .map_err(|e| anyhow::anyhow!("response is not valid UTF-8: {}", e))?;
        Self::validate_bom_body(&body)?;

        tracing::debug!(%project_id, bytes = body.len(), "received project sbom");
        Ok(body)
    }

    /// Folds per-project results into one all-or-nothing outcome
    fn collect_results(results: Vec<(Uuid, Result<String>)>) -> Result<Vec<FetchedSbom>> {
        let requested = results.len();
        let mut documents = Vec::with_capacity(requested);
        let mut failures = Vec::new();

        for (project_id, result) in results {
            match result {
                Ok(content) => documents.push(FetchedSbom::new(project_id, content)),
                Err(e) => {
                    tracing::warn!(%project_id, error = %e, "project sbom fetch failed");
                    failures.push(FetchFailure {
                        project_id,
                        reason: format!("{:#}", e),
                    });
                }
            }
        }

        if !failures.is_empty() {
            return Err(AssembleError::Fetch {
                requested,
                failures,
            }
            .into());
        }

        Ok(documents)
    }
}

#[async_trait]
impl SbomFetcher for DependencyTrackClient {
    async fn fetch_all(
        &self,
        server: &ServerCredentials,
        project_ids: &ProjectIds,
    ) -> Result<Vec<FetchedSbom>> {
        let results: Vec<(Uuid, Result<String>)> = stream::iter(project_ids.iter().copied())
            .map(|project_id| async move {
                (project_id, self.fetch_project_sbom(server, project_id).await)
            })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        Self::collect_results(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: &str = "11903ba9-a585-4dfb-9a0c-f348345a5473";
    const SECOND: &str = "34103ba2-0e63-4a2f-9a8b-a62526162620";

    fn uuid(s: &str) -> Uuid {
        Uuid::parse_str(s).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = DependencyTrackClient::new();
        assert!(client.is_ok());
        assert_eq!(client.unwrap().max_concurrent, 4);
    }

    #[test]
    fn test_bom_endpoint_trims_trailing_slash() {
        let with_slash = DependencyTrackClient::bom_endpoint("http://localhost:8080/", &uuid(FIRST));
        let without_slash = DependencyTrackClient::bom_endpoint("http://localhost:8080", &uuid(FIRST));
        assert_eq!(with_slash, without_slash);
        assert_eq!(
            with_slash,
            format!(
                "http://localhost:8080/api/v1/bom/cyclonedx/project/{}?format=json",
                FIRST
            )
        );
    }

    #[test]
    fn test_describe_status() {
        assert!(DependencyTrackClient::describe_status(StatusCode::UNAUTHORIZED).contains("401"));
        assert!(DependencyTrackClient::describe_status(StatusCode::FORBIDDEN)
            .contains("VIEW_PORTFOLIO"));
        assert!(DependencyTrackClient::describe_status(StatusCode::NOT_FOUND)
            .contains("no project with this identifier"));
        assert!(DependencyTrackClient::describe_status(StatusCode::INTERNAL_SERVER_ERROR)
            .contains("500"));
    }

    #[test]
    fn test_validate_bom_body_accepts_cyclonedx() {
        let body = r#"{"bomFormat":"CycloneDX","specVersion":"1.5","components":[]}"#;
        assert!(DependencyTrackClient::validate_bom_body(body).is_ok());
    }

    #[test]
    fn test_validate_bom_body_rejects_other_documents() {
        let err = DependencyTrackClient::validate_bom_body("<html>login</html>").unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));

        let err = DependencyTrackClient::validate_bom_body(r#"{"spdxVersion":"SPDX-2.3"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("no bomFormat"));

        let err = DependencyTrackClient::validate_bom_body(r#"{"bomFormat":"Other"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unexpected bomFormat 'Other'"));
    }

    #[tokio::test]
    async fn test_read_body_capped_joins_chunks() {
        let chunks = stream::iter(vec![
            Ok::<_, std::io::Error>(b"{\"bomFormat\":".to_vec()),
            Ok(b"\"CycloneDX\"}".to_vec()),
        ]);
        let body = DependencyTrackClient::read_body_capped(chunks, 1024)
            .await
            .unwrap();
        assert_eq!(body, br#"{"bomFormat":"CycloneDX"}"#.to_vec());
    }

    #[tokio::test]
    async fn test_read_body_capped_stops_at_limit() {
        let pulled = std::sync::atomic::AtomicUsize::new(0);
        let chunks = stream::iter(0..10).map(|_| {
            pulled.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok::<_, std::io::Error>(vec![b'x'; 8])
        });

        let err = DependencyTrackClient::read_body_capped(chunks, 20)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("too large"));
        // The third chunk crosses the limit; nothing after it is read
        assert_eq!(pulled.load(std::sync::atomic::Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_read_body_capped_propagates_stream_error() {
        let chunks = stream::iter(vec![
            Ok(vec![b'x'; 4]),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
        ]);
        let err = DependencyTrackClient::read_body_capped(chunks, 1024)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("reset"));
    }

    #[test]
    fn test_collect_results_keeps_order() {
        let results = vec![
            (uuid(SECOND), Ok("second".to_string())),
            (uuid(FIRST), Ok("first".to_string())),
        ];
        let documents = DependencyTrackClient::collect_results(results).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].project_id, uuid(SECOND));
        assert_eq!(documents[0].content, "second");
        assert_eq!(documents[1].project_id, uuid(FIRST));
    }

    #[test]
    fn test_collect_results_aggregates_failures() {
        let results = vec![
            (uuid(FIRST), Err(anyhow::anyhow!("HTTP 404"))),
            (uuid(SECOND), Ok("ok".to_string())),
            (Uuid::nil(), Err(anyhow::anyhow!("timed out"))),
        ];
        let err = DependencyTrackClient::collect_results(results).unwrap_err();
        match err.downcast_ref::<AssembleError>() {
            Some(AssembleError::Fetch {
                requested,
                failures,
            }) => {
                assert_eq!(*requested, 3);
                assert_eq!(failures.len(), 2);
                assert_eq!(failures[0].project_id, uuid(FIRST));
                assert_eq!(failures[0].reason, "HTTP 404");
                assert_eq!(failures[1].reason, "timed out");
            }
            other => panic!("expected fetch error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_all_unreachable_server_fails_as_a_unit() {
        let client = DependencyTrackClient::with_timeout(Duration::from_secs(2)).unwrap();
        let server = ServerCredentials::new("http://127.0.0.1:1".to_string(), "key".to_string());
        let ids = ProjectIds::parse(&[FIRST, SECOND]).unwrap();

        let err = client.fetch_all(&server, &ids).await.unwrap_err();

        match err.downcast_ref::<AssembleError>() {
            Some(AssembleError::Fetch { failures, .. }) => {
                let failed: Vec<Uuid> = failures.iter().map(|f| f.project_id).collect();
                assert_eq!(failed, vec![uuid(FIRST), uuid(SECOND)]);
            }
            other => panic!("expected fetch error, got {:?}", other),
        }
    }
}
