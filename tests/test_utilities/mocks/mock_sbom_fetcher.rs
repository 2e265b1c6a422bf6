use async_trait::async_trait;
use dtassemble::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Mock SbomFetcher serving canned documents per project
///
/// Projects without a document fail, and the whole fetch fails with them,
/// matching the all-or-nothing contract of the real client.
#[derive(Default, Clone)]
pub struct MockSbomFetcher {
    documents: HashMap<Uuid, String>,
    pub requests: Arc<Mutex<Vec<(String, Vec<Uuid>)>>>,
}

impl MockSbomFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, project_id: &str, content: &str) -> Self {
        let project_id = Uuid::parse_str(project_id).unwrap();
        self.documents.insert(project_id, content.to_string());
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl SbomFetcher for MockSbomFetcher {
    async fn fetch_all(
        &self,
        server: &ServerCredentials,
        project_ids: &ProjectIds,
    ) -> Result<Vec<FetchedSbom>> {
        self.requests
            .lock()
            .unwrap()
            .push((server.url().to_string(), project_ids.as_slice().to_vec()));

        let mut documents = Vec::new();
        let mut failures = Vec::new();
        for project_id in project_ids {
            match self.documents.get(project_id) {
                Some(content) => documents.push(FetchedSbom::new(*project_id, content.clone())),
                None => failures.push(FetchFailure {
                    project_id: *project_id,
                    reason: "HTTP 404 Not Found: no project with this identifier".to_string(),
                }),
            }
        }

        if !failures.is_empty() {
            return Err(AssembleError::Fetch {
                requested: project_ids.len(),
                failures,
            }
            .into());
        }
        Ok(documents)
    }
}
