use crate::assembly::domain::{FetchedSbom, ProjectIds, ServerCredentials};
use crate::shared::Result;
use async_trait::async_trait;

/// SbomFetcher port for retrieving project SBOMs from a dependency-tracking server
///
/// # Contract
/// Implementations return exactly one document per identifier, in identifier
/// order, or fail as a whole. When several projects fail, the error is a
/// single `AssembleError::Fetch` listing each of them. A shorter list is
/// never a valid success value.
///
/// Implementations may fetch concurrently internally; callers only see one
/// await point.
#[async_trait]
pub trait SbomFetcher: Send + Sync {
    /// Fetches the SBOM of every project in `project_ids`
    ///
    /// # Errors
    /// Returns an error if any of the documents cannot be retrieved
    async fn fetch_all(
        &self,
        server: &ServerCredentials,
        project_ids: &ProjectIds,
    ) -> Result<Vec<FetchedSbom>>;
}
