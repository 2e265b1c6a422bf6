use crate::assembly::domain::AssembleParams;
use crate::shared::Result;
use async_trait::async_trait;

/// AssemblyEngine port for merging SBOM documents
///
/// Assembly happens in two steps: `populate_config` turns the generic
/// parameters into an engine-specific configuration, and `assemble` runs the
/// merge. A failing `populate_config` ends the run; `assemble` is never
/// called with a configuration that could not be built.
#[async_trait]
pub trait AssemblyEngine: Send + Sync {
    /// Engine-specific configuration produced from `AssembleParams`
    type Config: Send;

    /// Builds the engine configuration from the assembly parameters
    ///
    /// # Errors
    /// Returns an error if the parameters cannot be honoured by this engine
    /// (e.g. an unsupported spec version or an empty input set)
    fn populate_config(&self, params: &AssembleParams) -> Result<Self::Config>;

    /// Merges the configured inputs and returns the assembled document
    ///
    /// # Errors
    /// Returns an error if the merge fails
    async fn assemble(&self, config: Self::Config) -> Result<String>;
}
