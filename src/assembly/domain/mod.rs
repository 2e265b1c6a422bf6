pub mod params;
pub mod project_ids;

pub use params::{
    AssembleParams, ComponentMetadata, ComponentType, DtAssembleParams, FetchedSbom, MergeMode,
    OutputFormat, OutputSpec, ServerCredentials,
};
pub use project_ids::{ProjectIds, MISSING_PROJECTS_MESSAGE};
