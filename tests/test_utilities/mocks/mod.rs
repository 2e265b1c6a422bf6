/// Mock implementations for testing
mod mock_assembly_engine;
mod mock_progress_reporter;
mod mock_sbom_fetcher;

pub use mock_assembly_engine::MockAssemblyEngine;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_sbom_fetcher::MockSbomFetcher;
