/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (server, assembler, console, files).
pub mod assembly_engine;
pub mod output_presenter;
pub mod progress_reporter;
pub mod sbom_fetcher;

pub use assembly_engine::AssemblyEngine;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use sbom_fetcher::SbomFetcher;
