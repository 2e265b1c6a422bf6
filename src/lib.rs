//! dtassemble - SBOM assembly tool for Dependency-Track projects
//!
//! This library fetches the SBOMs of several Dependency-Track projects and
//! assembles them into a single SBOM, following hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`assembly`): Parameter models, validation and translation
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use dtassemble::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let flags = RawAssembleFlags {
//!     url: Some("http://localhost:8080/".to_string()),
//!     api_key: Some("odt_gwiwooi29i1N5Hewkkddkkeiwi3ii".to_string()),
//!     ..Default::default()
//! };
//! let params = ParamsValidator::validate(flags, &["11903ba9-a585-4dfb-9a0c-f348345a5473"])?;
//!
//! // Create adapters
//! let use_case = DtAssembleUseCase::new(
//!     DependencyTrackClient::new()?,
//!     SbomasmEngine::default(),
//!     StderrProgressReporter::new(),
//! );
//!
//! // Execute
//! let response = use_case.execute(params).await?;
//! StdoutPresenter::new().present(&response.document)?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod assembly;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::assembler::SbomasmEngine;
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::network::DependencyTrackClient;
    pub use crate::application::dto::AssembleResponse;
    pub use crate::application::factories::{PresenterFactory, PresenterType};
    pub use crate::application::use_cases::DtAssembleUseCase;
    pub use crate::assembly::domain::{
        AssembleParams, ComponentMetadata, ComponentType, DtAssembleParams, FetchedSbom,
        MergeMode, OutputFormat, OutputSpec, ProjectIds, ServerCredentials,
    };
    pub use crate::assembly::services::{ParamsTranslator, ParamsValidator, RawAssembleFlags};
    pub use crate::ports::outbound::{
        AssemblyEngine, OutputPresenter, ProgressReporter, SbomFetcher,
    };
    pub use crate::shared::error::{AssembleError, ExitCode, FetchFailure};
    pub use crate::shared::Result;
}
