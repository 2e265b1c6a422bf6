use super::ProjectIds;
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// Strategy used to combine the input SBOMs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    /// Union of all components under the new top-level component
    Flat,
    /// Each input becomes a child of the new top-level component, keeping its own tree
    #[default]
    Hierarchical,
    /// Each input is treated as a sub-assembly of the new top-level component
    Assembly,
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeMode::Flat => write!(f, "flat"),
            MergeMode::Hierarchical => write!(f, "hierarchical"),
            MergeMode::Assembly => write!(f, "assembly"),
        }
    }
}

/// SBOM standard of the assembled document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputSpec {
    #[default]
    CycloneDx,
    Spdx,
}

impl OutputSpec {
    /// Spec versions the assembler knows how to emit
    pub fn supported_versions(&self) -> &'static [&'static str] {
        match self {
            OutputSpec::CycloneDx => &["1.4", "1.5", "1.6"],
            OutputSpec::Spdx => &["2.3"],
        }
    }
}

impl fmt::Display for OutputSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSpec::CycloneDx => write!(f, "cyclonedx"),
            OutputSpec::Spdx => write!(f, "spdx"),
        }
    }
}

/// Serialization of the assembled document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Xml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Xml => write!(f, "xml"),
        }
    }
}

/// Product type of the new top-level component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    Application,
    Framework,
    Library,
    Container,
    Device,
    Firmware,
}

impl ComponentType {
    pub const ALL: [ComponentType; 6] = [
        ComponentType::Application,
        ComponentType::Framework,
        ComponentType::Library,
        ComponentType::Container,
        ComponentType::Device,
        ComponentType::Firmware,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Application => "application",
            ComponentType::Framework => "framework",
            ComponentType::Library => "library",
            ComponentType::Container => "container",
            ComponentType::Device => "device",
            ComponentType::Firmware => "firmware",
        }
    }
}

impl std::str::FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        ComponentType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Invalid type: {}. Please specify one of: application, framework, library, container, device, firmware",
                    s
                )
            })
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name, version and type of the assembled SBOM's top-level component.
/// The three always travel together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentMetadata {
    pub name: String,
    pub version: String,
    pub component_type: ComponentType,
}

impl ComponentMetadata {
    pub fn new(name: String, version: String, component_type: ComponentType) -> Self {
        Self {
            name,
            version,
            component_type,
        }
    }
}

/// Dependency-Track base URL and API key
#[derive(Clone, PartialEq, Eq)]
pub struct ServerCredentials {
    url: String,
    api_key: String,
}

impl ServerCredentials {
    pub fn new(url: String, api_key: String) -> Self {
        Self { url, api_key }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for ServerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerCredentials")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// SBOM document retrieved for one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedSbom {
    pub project_id: Uuid,
    pub content: String,
}

impl FetchedSbom {
    pub fn new(project_id: Uuid, content: String) -> Self {
        Self {
            project_id,
            content,
        }
    }
}

/// Source-independent assembly parameters handed to the assembly engine
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssembleParams {
    /// Destination path; `None` writes to standard output
    pub output: Option<PathBuf>,
    pub metadata: Option<ComponentMetadata>,
    pub merge_mode: MergeMode,
    pub output_spec: OutputSpec,
    pub output_spec_version: Option<String>,
    pub output_format: OutputFormat,
    /// Documents to merge, in project order
    pub input: Vec<FetchedSbom>,
}

impl AssembleParams {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Parameters of a Dependency-Track assembly run
///
/// The Dependency-Track specific part (server and project identifiers) sits
/// next to the generic `AssembleParams`, so translation never has to copy
/// fields one by one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtAssembleParams {
    pub server: Option<ServerCredentials>,
    pub project_ids: ProjectIds,
    pub assemble: AssembleParams,
}

impl DtAssembleParams {
    pub fn new(
        server: Option<ServerCredentials>,
        project_ids: ProjectIds,
        assemble: AssembleParams,
    ) -> Self {
        Self {
            server,
            project_ids,
            assemble,
        }
    }

    /// Stores the fetched documents as the assembly input
    pub fn set_input(&mut self, input: Vec<FetchedSbom>) {
        self.assemble.input = input;
    }
}
