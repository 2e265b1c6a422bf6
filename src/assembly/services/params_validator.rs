use crate::assembly::domain::{
    AssembleParams, ComponentMetadata, ComponentType, DtAssembleParams, MergeMode, OutputFormat,
    OutputSpec, ProjectIds, ServerCredentials, MISSING_PROJECTS_MESSAGE,
};
use crate::shared::error::AssembleError;
use std::path::PathBuf;

/// Flag values as received from the command line (after config file defaults
/// have been applied), before any semantic checks
///
/// Boolean selectors are `true` only when the flag was explicitly given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAssembleFlags {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub output: Option<PathBuf>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub component_type: Option<String>,
    pub flat_merge: bool,
    pub hier_merge: bool,
    pub assembly_merge: bool,
    pub output_spec_cdx: bool,
    pub output_spec_spdx: bool,
    pub output_spec_version: Option<String>,
    pub xml: bool,
    pub json: bool,
}

/// ParamsValidator turns raw flags and positional arguments into a
/// consistent `DtAssembleParams`
///
/// This is the single validation entry point: nothing downstream re-checks
/// flag combinations. It performs no I/O.
pub struct ParamsValidator;

impl ParamsValidator {
    /// Validates and reconciles the flags, then resolves the project identifiers
    ///
    /// # Errors
    /// Returns `AssembleError::Configuration` when:
    /// - no project identifier was given
    /// - only one of `--url`/`--api-key` is set, or the url is not http(s)
    /// - only some of `--name`/`--version`/`--type` are set, or the type is unknown
    /// - more than one merge mode or more than one output spec is selected
    /// - a project identifier is not a valid UUID
    pub fn validate<S: AsRef<str>>(
        flags: RawAssembleFlags,
        args: &[S],
    ) -> Result<DtAssembleParams, AssembleError> {
        if args.is_empty() {
            return Err(AssembleError::configuration(MISSING_PROJECTS_MESSAGE));
        }

        let server = Self::resolve_server(flags.url, flags.api_key)?;
        let metadata = Self::resolve_metadata(flags.name, flags.version, flags.component_type)?;
        let merge_mode =
            Self::resolve_merge_mode(flags.flat_merge, flags.hier_merge, flags.assembly_merge)?;
        let output_spec = Self::resolve_output_spec(flags.output_spec_cdx, flags.output_spec_spdx)?;
        let output_format = Self::resolve_output_format(flags.xml, flags.json);

        let project_ids = ProjectIds::parse(args)?;

        let assemble = AssembleParams {
            output: flags.output.filter(|p| !p.as_os_str().is_empty()),
            metadata,
            merge_mode,
            output_spec,
            output_spec_version: non_blank(flags.output_spec_version),
            output_format,
            input: Vec::new(),
        };

        Ok(DtAssembleParams::new(server, project_ids, assemble))
    }

    fn resolve_server(
        url: Option<String>,
        api_key: Option<String>,
    ) -> Result<Option<ServerCredentials>, AssembleError> {
        match (non_blank(url), non_blank(api_key)) {
            (Some(url), Some(api_key)) => {
                let lower = url.to_lowercase();
                if !lower.starts_with("http://") && !lower.starts_with("https://") {
                    return Err(AssembleError::configuration(format!(
                        "invalid Dependency-Track url '{}': expected an http:// or https:// url",
                        url
                    )));
                }
                Ok(Some(ServerCredentials::new(url, api_key)))
            }
            (None, None) => Ok(None),
            (Some(_), None) => Err(AssembleError::configuration(
                "flags [url api-key] must be set together: --api-key is missing",
            )),
            (None, Some(_)) => Err(AssembleError::configuration(
                "flags [url api-key] must be set together: --url is missing",
            )),
        }
    }

    fn resolve_metadata(
        name: Option<String>,
        version: Option<String>,
        component_type: Option<String>,
    ) -> Result<Option<ComponentMetadata>, AssembleError> {
        match (non_blank(name), non_blank(version), non_blank(component_type)) {
            (None, None, None) => Ok(None),
            (Some(name), Some(version), Some(component_type)) => {
                let component_type: ComponentType = component_type
                    .parse()
                    .map_err(AssembleError::configuration)?;
                Ok(Some(ComponentMetadata::new(name, version, component_type)))
            }
            (name, version, component_type) => {
                let missing: Vec<&str> = [
                    ("name", name.is_none()),
                    ("version", version.is_none()),
                    ("type", component_type.is_none()),
                ]
                .into_iter()
                .filter_map(|(flag, is_missing)| is_missing.then_some(flag))
                .collect();
                Err(AssembleError::configuration(format!(
                    "flags [name version type] must be set together: missing {}",
                    missing.join(", ")
                )))
            }
        }
    }

    fn resolve_merge_mode(
        flat: bool,
        hierarchical: bool,
        assembly: bool,
    ) -> Result<MergeMode, AssembleError> {
        match (flat, hierarchical, assembly) {
            (false, false, false) => Ok(MergeMode::default()),
            (true, false, false) => Ok(MergeMode::Flat),
            (false, true, false) => Ok(MergeMode::Hierarchical),
            (false, false, true) => Ok(MergeMode::Assembly),
            _ => Err(AssembleError::configuration(
                "flags [flatMerge hierMerge assemblyMerge] are mutually exclusive: select at most one merge mode",
            )),
        }
    }

    fn resolve_output_spec(cdx: bool, spdx: bool) -> Result<OutputSpec, AssembleError> {
        match (cdx, spdx) {
            (true, true) => Err(AssembleError::configuration(
                "flags [outputSpecCdx outputSpecSpdx] are mutually exclusive: select one output spec",
            )),
            (_, true) => Ok(OutputSpec::Spdx),
            _ => Ok(OutputSpec::CycloneDx),
        }
    }

    /// XML wins whenever it is requested; JSON is the fallback
    fn resolve_output_format(xml: bool, _json: bool) -> OutputFormat {
        if xml {
            OutputFormat::Xml
        } else {
            OutputFormat::Json
        }
    }
}

/// Treats empty and whitespace-only values as unset
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
