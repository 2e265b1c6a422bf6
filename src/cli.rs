use clap::{ArgGroup, Args, Parser, Subcommand};
use dtassemble::assembly::services::RawAssembleFlags;
use dtassemble::config::ConfigFile;
use std::path::PathBuf;

const DT_ASSEMBLE_EXAMPLE: &str = "Basic Example:
    $ dtassemble dtAssemble -u \"http://localhost:8080/\" -k \"odt_gwiwooi29i1N5Hewkkddkkeiwi3ii\" -n \"mega-app\" -v \"1.0.0\" -t \"application\" -o finalsbom.json 11903ba9-a585-4dfb-9a0c-f348345a5473 34103ba2-0e63-4a2f-9a8b-a62526162620";

/// Assemble SBOMs of Dependency-Track projects into a single SBOM
#[derive(Parser, Debug)]
#[command(name = "dtassemble")]
#[command(version)]
#[command(about = "Assemble SBOMs of Dependency-Track projects into a single SBOM", long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Path to a config file (defaults to ./dtassemble.config.yml when present)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Helps assembling multiple Dependency-Track project SBOMs into a final SBOM
    #[command(name = "dtAssemble", alias = "dt-assemble")]
    #[command(disable_version_flag = true, after_help = DT_ASSEMBLE_EXAMPLE)]
    DtAssemble(DtAssembleArgs),
}

/// Flags of the `dtAssemble` subcommand
///
/// Merge modes and output specs are exclusive at parse time. The url/api-key
/// pair is checked after config file defaults are applied, since either half
/// may come from the file.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("merge").args(["flat_merge", "hier_merge", "assembly_merge"]).multiple(false)))]
#[command(group(ArgGroup::new("spec").args(["output_spec_cdx", "output_spec_spdx"]).multiple(false)))]
pub struct DtAssembleArgs {
    /// Dependency-Track url, e.g. https://localhost:8080/
    #[arg(short, long)]
    pub url: Option<String>,

    /// Dependency-Track api key, requires VIEW_PORTFOLIO
    #[arg(short = 'k', long = "api-key")]
    pub api_key: Option<String>,

    /// Path to the assembled SBOM, defaults to stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Name of the assembled SBOM
    #[arg(short, long, requires = "version", requires = "component_type")]
    pub name: Option<String>,

    /// Version of the assembled SBOM
    #[arg(short, long, requires = "name", requires = "component_type")]
    pub version: Option<String>,

    /// Product type of the assembled SBOM (application, framework, library, container, device, firmware)
    #[arg(short = 't', long = "type", requires = "name", requires = "version")]
    pub component_type: Option<String>,

    /// Flat merge
    #[arg(short = 'f', long = "flatMerge")]
    pub flat_merge: bool,

    /// Hierarchical merge (default)
    #[arg(short = 'm', long = "hierMerge")]
    pub hier_merge: bool,

    /// Assembly merge
    #[arg(short = 'a', long = "assemblyMerge")]
    pub assembly_merge: bool,

    /// Output in CycloneDX format (default)
    #[arg(short = 'g', long = "outputSpecCdx")]
    pub output_spec_cdx: bool,

    /// Output in SPDX format
    #[arg(short = 's', long = "outputSpecSpdx")]
    pub output_spec_spdx: bool,

    /// Spec version of the output SBOM
    #[arg(short = 'e', long = "outputSpecVersion")]
    pub output_spec_version: Option<String>,

    /// Output in XML format (takes precedence over --json)
    #[arg(short = 'x', long)]
    pub xml: bool,

    /// Output in JSON format (default)
    #[arg(short = 'j', long)]
    pub json: bool,

    /// Per-request timeout for Dependency-Track in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Dependency-Track project UUIDs, in assembly order
    #[arg(value_name = "PROJECT_UUID")]
    pub project_ids: Vec<String>,
}

impl DtAssembleArgs {
    /// Splits the arguments into raw flags and positional identifiers,
    /// filling unset values from the config file
    pub fn into_raw_flags(self, config: Option<&ConfigFile>) -> (RawAssembleFlags, Vec<String>) {
        let flags = RawAssembleFlags {
            url: self.url.or_else(|| config.and_then(|c| c.url.clone())),
            api_key: self.api_key.or_else(|| config.and_then(|c| c.api_key.clone())),
            output: self.output,
            name: self.name,
            version: self.version,
            component_type: self.component_type,
            flat_merge: self.flat_merge,
            hier_merge: self.hier_merge,
            assembly_merge: self.assembly_merge,
            output_spec_cdx: self.output_spec_cdx,
            output_spec_spdx: self.output_spec_spdx,
            output_spec_version: self
                .output_spec_version
                .or_else(|| config.and_then(|c| c.output_spec_version.clone())),
            xml: self.xml,
            json: self.json,
        };

        (flags, self.project_ids)
    }
}
