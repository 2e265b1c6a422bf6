use crate::assembly::domain::{
    AssembleParams, ComponentMetadata, MergeMode, OutputFormat, OutputSpec,
};
use crate::ports::outbound::AssemblyEngine;
use crate::shared::error::AssembleError;
use crate::shared::Result;
use async_trait::async_trait;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tempfile::TempDir;
use tokio::process::Command;

/// Configuration for one `sbomasm assemble` run
///
/// Owns the staging directory holding the input documents; the directory
/// is removed when the config is dropped.
#[derive(Debug)]
pub struct SbomasmConfig {
    metadata: Option<ComponentMetadata>,
    merge_mode: MergeMode,
    output_spec: OutputSpec,
    output_spec_version: Option<String>,
    output_format: OutputFormat,
    input_files: Vec<PathBuf>,
    workdir: TempDir,
}

impl SbomasmConfig {
    pub fn input_files(&self) -> &[PathBuf] {
        &self.input_files
    }

    pub fn workdir(&self) -> &Path {
        self.workdir.path()
    }
}

/// SbomasmEngine adapter delegating the merge to the `sbomasm` executable
///
/// The merged document is read from the child's standard output; the
/// output destination itself is handled by the caller.
pub struct SbomasmEngine {
    program: PathBuf,
}

impl SbomasmEngine {
    pub const DEFAULT_PROGRAM: &'static str = "sbomasm";

    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn validate_spec_version(spec: OutputSpec, version: &str) -> Result<()> {
        let supported = spec.supported_versions();
        if !supported.contains(&version) {
            return Err(AssembleError::assembly(format!(
                "unsupported {} spec version '{}' (supported: {})",
                spec,
                version,
                supported.join(", ")
            ))
            .into());
        }
        Ok(())
    }

    fn stage_inputs(params: &AssembleParams, workdir: &Path) -> Result<Vec<PathBuf>> {
        params
            .input
            .iter()
            .enumerate()
            .map(|(index, sbom)| -> Result<PathBuf> {
                let path = workdir.join(format!("{:03}-{}.cdx.json", index + 1, sbom.project_id));
                fs::write(&path, &sbom.content).map_err(|e| {
                    AssembleError::assembly(format!(
                        "failed to stage input {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Ok(path)
            })
            .collect()
    }

    /// Builds the `sbomasm assemble` argument list for a config
    pub fn command_args(config: &SbomasmConfig) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["assemble".into()];

        if let Some(metadata) = &config.metadata {
            args.push("-n".into());
            args.push(metadata.name.clone().into());
            args.push("-v".into());
            args.push(metadata.version.clone().into());
            args.push("-t".into());
            args.push(metadata.component_type.as_str().into());
        }

        args.push(
            match config.merge_mode {
                MergeMode::Flat => "-f",
                MergeMode::Hierarchical => "-m",
                MergeMode::Assembly => "-a",
            }
            .into(),
        );

        args.push(
            match config.output_spec {
                OutputSpec::CycloneDx => "-g",
                OutputSpec::Spdx => "-s",
            }
            .into(),
        );

        if let Some(version) = &config.output_spec_version {
            args.push("-e".into());
            args.push(version.clone().into());
        }

        args.push(
            match config.output_format {
                OutputFormat::Json => "-j",
                OutputFormat::Xml => "-x",
            }
            .into(),
        );

        args.extend(config.input_files.iter().map(|p| p.clone().into_os_string()));
        args
    }

    fn spawn_error(&self, e: io::Error) -> anyhow::Error {
        let details = if e.kind() == io::ErrorKind::NotFound {
            format!(
                "assembler executable '{}' was not found\n\n💡 Hint: Install sbomasm or set `sbomasm_path` in dtassemble.config.yml",
                self.program.display()
            )
        } else {
            format!("failed to run '{}': {}", self.program.display(), e)
        };
        AssembleError::assembly(details).into()
    }
}

impl Default for SbomasmEngine {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

#[async_trait]
impl AssemblyEngine for SbomasmEngine {
    type Config = SbomasmConfig;

    fn populate_config(&self, params: &AssembleParams) -> Result<SbomasmConfig> {
        if params.input.is_empty() {
            return Err(AssembleError::assembly("no input SBOMs to assemble").into());
        }

        if let Some(version) = &params.output_spec_version {
            Self::validate_spec_version(params.output_spec, version)?;
        }

        let workdir = tempfile::Builder::new()
            .prefix("dtassemble-")
            .tempdir()
            .map_err(|e| {
                AssembleError::assembly(format!("failed to create staging directory: {}", e))
            })?;
        let input_files = Self::stage_inputs(params, workdir.path())?;

        tracing::debug!(
            workdir = %workdir.path().display(),
            inputs = input_files.len(),
            "staged assembly inputs"
        );

        Ok(SbomasmConfig {
            metadata: params.metadata.clone(),
            merge_mode: params.merge_mode,
            output_spec: params.output_spec,
            output_spec_version: params.output_spec_version.clone(),
            output_format: params.output_format,
            input_files,
            workdir,
        })
    }

    async fn assemble(&self, config: SbomasmConfig) -> Result<String> {
        let args = Self::command_args(&config);
        tracing::debug!(program = %self.program.display(), ?args, "running assembler");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        // Staged inputs are no longer needed once the child has exited.
        drop(config);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AssembleError::assembly(format!(
                "'{}' exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            ))
            .into());
        }

        String::from_utf8(output.stdout).map_err(|e| {
            AssembleError::assembly(format!("assembler produced non UTF-8 output: {}", e)).into()
        })
    }
}
