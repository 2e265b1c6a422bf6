use crate::assembly::domain::{MergeMode, OutputFormat, OutputSpec};
use std::path::PathBuf;

/// AssembleResponse - Result of the Dependency-Track assembly use case
///
/// Carries the merged document plus the settings it was produced with, so
/// the caller can pick the output destination and report a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleResponse {
    /// The assembled SBOM, ready to be written out
    pub document: String,
    /// Destination path; `None` means stdout
    pub output: Option<PathBuf>,
    /// Number of project SBOMs that went into the merge
    pub input_count: usize,
    pub merge_mode: MergeMode,
    pub output_spec: OutputSpec,
    pub output_format: OutputFormat,
}

impl AssembleResponse {
    /// One-line description used in completion messages
    pub fn summary(&self) -> String {
        format!(
            "Assembled {} project SBOM(s) using {} merge into {} {}",
            self.input_count, self.merge_mode, self.output_spec, self.output_format
        )
    }
}
