use crate::ports::outbound::OutputPresenter;
use crate::shared::error::AssembleError;
use crate::shared::Result;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// FileSystemWriter adapter for writing the assembled SBOM to a file
///
/// The file is created only when `present` is called and is flushed and
/// closed before `present` returns, whether writing succeeds or not.
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    fn write_error(&self, details: impl Into<String>) -> anyhow::Error {
        AssembleError::FileWriteError {
            path: self.output_path.clone(),
            details: details.into(),
        }
        .into()
    }

    /// Validates that the parent directory exists before writing
    fn validate_parent_directory(&self) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if parent != Path::new("") && !parent.is_dir() {
                return Err(self.write_error(format!(
                    "Parent directory does not exist: {}",
                    parent.display()
                )));
            }
        }
        Ok(())
    }

    /// Rejects an existing output path that is a symlink or a directory
    fn validate_output_target(&self) -> Result<()> {
        let metadata = match fs::symlink_metadata(&self.output_path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(self.write_error(format!("Failed to read file metadata: {}", e))),
        };

        if metadata.is_symlink() {
            return Err(self.write_error(
                "Security: Output path is a symbolic link. For security reasons, writing to symbolic links is not allowed.",
            ));
        }
        if metadata.is_dir() {
            return Err(self.write_error("Output path is a directory"));
        }
        Ok(())
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        self.validate_parent_directory()?;
        self.validate_output_target()?;

        let mut file = File::create(&self.output_path).map_err(|e| self.write_error(e.to_string()))?;
        file.write_all(content.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| self.write_error(e.to_string()))?;

        eprintln!("✅ Output complete: {}", self.output_path.display());
        Ok(())
    }
}

/// StdoutPresenter adapter for writing the assembled SBOM to stdout
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl StdoutPresenter {
    /// Writes the document unchanged, byte for byte as a file would receive it
    fn write_document(writer: &mut impl Write, content: &str) -> io::Result<()> {
        writer.write_all(content.as_bytes())?;
        writer.flush()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        Self::write_document(&mut io::stdout().lock(), content)
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))
    }
}
