use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::{Path, PathBuf};

/// Where the assembled SBOM is emitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

impl PresenterType {
    /// Maps the `--output` value onto a presenter type; no path means stdout
    pub fn for_output(output: Option<&Path>) -> Self {
        match output {
            Some(path) => PresenterType::File(path.to_path_buf()),
            None => PresenterType::Stdout,
        }
    }
}

/// Factory for creating output presenters
///
/// Keeps the choice of output adapter out of `main` and the use case.
pub struct PresenterFactory;

impl PresenterFactory {
    /// Creates a presenter instance for the specified type
    ///
    /// # Examples
    /// ```
    /// use dtassemble::application::factories::{PresenterFactory, PresenterType};
    ///
    /// let presenter = PresenterFactory::create(PresenterType::for_output(None));
    /// ```
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}
