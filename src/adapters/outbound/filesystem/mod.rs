/// Filesystem adapters for emitting the assembled SBOM
mod file_writer;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
