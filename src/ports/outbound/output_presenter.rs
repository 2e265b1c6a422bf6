use crate::shared::Result;

/// OutputPresenter port for emitting the assembled SBOM
///
/// The destination (stdout, file, etc.) is opened only inside `present`,
/// after assembly has succeeded, and is closed before it returns.
pub trait OutputPresenter {
    /// Writes the assembled SBOM to the output destination
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - File permissions prevent writing
    fn present(&self, content: &str) -> Result<()>;
}
