/// Result alias used by every layer; domain errors are `AssembleError`
/// values carried inside `anyhow::Error`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
