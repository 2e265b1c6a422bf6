use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the assembled SBOM was written
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors and configuration errors)
    InvalidArguments = 2,
    /// Application error (fetch error, assembly error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Picks the exit code for an error surfaced by `run`.
    ///
    /// Configuration errors are argument errors; everything else is an
    /// application error.
    pub fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<AssembleError>() {
            Some(AssembleError::Configuration { .. }) => ExitCode::InvalidArguments,
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// A single project whose SBOM could not be retrieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub project_id: Uuid,
    pub reason: String,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "project {}: {}", self.project_id, self.reason)
    }
}

fn format_failures(failures: &[FetchFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("  - {}", failure))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Application-specific errors for SBOM assembly.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// Missing arguments, conflicting flags, malformed identifiers.
    /// Raised before any network or merge work starts.
    #[error("{message}\n\n💡 Hint: Run `dtassemble dtAssemble --help` to see the accepted flags")]
    Configuration { message: String },

    #[error("Failed to fetch {} of {requested} project SBOM(s) from Dependency-Track:\n{}\n\n💡 Hint: Check the server URL, the API key permissions (VIEW_PORTFOLIO) and the project identifiers", failures.len(), format_failures(failures))]
    Fetch {
        requested: usize,
        failures: Vec<FetchFailure>,
    },

    #[error("SBOM assembly failed: {details}")]
    Assembly { details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },
}

impl AssembleError {
    pub fn configuration(message: impl Into<String>) -> Self {
        AssembleError::Configuration {
            message: message.into(),
        }
    }

    pub fn assembly(details: impl Into<String>) -> Self {
        AssembleError::Assembly {
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::InvalidArguments),
            "Invalid Arguments (2)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_exit_code_for_configuration_error() {
        let err: anyhow::Error = AssembleError::configuration("bad flags").into();
        assert_eq!(ExitCode::for_error(&err), ExitCode::InvalidArguments);
    }

    #[test]
    fn test_exit_code_for_other_errors() {
        let err: anyhow::Error = AssembleError::assembly("boom").into();
        assert_eq!(ExitCode::for_error(&err), ExitCode::ApplicationError);

        let err = anyhow::anyhow!("plain error");
        assert_eq!(ExitCode::for_error(&err), ExitCode::ApplicationError);
    }

    #[test]
    fn test_exit_code_for_wrapped_configuration_error() {
        let err = anyhow::Error::from(AssembleError::configuration("bad flags"))
            .context("while validating");
        assert_eq!(ExitCode::for_error(&err), ExitCode::InvalidArguments);
    }

    #[test]
    fn test_configuration_error_display() {
        let error = AssembleError::configuration("please provide at least one sbom file to assemble");
        let display = format!("{}", error);
        assert!(display.contains("please provide at least one sbom file to assemble"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_fetch_error_lists_every_failure() {
        let first = Uuid::parse_str("11903ba9-a585-4dfb-9a0c-f348345a5473").unwrap();
        let second = Uuid::parse_str("34103ba2-0e63-4a2f-9a8b-a62526162620").unwrap();
        let error = AssembleError::Fetch {
            requested: 3,
            failures: vec![
                FetchFailure {
                    project_id: first,
                    reason: "HTTP 404".to_string(),
                },
                FetchFailure {
                    project_id: second,
                    reason: "timed out".to_string(),
                },
            ],
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to fetch 2 of 3 project SBOM(s)"));
        assert!(display.contains(&first.to_string()));
        assert!(display.contains("HTTP 404"));
        assert!(display.contains(&second.to_string()));
        assert!(display.contains("timed out"));
    }

    #[test]
    fn test_assembly_error_display() {
        let error = AssembleError::assembly("sbomasm exited with status 1");
        assert_eq!(
            format!("{}", error),
            "SBOM assembly failed: sbomasm exited with status 1"
        );
    }

    #[test]
    fn test_file_write_error_display() {
        let error = AssembleError::FileWriteError {
            path: PathBuf::from("/test/output.json"),
            details: "Permission denied".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to write to file"));
        assert!(display.contains("/test/output.json"));
        assert!(display.contains("Permission denied"));
        assert!(display.contains("💡 Hint:"));
    }
}
