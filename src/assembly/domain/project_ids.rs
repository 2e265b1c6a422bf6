use crate::shared::error::AssembleError;
use uuid::Uuid;

/// Message reported when the command is invoked without any project identifier
pub const MISSING_PROJECTS_MESSAGE: &str = "please provide at least one sbom file to assemble";

/// Ordered, non-empty list of Dependency-Track project identifiers
///
/// The order given on the command line is kept because it drives the
/// component order of the assembled SBOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIds(Vec<Uuid>);

impl ProjectIds {
    /// Parses positional command arguments into project identifiers
    ///
    /// Resolution is all-or-nothing: the first malformed argument rejects
    /// the whole list and no partial result is returned.
    ///
    /// # Errors
    /// Returns `AssembleError::Configuration` if `args` is empty or any
    /// argument is not a valid UUID.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, AssembleError> {
        if args.is_empty() {
            return Err(AssembleError::configuration(MISSING_PROJECTS_MESSAGE));
        }

        let ids = args
            .iter()
            .enumerate()
            .map(|(index, arg)| {
                let arg = arg.as_ref();
                Uuid::parse_str(arg).map_err(|e| {
                    AssembleError::configuration(format!(
                        "invalid project id '{}' (argument {}): {}",
                        arg,
                        index + 1,
                        e
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(ids))
    }

    /// Wraps already-parsed identifiers, rejecting an empty list
    pub fn new(ids: Vec<Uuid>) -> Result<Self, AssembleError> {
        if ids.is_empty() {
            return Err(AssembleError::configuration(MISSING_PROJECTS_MESSAGE));
        }
        Ok(Self(ids))
    }

    pub fn as_slice(&self) -> &[Uuid] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Uuid> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a ProjectIds {
    type Item = &'a Uuid;
    type IntoIter = std::slice::Iter<'a, Uuid>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
