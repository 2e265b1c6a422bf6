/// ProgressReporter port for user-facing progress messages
///
/// Messages go to a side channel (stderr for the CLI) so that an SBOM
/// written to stdout is never interleaved with them.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Starts an indeterminate activity (e.g. waiting on the server)
    fn start_activity(&self, message: &str);

    /// Ends the activity started by `start_activity`, if any
    fn finish_activity(&self);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
