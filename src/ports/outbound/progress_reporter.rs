/// ProgressReporter port for user-facing progress
///
/// Use cases announce each evaluation step through this port. The CLI
/// renders it on stderr; `--quiet` and the MCP server discard it.
pub trait ProgressReporter {
    /// Announces a step, e.g. "📊 Evaluating portfolio: core"
    fn report(&self, message: &str);

    /// Reports position within a portfolio scan
    ///
    /// # Arguments
    /// * `current` - 1-based index of the member being evaluated
    /// * `total` - Number of members in the portfolio
    /// * `message` - Usually the member's name
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a non-fatal problem, such as members skipped during a scan
    fn report_error(&self, message: &str);

    fn report_completion(&self, message: &str);
}
