use crate::application::read_models::GovernanceReport;
use crate::shared::Result;

/// ReportFormatter port for rendering governance reports
///
/// This port abstracts the formatting logic for the different report
/// formats (JSON, Markdown, plain text).
pub trait ReportFormatter {
    /// Formats a governance report
    ///
    /// # Arguments
    /// * `report` - Application assessments, portfolio health and monitoring
    ///   results gathered by one command
    ///
    /// # Returns
    /// Formatted report content as a string
    ///
    /// # Errors
    /// Returns an error if formatting or serialization fails
    fn format(&self, report: &GovernanceReport) -> Result<String>;
}
