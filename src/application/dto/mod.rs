/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod monitoring_result;
mod output_format;
mod requests;

pub use monitoring_result::GovernanceMonitoringResult;
pub use output_format::OutputFormat;
pub use requests::{
    ComplianceViolationRequest, CreateAgreementRequest, CreateAuditRequest,
    CreateChangeRequestRequest, CreatePortfolioRequest, RegisterApplicationRequest,
    ReportIncidentRequest, ResolveIncidentRequest, DEFAULT_APPLICATION_VERSION,
};
