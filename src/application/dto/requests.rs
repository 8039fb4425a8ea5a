use crate::governance::domain::{
    AgreementId, ApplicationId, ApplicationStatus, AuditId, AuditType, ChangeRequestId,
    ChangeType, IncidentId, PortfolioId, Priority,
};
use chrono::{DateTime, Utc};

/// Default version for applications registered without one
pub const DEFAULT_APPLICATION_VERSION: &str = "1.0.0";

/// Request to register a new application
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterApplicationRequest {
    pub id: ApplicationId,
    pub name: String,
    pub description: String,
    pub version: String,
    pub status: ApplicationStatus,
}

impl RegisterApplicationRequest {
    /// An active application at version 1.0.0
    pub fn new(id: ApplicationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            version: DEFAULT_APPLICATION_VERSION.to_string(),
            status: ApplicationStatus::Active,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_status(mut self, status: ApplicationStatus) -> Self {
        self.status = status;
        self
    }
}

/// Request to create an empty portfolio
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePortfolioRequest {
    pub id: PortfolioId,
    pub name: String,
    pub description: String,
    pub owner: String,
}

/// Request to draft a governance agreement for an application
#[derive(Debug, Clone, PartialEq)]
pub struct CreateAgreementRequest {
    pub id: AgreementId,
    pub application_id: ApplicationId,
    pub title: String,
}

/// Request to draft a change request against an application
#[derive(Debug, Clone, PartialEq)]
pub struct CreateChangeRequestRequest {
    pub id: ChangeRequestId,
    pub application_id: ApplicationId,
    pub requester: String,
    pub change_type: ChangeType,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub business_case: String,
    pub impact: String,
    pub risk: String,
}

impl CreateChangeRequestRequest {
    /// A normal, medium-priority change
    pub fn new(
        id: ChangeRequestId,
        application_id: ApplicationId,
        title: impl Into<String>,
        requester: impl Into<String>,
    ) -> Self {
        Self {
            id,
            application_id,
            requester: requester.into(),
            change_type: ChangeType::Normal,
            priority: Priority::Medium,
            title: title.into(),
            description: String::new(),
            business_case: String::new(),
            impact: String::new(),
            risk: String::new(),
        }
    }

    pub fn with_type(mut self, change_type: ChangeType) -> Self {
        self.change_type = change_type;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Request to open an incident
#[derive(Debug, Clone, PartialEq)]
pub struct ReportIncidentRequest {
    pub id: IncidentId,
    pub application_id: ApplicationId,
    pub reporter: String,
    /// 1 (most severe) to 5
    pub severity: u8,
    pub title: String,
    pub description: String,
    pub impact: String,
}

/// Request to close out an incident
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveIncidentRequest {
    pub incident_id: IncidentId,
    pub resolver: String,
    pub resolution: String,
    pub root_cause: String,
}

/// Request to plan an audit
#[derive(Debug, Clone, PartialEq)]
pub struct CreateAuditRequest {
    pub id: AuditId,
    pub application_id: ApplicationId,
    pub auditor: String,
    pub audit_type: AuditType,
    pub scope: String,
    pub starts_at: DateTime<Utc>,
}

/// A compliance violation found outside an audit
#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceViolationRequest {
    pub application_id: ApplicationId,
    pub requirement_type: String,
    pub description: String,
    pub severity: String,
}
