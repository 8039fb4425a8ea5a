use super::application::Priority;
use super::change::AuditStatus;
use super::components::{ChangeType, ComplianceMonitoring};
use super::ids::{AgreementId, ApplicationId, AuditId, ChangeRequestId, IncidentId, PortfolioId};
use super::monitoring::{KpiMeasurement, RiskMonitoring};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Record of something that happened to an aggregate.
///
/// The log is append-only and nothing in-process subscribes to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum DomainEvent {
    PortfolioCreated {
        portfolio_id: PortfolioId,
        name: String,
        owner: String,
        occurred_at: DateTime<Utc>,
    },
    ApplicationAddedToPortfolio {
        portfolio_id: PortfolioId,
        application_id: ApplicationId,
        application_name: String,
        governance_agreement_id: Option<AgreementId>,
        occurred_at: DateTime<Utc>,
    },
    ApplicationRemovedFromPortfolio {
        portfolio_id: PortfolioId,
        application_id: ApplicationId,
        application_name: String,
        occurred_at: DateTime<Utc>,
    },
    ApplicationUpdated {
        portfolio_id: PortfolioId,
        application_id: ApplicationId,
        application_name: String,
        occurred_at: DateTime<Utc>,
    },
    GovernanceAgreementCreated {
        agreement_id: AgreementId,
        application_id: ApplicationId,
        title: String,
        occurred_at: DateTime<Utc>,
    },
    GovernanceAgreementUpdated {
        agreement_id: AgreementId,
        component: String,
        occurred_at: DateTime<Utc>,
    },
    GovernanceAgreementApproved {
        agreement_id: AgreementId,
        occurred_at: DateTime<Utc>,
    },
    GovernanceAgreementActivated {
        agreement_id: AgreementId,
        occurred_at: DateTime<Utc>,
    },
    GovernanceEvaluationCompleted {
        agreement_id: AgreementId,
        evaluator: String,
        findings: Vec<String>,
        recommendations: Vec<String>,
        occurred_at: DateTime<Utc>,
    },
    GovernanceDirectionSet {
        agreement_id: AgreementId,
        director: String,
        objectives: Vec<String>,
        action_plans: Vec<String>,
        occurred_at: DateTime<Utc>,
    },
    GovernanceMonitoringCompleted {
        agreement_id: AgreementId,
        monitor: String,
        kpi_measurements: Vec<KpiMeasurement>,
        compliance_status: ComplianceMonitoring,
        risk_status: RiskMonitoring,
        occurred_at: DateTime<Utc>,
    },
    ChangeRequestCreated {
        change_request_id: ChangeRequestId,
        application_id: ApplicationId,
        requester: String,
        change_type: ChangeType,
        priority: Priority,
        description: String,
        occurred_at: DateTime<Utc>,
    },
    ChangeRequestApproved {
        change_request_id: ChangeRequestId,
        approver: String,
        occurred_at: DateTime<Utc>,
    },
    IncidentReported {
        incident_id: IncidentId,
        application_id: ApplicationId,
        reporter: String,
        severity: u8,
        description: String,
        occurred_at: DateTime<Utc>,
    },
    IncidentResolved {
        incident_id: IncidentId,
        resolver: String,
        resolution: String,
        #[serde(with = "crate::shared::duration_ms")]
        time_to_resolve: Duration,
        occurred_at: DateTime<Utc>,
    },
    ComplianceViolationDetected {
        violation_id: String,
        application_id: ApplicationId,
        requirement_type: String,
        description: String,
        severity: String,
        occurred_at: DateTime<Utc>,
    },
    AuditCompleted {
        audit_id: AuditId,
        application_id: ApplicationId,
        auditor: String,
        scope: String,
        findings: Vec<String>,
        status: AuditStatus,
        occurred_at: DateTime<Utc>,
    },
}

/// Tag of a [`DomainEvent`] variant, usable as a query key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    PortfolioCreated,
    ApplicationAddedToPortfolio,
    ApplicationRemovedFromPortfolio,
    ApplicationUpdated,
    GovernanceAgreementCreated,
    GovernanceAgreementUpdated,
    GovernanceAgreementApproved,
    GovernanceAgreementActivated,
    GovernanceEvaluationCompleted,
    GovernanceDirectionSet,
    GovernanceMonitoringCompleted,
    ChangeRequestCreated,
    ChangeRequestApproved,
    IncidentReported,
    IncidentResolved,
    ComplianceViolationDetected,
    AuditCompleted,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::PortfolioCreated => "PortfolioCreated",
            EventType::ApplicationAddedToPortfolio => "ApplicationAddedToPortfolio",
            EventType::ApplicationRemovedFromPortfolio => "ApplicationRemovedFromPortfolio",
            EventType::ApplicationUpdated => "ApplicationUpdated",
            EventType::GovernanceAgreementCreated => "GovernanceAgreementCreated",
            EventType::GovernanceAgreementUpdated => "GovernanceAgreementUpdated",
            EventType::GovernanceAgreementApproved => "GovernanceAgreementApproved",
            EventType::GovernanceAgreementActivated => "GovernanceAgreementActivated",
            EventType::GovernanceEvaluationCompleted => "GovernanceEvaluationCompleted",
            EventType::GovernanceDirectionSet => "GovernanceDirectionSet",
            EventType::GovernanceMonitoringCompleted => "GovernanceMonitoringCompleted",
            EventType::ChangeRequestCreated => "ChangeRequestCreated",
            EventType::ChangeRequestApproved => "ChangeRequestApproved",
            EventType::IncidentReported => "IncidentReported",
            EventType::IncidentResolved => "IncidentResolved",
            EventType::ComplianceViolationDetected => "ComplianceViolationDetected",
            EventType::AuditCompleted => "AuditCompleted",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DomainEvent {
    pub fn event_type(&self) -> EventType {
        match self {
            DomainEvent::PortfolioCreated { .. } => EventType::PortfolioCreated,
            DomainEvent::ApplicationAddedToPortfolio { .. } => EventType::ApplicationAddedToPortfolio,
            DomainEvent::ApplicationRemovedFromPortfolio { .. } => {
                EventType::ApplicationRemovedFromPortfolio
            }
            DomainEvent::ApplicationUpdated { .. } => EventType::ApplicationUpdated,
            DomainEvent::GovernanceAgreementCreated { .. } => EventType::GovernanceAgreementCreated,
            DomainEvent::GovernanceAgreementUpdated { .. } => EventType::GovernanceAgreementUpdated,
            DomainEvent::GovernanceAgreementApproved { .. } => EventType::GovernanceAgreementApproved,
            DomainEvent::GovernanceAgreementActivated { .. } => {
                EventType::GovernanceAgreementActivated
            }
            DomainEvent::GovernanceEvaluationCompleted { .. } => {
                EventType::GovernanceEvaluationCompleted
            }
            DomainEvent::GovernanceDirectionSet { .. } => EventType::GovernanceDirectionSet,
            DomainEvent::GovernanceMonitoringCompleted { .. } => {
                EventType::GovernanceMonitoringCompleted
            }
            DomainEvent::ChangeRequestCreated { .. } => EventType::ChangeRequestCreated,
            DomainEvent::ChangeRequestApproved { .. } => EventType::ChangeRequestApproved,
            DomainEvent::IncidentReported { .. } => EventType::IncidentReported,
            DomainEvent::IncidentResolved { .. } => EventType::IncidentResolved,
            DomainEvent::ComplianceViolationDetected { .. } => {
                EventType::ComplianceViolationDetected
            }
            DomainEvent::AuditCompleted { .. } => EventType::AuditCompleted,
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            DomainEvent::PortfolioCreated { occurred_at, .. }
            | DomainEvent::ApplicationAddedToPortfolio { occurred_at, .. }
            | DomainEvent::ApplicationRemovedFromPortfolio { occurred_at, .. }
            | DomainEvent::ApplicationUpdated { occurred_at, .. }
            | DomainEvent::GovernanceAgreementCreated { occurred_at, .. }
            | DomainEvent::GovernanceAgreementUpdated { occurred_at, .. }
            | DomainEvent::GovernanceAgreementApproved { occurred_at, .. }
            | DomainEvent::GovernanceAgreementActivated { occurred_at, .. }
            | DomainEvent::GovernanceEvaluationCompleted { occurred_at, .. }
            | DomainEvent::GovernanceDirectionSet { occurred_at, .. }
            | DomainEvent::GovernanceMonitoringCompleted { occurred_at, .. }
            | DomainEvent::ChangeRequestCreated { occurred_at, .. }
            | DomainEvent::ChangeRequestApproved { occurred_at, .. }
            | DomainEvent::IncidentReported { occurred_at, .. }
            | DomainEvent::IncidentResolved { occurred_at, .. }
            | DomainEvent::ComplianceViolationDetected { occurred_at, .. }
            | DomainEvent::AuditCompleted { occurred_at, .. } => *occurred_at,
        }
    }

    /// ID of the aggregate the event belongs to: the portfolio for
    /// membership events, the change request, incident or audit for
    /// change-management events, the application for compliance
    /// violations, and the agreement for everything else.
    pub fn aggregate_id(&self) -> &str {
        match self {
            DomainEvent::PortfolioCreated { portfolio_id, .. }
            | DomainEvent::ApplicationAddedToPortfolio { portfolio_id, .. }
            | DomainEvent::ApplicationRemovedFromPortfolio { portfolio_id, .. }
            | DomainEvent::ApplicationUpdated { portfolio_id, .. } => portfolio_id.as_str(),
            DomainEvent::GovernanceAgreementCreated { agreement_id, .. }
            | DomainEvent::GovernanceAgreementUpdated { agreement_id, .. }
            | DomainEvent::GovernanceAgreementApproved { agreement_id, .. }
            | DomainEvent::GovernanceAgreementActivated { agreement_id, .. }
            | DomainEvent::GovernanceEvaluationCompleted { agreement_id, .. }
            | DomainEvent::GovernanceDirectionSet { agreement_id, .. }
            | DomainEvent::GovernanceMonitoringCompleted { agreement_id, .. } => {
                agreement_id.as_str()
            }
            DomainEvent::ChangeRequestCreated { change_request_id, .. }
            | DomainEvent::ChangeRequestApproved { change_request_id, .. } => {
                change_request_id.as_str()
            }
            DomainEvent::IncidentReported { incident_id, .. }
            | DomainEvent::IncidentResolved { incident_id, .. } => incident_id.as_str(),
            DomainEvent::ComplianceViolationDetected { application_id, .. } => {
                application_id.as_str()
            }
            DomainEvent::AuditCompleted { audit_id, .. } => audit_id.as_str(),
        }
    }
}
