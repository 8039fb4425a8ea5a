pub mod aggregates;
pub mod agreement;
pub mod application;
pub mod assessment;
pub mod change;
pub mod components;
pub mod events;
pub mod ids;
pub mod monitoring;
pub mod portfolio;
pub mod principles;
pub mod provisions;

pub use aggregates::{AgreementAggregate, PortfolioAggregate};
pub use agreement::{AgreementStatus, GovernanceAgreement, GovernanceComponent};
pub use application::{
    Application, ApplicationCatalogue, ApplicationInterface, ApplicationStatus,
    ConfigurationStandard, Functionality, Priority,
};
pub use assessment::{
    ApplicationAssessment, BusinessValueAssessment, PortfolioHealthAssessment, Recommendation,
    RecommendationType, RiskLevel, TechnicalHealth, UsageMetrics,
};
pub use change::{
    Approval, ApprovalDecision, ApprovalStatus, Audit, AuditFinding, AuditStatus, AuditType,
    ChangeRequest, ChangeRequestStatus, Incident, IncidentStatus,
};
pub use components::{
    Acquisition, ChangeType, ComplianceMonitoring, Conformance, Implementation, Performance,
    ResponsibilityMatrix, RaciEntry, Strategy,
};
pub use events::{DomainEvent, EventType};
pub use ids::{AgreementId, ApplicationId, AuditId, ChangeRequestId, IncidentId, PortfolioId};
pub use monitoring::{
    Kpi, KpiMeasurement, MitigationPlan, MitigationTracking, Risk, RiskImpact, RiskIndicator,
    RiskMonitoring, RiskStatus,
};
pub use portfolio::ApplicationPortfolio;
pub use principles::{
    Action, ActionPlan, ActionStatus, BudgetAllocation, PersonnelAllocation, Policy, Procedure,
    Standard, StrategicInitiative, StrategicObjective, UNASSIGNED_OWNER,
};
pub use provisions::{RolePermission, SecurityMeasure, SecurityProvisions, Sla};
