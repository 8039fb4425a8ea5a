//! The five governance components carried by every agreement, plus the
//! RACI matrix they share. These are descriptive records; no scoring rule
//! reads them except `Conformance::compliance_monitoring`.

use super::application::{ApplicationCatalogue, ApplicationInterface, ConfigurationStandard};
use super::provisions::{BusinessContinuity, EscalationLevel, RolePermission, SecurityProvisions, Sla};
use crate::shared::{GovernanceError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Responsible/Accountable/Consulted/Informed stakeholder matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsibilityMatrix {
    pub entries: Vec<RaciEntry>,
}

impl ResponsibilityMatrix {
    /// Validates and appends an entry.
    pub fn add_entry(&mut self, entry: RaciEntry) -> Result<()> {
        entry.validate()?;
        self.entries.push(entry);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaciEntry {
    pub activity: String,
    pub responsible: String,
    pub accountable: String,
    pub consulted: String,
    pub informed: String,
}

impl RaciEntry {
    pub fn validate(&self) -> Result<()> {
        if self.activity.trim().is_empty() {
            return Err(GovernanceError::validation("activity cannot be empty").into());
        }
        if self.responsible.trim().is_empty() {
            return Err(GovernanceError::validation("responsible party cannot be empty").into());
        }
        if self.accountable.trim().is_empty() {
            return Err(GovernanceError::validation("accountable party cannot be empty").into());
        }
        Ok(())
    }
}

// Strategy

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strategy {
    pub ict_operations_manual: IctOperationsManual,
    pub application_catalogue: ApplicationCatalogue,
    pub application_interfaces: Vec<ApplicationInterface>,
    pub configuration_standard: ConfigurationStandard,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IctOperationsManual {
    pub application_architecture: String,
    pub infrastructure_config: String,
    pub operating_system: String,
    pub programming_language: String,
    pub rights_and_roles: Vec<RolePermission>,
    pub security_provisions: SecurityProvisions,
    pub last_updated: Option<DateTime<Utc>>,
}

// Acquisition

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Acquisition {
    pub requirements_management: RequirementsManagement,
    pub communication_management: CommunicationManagement,
    pub business_case_template: String,
    pub prioritization_matrix: Vec<PrioritizationRule>,
    pub change_request_process: ChangeRequestProcess,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementsManagement {
    pub gathering_process: Vec<RequirementStep>,
    pub validation_process: Vec<RequirementStep>,
    pub approval_workflow: Vec<ApprovalStep>,
    pub business_rules: Vec<BusinessRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementStep {
    pub step_number: u32,
    pub name: String,
    pub description: String,
    pub responsible: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApprovalStep {
    pub step_number: u32,
    pub name: String,
    pub approver_role: String,
    pub conditions: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessRule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunicationManagement {
    pub stakeholders: Vec<Stakeholder>,
    pub communication_matrix: ResponsibilityMatrix,
    pub communication_types: Vec<CommunicationType>,
    pub communication_schedule: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stakeholder {
    pub name: String,
    pub role: String,
    pub contact: String,
    /// One of R, A, C or I
    pub raci_role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunicationType {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub frequency: String,
    pub audience: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrioritizationRule {
    pub criteria: String,
    pub weight: i32,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeRequestProcess {
    pub types: Vec<ChangeType>,
    pub approval_matrix: ResponsibilityMatrix,
    pub escalation_matrix: Vec<EscalationLevel>,
    pub sla: Sla,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Standard,
    Normal,
    Emergency,
}

// Performance

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Performance {
    pub support_process: SupportProcess,
    pub incident_management: IncidentManagement,
    pub escalation_process: Vec<EscalationLevel>,
    pub application_security: SecurityProvisions,
    pub business_continuity: BusinessContinuity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportProcess {
    pub level1_support: Vec<String>,
    pub level2_support: Vec<String>,
    pub level3_support: Vec<String>,
    pub sla: Sla,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentManagement {
    pub classification_matrix: Vec<IncidentClass>,
    pub prioritization_matrix: Vec<IncidentPriority>,
    pub response_matrix: Vec<IncidentResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentClass {
    pub severity: u32,
    pub name: String,
    pub description: String,
    #[serde(with = "crate::shared::duration_ms")]
    pub response_time: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentPriority {
    pub priority: u32,
    pub name: String,
    pub description: String,
    #[serde(with = "crate::shared::duration_ms")]
    pub sla: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentResponse {
    pub incident_class: String,
    pub action: String,
    pub responsible: String,
    #[serde(with = "crate::shared::duration_ms")]
    pub timeframe: Duration,
}

// Conformance

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conformance {
    pub legal_requirements: Vec<LegalRequirement>,
    pub contractual_requirements: Vec<ContractualRequirement>,
    pub industry_standards: Vec<IndustryStandard>,
    pub compliance_monitoring: ComplianceMonitoring,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegalRequirement {
    pub name: String,
    pub description: String,
    pub authority: String,
    pub effective_date: Option<DateTime<Utc>>,
    pub status: ComplianceStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractualRequirement {
    pub name: String,
    pub description: String,
    pub contract_id: String,
    pub party: String,
    pub status: ComplianceStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustryStandard {
    pub name: String,
    pub description: String,
    pub organization: String,
    pub version: String,
    pub status: ComplianceStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
    Partial,
    #[default]
    UnderReview,
}

/// How and how often conformance is checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceMonitoring {
    /// Empty when monitoring has not been configured.
    pub monitoring_frequency: String,
    pub responsible_parties: Vec<String>,
    pub reporting_schedule: String,
    pub audit_requirements: Vec<AuditRequirement>,
}

impl ComplianceMonitoring {
    pub fn is_configured(&self) -> bool {
        !self.monitoring_frequency.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditRequirement {
    pub name: String,
    pub description: String,
    pub frequency: String,
    pub responsible: String,
    pub last_audit: Option<DateTime<Utc>>,
    pub next_audit: Option<DateTime<Utc>>,
}

// Implementation

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Implementation {
    pub implementation_process: ImplementationProcess,
    pub release_management: ReleaseManagement,
    pub deployment_strategy: DeploymentStrategy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImplementationProcess {
    pub phases: Vec<ImplementationPhase>,
    pub roles: ResponsibilityMatrix,
    pub quality_gates: Vec<QualityGate>,
    pub rollback_plan: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImplementationPhase {
    pub phase_number: u32,
    pub name: String,
    pub description: String,
    #[serde(with = "crate::shared::duration_ms")]
    pub duration: Duration,
    pub responsible: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityGate {
    pub name: String,
    pub description: String,
    pub criteria: String,
    pub responsible: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseManagement {
    pub release_types: Vec<ReleaseType>,
    pub approval_process: Vec<ApprovalStep>,
    pub testing_requirements: Vec<TestingRequirement>,
    pub deployment_windows: Vec<DeploymentWindow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
    Emergency,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestingRequirement {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub responsible: String,
    #[serde(with = "crate::shared::duration_ms")]
    pub duration: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentWindow {
    pub environment: String,
    pub start_time: String,
    pub end_time: String,
    pub days: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentStrategy {
    #[serde(rename = "type")]
    pub kind: DeploymentType,
    pub automation_level: String,
    pub rollback_capability: bool,
    pub monitoring: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentType {
    BigBang,
    #[default]
    Phased,
    BlueGreen,
    Canary,
}
