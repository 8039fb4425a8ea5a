//! Containers for the three ISO/IEC 38500 principles held by an agreement.

use super::application::Priority;
use super::assessment::{ApplicationAssessment, PortfolioHealthAssessment, RiskLevel};
use super::components::ComplianceMonitoring;
use super::monitoring::{Kpi, KpiMeasurement, MitigationPlan, PerformanceMonitoring, Risk, RiskMonitoring};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Placeholder owner for generated action plans and actions.
pub const UNASSIGNED_OWNER: &str = "TBD";

// Evaluate

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatePrinciple {
    pub current_situation: CurrentSituationAssessment,
    pub needs_assessment: NeedsAssessment,
    pub risk_assessment: RiskAssessment,
    pub performance_metrics: Vec<KpiMeasurement>,
    pub last_evaluated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentSituationAssessment {
    pub application_inventory: Vec<ApplicationAssessment>,
    pub portfolio_health: Option<PortfolioHealthAssessment>,
    pub governance_maturity: GovernanceMaturityAssessment,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernanceMaturityAssessment {
    /// 1-5 scale, 0 when not yet assessed
    pub maturity_level: u8,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub improvement_areas: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedsAssessment {
    pub business_objectives: Vec<BusinessObjective>,
    pub technology_needs: Vec<TechnologyNeed>,
    pub resource_requirements: Vec<ResourceRequirement>,
    #[serde(with = "crate::shared::duration_ms")]
    pub timeline: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessObjective {
    pub id: String,
    pub name: String,
    pub description: String,
    pub priority: Priority,
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnologyNeed {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceRequirement {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub quantity: u32,
    #[serde(with = "crate::shared::duration_ms")]
    pub timeframe: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskAssessment {
    pub risks: Vec<Risk>,
    pub mitigation_plans: Vec<MitigationPlan>,
    pub overall_risk_level: Option<RiskLevel>,
}

// Direct

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectPrinciple {
    pub strategic_direction: StrategicDirection,
    pub resource_allocation: ResourceAllocation,
    pub policy_framework: PolicyFramework,
    pub action_plans: Vec<ActionPlan>,
    pub last_directed: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategicDirection {
    pub vision: String,
    pub mission: String,
    pub objectives: Vec<StrategicObjective>,
    pub initiatives: Vec<StrategicInitiative>,
    #[serde(with = "crate::shared::duration_ms")]
    pub timeframe: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategicObjective {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kpis: Vec<Kpi>,
    pub deadline: DateTime<Utc>,
}

impl StrategicObjective {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            kpis: Vec::new(),
            deadline,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategicInitiative {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub budget: f64,
    pub deadline: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceAllocation {
    pub budget_allocations: Vec<BudgetAllocation>,
    pub personnel_allocations: Vec<PersonnelAllocation>,
    pub technology_allocations: Vec<TechnologyAllocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetAllocation {
    pub category: String,
    pub amount: f64,
    pub timeframe: String,
    pub justification: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonnelAllocation {
    pub role: String,
    pub count: u32,
    pub skill_level: String,
    pub timeframe: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnologyAllocation {
    pub technology: String,
    pub purpose: String,
    pub budget: f64,
    pub timeframe: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyFramework {
    pub policies: Vec<Policy>,
    pub standards: Vec<Standard>,
    pub procedures: Vec<Procedure>,
    pub guidelines: Vec<Guideline>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    pub id: String,
    pub name: String,
    pub description: String,
    pub scope: String,
    pub owner: String,
    pub status: PolicyStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyStatus {
    #[default]
    Draft,
    Approved,
    Published,
    Retired,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Standard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub mandatory: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Procedure {
    pub id: String,
    pub name: String,
    pub description: String,
    pub steps: Vec<ProcedureStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcedureStep {
    pub step_number: u32,
    pub description: String,
    pub responsible: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Guideline {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub id: String,
    pub name: String,
    pub description: String,
    pub actions: Vec<Action>,
    pub owner: String,
    pub deadline: DateTime<Utc>,
    pub status: ActionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub description: String,
    pub responsible: String,
    pub deadline: DateTime<Utc>,
    pub status: ActionStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionStatus::Pending => "pending",
            ActionStatus::InProgress => "in_progress",
            ActionStatus::Completed => "completed",
            ActionStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

// Monitor

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorPrinciple {
    pub performance_monitoring: PerformanceMonitoring,
    pub compliance_monitoring: ComplianceMonitoring,
    pub risk_monitoring: RiskMonitoring,
    pub last_monitored: Option<DateTime<Utc>>,
}
