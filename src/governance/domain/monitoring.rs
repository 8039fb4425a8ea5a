use super::assessment::RiskLevel;
use super::principles::ActionStatus;
use super::provisions::Sla;
use crate::shared::{GovernanceError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// KPI category whose target is an upper bound rather than a floor.
pub const EFFICIENCY_CATEGORY: &str = "efficiency";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub category: String,
    /// daily, weekly, monthly or quarterly
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub status: KpiStatus,
}

impl Kpi {
    pub fn new(id: impl Into<String>, name: impl Into<String>, target: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            target,
            unit: String::new(),
            category: String::new(),
            frequency: String::new(),
            status: KpiStatus::NotMeasured,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(GovernanceError::validation("KPI ID cannot be empty").into());
        }
        if self.name.trim().is_empty() {
            return Err(GovernanceError::validation("KPI name cannot be empty").into());
        }
        Ok(())
    }

    pub fn is_efficiency(&self) -> bool {
        self.category == EFFICIENCY_CATEGORY
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiStatus {
    OnTrack,
    AtRisk,
    OffTrack,
    #[default]
    NotMeasured,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiMeasurement {
    pub kpi_id: String,
    pub value: f64,
    pub target: f64,
    #[serde(default)]
    pub achieved: bool,
    pub measured_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Likelihood in [0, 1]
    pub probability: f64,
    pub impact: RiskImpact,
    pub level: RiskLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskImpact {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MitigationPlan {
    pub risk_id: String,
    pub actions: Vec<String>,
    pub responsible: String,
    #[serde(with = "crate::shared::duration_ms")]
    pub timeline: Duration,
    pub budget: f64,
    /// Share of the risk already mitigated, in [0, 1]
    pub effectiveness: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskMonitoring {
    pub risk_indicators: Vec<RiskIndicator>,
    pub risk_heat_maps: Vec<RiskHeatMap>,
    pub mitigation_tracking: Vec<MitigationTracking>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskIndicator {
    pub name: String,
    pub value: f64,
    pub threshold: f64,
    pub status: RiskStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskStatus {
    Normal,
    Warning,
    Critical,
}

impl RiskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskStatus::Normal => "normal",
            RiskStatus::Warning => "warning",
            RiskStatus::Critical => "critical",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RiskStatus::Normal => "✅",
            RiskStatus::Warning => "⚠️",
            RiskStatus::Critical => "🚨",
        }
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probability-by-impact matrix keyed by row then column label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskHeatMap {
    pub name: String,
    pub description: String,
    pub data: BTreeMap<String, BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationTracking {
    pub mitigation_id: String,
    pub status: ActionStatus,
    /// Completion in [0, 1]
    pub progress: f64,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceMonitoring {
    pub kpi_monitoring: Vec<KpiMonitoring>,
    pub service_level_monitoring: Vec<ServiceLevelMonitoring>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiMonitoring {
    pub kpi_id: String,
    pub frequency: String,
    pub responsible: String,
    pub thresholds: Vec<Threshold>,
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Threshold {
    /// warning or critical
    pub level: String,
    pub value: f64,
    /// Comparison operator such as `>` or `<`
    pub condition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: String,
    pub recipient: String,
    pub message: String,
    pub escalation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceLevelMonitoring {
    pub service_id: String,
    pub slas: Vec<Sla>,
    pub metrics: Vec<String>,
    pub dashboards: Vec<String>,
}
