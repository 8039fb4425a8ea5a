use crate::governance::domain::{ComplianceMonitoring, KpiMeasurement, RiskMonitoring};
use serde::{Deserialize, Serialize};

/// Outcome of monitoring one governance agreement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceMonitoringResult {
    pub kpi_measurements: Vec<KpiMeasurement>,
    pub compliance_status: ComplianceMonitoring,
    pub risk_status: RiskMonitoring,
}
