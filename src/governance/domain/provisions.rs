use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Security controls attached to an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityProvisions {
    pub data_confidentiality: Vec<SecurityMeasure>,
    pub data_integrity: Vec<SecurityMeasure>,
    pub application_availability: Sla,
    pub application_authenticity: Vec<SecurityMeasure>,
    pub roles_and_permissions: Vec<RolePermission>,
}

impl SecurityProvisions {
    /// Number of confidentiality, integrity and access-control entries.
    pub fn measure_count(&self) -> usize {
        self.data_confidentiality.len() + self.data_integrity.len() + self.roles_and_permissions.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityMeasure {
    pub name: String,
    pub description: String,
    pub category: String,
    pub status: SecurityStatus,
}

impl SecurityMeasure {
    pub fn implemented(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            status: SecurityStatus::Implemented,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityStatus {
    Implemented,
    #[default]
    Planned,
    Partial,
    NotStarted,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolePermission {
    pub role: String,
    pub permissions: Vec<String>,
    pub resource: String,
}

impl RolePermission {
    pub fn new(role: impl Into<String>, resource: impl Into<String>, permissions: &[&str]) -> Self {
        Self {
            role: role.into(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            resource: resource.into(),
        }
    }
}

/// Service level agreement. A zero response time means "not configured".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sla {
    pub service_name: String,
    #[serde(with = "crate::shared::duration_ms")]
    pub response_time: Duration,
    /// Availability percentage, e.g. 99.9
    pub availability: f64,
    pub uptime: String,
    pub support_hours: String,
    pub escalation_matrix: Vec<EscalationLevel>,
}

impl Sla {
    pub fn is_configured(&self) -> bool {
        !self.response_time.is_zero()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationLevel {
    pub level: u32,
    pub description: String,
    #[serde(with = "crate::shared::duration_ms")]
    pub response_time: Duration,
    pub contacts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessContinuity {
    #[serde(with = "crate::shared::duration_ms")]
    pub recovery_time_objective: Duration,
    #[serde(with = "crate::shared::duration_ms")]
    pub recovery_point_objective: Duration,
    pub business_impact_analysis: String,
    pub continuity_plans: Vec<ContinuityPlan>,
    pub testing_schedule: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuityPlan {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ContinuityType,
    pub status: PlanStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuityType {
    #[default]
    DisasterRecovery,
    Backup,
    Failover,
    RedundantSystems,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    #[default]
    Documented,
    Tested,
    Active,
    Outdated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_count_ignores_authenticity() {
        let provisions = SecurityProvisions {
            data_confidentiality: vec![SecurityMeasure::implemented("TLS", "transport")],
            data_integrity: vec![SecurityMeasure::implemented("Checksums", "storage")],
            application_authenticity: vec![SecurityMeasure::implemented("mTLS", "identity")],
            roles_and_permissions: vec![RolePermission::new("admin", "*", &["read", "write"])],
            ..SecurityProvisions::default()
        };
        assert_eq!(provisions.measure_count(), 3);
    }

    #[test]
    fn test_sla_configured_only_with_response_time() {
        let mut sla = Sla::default();
        assert!(!sla.is_configured());
        sla.response_time = Duration::from_millis(200);
        assert!(sla.is_configured());
    }

    #[test]
    fn test_partial_provisions_deserialize_with_defaults() {
        let json = r#"{"data_integrity": [{"name": "Hashing", "status": "implemented"}]}"#;
        let provisions: SecurityProvisions = serde_json::from_str(json).unwrap();
        assert_eq!(provisions.data_integrity.len(), 1);
        assert_eq!(provisions.data_integrity[0].status, SecurityStatus::Implemented);
        assert!(provisions.data_confidentiality.is_empty());
        assert!(!provisions.application_availability.is_configured());
    }
}
