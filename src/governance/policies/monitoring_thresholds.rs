use crate::governance::domain::{
    ActionStatus, Kpi, MitigationPlan, MitigationTracking, Risk, RiskImpact, RiskIndicator,
    RiskLevel, RiskStatus,
};

/// Multiplier over the threshold at which a warning becomes critical.
const CRITICAL_FACTOR: f64 = 1.5;

/// Rules for judging KPI achievement and risk exposure.
pub struct MonitoringThresholds;

impl MonitoringThresholds {
    /// Efficiency KPIs succeed at or below target; every other category at or above.
    pub fn kpi_achieved(kpi: &Kpi, value: f64) -> bool {
        if kpi.is_efficiency() {
            value <= kpi.target
        } else {
            value >= kpi.target
        }
    }

    pub fn impact_weight(impact: RiskImpact) -> f64 {
        match impact {
            RiskImpact::Low => 1.0,
            RiskImpact::Medium => 2.0,
            RiskImpact::High => 3.0,
            RiskImpact::Critical => 4.0,
        }
    }

    pub fn level_threshold(level: RiskLevel) -> f64 {
        match level {
            RiskLevel::Low => 2.0,
            RiskLevel::Medium => 4.0,
            RiskLevel::High => 8.0,
            RiskLevel::Critical => 12.0,
        }
    }

    pub fn risk_status(value: f64, threshold: f64) -> RiskStatus {
        if value >= threshold * CRITICAL_FACTOR {
            RiskStatus::Critical
        } else if value >= threshold {
            RiskStatus::Warning
        } else {
            RiskStatus::Normal
        }
    }

    /// Exposure of a stored risk: probability times impact weight, judged
    /// against the threshold for the risk's level.
    pub fn risk_indicator(risk: &Risk) -> RiskIndicator {
        let value = risk.probability * Self::impact_weight(risk.impact);
        let threshold = Self::level_threshold(risk.level);
        RiskIndicator {
            name: risk.name.clone(),
            value,
            threshold,
            status: Self::risk_status(value, threshold),
        }
    }

    /// Progress of a mitigation plan, read from its effectiveness.
    pub fn mitigation_tracking(plan: &MitigationPlan) -> MitigationTracking {
        let progress = plan.effectiveness.clamp(0.0, 1.0);
        let status = if progress <= 0.0 {
            ActionStatus::Pending
        } else if progress >= 1.0 {
            ActionStatus::Completed
        } else {
            ActionStatus::InProgress
        };
        MitigationTracking {
            mitigation_id: format!("mit-{}", plan.risk_id),
            status,
            progress,
            notes: plan.responsible.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risk(probability: f64, impact: RiskImpact, level: RiskLevel) -> Risk {
        Risk {
            id: "r-1".to_string(),
            name: "Data breach".to_string(),
            description: String::new(),
            category: "security".to_string(),
            probability,
            impact,
            level,
        }
    }

    #[test]
    fn test_kpi_achieved_by_category() {
        let efficiency = Kpi::new("k1", "Cost per ticket", 10.0).with_category("efficiency");
        assert!(MonitoringThresholds::kpi_achieved(&efficiency, 9.5));
        assert!(MonitoringThresholds::kpi_achieved(&efficiency, 10.0));
        assert!(!MonitoringThresholds::kpi_achieved(&efficiency, 10.5));

        let performance = Kpi::new("k2", "Availability", 99.0).with_category("performance");
        assert!(MonitoringThresholds::kpi_achieved(&performance, 99.0));
        assert!(!MonitoringThresholds::kpi_achieved(&performance, 98.9));

        let uncategorized = Kpi::new("k3", "Adoption", 50.0);
        assert!(MonitoringThresholds::kpi_achieved(&uncategorized, 60.0));
    }

    #[test]
    fn test_risk_indicator_normal() {
        let indicator = MonitoringThresholds::risk_indicator(&risk(0.5, RiskImpact::Medium, RiskLevel::Medium));
        assert!((indicator.value - 1.0).abs() < 1e-9);
        assert_eq!(indicator.threshold, 4.0);
        assert_eq!(indicator.status, RiskStatus::Normal);
    }

    #[test]
    fn test_risk_indicator_warning_and_critical() {
        let warning = MonitoringThresholds::risk_indicator(&risk(0.8, RiskImpact::Critical, RiskLevel::Low));
        // 3.2 against threshold 2 -> 1.6x
        assert_eq!(warning.status, RiskStatus::Critical);

        let warning = MonitoringThresholds::risk_indicator(&risk(0.7, RiskImpact::High, RiskLevel::Low));
        // 2.1 against threshold 2
        assert_eq!(warning.status, RiskStatus::Warning);
    }

    #[test]
    fn test_risk_status_boundaries() {
        assert_eq!(MonitoringThresholds::risk_status(8.0, 8.0), RiskStatus::Warning);
        assert_eq!(MonitoringThresholds::risk_status(12.0, 8.0), RiskStatus::Critical);
        assert_eq!(MonitoringThresholds::risk_status(7.99, 8.0), RiskStatus::Normal);
    }

    #[test]
    fn test_mitigation_tracking_status() {
        let mut plan = MitigationPlan {
            risk_id: "r-1".to_string(),
            responsible: "Security Office".to_string(),
            ..MitigationPlan::default()
        };
        let tracking = MonitoringThresholds::mitigation_tracking(&plan);
        assert_eq!(tracking.mitigation_id, "mit-r-1");
        assert_eq!(tracking.status, ActionStatus::Pending);
        assert_eq!(tracking.notes, "Security Office");

        plan.effectiveness = 0.6;
        assert_eq!(MonitoringThresholds::mitigation_tracking(&plan).status, ActionStatus::InProgress);

        plan.effectiveness = 1.4;
        let tracking = MonitoringThresholds::mitigation_tracking(&plan);
        assert_eq!(tracking.status, ActionStatus::Completed);
        assert_eq!(tracking.progress, 1.0);
    }
}
