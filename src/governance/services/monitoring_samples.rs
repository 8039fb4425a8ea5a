use crate::governance::domain::{KpiMeasurement, RiskIndicator, RiskMonitoring, RiskStatus};
use chrono::{DateTime, Utc};

/// Illustrative monitoring data reported when no monitoring stores are configured
pub struct MonitoringSamples;

impl MonitoringSamples {
    pub fn kpi_measurements(now: DateTime<Utc>) -> Vec<KpiMeasurement> {
        vec![
            KpiMeasurement {
                kpi_id: "kpi-001".to_string(),
                value: 95.5,
                target: 100.0,
                achieved: false,
                measured_at: now,
                notes: "Demo KPI measurement".to_string(),
            },
            KpiMeasurement {
                kpi_id: "kpi-002".to_string(),
                value: 99.2,
                target: 98.0,
                achieved: true,
                measured_at: now,
                notes: "Demo KPI measurement".to_string(),
            },
        ]
    }

    pub fn risk_monitoring() -> RiskMonitoring {
        RiskMonitoring {
            risk_indicators: vec![
                RiskIndicator {
                    name: "Technical Debt".to_string(),
                    value: 75.0,
                    threshold: 80.0,
                    status: RiskStatus::Warning,
                },
                RiskIndicator {
                    name: "Security Vulnerabilities".to_string(),
                    value: 25.0,
                    threshold: 50.0,
                    status: RiskStatus::Normal,
                },
            ],
            risk_heat_maps: Vec::new(),
            mitigation_tracking: Vec::new(),
        }
    }
}
