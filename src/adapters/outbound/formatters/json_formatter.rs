use crate::application::read_models::GovernanceReport;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// JsonFormatter adapter rendering the report as pretty-printed JSON
///
/// Durations appear as integer milliseconds and enums as snake_case strings.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &GovernanceReport) -> Result<String> {
        let mut json = serde_json::to_string_pretty(report)
            .map_err(|e| anyhow::anyhow!("Failed to serialize governance report to JSON: {}", e))?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::{PortfolioReport, GovernanceReport};
    use crate::governance::domain::{PortfolioHealthAssessment, PortfolioId, RiskLevel};
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    #[test]
    fn test_portfolio_health_serialization() {
        let mut report = GovernanceReport::new(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        let mut health = PortfolioHealthAssessment {
            total_applications: 2,
            active_applications: 1,
            average_application_age: Duration::from_secs(86_400),
            ..PortfolioHealthAssessment::default()
        };
        health.risk_distribution.insert(RiskLevel::High, 1);
        report.portfolios.push(PortfolioReport {
            portfolio_id: PortfolioId::new("core").unwrap(),
            portfolio_name: "Core".to_string(),
            owner: "CIO".to_string(),
            application_count: 2,
            health,
        });

        let output = JsonFormatter::new().format(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let health = &value["portfolios"][0]["health"];
        assert_eq!(health["average_application_age"], 86_400_000);
        assert_eq!(health["risk_distribution"]["high"], 1);
        assert!(value.get("applications").is_none());
    }
}
