//! Governance report read model
//!
//! One command can evaluate applications, roll up portfolios and monitor
//! agreements. This model gathers those results into a single view that
//! every formatter renders.

use crate::application::dto::GovernanceMonitoringResult;
use crate::governance::domain::{
    AgreementId, ApplicationAssessment, PortfolioHealthAssessment, PortfolioId, RiskLevel,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Denormalized results of one governance run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GovernanceReport {
    /// Evaluation instant (the workspace clock, not wall time)
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub applications: Vec<ApplicationReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub portfolios: Vec<PortfolioReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub monitoring: Vec<MonitoringReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationReport {
    pub application_name: String,
    pub assessment: ApplicationAssessment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioReport {
    pub portfolio_id: PortfolioId,
    pub portfolio_name: String,
    pub owner: String,
    pub application_count: usize,
    pub health: PortfolioHealthAssessment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitoringReport {
    pub agreement_id: AgreementId,
    pub result: GovernanceMonitoringResult,
}

impl GovernanceReport {
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            applications: Vec::new(),
            portfolios: Vec::new(),
            monitoring: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty() && self.portfolios.is_empty() && self.monitoring.is_empty()
    }

    /// Highest risk level seen anywhere in the report
    ///
    /// Counts both direct application assessments and the risk
    /// distributions of evaluated portfolios.
    pub fn highest_risk(&self) -> Option<RiskLevel> {
        let from_applications = self.applications.iter().map(|a| a.assessment.risk_level);
        let from_portfolios = self.portfolios.iter().flat_map(|p| {
            p.health
                .risk_distribution
                .iter()
                .filter(|(_, count)| **count > 0)
                .map(|(level, _)| *level)
        });
        from_applications.chain(from_portfolios).max()
    }
}
