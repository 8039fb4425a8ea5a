use crate::governance::domain::{
    BusinessValueAssessment, Priority, Recommendation, RecommendationType, RiskLevel,
    TechnicalHealth,
};
use std::time::Duration;

const HOUR: u64 = 60 * 60;

/// RiskClassification turns scores into a risk level and recommendations.
///
/// Thresholds:
/// - average score ≤ 2 or cost efficiency < 50 → critical
/// - average score ≤ 3 or cost efficiency < 70 → high
/// - average score ≤ 4 → medium
/// - otherwise low
pub struct RiskClassification;

impl RiskClassification {
    pub fn risk_level(health: &TechnicalHealth, value: &BusinessValueAssessment) -> RiskLevel {
        let average = health.average_score();

        if average <= 2 || value.cost_efficiency < 50.0 {
            RiskLevel::Critical
        } else if average <= 3 || value.cost_efficiency < 70.0 {
            RiskLevel::High
        } else if average <= 4 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Emits up to four independent recommendations in a fixed order:
    /// security, code quality, cost, then retirement.
    pub fn recommendations(
        health: &TechnicalHealth,
        value: &BusinessValueAssessment,
        risk_level: RiskLevel,
    ) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        if health.security_score < 3 {
            recommendations.push(recommendation(
                "sec-001",
                RecommendationType::Modernize,
                Priority::High,
                "Improve security measures and implement additional security controls",
                80,
                "Reduce security risks and ensure compliance",
            ));
        }

        if health.code_quality < 3 {
            recommendations.push(recommendation(
                "tech-001",
                RecommendationType::Enhance,
                Priority::Medium,
                "Refactor code to improve quality and maintainability",
                120,
                "Reduce technical debt and improve development velocity",
            ));
        }

        if value.cost_efficiency < 70.0 {
            recommendations.push(recommendation(
                "cost-001",
                RecommendationType::Replace,
                Priority::Medium,
                "Evaluate more cost-effective alternatives",
                40,
                "Reduce operational costs",
            ));
        }

        if risk_level == RiskLevel::Critical {
            recommendations.push(recommendation(
                "risk-001",
                RecommendationType::Retire,
                Priority::Critical,
                "Consider retiring or replacing this high-risk application",
                160,
                "Eliminate critical business and technical risks",
            ));
        }

        recommendations
    }
}

fn recommendation(
    id: &str,
    kind: RecommendationType,
    priority: Priority,
    description: &str,
    effort_hours: u64,
    business_impact: &str,
) -> Recommendation {
    Recommendation {
        id: id.to_string(),
        kind,
        description: description.to_string(),
        priority,
        estimated_effort: Duration::from_secs(effort_hours * HOUR),
        business_impact: business_impact.to_string(),
    }
}
