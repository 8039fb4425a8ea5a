use super::application::Priority;
use super::ids::ApplicationId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Derived evaluation of one application. Regenerated on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationAssessment {
    pub application_id: ApplicationId,
    pub technical_health: TechnicalHealth,
    pub business_value: BusinessValueAssessment,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<Recommendation>,
}

/// Five 1-5 scores plus an unclamped test-coverage percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalHealth {
    pub code_quality: i32,
    pub documentation: i32,
    pub test_coverage: f64,
    pub security_score: i32,
    pub performance_score: i32,
}

impl TechnicalHealth {
    /// Truncating mean of code quality, security and performance.
    pub fn average_score(&self) -> i32 {
        (self.code_quality + self.security_score + self.performance_score) / 3
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessValueAssessment {
    pub usage_metrics: UsageMetrics,
    pub business_alignment: f64,
    pub cost_efficiency: f64,
    pub user_satisfaction: f64,
}

/// Illustrative usage figures. Reproducible, but not fed back into scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageMetrics {
    pub active_users: i64,
    pub transaction_volume: i64,
    pub uptime_percentage: f64,
    #[serde(with = "crate::shared::duration_ms")]
    pub response_time: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RiskLevel::Low => "🟢",
            RiskLevel::Medium => "🟡",
            RiskLevel::High => "🟠",
            RiskLevel::Critical => "🔴",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" => Ok(RiskLevel::Critical),
            _ => Err(format!(
                "Invalid risk level: {}. Valid values: low, medium, high, critical",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub description: String,
    pub priority: Priority,
    #[serde(with = "crate::shared::duration_ms")]
    pub estimated_effort: Duration,
    pub business_impact: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    Modernize,
    Replace,
    Enhance,
    Retire,
    Maintain,
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationType::Modernize => "modernize",
            RecommendationType::Replace => "replace",
            RecommendationType::Enhance => "enhance",
            RecommendationType::Retire => "retire",
            RecommendationType::Maintain => "maintain",
        }
    }
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Portfolio roll-up computed from per-application assessments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioHealthAssessment {
    pub total_applications: usize,
    pub active_applications: usize,
    pub deprecated_applications: usize,
    /// Never computed; always zero.
    pub redundant_applications: usize,
    /// No cost model is wired in; always zero.
    pub total_cost: f64,
    #[serde(with = "crate::shared::duration_ms")]
    pub average_application_age: Duration,
    pub risk_distribution: BTreeMap<RiskLevel, usize>,
}

impl PortfolioHealthAssessment {
    pub fn risk_count(&self, level: RiskLevel) -> usize {
        self.risk_distribution.get(&level).copied().unwrap_or(0)
    }

    pub fn average_age_days(&self) -> f64 {
        self.average_application_age.as_secs_f64() / 86_400.0
    }
}
