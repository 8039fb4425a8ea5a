use crate::governance::domain::{Application, ApplicationAssessment, GovernanceAgreement};
use crate::governance::policies::{BusinessValuePolicy, RiskClassification, TechnicalHealthPolicy};
use chrono::{DateTime, Utc};

/// ApplicationEvaluator combines the scoring policies into one assessment
///
/// This service is pure: the same application, agreement and `now` always
/// produce the same assessment.
pub struct ApplicationEvaluator;

impl ApplicationEvaluator {
    /// Scores an application
    ///
    /// # Arguments
    /// * `app` - The application to score
    /// * `agreement` - Its governance agreement, when one exists
    /// * `now` - Reference time for age and recency signals
    pub fn assess(
        app: &Application,
        agreement: Option<&GovernanceAgreement>,
        now: DateTime<Utc>,
    ) -> ApplicationAssessment {
        let technical_health = TechnicalHealthPolicy::assess(app, now);
        let business_value = BusinessValuePolicy::assess(app, agreement, now);
        let risk_level = RiskClassification::risk_level(&technical_health, &business_value);
        let recommendations =
            RiskClassification::recommendations(&technical_health, &business_value, risk_level);

        ApplicationAssessment {
            application_id: app.id.clone(),
            technical_health,
            business_value,
            risk_level,
            recommendations,
        }
    }
}
