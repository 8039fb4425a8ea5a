use super::elapsed_days;
use crate::governance::domain::{
    Application, ApplicationCatalogue, ApplicationStatus, SecurityProvisions, TechnicalHealth,
};
use chrono::{DateTime, Utc};

const BASE_SCORE: i32 = 3;
const MIN_SCORE: i32 = 1;
const MAX_SCORE: i32 = 5;

/// Signed sub-scores that make up a technical health evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthSignals {
    pub version: i32,
    pub security: i32,
    pub documentation: i32,
    pub age: i32,
    pub status: i32,
}

impl HealthSignals {
    /// Base score plus every signal, clamped to 1-5.
    pub fn clamped_score(&self) -> i32 {
        (BASE_SCORE + self.version + self.security + self.documentation + self.age + self.status)
            .clamp(MIN_SCORE, MAX_SCORE)
    }
}

/// TechnicalHealthPolicy scores an application's technical condition.
///
/// Starting from a base of 3, signals for version maturity, security
/// provisions, documentation, age and lifecycle status move the score
/// within 1-5. The security and age signals also skew the reported
/// security and performance scores.
pub struct TechnicalHealthPolicy;

impl TechnicalHealthPolicy {
    /// Evaluates the application as of `now`.
    pub fn assess(app: &Application, now: DateTime<Utc>) -> TechnicalHealth {
        let signals = Self::signals(app, now);
        let score = signals.clamped_score();

        TechnicalHealth {
            code_quality: Self::adjust_with_variance(score),
            documentation: Self::adjust_with_variance(score),
            test_coverage: f64::from(score) * 20.0 + f64::from(signals.security) * 5.0,
            security_score: Self::adjust_with_variance(score + signals.security),
            performance_score: Self::adjust_with_variance(score + signals.age),
        }
    }

    pub fn signals(app: &Application, now: DateTime<Utc>) -> HealthSignals {
        HealthSignals {
            version: Self::version_maturity(&app.version),
            security: Self::security_provisions(&app.security_provisions),
            documentation: Self::documentation_completeness(&app.catalogue, now),
            age: Self::application_age(app.created_at, app.updated_at, now),
            status: Self::status_impact(app.status),
        }
    }

    /// -1 for a missing version, +1 for three or more dot-separated segments.
    ///
    /// Pre-release markers such as `-beta` or `rc1` do not earn or lose points
    /// on their own.
    pub fn version_maturity(version: &str) -> i32 {
        if version.is_empty() {
            return -1;
        }
        if version.split('.').count() >= 3 {
            return 1;
        }
        0
    }

    /// Security delta, normalized so that two measures score zero.
    pub fn security_provisions(provisions: &SecurityProvisions) -> i32 {
        let mut score = 0;

        score += Self::tiered(provisions.data_confidentiality.len(), 2);
        score += Self::tiered(provisions.data_integrity.len(), 2);
        if !provisions.application_authenticity.is_empty() {
            score += 1;
        }
        score += Self::tiered(provisions.roles_and_permissions.len(), 3);
        if provisions.application_availability.is_configured() {
            score += 1;
        }

        score - 2
    }

    pub fn documentation_completeness(catalogue: &ApplicationCatalogue, now: DateTime<Utc>) -> i32 {
        let mut score = match catalogue.last_updated {
            Some(updated) => {
                let days = elapsed_days(updated, now);
                if days < 90.0 {
                    2
                } else if days < 365.0 {
                    1
                } else {
                    0
                }
            }
            None => -1,
        };

        score += Self::tiered(catalogue.functionality.len(), 5);
        score
    }

    /// Old systems lose points; young, recently updated ones gain one.
    pub fn application_age(created_at: DateTime<Utc>, updated_at: DateTime<Utc>, now: DateTime<Utc>) -> i32 {
        let age_days = elapsed_days(created_at, now);
        if age_days > 365.0 * 5.0 {
            return -2;
        }
        if age_days > 365.0 * 2.0 {
            return -1;
        }
        if elapsed_days(updated_at, now) < 90.0 {
            1
        } else {
            0
        }
    }

    pub fn status_impact(status: ApplicationStatus) -> i32 {
        match status {
            ApplicationStatus::Active => 1,
            ApplicationStatus::Deprecated => -1,
            ApplicationStatus::Retired => -2,
            ApplicationStatus::Planned => 0,
        }
    }

    /// Adds a 10% variance (capped at half a point), rounds half up and
    /// clamps to 1-5.
    pub fn adjust_with_variance(base: i32) -> i32 {
        let base = f64::from(base);
        let variance = (base * 0.1).clamp(-0.5, 0.5);
        let adjusted = (base + variance).clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE));
        (adjusted + 0.5).floor() as i32
    }

    /// One point for a non-empty list, another once it exceeds `bonus_after`.
    fn tiered(len: usize, bonus_after: usize) -> i32 {
        match len {
            0 => 0,
            n if n > bonus_after => 2,
            _ => 1,
        }
    }
}
