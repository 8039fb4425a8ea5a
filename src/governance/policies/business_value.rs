use super::{elapsed_days, elapsed_years};
use crate::governance::domain::{
    Application, ApplicationStatus, BusinessValueAssessment, GovernanceAgreement, UsageMetrics,
};
use chrono::{DateTime, Utc};
use std::time::Duration;

const BASE_ACTIVE_USERS: i64 = 50;
const BASE_TRANSACTION_VOLUME: i64 = 1000;
const BASE_UPTIME: f64 = 99.0;
const BASE_RESPONSE_TIME_MS: u64 = 300;

/// BusinessValuePolicy estimates what an application is worth to the business.
///
/// The three percentages start from fixed bases and move with governance
/// context, lifecycle status and maintenance recency. Each percentage is
/// clamped to 0-100.
pub struct BusinessValuePolicy;

impl BusinessValuePolicy {
    pub fn assess(
        app: &Application,
        agreement: Option<&GovernanceAgreement>,
        now: DateTime<Utc>,
    ) -> BusinessValueAssessment {
        BusinessValueAssessment {
            usage_metrics: Self::usage_metrics(app, agreement, now),
            business_alignment: Self::business_alignment(app, agreement, now),
            cost_efficiency: Self::cost_efficiency(app, agreement, now),
            user_satisfaction: Self::user_satisfaction(app, agreement, now),
        }
    }

    /// Illustrative usage figures derived from status, governance and age.
    pub fn usage_metrics(
        app: &Application,
        agreement: Option<&GovernanceAgreement>,
        now: DateTime<Utc>,
    ) -> UsageMetrics {
        let (mut users, mut transactions) = match app.status {
            ApplicationStatus::Active => (BASE_ACTIVE_USERS * 2, BASE_TRANSACTION_VOLUME * 3),
            ApplicationStatus::Deprecated => (BASE_ACTIVE_USERS / 2, BASE_TRANSACTION_VOLUME / 2),
            ApplicationStatus::Retired => (BASE_ACTIVE_USERS / 4, BASE_TRANSACTION_VOLUME / 4),
            ApplicationStatus::Planned => (BASE_ACTIVE_USERS, BASE_TRANSACTION_VOLUME),
        };

        if agreement.is_some() {
            users = scale(users, 1.5);
            transactions = scale(transactions, 1.8);
        }
        if elapsed_years(app.created_at, now) > 3.0 {
            users = scale(users, 1.3);
            transactions = scale(transactions, 1.4);
        }

        let mut uptime = BASE_UPTIME;
        if !app.security_provisions.roles_and_permissions.is_empty() {
            uptime += 0.5;
        }
        if elapsed_days(app.updated_at, now) < 30.0 {
            uptime += 0.4;
        }

        let mut response_ms = BASE_RESPONSE_TIME_MS;
        if app.name.to_lowercase().contains("legacy") {
            response_ms += 200;
        }
        if !app.security_provisions.data_integrity.is_empty() {
            response_ms += 50;
        }

        UsageMetrics {
            active_users: users,
            transaction_volume: transactions,
            uptime_percentage: uptime,
            response_time: Duration::from_millis(response_ms),
        }
    }

    pub fn business_alignment(
        app: &Application,
        agreement: Option<&GovernanceAgreement>,
        now: DateTime<Utc>,
    ) -> f64 {
        let mut alignment = 70.0;

        if let Some(agreement) = agreement {
            alignment += 20.0;
            if !agreement.direct.strategic_direction.objectives.is_empty() {
                alignment += 5.0;
            }
            if agreement.conformance.compliance_monitoring.is_configured() {
                alignment += 5.0;
            }
        }

        alignment += match app.status {
            ApplicationStatus::Active => 5.0,
            ApplicationStatus::Planned => 2.0,
            ApplicationStatus::Deprecated => -10.0,
            ApplicationStatus::Retired => -20.0,
        };

        if elapsed_days(app.updated_at, now) < 90.0 {
            alignment += 3.0;
        }

        clamp_percentage(alignment)
    }

    pub fn cost_efficiency(
        app: &Application,
        agreement: Option<&GovernanceAgreement>,
        now: DateTime<Utc>,
    ) -> f64 {
        let mut efficiency = 60.0;

        if let Some(agreement) = agreement {
            efficiency += 15.0;
            if !agreement.direct.resource_allocation.budget_allocations.is_empty() {
                efficiency += 10.0;
            }
        }

        efficiency += match app.status {
            ApplicationStatus::Active => 10.0,
            ApplicationStatus::Deprecated => -15.0,
            ApplicationStatus::Retired => -25.0,
            ApplicationStatus::Planned => 5.0,
        };

        let age_years = elapsed_years(app.created_at, now);
        if age_years > 5.0 {
            efficiency -= 10.0;
        } else if age_years < 1.0 {
            efficiency += 5.0;
        }

        if app.security_provisions.measure_count() > 3 {
            efficiency += 5.0;
        }

        clamp_percentage(efficiency)
    }

    /// Satisfaction uses a 60-day recency window, narrower than alignment's 90.
    pub fn user_satisfaction(
        app: &Application,
        agreement: Option<&GovernanceAgreement>,
        now: DateTime<Utc>,
    ) -> f64 {
        let mut satisfaction = 65.0;

        if let Some(agreement) = agreement {
            satisfaction += 15.0;
            if !agreement.evaluate.performance_metrics.is_empty() {
                satisfaction += 5.0;
            }
        }

        satisfaction += match app.status {
            ApplicationStatus::Active => 10.0,
            ApplicationStatus::Deprecated => -15.0,
            ApplicationStatus::Retired => -30.0,
            ApplicationStatus::Planned => 5.0,
        };

        if elapsed_days(app.updated_at, now) < 60.0 {
            satisfaction += 8.0;
        }
        if !app.security_provisions.roles_and_permissions.is_empty() {
            satisfaction += 3.0;
        }

        clamp_percentage(satisfaction)
    }
}

fn scale(value: i64, factor: f64) -> i64 {
    (value as f64 * factor) as i64
}

fn clamp_percentage(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}
