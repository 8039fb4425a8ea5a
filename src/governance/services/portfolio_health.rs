use crate::governance::domain::{
    Application, ApplicationStatus, PortfolioHealthAssessment, RiskLevel,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::time::Duration;

/// PortfolioHealthCalculator rolls member evaluations up into portfolio health
pub struct PortfolioHealthCalculator;

impl PortfolioHealthCalculator {
    /// Summarizes a portfolio
    ///
    /// # Arguments
    /// * `members` - The portfolio's member copies
    /// * `outcomes` - One entry per member, in the same order: the assessed
    ///   risk level, or `None` when that member's evaluation failed
    /// * `now` - Reference time for the average age
    ///
    /// Status counts and the risk histogram only cover evaluated members.
    /// The total and the average age cover every member.
    pub fn summarize(
        members: &[Application],
        outcomes: &[Option<RiskLevel>],
        now: DateTime<Utc>,
    ) -> PortfolioHealthAssessment {
        let mut active_applications = 0;
        let mut deprecated_applications = 0;
        let mut risk_distribution: BTreeMap<RiskLevel, usize> = BTreeMap::new();

        for (member, outcome) in members.iter().zip(outcomes) {
            let Some(risk_level) = outcome else {
                continue;
            };
            match member.status {
                ApplicationStatus::Active => active_applications += 1,
                ApplicationStatus::Deprecated => deprecated_applications += 1,
                ApplicationStatus::Retired | ApplicationStatus::Planned => {}
            }
            *risk_distribution.entry(*risk_level).or_insert(0) += 1;
        }

        PortfolioHealthAssessment {
            total_applications: members.len(),
            active_applications,
            deprecated_applications,
            redundant_applications: 0,
            total_cost: 0.0,
            average_application_age: Self::average_age(members, now),
            risk_distribution,
        }
    }

    /// Mean of `now - created_at` over all members, floored at zero
    pub fn average_age(members: &[Application], now: DateTime<Utc>) -> Duration {
        if members.is_empty() {
            return Duration::ZERO;
        }
        let total_millis: i64 = members
            .iter()
            .map(|member| (now - member.created_at).num_milliseconds())
            .sum();
        let mean = total_millis / members.len() as i64;
        Duration::from_millis(mean.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::governance::domain::ApplicationId;
    use chrono::{Duration as ChronoDuration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn member(id: &str, status: ApplicationStatus, age_days: i64) -> Application {
        let mut app = Application::new(ApplicationId::new(id).unwrap(), id, now())
            .unwrap()
            .with_status(status);
        app.created_at = now() - ChronoDuration::days(age_days);
        app
    }

    #[test]
    fn test_summarize_empty_portfolio() {
        let health = PortfolioHealthCalculator::summarize(&[], &[], now());

        assert_eq!(health.total_applications, 0);
        assert_eq!(health.average_application_age, Duration::ZERO);
        assert!(health.risk_distribution.is_empty());
    }

    #[test]
    fn test_summarize_counts_statuses_and_risks() {
        let members = vec![
            member("a", ApplicationStatus::Active, 10),
            member("b", ApplicationStatus::Deprecated, 20),
            member("c", ApplicationStatus::Retired, 30),
            member("d", ApplicationStatus::Active, 40),
        ];
        let outcomes = vec![
            Some(RiskLevel::Low),
            Some(RiskLevel::High),
            Some(RiskLevel::Critical),
            Some(RiskLevel::Low),
        ];

        let health = PortfolioHealthCalculator::summarize(&members, &outcomes, now());

        assert_eq!(health.total_applications, 4);
        assert_eq!(health.active_applications, 2);
        assert_eq!(health.deprecated_applications, 1);
        assert_eq!(health.redundant_applications, 0);
        assert_eq!(health.total_cost, 0.0);
        assert_eq!(health.risk_count(RiskLevel::Low), 2);
        assert_eq!(health.risk_count(RiskLevel::Critical), 1);
        assert_eq!(health.risk_count(RiskLevel::Medium), 0);
        assert!((health.average_age_days() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_skips_failed_members_but_counts_them_in_total() {
        let members = vec![
            member("a", ApplicationStatus::Active, 10),
            member("b", ApplicationStatus::Active, 30),
        ];
        let outcomes = vec![Some(RiskLevel::Medium), None];

        let health = PortfolioHealthCalculator::summarize(&members, &outcomes, now());

        assert_eq!(health.total_applications, 2);
        assert_eq!(health.active_applications, 1);
        assert_eq!(health.risk_distribution.values().sum::<usize>(), 1);
        assert!((health.average_age_days() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_age_floors_future_dates() {
        let members = vec![member("a", ApplicationStatus::Planned, -5)];
        assert_eq!(PortfolioHealthCalculator::average_age(&members, now()), Duration::ZERO);
    }
}
