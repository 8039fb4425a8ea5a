use super::{GovernanceUseCase, PortfolioUseCase};
use crate::application::factories::GovernanceWorkspace;
use crate::application::read_models::{
    ApplicationReport, GovernanceReport, MonitoringReport, PortfolioReport,
};
use crate::governance::domain::{AgreementId, ApplicationId, PortfolioId};
use crate::ports::outbound::{Clock, ProgressReporter};
use crate::shared::{GovernanceError, Result};
use std::sync::Arc;

/// ReportUseCase - gathers governance results into a [`GovernanceReport`]
///
/// Each `add_*` call runs the corresponding governance operation (so events
/// are recorded as usual) and appends the result to the report.
pub struct ReportUseCase<PR> {
    governance: GovernanceUseCase<PR>,
    portfolios: PortfolioUseCase,
    clock: Arc<dyn Clock>,
}

impl<PR: ProgressReporter> ReportUseCase<PR> {
    pub fn new(workspace: &GovernanceWorkspace, progress_reporter: PR) -> Self {
        Self {
            governance: GovernanceUseCase::new(workspace, progress_reporter),
            portfolios: PortfolioUseCase::new(workspace),
            clock: workspace.clock.clone(),
        }
    }

    pub fn governance(&self) -> &GovernanceUseCase<PR> {
        &self.governance
    }

    /// An empty report stamped with the workspace clock
    pub fn new_report(&self) -> GovernanceReport {
        GovernanceReport::new(self.clock.now())
    }

    pub fn add_application(
        &self,
        report: &mut GovernanceReport,
        application_id: &ApplicationId,
        evaluator: &str,
    ) -> Result<()> {
        let app = self.portfolios.get_application(application_id)?;
        let assessment = self.governance.evaluate_application(application_id, evaluator)?;
        report.applications.push(ApplicationReport {
            application_name: app.name,
            assessment,
        });
        Ok(())
    }

    pub fn add_portfolio(&self, report: &mut GovernanceReport, portfolio_id: &PortfolioId) -> Result<()> {
        let portfolio = self.portfolios.get_portfolio(portfolio_id)?;
        let health = self.governance.evaluate_portfolio(portfolio_id)?;
        report.portfolios.push(PortfolioReport {
            portfolio_id: portfolio.id,
            portfolio_name: portfolio.name,
            owner: portfolio.owner,
            application_count: portfolio.applications.len(),
            health,
        });
        Ok(())
    }

    pub fn add_monitoring(
        &self,
        report: &mut GovernanceReport,
        agreement_id: &AgreementId,
        monitor: &str,
    ) -> Result<()> {
        let result = self.governance.monitor_governance(agreement_id, monitor)?;
        report.monitoring.push(MonitoringReport {
            agreement_id: agreement_id.clone(),
            result,
        });
        Ok(())
    }

    /// Evaluates every portfolio and every governed application, then
    /// monitors every agreement
    ///
    /// Applications without an agreement are left out of the report.
    pub fn full_review(&self, evaluator: &str, monitor: &str) -> Result<GovernanceReport> {
        let mut report = self.new_report();

        // Step 1: Portfolio roll-ups
        for portfolio in self.portfolios.list_portfolios()? {
            self.add_portfolio(&mut report, &portfolio.id)?;
        }

        // Step 2: Individual applications
        for app in self.portfolios.list_applications()? {
            match self.add_application(&mut report, &app.id, evaluator) {
                Ok(()) => {}
                Err(e)
                    if e
                        .downcast_ref::<GovernanceError>()
                        .is_some_and(GovernanceError::is_not_found) =>
                {
                    tracing::debug!(application = %app.id, "skipping ungoverned application");
                }
                Err(e) => return Err(e),
            }
        }

        // Step 3: Monitoring
        for agreement in self.governance.list_governance_agreements()? {
            self.add_monitoring(&mut report, &agreement.id, monitor)?;
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::clock::FixedClock;
    use crate::adapters::outbound::console::QuietProgressReporter;
    use crate::application::demo::enterprise_dataset;
    use crate::application::factories::WorkspaceFactory;
    use chrono::{DateTime, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn demo_workspace() -> GovernanceWorkspace {
        WorkspaceFactory::from_dataset(enterprise_dataset(now()).unwrap(), Arc::new(FixedClock::new(now())))
            .unwrap()
    }

    #[test]
    fn test_full_review_of_enterprise_demo() {
        let workspace = demo_workspace();
        let report = ReportUseCase::new(&workspace, QuietProgressReporter)
            .full_review("Board", "Risk Office")
            .unwrap();

        assert_eq!(report.generated_at, now());
        assert_eq!(report.portfolios.len(), 5);
        assert_eq!(report.applications.len(), 14);
        assert_eq!(report.monitoring.len(), 14);
        assert!(report
            .applications
            .iter()
            .all(|a| a.assessment.application_id.as_str() != "mobile-field-001"));
    }

    #[test]
    fn test_add_application_unknown() {
        let workspace = demo_workspace();
        let use_case = ReportUseCase::new(&workspace, QuietProgressReporter);
        let mut report = use_case.new_report();
        let err = use_case
            .add_application(&mut report, &ApplicationId::new("ghost").unwrap(), "auditor")
            .unwrap_err();
        assert_eq!(err.to_string(), "Application not found: ghost");
        assert!(report.is_empty());
    }

    #[test]
    fn test_monitoring_uses_dataset_stores() {
        let workspace = demo_workspace();
        let use_case = ReportUseCase::new(&workspace, QuietProgressReporter);
        let mut report = use_case.new_report();
        use_case
            .add_monitoring(&mut report, &AgreementId::new("gov-erp-core-001").unwrap(), "Risk Office")
            .unwrap();

        let result = &report.monitoring[0].result;
        assert_eq!(result.kpi_measurements.len(), 3);
        assert_eq!(result.risk_status.risk_indicators.len(), 2);
        assert_eq!(result.risk_status.mitigation_tracking.len(), 1);
    }
}
