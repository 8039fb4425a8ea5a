use crate::governance::domain::{
    Application, ApplicationAssessment, ApplicationId, PortfolioHealthAssessment, PortfolioId,
};
use crate::governance::services::{ApplicationEvaluator, PortfolioHealthCalculator};
use crate::ports::outbound::{
    ApplicationPortfolioRepository, ApplicationRepository, Clock, GovernanceAgreementRepository,
};
use crate::shared::Result;
use std::sync::Arc;

/// Evaluator label used when members are scored as part of a portfolio scan.
pub const PORTFOLIO_EVALUATOR: &str = "portfolio evaluation";

/// EvaluationEngine - the "Evaluate" side of governance
///
/// Resolves applications and agreements from their stores and scores them
/// with [`ApplicationEvaluator`]. Holds no mutable state of its own.
pub struct EvaluationEngine {
    applications: Arc<dyn ApplicationRepository>,
    agreements: Arc<dyn GovernanceAgreementRepository>,
    portfolios: Arc<dyn ApplicationPortfolioRepository>,
    clock: Arc<dyn Clock>,
}

impl EvaluationEngine {
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        agreements: Arc<dyn GovernanceAgreementRepository>,
        portfolios: Arc<dyn ApplicationPortfolioRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            applications,
            agreements,
            portfolios,
            clock,
        }
    }

    /// Evaluates one application against its governance agreement
    ///
    /// # Arguments
    /// * `application_id` - Application to evaluate
    /// * `evaluator` - Audit label; it does not affect the scores
    ///
    /// # Errors
    /// Returns `NotFound` if the application or its agreement does not exist
    pub fn evaluate_application(
        &self,
        application_id: &ApplicationId,
        evaluator: &str,
    ) -> Result<ApplicationAssessment> {
        let app = self.applications.find_by_id(application_id)?;
        let agreement = self.agreements.find_by_application_id(application_id)?;
        tracing::debug!(application = %application_id, evaluator, "evaluating application");
        Ok(ApplicationEvaluator::assess(&app, Some(&agreement), self.clock.now()))
    }

    /// Evaluates every member of a portfolio
    ///
    /// # Errors
    /// Returns `NotFound` if the portfolio does not exist. Members that fail
    /// to evaluate are skipped, not propagated.
    pub fn evaluate_portfolio(&self, portfolio_id: &PortfolioId) -> Result<PortfolioHealthAssessment> {
        self.evaluate_portfolio_with_progress(portfolio_id, |_, _, _| {})
    }

    /// Same as [`evaluate_portfolio`](Self::evaluate_portfolio), calling
    /// `on_member(index, total, member)` before each member is scored.
    pub fn evaluate_portfolio_with_progress<F>(
        &self,
        portfolio_id: &PortfolioId,
        mut on_member: F,
    ) -> Result<PortfolioHealthAssessment>
    where
        F: FnMut(usize, usize, &Application),
    {
        let portfolio = self.portfolios.find_by_id(portfolio_id)?;
        let members = &portfolio.applications;
        let total = members.len();

        let outcomes: Vec<_> = members
            .iter()
            .enumerate()
            .map(|(index, member)| {
                on_member(index + 1, total, member);
                match self.evaluate_application(&member.id, PORTFOLIO_EVALUATOR) {
                    Ok(assessment) => Some(assessment.risk_level),
                    Err(e) => {
                        tracing::warn!(
                            portfolio = %portfolio_id,
                            application = %member.id,
                            error = %e,
                            "skipping portfolio member that could not be evaluated"
                        );
                        None
                    }
                }
            })
            .collect();

        Ok(PortfolioHealthCalculator::summarize(members, &outcomes, self.clock.now()))
    }
}
