use super::EventRecorder;
use crate::application::dto::{CreateAgreementRequest, GovernanceMonitoringResult};
use crate::application::engines::{DirectionEngine, EvaluationEngine, MonitoringEngine};
use crate::application::factories::GovernanceWorkspace;
use crate::governance::domain::{
    AgreementAggregate, AgreementId, ApplicationAssessment, ApplicationId, BudgetAllocation,
    DomainEvent, GovernanceAgreement, GovernanceComponent, PersonnelAllocation, Policy,
    PortfolioHealthAssessment, PortfolioId, Procedure, Standard, StrategicInitiative,
    StrategicObjective,
};
use crate::ports::outbound::{
    ApplicationRepository, Clock, GovernanceAgreementRepository, ProgressReporter,
};
use crate::shared::{EntityKind, GovernanceError, Result};
use std::sync::Arc;

/// GovernanceUseCase - agreement lifecycle plus Evaluate, Direct and Monitor
///
/// # Type Parameters
/// * `PR` - ProgressReporter implementation
pub struct GovernanceUseCase<PR> {
    applications: Arc<dyn ApplicationRepository>,
    agreements: Arc<dyn GovernanceAgreementRepository>,
    evaluation: EvaluationEngine,
    direction: DirectionEngine,
    monitoring: MonitoringEngine,
    events: EventRecorder,
    clock: Arc<dyn Clock>,
    progress_reporter: PR,
}

impl<PR: ProgressReporter> GovernanceUseCase<PR> {
    pub fn new(workspace: &GovernanceWorkspace, progress_reporter: PR) -> Self {
        Self {
            applications: workspace.applications.clone(),
            agreements: workspace.agreements.clone(),
            evaluation: workspace.evaluation_engine(),
            direction: workspace.direction_engine(),
            monitoring: workspace.monitoring_engine(),
            events: EventRecorder::new(workspace.events.clone()),
            clock: workspace.clock.clone(),
            progress_reporter,
        }
    }

    /// Drafts an agreement and links the application to it
    ///
    /// # Errors
    /// Returns an error if:
    /// - The application does not exist (`NotFound`)
    /// - The agreement ID is taken, or the application is already governed (`AlreadyExists`)
    /// - The title is blank (`Validation`)
    pub fn create_governance_agreement(&self, request: CreateAgreementRequest) -> Result<GovernanceAgreement> {
        let mut app = self.applications.find_by_id(&request.application_id)?;
        if self.agreements.exists(&request.id)? {
            return Err(GovernanceError::already_exists(EntityKind::GovernanceAgreement, &request.id).into());
        }

        let mut aggregate = AgreementAggregate::new(
            request.id,
            request.application_id,
            request.title,
            self.clock.now(),
        )?;
        self.agreements.save(aggregate.agreement())?;

        app.governance_agreement_id = Some(aggregate.agreement().id.clone());
        self.applications.update(&app)?;

        self.events.record(aggregate.take_events());
        Ok(aggregate.into_inner())
    }

    pub fn update_governance_component(
        &self,
        agreement_id: &AgreementId,
        component: GovernanceComponent,
    ) -> Result<GovernanceAgreement> {
        let mut aggregate = AgreementAggregate::from_agreement(self.agreements.find_by_id(agreement_id)?);
        aggregate.update_component(component, self.clock.now());
        self.agreements.update(aggregate.agreement())?;
        self.events.record(aggregate.take_events());
        Ok(aggregate.into_inner())
    }

    /// # Errors
    /// Returns `InvalidState` unless the agreement is a draft
    pub fn approve_governance_agreement(&self, agreement_id: &AgreementId) -> Result<GovernanceAgreement> {
        let mut aggregate = AgreementAggregate::from_agreement(self.agreements.find_by_id(agreement_id)?);
        aggregate.approve(self.clock.now())?;
        self.agreements.update(aggregate.agreement())?;
        self.events.record(aggregate.take_events());
        Ok(aggregate.into_inner())
    }

    /// # Errors
    /// Returns `InvalidState` unless the agreement has been approved
    pub fn activate_governance_agreement(&self, agreement_id: &AgreementId) -> Result<GovernanceAgreement> {
        let mut aggregate = AgreementAggregate::from_agreement(self.agreements.find_by_id(agreement_id)?);
        aggregate.activate(self.clock.now())?;
        self.agreements.update(aggregate.agreement())?;
        self.events.record(aggregate.take_events());
        Ok(aggregate.into_inner())
    }

    pub fn get_governance_agreement(&self, agreement_id: &AgreementId) -> Result<GovernanceAgreement> {
        self.agreements.find_by_id(agreement_id)
    }

    pub fn list_governance_agreements(&self) -> Result<Vec<GovernanceAgreement>> {
        self.agreements.find_all()
    }

    /// Evaluates an application and records who asked for it
    pub fn evaluate_application(
        &self,
        application_id: &ApplicationId,
        evaluator: &str,
    ) -> Result<ApplicationAssessment> {
        self.progress_reporter
            .report(&format!("🔍 Evaluating application: {}", application_id));
        let assessment = self.evaluation.evaluate_application(application_id, evaluator)?;

        let agreement = self.agreements.find_by_application_id(application_id)?;
        let health = &assessment.technical_health;
        self.events.record([DomainEvent::GovernanceEvaluationCompleted {
            agreement_id: agreement.id,
            evaluator: evaluator.to_string(),
            findings: vec![
                format!("Risk level: {}", assessment.risk_level),
                format!("Technical health: {}/5", health.average_score()),
                format!(
                    "Business alignment: {:.0}%",
                    assessment.business_value.business_alignment
                ),
            ],
            recommendations: assessment
                .recommendations
                .iter()
                .map(|r| r.description.clone())
                .collect(),
            occurred_at: self.clock.now(),
        }]);

        self.progress_reporter.report_completion(&format!(
            "✅ Evaluation complete: {} risk, {} recommendation(s)",
            assessment.risk_level,
            assessment.recommendations.len()
        ));
        Ok(assessment)
    }

    /// Evaluates every member of a portfolio, reporting per-member progress
    pub fn evaluate_portfolio(&self, portfolio_id: &PortfolioId) -> Result<PortfolioHealthAssessment> {
        self.progress_reporter
            .report(&format!("📊 Evaluating portfolio: {}", portfolio_id));
        let health = self
            .evaluation
            .evaluate_portfolio_with_progress(portfolio_id, |current, total, member| {
                self.progress_reporter
                    .report_progress(current, total, Some(&member.name));
            })?;
        let evaluated: usize = health.risk_distribution.values().sum();
        if evaluated < health.total_applications {
            self.progress_reporter.report_error(&format!(
                "⚠️  Skipped {} application(s) that could not be evaluated",
                health.total_applications - evaluated
            ));
        }
        self.progress_reporter.report_completion(&format!(
            "✅ Evaluated {} application(s)",
            health.total_applications
        ));
        Ok(health)
    }

    pub fn set_strategic_direction(
        &self,
        agreement_id: &AgreementId,
        director: &str,
        objectives: Vec<StrategicObjective>,
        initiatives: Vec<StrategicInitiative>,
    ) -> Result<GovernanceAgreement> {
        let agreement = self
            .direction
            .set_strategic_direction(agreement_id, director, objectives, initiatives)?;
        let direct = &agreement.direct;
        self.events.record([DomainEvent::GovernanceDirectionSet {
            agreement_id: agreement.id.clone(),
            director: director.to_string(),
            objectives: direct
                .strategic_direction
                .objectives
                .iter()
                .map(|o| o.name.clone())
                .collect(),
            action_plans: direct.action_plans.iter().map(|p| p.id.clone()).collect(),
            occurred_at: self.clock.now(),
        }]);
        Ok(agreement)
    }

    pub fn allocate_resources(
        &self,
        agreement_id: &AgreementId,
        budget: Vec<BudgetAllocation>,
        personnel: Vec<PersonnelAllocation>,
    ) -> Result<GovernanceAgreement> {
        let agreement = self.direction.allocate_resources(agreement_id, budget, personnel)?;
        self.record_update(&agreement.id, "resource_allocation");
        Ok(agreement)
    }

    pub fn establish_policies(
        &self,
        agreement_id: &AgreementId,
        policies: Vec<Policy>,
        standards: Vec<Standard>,
        procedures: Vec<Procedure>,
    ) -> Result<GovernanceAgreement> {
        let agreement = self
            .direction
            .establish_policies(agreement_id, policies, standards, procedures)?;
        self.record_update(&agreement.id, "policy_framework");
        Ok(agreement)
    }

    /// Monitors KPIs, compliance and risks for one agreement
    pub fn monitor_governance(
        &self,
        agreement_id: &AgreementId,
        monitor: &str,
    ) -> Result<GovernanceMonitoringResult> {
        self.progress_reporter
            .report(&format!("📈 Monitoring governance agreement: {}", agreement_id));
        let result = self.monitoring.monitor(agreement_id)?;
        self.events.record([DomainEvent::GovernanceMonitoringCompleted {
            agreement_id: agreement_id.clone(),
            monitor: monitor.to_string(),
            kpi_measurements: result.kpi_measurements.clone(),
            compliance_status: result.compliance_status.clone(),
            risk_status: result.risk_status.clone(),
            occurred_at: self.clock.now(),
        }]);
        Ok(result)
    }

    fn record_update(&self, agreement_id: &AgreementId, component: &str) {
        self.events.record([DomainEvent::GovernanceAgreementUpdated {
            agreement_id: agreement_id.clone(),
            component: component.to_string(),
            occurred_at: self.clock.now(),
        }]);
    }
}

#[cfg(test)]
mod tests;
