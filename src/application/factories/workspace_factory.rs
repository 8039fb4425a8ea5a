use crate::adapters::outbound::memory::{
    InMemoryAgreementRepository, InMemoryApplicationRepository, InMemoryAuditRepository,
    InMemoryChangeRequestRepository, InMemoryEventLog, InMemoryIncidentRepository,
    InMemoryKpiMeasurementRepository, InMemoryKpiRepository, InMemoryMitigationPlanRepository,
    InMemoryPortfolioRepository, InMemoryRiskRepository,
};
use crate::application::dto::CreatePortfolioRequest;
use crate::application::engines::{DirectionEngine, EvaluationEngine, MonitoringEngine};
use crate::application::use_cases::PortfolioUseCase;
use crate::governance::domain::ApplicationId;
use crate::ports::outbound::{
    ApplicationPortfolioRepository, ApplicationRepository, AuditRepository,
    ChangeRequestRepository, Clock, DomainEventRepository, GovernanceAgreementRepository,
    GovernanceDataset, IncidentRepository, KpiMeasurementRepository, KpiRepository,
    MitigationPlanRepository, RiskRepository,
};
use crate::shared::{EntityKind, GovernanceError, Result};
use anyhow::Context;
use std::sync::Arc;

/// The set of stores one governance session works against
///
/// Cloning is cheap: every store is shared behind an `Arc`. The monitoring
/// stores are optional; engines built from a workspace without them fall
/// back to sample monitoring data.
#[derive(Clone)]
pub struct GovernanceWorkspace {
    pub applications: Arc<dyn ApplicationRepository>,
    pub agreements: Arc<dyn GovernanceAgreementRepository>,
    pub portfolios: Arc<dyn ApplicationPortfolioRepository>,
    pub events: Arc<dyn DomainEventRepository>,
    pub kpis: Option<(Arc<dyn KpiRepository>, Arc<dyn KpiMeasurementRepository>)>,
    pub risks: Option<Arc<dyn RiskRepository>>,
    pub mitigations: Option<Arc<dyn MitigationPlanRepository>>,
    pub change_requests: Arc<dyn ChangeRequestRepository>,
    pub incidents: Arc<dyn IncidentRepository>,
    pub audits: Arc<dyn AuditRepository>,
    pub clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for GovernanceWorkspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GovernanceWorkspace").finish_non_exhaustive()
    }
}

impl GovernanceWorkspace {
    pub fn evaluation_engine(&self) -> EvaluationEngine {
        EvaluationEngine::new(
            self.applications.clone(),
            self.agreements.clone(),
            self.portfolios.clone(),
            self.clock.clone(),
        )
    }

    pub fn direction_engine(&self) -> DirectionEngine {
        DirectionEngine::new(self.agreements.clone(), self.clock.clone())
    }

    pub fn monitoring_engine(&self) -> MonitoringEngine {
        let mut engine = MonitoringEngine::new(self.agreements.clone(), self.clock.clone());
        if let Some((kpis, measurements)) = &self.kpis {
            engine = engine.with_kpi_repositories(kpis.clone(), measurements.clone());
        }
        if let Some(risks) = &self.risks {
            engine = engine.with_risk_repository(risks.clone());
        }
        if let Some(mitigations) = &self.mitigations {
            engine = engine.with_mitigation_repository(mitigations.clone());
        }
        engine
    }
}

/// Factory for assembling in-memory governance workspaces
pub struct WorkspaceFactory;

impl WorkspaceFactory {
    /// Creates an empty workspace without monitoring stores
    ///
    /// Change-management stores are always present.
    pub fn in_memory(clock: Arc<dyn Clock>) -> GovernanceWorkspace {
        GovernanceWorkspace {
            applications: Arc::new(InMemoryApplicationRepository::new()),
            agreements: Arc::new(InMemoryAgreementRepository::new()),
            portfolios: Arc::new(InMemoryPortfolioRepository::new(clock.clone())),
            events: Arc::new(InMemoryEventLog::new()),
            kpis: None,
            risks: None,
            mitigations: None,
            change_requests: Arc::new(InMemoryChangeRequestRepository::new()),
            incidents: Arc::new(InMemoryIncidentRepository::new()),
            audits: Arc::new(InMemoryAuditRepository::new()),
            clock,
        }
    }

    /// Creates a workspace and loads a dataset into it
    ///
    /// KPI and risk stores are only attached when the dataset carries
    /// that kind of data.
    ///
    /// # Errors
    /// Returns an error if the dataset breaks a store rule, e.g. two
    /// agreements for one application or a portfolio member with no agreement
    pub fn from_dataset(dataset: GovernanceDataset, clock: Arc<dyn Clock>) -> Result<GovernanceWorkspace> {
        let mut workspace = Self::in_memory(clock);
        if dataset.has_kpi_data() {
            workspace.kpis = Some((
                Arc::new(InMemoryKpiRepository::new()),
                Arc::new(InMemoryKpiMeasurementRepository::new()),
            ));
        }
        if dataset.has_risk_data() {
            workspace.risks = Some(Arc::new(InMemoryRiskRepository::new()));
            workspace.mitigations = Some(Arc::new(InMemoryMitigationPlanRepository::new()));
        }
        Self::seed(&workspace, dataset)?;
        Ok(workspace)
    }

    /// Loads a dataset into an existing workspace
    ///
    /// Monitoring records are skipped when the workspace has no store for them.
    pub fn seed(workspace: &GovernanceWorkspace, dataset: GovernanceDataset) -> Result<()> {
        // Step 1: Canonical applications
        for app in &dataset.applications {
            app.validate()
                .with_context(|| format!("Invalid application '{}' in dataset", app.id))?;
            workspace
                .applications
                .save(app)
                .with_context(|| format!("Failed to load application '{}'", app.id))?;
        }

        // Step 2: Agreements, back-filling each application's reference
        for agreement in &dataset.agreements {
            agreement.validate().with_context(|| {
                format!("Invalid governance agreement '{}' in dataset", agreement.id)
            })?;
            workspace
                .agreements
                .save(agreement)
                .with_context(|| format!("Failed to load governance agreement '{}'", agreement.id))?;
            let mut app = workspace.applications.find_by_id(&agreement.application_id)?;
            if app.governance_agreement_id.is_none() {
                app.governance_agreement_id = Some(agreement.id.clone());
                workspace.applications.update(&app)?;
            }
        }

        // Step 3: Portfolios go through the same rules as interactive use
        let portfolios = PortfolioUseCase::new(workspace);
        for seed in dataset.portfolios {
            let portfolio_id = seed.id.clone();
            portfolios
                .create_portfolio(CreatePortfolioRequest {
                    id: seed.id,
                    name: seed.name,
                    description: seed.description,
                    owner: seed.owner,
                })
                .with_context(|| format!("Failed to load portfolio '{}'", portfolio_id))?;
            for app_id in &seed.applications {
                portfolios
                    .add_application_to_portfolio(&portfolio_id, app_id)
                    .with_context(|| {
                        format!("Failed to add application '{}' to portfolio '{}'", app_id, portfolio_id)
                    })?;
            }
        }

        // Step 4: Monitoring records
        if let Some((kpis, measurements)) = &workspace.kpis {
            for kpi in &dataset.kpis {
                kpis.save(kpi)?;
            }
            for measurement in &dataset.kpi_measurements {
                measurements.save(measurement)?;
            }
        }
        if let Some(risks) = &workspace.risks {
            for risk in &dataset.risks {
                risks.save(risk)?;
            }
        }
        if let Some(mitigations) = &workspace.mitigations {
            for plan in &dataset.mitigation_plans {
                mitigations.save(plan)?;
            }
        }

        // Step 5: Change-management records for known applications
        for request in &dataset.change_requests {
            Self::require_application(workspace, &request.application_id)
                .and_then(|()| workspace.change_requests.save(request))
                .with_context(|| format!("Failed to load change request '{}'", request.id))?;
        }
        for incident in &dataset.incidents {
            Self::require_application(workspace, &incident.application_id)
                .and_then(|()| workspace.incidents.save(incident))
                .with_context(|| format!("Failed to load incident '{}'", incident.id))?;
        }
        for audit in &dataset.audits {
            Self::require_application(workspace, &audit.application_id)
                .and_then(|()| workspace.audits.save(audit))
                .with_context(|| format!("Failed to load audit '{}'", audit.id))?;
        }

        tracing::debug!(
            applications = dataset.applications.len(),
            agreements = dataset.agreements.len(),
            "seeded governance workspace"
        );
        Ok(())
    }

    fn require_application(workspace: &GovernanceWorkspace, id: &ApplicationId) -> Result<()> {
        if !workspace.applications.exists(id)? {
            return Err(GovernanceError::not_found(EntityKind::Application, id).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::clock::FixedClock;
    use crate::governance::domain::{
        AgreementId, Application, ApplicationId, ChangeRequest, ChangeRequestId,
        GovernanceAgreement, Incident, IncidentId, Kpi, PortfolioId,
    };
    use crate::ports::outbound::PortfolioSeed;
    use crate::shared::GovernanceError;
    use chrono::{DateTime, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::new(now()))
    }

    fn dataset() -> GovernanceDataset {
        let app_id = ApplicationId::new("crm").unwrap();
        GovernanceDataset {
            applications: vec![Application::new(app_id.clone(), "CRM", now()).unwrap()],
            agreements: vec![GovernanceAgreement::new(
                AgreementId::new("ga-crm").unwrap(),
                app_id.clone(),
                "CRM governance",
                now(),
            )
            .unwrap()],
            portfolios: vec![PortfolioSeed {
                id: PortfolioId::new("core").unwrap(),
                name: "Core".to_string(),
                description: String::new(),
                owner: "CIO".to_string(),
                applications: vec![app_id],
            }],
            ..GovernanceDataset::default()
        }
    }

    #[test]
    fn test_in_memory_workspace_is_empty() {
        let workspace = WorkspaceFactory::in_memory(clock());
        assert!(workspace.applications.find_all().unwrap().is_empty());
        assert!(workspace.kpis.is_none());
        assert!(workspace.risks.is_none());
    }

    #[test]
    fn test_from_dataset_back_fills_agreement_and_portfolio() {
        let workspace = WorkspaceFactory::from_dataset(dataset(), clock()).unwrap();
        let app = workspace
            .applications
            .find_by_id(&ApplicationId::new("crm").unwrap())
            .unwrap();
        assert_eq!(app.governance_agreement_id, Some(AgreementId::new("ga-crm").unwrap()));

        let portfolio = workspace
            .portfolios
            .find_by_id(&PortfolioId::new("core").unwrap())
            .unwrap();
        assert_eq!(portfolio.applications.len(), 1);
        assert_eq!(
            workspace
                .applications
                .find_by_portfolio(&PortfolioId::new("core").unwrap())
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_from_dataset_attaches_monitoring_stores_only_when_needed() {
        let workspace = WorkspaceFactory::from_dataset(dataset(), clock()).unwrap();
        assert!(workspace.kpis.is_none());

        let mut with_kpis = dataset();
        with_kpis.kpis.push(Kpi::new("kpi-1", "Availability", 99.0));
        let workspace = WorkspaceFactory::from_dataset(with_kpis, clock()).unwrap();
        let (kpis, _) = workspace.kpis.as_ref().unwrap();
        assert_eq!(kpis.find_all().unwrap().len(), 1);
        assert!(workspace.risks.is_none());
    }

    #[test]
    fn test_from_dataset_rejects_ungoverned_portfolio_member() {
        let mut data = dataset();
        data.agreements.clear();
        let err = WorkspaceFactory::from_dataset(data, clock()).unwrap_err();
        assert!(err.to_string().contains("Failed to add application 'crm'"));
    }

    #[test]
    fn test_from_dataset_rejects_blank_application_name() {
        let mut data = dataset();
        data.applications[0].name = "   ".to_string();
        let err = WorkspaceFactory::from_dataset(data, clock()).unwrap_err();
        assert!(err.to_string().contains("Invalid application 'crm'"));
        assert!(err
            .chain()
            .any(|cause| cause.to_string().contains("application name cannot be empty")));
    }

    #[test]
    fn test_from_dataset_rejects_empty_agreement_title() {
        let mut data = dataset();
        data.agreements[0].title = String::new();
        let err = WorkspaceFactory::from_dataset(data, clock()).unwrap_err();
        assert!(err
            .to_string()
            .contains("Invalid governance agreement 'ga-crm'"));
        assert!(matches!(
            err.downcast_ref::<GovernanceError>(),
            Some(GovernanceError::Validation { .. })
        ));
    }

    #[test]
    fn test_from_dataset_loads_change_records() {
        let mut data = dataset();
        data.incidents.push(
            Incident::report(IncidentId::new("inc-1").unwrap(), ApplicationId::new("crm").unwrap(), "Outage", "noc", 2, now())
                .unwrap(),
        );
        let workspace = WorkspaceFactory::from_dataset(data, clock()).unwrap();
        assert!(workspace.incidents.exists(&IncidentId::new("inc-1").unwrap()).unwrap());
        assert!(workspace
            .change_requests
            .find_by_application_id(&ApplicationId::new("crm").unwrap())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_from_dataset_rejects_change_request_for_unknown_application() {
        let mut data = dataset();
        data.change_requests.push(
            ChangeRequest::new(
                ChangeRequestId::new("cr-1").unwrap(),
                ApplicationId::new("ghost").unwrap(),
                "Patch",
                "ops",
                now(),
            )
            .unwrap(),
        );
        let err = WorkspaceFactory::from_dataset(data, clock()).unwrap_err();
        assert!(err.to_string().contains("Failed to load change request 'cr-1'"));
        assert!(err.downcast_ref::<GovernanceError>().unwrap().is_not_found());
    }
}
