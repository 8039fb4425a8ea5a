use super::EventRecorder;
use crate::application::dto::{CreatePortfolioRequest, RegisterApplicationRequest};
use crate::application::factories::GovernanceWorkspace;
use crate::governance::domain::{
    Application, ApplicationId, ApplicationPortfolio, PortfolioAggregate, PortfolioId,
};
use crate::ports::outbound::{
    ApplicationPortfolioRepository, ApplicationRepository, Clock, GovernanceAgreementRepository,
};
use crate::shared::{EntityKind, GovernanceError, Result};
use std::sync::Arc;

/// PortfolioUseCase - application registration and portfolio membership
///
/// Portfolios hold value copies of applications. Changes to the canonical
/// record only reach a portfolio through
/// [`refresh_application_in_portfolio`](Self::refresh_application_in_portfolio).
pub struct PortfolioUseCase {
    applications: Arc<dyn ApplicationRepository>,
    agreements: Arc<dyn GovernanceAgreementRepository>,
    portfolios: Arc<dyn ApplicationPortfolioRepository>,
    events: EventRecorder,
    clock: Arc<dyn Clock>,
}

impl PortfolioUseCase {
    pub fn new(workspace: &GovernanceWorkspace) -> Self {
        Self {
            applications: workspace.applications.clone(),
            agreements: workspace.agreements.clone(),
            portfolios: workspace.portfolios.clone(),
            events: EventRecorder::new(workspace.events.clone()),
            clock: workspace.clock.clone(),
        }
    }

    /// Registers a new application
    ///
    /// # Errors
    /// Returns `AlreadyExists` for a duplicate ID, or `Validation` for a
    /// blank name
    pub fn register_application(&self, request: RegisterApplicationRequest) -> Result<Application> {
        if self.applications.exists(&request.id)? {
            return Err(GovernanceError::already_exists(EntityKind::Application, &request.id).into());
        }
        let app = Application::new(request.id, request.name, self.clock.now())?
            .with_description(request.description)
            .with_version(request.version)
            .with_status(request.status);
        self.applications.save(&app)?;
        tracing::debug!(application = %app.id, "registered application");
        Ok(app)
    }

    pub fn get_application(&self, id: &ApplicationId) -> Result<Application> {
        self.applications.find_by_id(id)
    }

    pub fn list_applications(&self) -> Result<Vec<Application>> {
        self.applications.find_all()
    }

    /// # Errors
    /// Returns `AlreadyExists` for a duplicate ID, or `Validation` for a
    /// blank name or owner
    pub fn create_portfolio(&self, request: CreatePortfolioRequest) -> Result<ApplicationPortfolio> {
        if self.portfolios.exists(&request.id)? {
            return Err(GovernanceError::already_exists(EntityKind::Portfolio, &request.id).into());
        }
        let mut aggregate = PortfolioAggregate::new(
            request.id,
            request.name,
            request.description,
            request.owner,
            self.clock.now(),
        )?;
        self.portfolios.save(aggregate.portfolio())?;
        self.events.record(aggregate.take_events());
        Ok(aggregate.into_inner())
    }

    /// Adds a copy of a governed application to a portfolio
    ///
    /// # Errors
    /// Returns an error if:
    /// - The application, its agreement or the portfolio does not exist
    /// - The portfolio already holds this application or one with its name
    pub fn add_application_to_portfolio(
        &self,
        portfolio_id: &PortfolioId,
        application_id: &ApplicationId,
    ) -> Result<ApplicationPortfolio> {
        let mut app = self.applications.find_by_id(application_id)?;
        let agreement = self.agreements.find_by_application_id(application_id)?;
        let portfolio = self.portfolios.find_by_id(portfolio_id)?;

        if app.governance_agreement_id.is_none() {
            app.governance_agreement_id = Some(agreement.id);
        }

        let mut aggregate = PortfolioAggregate::from_portfolio(portfolio);
        aggregate.add_application(app, self.clock.now())?;
        self.portfolios.update(aggregate.portfolio())?;
        self.applications.link_to_portfolio(application_id, portfolio_id)?;
        self.events.record(aggregate.take_events());
        Ok(aggregate.into_inner())
    }

    /// # Errors
    /// Returns `NotFound` if the portfolio or the member does not exist
    pub fn remove_application_from_portfolio(
        &self,
        portfolio_id: &PortfolioId,
        application_id: &ApplicationId,
    ) -> Result<ApplicationPortfolio> {
        let portfolio = self.portfolios.find_by_id(portfolio_id)?;
        let mut aggregate = PortfolioAggregate::from_portfolio(portfolio);
        aggregate.remove_application(application_id, self.clock.now())?;
        self.portfolios.update(aggregate.portfolio())?;
        self.applications.unlink_from_portfolio(application_id, portfolio_id)?;
        self.events.record(aggregate.take_events());
        Ok(aggregate.into_inner())
    }

    /// Replaces a portfolio's copy of an application with the current
    /// canonical record
    pub fn refresh_application_in_portfolio(
        &self,
        portfolio_id: &PortfolioId,
        application_id: &ApplicationId,
    ) -> Result<ApplicationPortfolio> {
        let app = self.applications.find_by_id(application_id)?;
        let portfolio = self.portfolios.find_by_id(portfolio_id)?;
        let mut aggregate = PortfolioAggregate::from_portfolio(portfolio);
        aggregate.update_application(app, self.clock.now())?;
        self.portfolios.update(aggregate.portfolio())?;
        self.events.record(aggregate.take_events());
        Ok(aggregate.into_inner())
    }

    pub fn update_portfolio(
        &self,
        portfolio_id: &PortfolioId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<ApplicationPortfolio> {
        let mut portfolio = self.portfolios.find_by_id(portfolio_id)?;
        portfolio.name = name.into();
        portfolio.description = description.into();
        portfolio.validate()?;
        portfolio.updated_at = self.clock.now();
        self.portfolios.update(&portfolio)?;
        Ok(portfolio)
    }

    /// # Errors
    /// Returns `InvalidState` while the portfolio still has members
    pub fn delete_portfolio(&self, portfolio_id: &PortfolioId) -> Result<()> {
        let portfolio = self.portfolios.find_by_id(portfolio_id)?;
        if !portfolio.applications.is_empty() {
            return Err(GovernanceError::invalid_state(format!(
                "portfolio {} still has {} application(s)",
                portfolio_id,
                portfolio.applications.len()
            ))
            .into());
        }
        self.portfolios.delete(portfolio_id)
    }

    pub fn get_portfolio(&self, portfolio_id: &PortfolioId) -> Result<ApplicationPortfolio> {
        self.portfolios.find_by_id(portfolio_id)
    }

    pub fn list_portfolios(&self) -> Result<Vec<ApplicationPortfolio>> {
        self.portfolios.find_all()
    }

    pub fn list_portfolios_by_owner(&self, owner: &str) -> Result<Vec<ApplicationPortfolio>> {
        self.portfolios.find_by_owner(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::clock::FixedClock;
    use crate::application::dto::CreateAgreementRequest;
    use crate::application::factories::WorkspaceFactory;
    use crate::application::use_cases::GovernanceUseCase;
    use crate::adapters::outbound::console::QuietProgressReporter;
    use crate::governance::domain::{AgreementId, EventType};
    use chrono::{DateTime, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn app_id(id: &str) -> ApplicationId {
        ApplicationId::new(id).unwrap()
    }

    fn core() -> PortfolioId {
        PortfolioId::new("core").unwrap()
    }

    /// A workspace with a "core" portfolio and a governed "crm" application.
    fn setup() -> (GovernanceWorkspace, PortfolioUseCase) {
        let workspace = WorkspaceFactory::in_memory(Arc::new(FixedClock::new(now())));
        let use_case = PortfolioUseCase::new(&workspace);
        use_case
            .register_application(RegisterApplicationRequest::new(app_id("crm"), "CRM"))
            .unwrap();
        GovernanceUseCase::new(&workspace, QuietProgressReporter)
            .create_governance_agreement(CreateAgreementRequest {
                id: AgreementId::new("ga-crm").unwrap(),
                application_id: app_id("crm"),
                title: "CRM governance".to_string(),
            })
            .unwrap();
        use_case
            .create_portfolio(CreatePortfolioRequest {
                id: core(),
                name: "Core".to_string(),
                description: "Core systems".to_string(),
                owner: "CIO".to_string(),
            })
            .unwrap();
        (workspace, use_case)
    }

    fn error_of(err: &anyhow::Error) -> &GovernanceError {
        err.downcast_ref::<GovernanceError>().unwrap()
    }

    #[test]
    fn test_register_duplicate_application() {
        let (_, use_case) = setup();
        let err = use_case
            .register_application(RegisterApplicationRequest::new(app_id("crm"), "Other"))
            .unwrap_err();
        assert!(matches!(error_of(&err), GovernanceError::AlreadyExists { .. }));
        assert_eq!(use_case.list_applications().unwrap().len(), 1);
    }

    #[test]
    fn test_register_application_defaults() {
        let (_, use_case) = setup();
        let app = use_case.get_application(&app_id("crm")).unwrap();
        assert_eq!(app.version, "1.0.0");
        assert_eq!(app.created_at, now());
    }

    #[test]
    fn test_create_duplicate_portfolio() {
        let (_, use_case) = setup();
        let err = use_case
            .create_portfolio(CreatePortfolioRequest {
                id: core(),
                name: "Again".to_string(),
                description: String::new(),
                owner: "CTO".to_string(),
            })
            .unwrap_err();
        assert!(matches!(error_of(&err), GovernanceError::AlreadyExists { .. }));
    }

    #[test]
    fn test_add_application_links_membership() {
        let (workspace, use_case) = setup();
        let portfolio = use_case.add_application_to_portfolio(&core(), &app_id("crm")).unwrap();

        assert!(portfolio.contains(&app_id("crm")));
        assert_eq!(workspace.applications.find_by_portfolio(&core()).unwrap().len(), 1);
        assert_eq!(
            workspace
                .events
                .find_by_event_type(EventType::ApplicationAddedToPortfolio)
                .unwrap()
                .len(),
            1
        );

        let err = use_case.add_application_to_portfolio(&core(), &app_id("crm")).unwrap_err();
        assert!(matches!(error_of(&err), GovernanceError::AlreadyExists { .. }));
    }

    #[test]
    fn test_add_ungoverned_application() {
        let (_, use_case) = setup();
        use_case
            .register_application(RegisterApplicationRequest::new(app_id("erp"), "ERP"))
            .unwrap();
        let err = use_case.add_application_to_portfolio(&core(), &app_id("erp")).unwrap_err();
        assert!(error_of(&err).is_not_found());
        assert!(use_case.get_portfolio(&core()).unwrap().applications.is_empty());
    }

    #[test]
    fn test_remove_application_unlinks_membership() {
        let (workspace, use_case) = setup();
        use_case.add_application_to_portfolio(&core(), &app_id("crm")).unwrap();

        let portfolio = use_case
            .remove_application_from_portfolio(&core(), &app_id("crm"))
            .unwrap();
        assert!(portfolio.applications.is_empty());
        assert!(workspace.applications.find_by_portfolio(&core()).unwrap().is_empty());

        let err = use_case
            .remove_application_from_portfolio(&core(), &app_id("crm"))
            .unwrap_err();
        assert!(error_of(&err).is_not_found());
    }

    #[test]
    fn test_member_copy_is_refreshed_explicitly() {
        let (workspace, use_case) = setup();
        use_case.add_application_to_portfolio(&core(), &app_id("crm")).unwrap();

        let mut canonical = workspace.applications.find_by_id(&app_id("crm")).unwrap();
        canonical.version = "2.0.0".to_string();
        workspace.applications.update(&canonical).unwrap();

        let stale = use_case.get_portfolio(&core()).unwrap();
        assert_eq!(stale.member(&app_id("crm")).unwrap().version, "1.0.0");

        let refreshed = use_case
            .refresh_application_in_portfolio(&core(), &app_id("crm"))
            .unwrap();
        assert_eq!(refreshed.member(&app_id("crm")).unwrap().version, "2.0.0");
    }

    #[test]
    fn test_update_portfolio() {
        let (_, use_case) = setup();
        let updated = use_case
            .update_portfolio(&core(), "Core Business", "Mission-critical systems")
            .unwrap();
        assert_eq!(updated.name, "Core Business");

        let err = use_case.update_portfolio(&core(), " ", "").unwrap_err();
        assert!(matches!(error_of(&err), GovernanceError::Validation { .. }));
    }

    #[test]
    fn test_delete_portfolio_requires_empty() {
        let (_, use_case) = setup();
        use_case.add_application_to_portfolio(&core(), &app_id("crm")).unwrap();

        let err = use_case.delete_portfolio(&core()).unwrap_err();
        assert!(matches!(error_of(&err), GovernanceError::InvalidState { .. }));

        use_case
            .remove_application_from_portfolio(&core(), &app_id("crm"))
            .unwrap();
        use_case.delete_portfolio(&core()).unwrap();
        assert!(use_case.list_portfolios().unwrap().is_empty());
    }

    #[test]
    fn test_list_portfolios_by_owner() {
        let (_, use_case) = setup();
        assert_eq!(use_case.list_portfolios_by_owner("CIO").unwrap().len(), 1);
        assert!(use_case.list_portfolios_by_owner("CFO").unwrap().is_empty());
    }
}
