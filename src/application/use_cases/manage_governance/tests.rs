use super::*;
use crate::adapters::outbound::clock::FixedClock;
use crate::application::dto::RegisterApplicationRequest;
use crate::application::factories::WorkspaceFactory;
use crate::application::use_cases::PortfolioUseCase;
use crate::governance::domain::{AgreementStatus, ApplicationStatus, EventType, Strategy};
use crate::ports::outbound::DomainEventRepository;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::cell::RefCell;

// Mock implementations for testing
#[derive(Default)]
struct RecordingProgressReporter {
    messages: RefCell<Vec<String>>,
    progress: RefCell<Vec<(usize, usize)>>,
}

impl ProgressReporter for &RecordingProgressReporter {
    fn report(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, _message: Option<&str>) {
        self.progress.borrow_mut().push((current, total));
    }

    fn report_error(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn report_completion(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

struct FailingEventRepository;

impl DomainEventRepository for FailingEventRepository {
    fn save(&self, _event: &DomainEvent) -> Result<()> {
        anyhow::bail!("event log unavailable")
    }

    fn find_all(&self) -> Result<Vec<DomainEvent>> {
        Ok(Vec::new())
    }

    fn find_by_event_type(&self, _event_type: EventType) -> Result<Vec<DomainEvent>> {
        Ok(Vec::new())
    }

    fn find_by_time_range(
        &self,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<DomainEvent>> {
        Ok(Vec::new())
    }

    fn find_by_aggregate_id(&self, _aggregate_id: &str) -> Result<Vec<DomainEvent>> {
        Ok(Vec::new())
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

fn app_id(id: &str) -> ApplicationId {
    ApplicationId::new(id).unwrap()
}

fn agreement_id(id: &str) -> AgreementId {
    AgreementId::new(id).unwrap()
}

fn workspace() -> GovernanceWorkspace {
    WorkspaceFactory::in_memory(Arc::new(FixedClock::new(now())))
}

fn register(workspace: &GovernanceWorkspace, id: &str) {
    PortfolioUseCase::new(workspace)
        .register_application(RegisterApplicationRequest::new(app_id(id), id.to_uppercase()))
        .unwrap();
}

fn create_request(agreement: &str, app: &str) -> CreateAgreementRequest {
    CreateAgreementRequest {
        id: agreement_id(agreement),
        application_id: app_id(app),
        title: format!("Governance for {}", app),
    }
}

#[test]
fn test_create_agreement_back_fills_application() {
    let workspace = workspace();
    register(&workspace, "crm");
    let reporter = RecordingProgressReporter::default();
    let use_case = GovernanceUseCase::new(&workspace, &reporter);

    let agreement = use_case
        .create_governance_agreement(create_request("ga-crm", "crm"))
        .unwrap();

    assert_eq!(agreement.status, AgreementStatus::Draft);
    let app = workspace.applications.find_by_id(&app_id("crm")).unwrap();
    assert_eq!(app.governance_agreement_id, Some(agreement_id("ga-crm")));
    let events = workspace
        .events
        .find_by_event_type(EventType::GovernanceAgreementCreated)
        .unwrap();
    assert_eq!(events.len(), 1);
}

#[test]
fn test_create_agreement_for_missing_application() {
    let workspace = workspace();
    let reporter = RecordingProgressReporter::default();
    let use_case = GovernanceUseCase::new(&workspace, &reporter);

    let err = use_case
        .create_governance_agreement(create_request("ga-ghost", "ghost"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Application not found: ghost");
}

#[test]
fn test_create_agreement_duplicate_id() {
    let workspace = workspace();
    register(&workspace, "crm");
    register(&workspace, "erp");
    let reporter = RecordingProgressReporter::default();
    let use_case = GovernanceUseCase::new(&workspace, &reporter);

    use_case.create_governance_agreement(create_request("ga-1", "crm")).unwrap();
    let err = use_case
        .create_governance_agreement(create_request("ga-1", "erp"))
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GovernanceError>(),
        Some(GovernanceError::AlreadyExists { .. })
    ));
}

#[test]
fn test_agreement_lifecycle() {
    let workspace = workspace();
    register(&workspace, "crm");
    let reporter = RecordingProgressReporter::default();
    let use_case = GovernanceUseCase::new(&workspace, &reporter);
    use_case.create_governance_agreement(create_request("ga-crm", "crm")).unwrap();

    let err = use_case.activate_governance_agreement(&agreement_id("ga-crm")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GovernanceError>(),
        Some(GovernanceError::InvalidState { .. })
    ));

    use_case.approve_governance_agreement(&agreement_id("ga-crm")).unwrap();
    let active = use_case.activate_governance_agreement(&agreement_id("ga-crm")).unwrap();
    assert_eq!(active.status, AgreementStatus::Active);
    assert_eq!(
        use_case.get_governance_agreement(&agreement_id("ga-crm")).unwrap().status,
        AgreementStatus::Active
    );
}

#[test]
fn test_update_component_records_event() {
    let workspace = workspace();
    register(&workspace, "crm");
    let reporter = RecordingProgressReporter::default();
    let use_case = GovernanceUseCase::new(&workspace, &reporter);
    use_case.create_governance_agreement(create_request("ga-crm", "crm")).unwrap();

    use_case
        .update_governance_component(
            &agreement_id("ga-crm"),
            GovernanceComponent::Strategy(Strategy::default()),
        )
        .unwrap();

    let events = workspace.events.find_by_aggregate_id("ga-crm").unwrap();
    assert!(events
        .iter()
        .any(|e| e.event_type() == EventType::GovernanceAgreementUpdated));
}

#[test]
fn test_evaluate_application_records_evaluator() {
    let workspace = workspace();
    register(&workspace, "crm");
    let reporter = RecordingProgressReporter::default();
    let use_case = GovernanceUseCase::new(&workspace, &reporter);
    use_case.create_governance_agreement(create_request("ga-crm", "crm")).unwrap();

    let assessment = use_case.evaluate_application(&app_id("crm"), "Audit Committee").unwrap();
    assert_eq!(assessment.application_id, app_id("crm"));

    let events = workspace
        .events
        .find_by_event_type(EventType::GovernanceEvaluationCompleted)
        .unwrap();
    match &events[..] {
        [DomainEvent::GovernanceEvaluationCompleted {
            agreement_id: id,
            evaluator,
            recommendations,
            ..
        }] => {
            assert_eq!(id, &agreement_id("ga-crm"));
            assert_eq!(evaluator, "Audit Committee");
            assert_eq!(recommendations.len(), assessment.recommendations.len());
        }
        other => panic!("unexpected events: {:?}", other),
    }
    assert!(reporter.messages.borrow()[0].contains("crm"));
}

#[test]
fn test_evaluate_application_without_agreement() {
    let workspace = workspace();
    register(&workspace, "crm");
    let reporter = RecordingProgressReporter::default();
    let use_case = GovernanceUseCase::new(&workspace, &reporter);

    let err = use_case.evaluate_application(&app_id("crm"), "auditor").unwrap_err();
    assert!(err.downcast_ref::<GovernanceError>().unwrap().is_not_found());
    assert!(workspace.events.find_all().unwrap().is_empty());
}

#[test]
fn test_evaluate_portfolio_reports_progress() {
    let workspace = workspace();
    let portfolios = PortfolioUseCase::new(&workspace);
    let reporter = RecordingProgressReporter::default();
    let use_case = GovernanceUseCase::new(&workspace, &reporter);

    portfolios
        .create_portfolio(crate::application::dto::CreatePortfolioRequest {
            id: PortfolioId::new("core").unwrap(),
            name: "Core".to_string(),
            description: String::new(),
            owner: "CIO".to_string(),
        })
        .unwrap();
    for id in ["crm", "erp"] {
        register(&workspace, id);
        use_case
            .create_governance_agreement(create_request(&format!("ga-{}", id), id))
            .unwrap();
        portfolios
            .add_application_to_portfolio(&PortfolioId::new("core").unwrap(), &app_id(id))
            .unwrap();
    }

    let health = use_case.evaluate_portfolio(&PortfolioId::new("core").unwrap()).unwrap();
    assert_eq!(health.total_applications, 2);
    assert_eq!(health.active_applications, 2);
    assert_eq!(*reporter.progress.borrow(), vec![(1, 2), (2, 2)]);
}

#[test]
fn test_direction_events() {
    let workspace = workspace();
    register(&workspace, "crm");
    let reporter = RecordingProgressReporter::default();
    let use_case = GovernanceUseCase::new(&workspace, &reporter);
    use_case.create_governance_agreement(create_request("ga-crm", "crm")).unwrap();
    let id = agreement_id("ga-crm");

    let objective = StrategicObjective {
        id: "obj-1".to_string(),
        name: "Cloud migration".to_string(),
        description: "Move to managed services".to_string(),
        kpis: Vec::new(),
        deadline: now() + Duration::days(180),
    };
    let agreement = use_case
        .set_strategic_direction(&id, "Board", vec![objective], Vec::new())
        .unwrap();
    assert_eq!(agreement.direct.action_plans.len(), 1);

    use_case
        .allocate_resources(&id, vec![BudgetAllocation::default()], Vec::new())
        .unwrap();
    use_case
        .establish_policies(&id, vec![Policy::default()], Vec::new(), Vec::new())
        .unwrap();

    let direction = workspace
        .events
        .find_by_event_type(EventType::GovernanceDirectionSet)
        .unwrap();
    match &direction[..] {
        [DomainEvent::GovernanceDirectionSet {
            director,
            objectives,
            action_plans,
            ..
        }] => {
            assert_eq!(director, "Board");
            assert_eq!(objectives, &vec!["Cloud migration".to_string()]);
            assert_eq!(action_plans, &vec!["ap-1".to_string()]);
        }
        other => panic!("unexpected events: {:?}", other),
    }

    let components: Vec<String> = workspace
        .events
        .find_by_event_type(EventType::GovernanceAgreementUpdated)
        .unwrap()
        .into_iter()
        .filter_map(|e| match e {
            DomainEvent::GovernanceAgreementUpdated { component, .. } => Some(component),
            _ => None,
        })
        .collect();
    assert_eq!(components, vec!["resource_allocation", "policy_framework"]);
}

#[test]
fn test_monitor_governance_records_event() {
    let workspace = workspace();
    register(&workspace, "crm");
    let reporter = RecordingProgressReporter::default();
    let use_case = GovernanceUseCase::new(&workspace, &reporter);
    use_case.create_governance_agreement(create_request("ga-crm", "crm")).unwrap();

    let result = use_case.monitor_governance(&agreement_id("ga-crm"), "Risk Office").unwrap();
    assert_eq!(result.kpi_measurements.len(), 2);

    let events = workspace
        .events
        .find_by_event_type(EventType::GovernanceMonitoringCompleted)
        .unwrap();
    assert_eq!(events.len(), 1);
}

#[test]
fn test_event_log_failure_does_not_fail_operation() {
    let mut workspace = workspace();
    workspace.events = Arc::new(FailingEventRepository);
    register(&workspace, "crm");
    let reporter = RecordingProgressReporter::default();
    let use_case = GovernanceUseCase::new(&workspace, &reporter);

    let agreement = use_case
        .create_governance_agreement(create_request("ga-crm", "crm"))
        .unwrap();
    assert_eq!(agreement.id, agreement_id("ga-crm"));

    let app = workspace.applications.find_by_id(&app_id("crm")).unwrap();
    assert_eq!(app.governance_agreement_id, Some(agreement_id("ga-crm")));
    assert_eq!(app.status, ApplicationStatus::Active);

    let assessment = use_case.evaluate_application(&app_id("crm"), "auditor").unwrap();
    assert_eq!(assessment.application_id, app_id("crm"));
}
