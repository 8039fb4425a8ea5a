/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with stores, the clock, the console and the file system.
pub mod agreement_repository;
pub mod application_repository;
pub mod change_repositories;
pub mod clock;
pub mod dataset_reader;
pub mod event_repository;
pub mod formatter;
pub mod monitoring_repositories;
pub mod output_presenter;
pub mod portfolio_repository;
pub mod progress_reporter;

pub use agreement_repository::GovernanceAgreementRepository;
pub use application_repository::ApplicationRepository;
pub use change_repositories::{AuditRepository, ChangeRequestRepository, IncidentRepository};
pub use clock::Clock;
pub use dataset_reader::{DatasetReader, GovernanceDataset, PortfolioSeed};
pub use event_repository::DomainEventRepository;
pub use formatter::ReportFormatter;
pub use monitoring_repositories::{
    KpiMeasurementRepository, KpiRepository, MitigationPlanRepository, RiskRepository,
};
pub use output_presenter::OutputPresenter;
pub use portfolio_repository::ApplicationPortfolioRepository;
pub use progress_reporter::ProgressReporter;
