/// Use cases module containing application business logic orchestration
mod build_report;
mod event_recorder;
mod manage_changes;
mod manage_governance;
mod manage_portfolios;

pub use build_report::ReportUseCase;
pub use event_recorder::EventRecorder;
pub use manage_changes::ChangeManagementUseCase;
pub use manage_governance::GovernanceUseCase;
pub use manage_portfolios::PortfolioUseCase;
