//! iso38500-governance - IT portfolio governance following ISO/IEC 38500
//!
//! This library models applications, governance agreements and portfolios,
//! and implements the standard's Evaluate-Direct-Monitor cycle: scoring
//! applications and portfolios, setting strategic direction, and monitoring
//! KPIs, compliance and risks. It follows hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`governance`): Entities, scoring policies and pure domain services
//! - **Application Layer** (`application`): Engines, use cases and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): In-memory stores, formatters, file system, console and MCP
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use iso38500_governance::prelude::*;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<()> {
//! // Load a dataset into an in-memory workspace
//! let dataset = FileSystemReader::new().read_dataset(Path::new("portfolio.json"))?;
//! let workspace = WorkspaceFactory::from_dataset(dataset, Arc::new(SystemClock))?;
//!
//! // Evaluate a portfolio
//! let reports = ReportUseCase::new(&workspace, StderrProgressReporter::new());
//! let mut report = reports.new_report();
//! reports.add_portfolio(&mut report, &PortfolioId::new("core")?)?;
//!
//! // Format output
//! let output = FormatterFactory::create(OutputFormat::Markdown).format(&report)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod governance;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::inbound::mcp::McpServer;
    pub use crate::adapters::outbound::clock::{FixedClock, SystemClock};
    pub use crate::adapters::outbound::console::{QuietProgressReporter, StderrProgressReporter};
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter, TextFormatter};
    pub use crate::application::dto::{
        ComplianceViolationRequest, CreateAgreementRequest, CreateAuditRequest,
        CreateChangeRequestRequest, CreatePortfolioRequest, GovernanceMonitoringResult,
        OutputFormat, RegisterApplicationRequest, ReportIncidentRequest, ResolveIncidentRequest,
    };
    pub use crate::application::factories::{
        FormatterFactory, GovernanceWorkspace, PresenterFactory, PresenterType, WorkspaceFactory,
    };
    pub use crate::application::read_models::GovernanceReport;
    pub use crate::application::use_cases::{
        ChangeManagementUseCase, GovernanceUseCase, PortfolioUseCase, ReportUseCase,
    };
    pub use crate::governance::domain::{
        AgreementId, Application, ApplicationAssessment, ApplicationId, ApplicationPortfolio,
        ApplicationStatus, ApprovalDecision, Audit, AuditFinding, AuditId, AuditType,
        ChangeRequest, ChangeRequestId, GovernanceAgreement, Incident, IncidentId,
        PortfolioHealthAssessment, PortfolioId, RiskLevel,
    };
    pub use crate::ports::outbound::{
        Clock, DatasetReader, GovernanceDataset, OutputPresenter, ProgressReporter,
        ReportFormatter,
    };
    pub use crate::shared::{GovernanceError, Result};
}
