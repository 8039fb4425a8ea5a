use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI pipelines to tell a risky portfolio apart
/// from a broken invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every assessed risk is below the configured threshold
    Success = 0,
    /// At least one assessment met or exceeded the `--fail-on` risk level
    RiskThresholdExceeded = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (missing entity, unreadable dataset, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::RiskThresholdExceeded => write!(f, "Risk Threshold Exceeded (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Kind of entity named in a lookup or uniqueness failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Application,
    GovernanceAgreement,
    Portfolio,
    PortfolioMember,
    Kpi,
    KpiMeasurement,
    Risk,
    MitigationPlan,
    ChangeRequest,
    Incident,
    Audit,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Application => "Application",
            EntityKind::GovernanceAgreement => "Governance agreement",
            EntityKind::Portfolio => "Portfolio",
            EntityKind::PortfolioMember => "Portfolio member",
            EntityKind::Kpi => "KPI",
            EntityKind::KpiMeasurement => "KPI measurement",
            EntityKind::Risk => "Risk",
            EntityKind::MitigationPlan => "Mitigation plan",
            EntityKind::ChangeRequest => "Change request",
            EntityKind::Incident => "Incident",
            EntityKind::Audit => "Audit",
        };
        f.write_str(name)
    }
}

/// Errors raised by the governance engine and its adapters.
///
/// The first four variants form the domain taxonomy callers branch on
/// (usually via `anyhow::Error::downcast_ref`). The file variants carry
/// hints for CLI users.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GovernanceError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: EntityKind, id: String },

    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to parse governance dataset: {path}\nDetails: {details}\n\n💡 Hint: Datasets must be .json, .toml, .yml or .yaml files with applications, agreements and portfolios sections")]
    DatasetParseError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },
}

impl GovernanceError {
    pub fn not_found(entity: EntityKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn already_exists(entity: EntityKind, id: impl fmt::Display) -> Self {
        Self::AlreadyExists {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns true when the error reports a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
