use super::ids::{AgreementId, ApplicationId};
use super::provisions::{BusinessContinuity, SecurityProvisions};
use crate::shared::{GovernanceError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An application under governance.
///
/// Portfolios embed copies of this record, so changing the canonical entry
/// in the application store does not change any portfolio member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governance_agreement_id: Option<AgreementId>,
    #[serde(default)]
    pub catalogue: ApplicationCatalogue,
    #[serde(default)]
    pub interfaces: Vec<ApplicationInterface>,
    #[serde(default)]
    pub configuration_standard: ConfigurationStandard,
    #[serde(default)]
    pub security_provisions: SecurityProvisions,
    #[serde(default)]
    pub business_continuity: BusinessContinuity,
}

impl Application {
    /// Creates a planned application stamped with `now`.
    ///
    /// # Errors
    /// Returns a validation error when `name` is blank.
    pub fn new(id: ApplicationId, name: impl Into<String>, now: DateTime<Utc>) -> Result<Self> {
        let app = Self {
            id,
            name: name.into(),
            description: String::new(),
            version: String::new(),
            status: ApplicationStatus::default(),
            created_at: now,
            updated_at: now,
            governance_agreement_id: None,
            catalogue: ApplicationCatalogue::default(),
            interfaces: Vec::new(),
            configuration_standard: ConfigurationStandard::default(),
            security_provisions: SecurityProvisions::default(),
            business_continuity: BusinessContinuity::default(),
        };
        app.validate()?;
        Ok(app)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_status(mut self, status: ApplicationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_security_provisions(mut self, provisions: SecurityProvisions) -> Self {
        self.security_provisions = provisions;
        self
    }

    pub fn with_catalogue(mut self, catalogue: ApplicationCatalogue) -> Self {
        self.catalogue = catalogue;
        self
    }

    /// The identifier is validated on construction; only the name needs checking here.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(GovernanceError::validation(format!(
                "application name cannot be empty (id: {})",
                self.id
            ))
            .into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Active,
    Deprecated,
    Retired,
    #[default]
    Planned,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Active => "active",
            ApplicationStatus::Deprecated => "deprecated",
            ApplicationStatus::Retired => "retired",
            ApplicationStatus::Planned => "planned",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ApplicationStatus::Active),
            "deprecated" => Ok(ApplicationStatus::Deprecated),
            "retired" => Ok(ApplicationStatus::Retired),
            "planned" => Ok(ApplicationStatus::Planned),
            _ => Err(format!(
                "Invalid application status: {}. Valid values: active, deprecated, retired, planned",
                s
            )),
        }
    }
}

/// Documented functionality of an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationCatalogue {
    pub functionality: Vec<Functionality>,
    /// `None` when the catalogue has never been maintained.
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Functionality {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub status: FunctionalityStatus,
}

impl Functionality {
    pub fn available(id: impl Into<String>, name: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            priority,
            status: FunctionalityStatus::Available,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionalityStatus {
    #[default]
    Available,
    Planned,
    Deprecated,
    Unavailable,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationInterface {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: InterfaceType,
    pub description: String,
    pub protocol: String,
    pub endpoint: String,
    pub status: InterfaceStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceType {
    #[default]
    Api,
    Database,
    File,
    Message,
    Ui,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceStatus {
    #[default]
    Active,
    Inactive,
    Testing,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationStandard {
    pub environment_variables: Vec<EnvironmentVariable>,
    pub configuration_files: Vec<ConfigurationFile>,
    pub security_settings: Vec<SecuritySetting>,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
    pub description: String,
    pub required: bool,
    pub sensitive: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationFile {
    pub path: String,
    pub format: String,
    pub description: String,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySetting {
    pub name: String,
    pub value: String,
    pub description: String,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_new_application_defaults() {
        let app = Application::new(ApplicationId::new("crm").unwrap(), "CRM", now()).unwrap();
        assert_eq!(app.status, ApplicationStatus::Planned);
        assert_eq!(app.created_at, now());
        assert_eq!(app.updated_at, now());
        assert!(app.governance_agreement_id.is_none());
        assert!(app.catalogue.last_updated.is_none());
    }

    #[test]
    fn test_new_application_blank_name() {
        let err = Application::new(ApplicationId::new("crm").unwrap(), "  ", now()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GovernanceError>(),
            Some(GovernanceError::Validation { .. })
        ));
    }

    #[test]
    fn test_builder_methods() {
        let app = Application::new(ApplicationId::new("erp").unwrap(), "ERP", now())
            .unwrap()
            .with_version("2.4.1")
            .with_status(ApplicationStatus::Active)
            .with_description("Enterprise resource planning");
        assert_eq!(app.version, "2.4.1");
        assert_eq!(app.status, ApplicationStatus::Active);
        assert_eq!(app.description, "Enterprise resource planning");
    }

    #[test]
    fn test_application_status_from_str() {
        assert_eq!(
            "Deprecated".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Deprecated
        );
        assert!("sunset".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_minimal_application_deserializes() {
        let json = r#"{
            "id": "hr",
            "name": "HR Portal",
            "status": "active",
            "created_at": "2024-01-15T00:00:00Z",
            "updated_at": "2025-12-01T00:00:00Z"
        }"#;
        let app: Application = serde_json::from_str(json).unwrap();
        assert_eq!(app.id.as_str(), "hr");
        assert_eq!(app.status, ApplicationStatus::Active);
        assert!(app.version.is_empty());
        assert!(app.interfaces.is_empty());
    }

    #[test]
    fn test_application_with_empty_id_fails_to_deserialize() {
        let json = r#"{
            "id": "",
            "name": "HR Portal",
            "created_at": "2024-01-15T00:00:00Z",
            "updated_at": "2025-12-01T00:00:00Z"
        }"#;
        assert!(serde_json::from_str::<Application>(json).is_err());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Critical > Priority::High);
        assert!(Priority::Medium > Priority::Low);
    }
}
