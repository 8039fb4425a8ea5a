use super::application::Application;
use super::ids::{ApplicationId, PortfolioId};
use super::monitoring::Kpi;
use crate::shared::{EntityKind, GovernanceError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, owned collection of application copies.
///
/// Members are snapshots taken when they were added. No two members share
/// an application ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationPortfolio {
    pub id: PortfolioId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub owner: String,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub kpis: Vec<Kpi>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationPortfolio {
    pub fn new(
        id: PortfolioId,
        name: impl Into<String>,
        description: impl Into<String>,
        owner: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let portfolio = Self {
            id,
            name: name.into(),
            description: description.into(),
            owner: owner.into(),
            applications: Vec::new(),
            kpis: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        portfolio.validate()?;
        Ok(portfolio)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(GovernanceError::validation(format!(
                "portfolio name cannot be empty (id: {})",
                self.id
            ))
            .into());
        }
        if self.owner.trim().is_empty() {
            return Err(GovernanceError::validation(format!(
                "portfolio owner cannot be empty (id: {})",
                self.id
            ))
            .into());
        }
        Ok(())
    }

    pub fn contains(&self, app_id: &ApplicationId) -> bool {
        self.applications.iter().any(|app| &app.id == app_id)
    }

    pub fn member(&self, app_id: &ApplicationId) -> Option<&Application> {
        self.applications.iter().find(|app| &app.id == app_id)
    }

    /// Appends a copy of `app`.
    ///
    /// # Errors
    /// `AlreadyExists` when a member with the same ID is present; the member
    /// list is left untouched.
    pub fn add_application(&mut self, app: Application, now: DateTime<Utc>) -> Result<()> {
        app.validate()?;
        if self.contains(&app.id) {
            return Err(GovernanceError::already_exists(EntityKind::PortfolioMember, &app.id).into());
        }
        self.applications.push(app);
        self.updated_at = now;
        Ok(())
    }

    /// Removes and returns the member copy.
    pub fn remove_application(
        &mut self,
        app_id: &ApplicationId,
        now: DateTime<Utc>,
    ) -> Result<Application> {
        let index = self
            .applications
            .iter()
            .position(|app| &app.id == app_id)
            .ok_or_else(|| GovernanceError::not_found(EntityKind::PortfolioMember, app_id))?;
        let removed = self.applications.remove(index);
        self.updated_at = now;
        Ok(removed)
    }

    /// Overwrites the member copy that shares `app.id`.
    pub fn replace_application(&mut self, app: Application, now: DateTime<Utc>) -> Result<()> {
        app.validate()?;
        let slot = self
            .applications
            .iter_mut()
            .find(|existing| existing.id == app.id)
            .ok_or_else(|| GovernanceError::not_found(EntityKind::PortfolioMember, &app.id))?;
        *slot = app;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::governance::domain::ApplicationStatus;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap()
    }

    fn app(id: &str) -> Application {
        Application::new(ApplicationId::new(id).unwrap(), id.to_uppercase(), now()).unwrap()
    }

    fn portfolio() -> ApplicationPortfolio {
        ApplicationPortfolio::new(
            PortfolioId::new("core").unwrap(),
            "Core Business",
            "Revenue critical systems",
            "CIO",
            now(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_portfolio_requires_owner() {
        let result = ApplicationPortfolio::new(PortfolioId::new("p").unwrap(), "P", "", " ", now());
        assert!(result.is_err());
    }

    #[test]
    fn test_add_application_duplicate_leaves_members_unchanged() {
        let mut portfolio = portfolio();
        portfolio.add_application(app("crm"), now()).unwrap();

        let err = portfolio.add_application(app("crm"), now()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GovernanceError>(),
            Some(GovernanceError::AlreadyExists { .. })
        ));
        assert_eq!(portfolio.applications.len(), 1);
    }

    #[test]
    fn test_remove_application() {
        let mut portfolio = portfolio();
        portfolio.add_application(app("crm"), now()).unwrap();
        portfolio.add_application(app("erp"), now()).unwrap();

        let removed = portfolio
            .remove_application(&ApplicationId::new("crm").unwrap(), now())
            .unwrap();

        assert_eq!(removed.id.as_str(), "crm");
        assert_eq!(portfolio.applications.len(), 1);
        assert_eq!(portfolio.applications[0].id.as_str(), "erp");
    }

    #[test]
    fn test_remove_missing_application() {
        let mut portfolio = portfolio();
        let err = portfolio
            .remove_application(&ApplicationId::new("ghost").unwrap(), now())
            .unwrap_err();
        assert!(err.downcast_ref::<GovernanceError>().unwrap().is_not_found());
    }

    #[test]
    fn test_replace_application_updates_copy() {
        let mut portfolio = portfolio();
        portfolio.add_application(app("crm"), now()).unwrap();

        let updated = app("crm").with_status(ApplicationStatus::Deprecated);
        portfolio.replace_application(updated, now()).unwrap();

        assert_eq!(portfolio.applications[0].status, ApplicationStatus::Deprecated);
    }
}
